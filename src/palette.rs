//! Cover-art color palette passthrough.
//!
//! The palette is produced by an external color-extraction collaborator
//! and carried through to the renderer untouched — the synchronization
//! engine never analyzes it.

use serde::{Deserialize, Serialize};

/// Colors extracted from the cover image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Dominant color as a hex string.
    pub dominant: String,
    /// Ordered accent colors.
    pub palette: Vec<String>,
    /// Most vibrant color, used for translation captions.
    pub vibrant: String,
    /// Whether the dominant color is dark.
    pub is_dark: bool,
}

impl Palette {
    /// The palette used when extraction fails or no cover art is supplied.
    pub fn fallback() -> Self {
        Self {
            dominant: "#1a1a1a".to_string(),
            palette: vec![
                "#fa2d48".to_string(),
                "#fc3c5c".to_string(),
                "#ff6b7a".to_string(),
                "#4a4a4a".to_string(),
            ],
            vibrant: "#fa2d48".to_string(),
            is_dark: true,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::fallback()
    }
}
