//! Render settings.
//!
//! [`VideoSettings`] carries the output parameters a render plan needs:
//! font size, background blur, frame rate, and output dimensions. Values
//! are clamped to the ranges the renderer supports.

use serde::{Deserialize, Serialize};

/// Output settings for a lyric video render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    /// Lyric font size in pixels (16–48).
    pub font_size: u32,
    /// Background blur intensity (20–120).
    pub blur_intensity: u32,
    /// Output frame rate, typically 30 or 60.
    pub fps: u32,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            font_size: 36,
            blur_intensity: 80,
            fps: 30,
            width: 1920,
            height: 1080,
        }
    }
}

impl VideoSettings {
    /// Create settings with the defaults (36 px font, blur 80, 30 fps,
    /// 1920×1080).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size, clamped to 16–48.
    #[must_use]
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size.clamp(16, 48);
        self
    }

    /// Set the blur intensity, clamped to 20–120.
    #[must_use]
    pub fn with_blur_intensity(mut self, blur_intensity: u32) -> Self {
        self.blur_intensity = blur_intensity.clamp(20, 120);
        self
    }

    /// Set the frame rate. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// Set the output dimensions. Both clamped to a minimum of 1.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_ranges() {
        let settings = VideoSettings::new()
            .with_font_size(100)
            .with_blur_intensity(5)
            .with_fps(0)
            .with_dimensions(0, 720);

        assert_eq!(settings.font_size, 48);
        assert_eq!(settings.blur_intensity, 20);
        assert_eq!(settings.fps, 1);
        assert_eq!(settings.width, 1);
        assert_eq!(settings.height, 720);
    }

    #[test]
    fn defaults_match_renderer_expectations() {
        let settings = VideoSettings::default();
        assert_eq!(settings.font_size, 36);
        assert_eq!(settings.fps, 30);
        assert_eq!((settings.width, settings.height), (1920, 1080));
    }
}
