//! Correlation between the primary track and a translation track.
//!
//! The two subtitle tracks of a lyric video are timed independently — the
//! translation file rarely has frame-identical cue boundaries. This module
//! finds the translation entry that belongs to the current playback
//! instant and decides, via the language heuristic, whether it should be
//! surfaced at all.
//!
//! # Example
//!
//! ```
//! use lyrsync::{parse_srt, resolve_translation, DisplayQuery, OverlapStrategy};
//!
//! let primary = parse_srt("1\n00:00:01,000 --> 00:00:04,000\n안녕하세요\n", 30);
//! let translation = parse_srt("1\n00:00:01,000 --> 00:00:04,000\nHello\n", 30);
//!
//! let found = resolve_translation(
//!     &primary.lines[0],
//!     &translation,
//!     DisplayQuery::Time(2.0),
//!     OverlapStrategy::Containment,
//! );
//! assert_eq!(found.map(|line| line.text.as_str()), Some("Hello"));
//! ```

use serde::{Deserialize, Serialize};

use crate::display::DisplayQuery;
use crate::language::is_target_language_text;
use crate::timeline::{LyricLine, LyricTimeline};

/// Minimum overlap, in seconds, for [`OverlapStrategy::PrimaryOverlap`] to
/// accept a translation candidate.
pub const DEFAULT_MIN_OVERLAP: f64 = 0.1;

/// How a translation entry is matched to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapStrategy {
    /// The translation entry's `[start, end)` interval must contain the
    /// query instant. This is the default, matching live preview behavior.
    #[default]
    Containment,
    /// The translation entry must overlap the **primary line's own**
    /// interval by more than `min_overlap` seconds. Use this when the two
    /// tracks are not frame-identical, so a translation line that only
    /// marginally grazes the primary's window is not matched.
    PrimaryOverlap {
        /// Required overlap duration in seconds.
        min_overlap: f64,
    },
}

impl OverlapStrategy {
    /// The strict variant with the default 0.1 s threshold.
    pub fn primary_overlap() -> Self {
        OverlapStrategy::PrimaryOverlap {
            min_overlap: DEFAULT_MIN_OVERLAP,
        }
    }
}

/// First translation entry in sort order whose interval contains `time`.
pub fn find_translation_at_time(sub: &LyricTimeline, time: f64) -> Option<&LyricLine> {
    sub.iter()
        .find(|line| time >= line.start_time && time < line.end_time)
}

/// First translation entry in sort order whose frame interval contains
/// `frame`.
pub fn find_translation_at_frame(sub: &LyricTimeline, frame: i64) -> Option<&LyricLine> {
    sub.iter()
        .find(|line| frame >= line.start_frame && frame < line.end_frame)
}

/// First translation entry in sort order overlapping the primary line's
/// interval by more than `min_overlap` seconds.
pub fn find_translation_overlapping<'a>(
    primary: &LyricLine,
    sub: &'a LyricTimeline,
    min_overlap: f64,
) -> Option<&'a LyricLine> {
    sub.iter().find(|line| {
        let overlap =
            line.end_time.min(primary.end_time) - line.start_time.max(primary.start_time);
        overlap > min_overlap
    })
}

/// Decide whether a translation caption should be surfaced.
///
/// Suppressed when no candidate exists, and when the primary text is
/// already classified as target-language — the caption would be redundant.
///
/// # Example
///
/// ```
/// use lyrsync::should_show_subtitle;
///
/// assert!(should_show_subtitle("안녕하세요", Some("Hello")));
/// assert!(!should_show_subtitle("Hello world", Some("안녕")));
/// assert!(!should_show_subtitle("안녕하세요", None));
/// ```
pub fn should_show_subtitle(primary_text: &str, translation: Option<&str>) -> bool {
    if translation.is_none() {
        return false;
    }
    !is_target_language_text(primary_text)
}

/// The per-tick correlation call: find the translation entry for the
/// current instant and apply the suppression rule.
///
/// Returns the translation line to overlay, or `None` when nothing
/// matches or the primary line needs no translation.
pub fn resolve_translation<'a>(
    primary: &LyricLine,
    sub: &'a LyricTimeline,
    query: DisplayQuery,
    strategy: OverlapStrategy,
) -> Option<&'a LyricLine> {
    let candidate = match strategy {
        OverlapStrategy::Containment => match query {
            DisplayQuery::Time(time) => find_translation_at_time(sub, time),
            DisplayQuery::Frame(frame) => find_translation_at_frame(sub, frame),
        },
        OverlapStrategy::PrimaryOverlap { min_overlap } => {
            find_translation_overlapping(primary, sub, min_overlap)
        }
    };

    if should_show_subtitle(&primary.text, candidate.map(|line| line.text.as_str())) {
        candidate
    } else {
        None
    }
}
