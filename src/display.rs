//! Per-instant display state.
//!
//! [`snapshot`] is the single entry point a render loop calls once per UI
//! tick or once per output frame: it resolves the active primary line,
//! builds the bounded window of neighboring lines, and correlates the
//! translation track — one coherent state for one instant. It is pure and
//! cheap (one linear scan per track, one window allocation bounded by
//! `2 * radius + 1`), so calling it tens of thousands of times across a
//! multi-minute render needs no memoization.
//!
//! # Example
//!
//! ```
//! use lyrsync::{parse_srt, snapshot, DisplayQuery, OverlapStrategy};
//!
//! let main = parse_srt(
//!     "1\n00:00:01,000 --> 00:00:04,000\n안녕하세요\n\n\
//!      2\n00:00:05,500 --> 00:00:08,000\n사랑해요\n",
//!     30,
//! );
//! let sub = parse_srt("1\n00:00:01,000 --> 00:00:04,000\nHello\n", 30);
//!
//! let state = snapshot(
//!     &main,
//!     Some(&sub),
//!     DisplayQuery::Time(2.0),
//!     3,
//!     OverlapStrategy::Containment,
//! );
//!
//! assert_eq!(state.active, Some(0));
//! assert_eq!(state.translation.map(|line| line.text.as_str()), Some("Hello"));
//! assert_eq!(state.window.len(), 2);
//! ```

use crate::correlate::{resolve_translation, OverlapStrategy};
use crate::timeline::{LyricLine, LyricTimeline, WindowSlot};

/// The single scalar a caller holds per lookup: a continuous playback time
/// or a discrete output frame number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayQuery {
    /// Playback position in seconds (interactive preview, scrubbing).
    Time(f64),
    /// Output frame number (deterministic offline rendering).
    Frame(i64),
}

/// Everything a renderer needs for one instant.
#[derive(Debug, Clone)]
pub struct DisplaySnapshot<'a> {
    /// Index of the active primary line, or `None` before the first line.
    pub active: Option<usize>,
    /// The bounded neighborhood of primary lines to render, annotated
    /// with offsets from the active line.
    pub window: Vec<WindowSlot<'a>>,
    /// The translation line to overlay under the active line, if any
    /// survived the suppression rule.
    pub translation: Option<&'a LyricLine>,
}

/// Compute the full display state for one instant.
///
/// `sub` is the optional translation track; without it `translation` is
/// always `None`. `radius` bounds the window to that many lines on each
/// side of the active one.
pub fn snapshot<'a>(
    main: &'a LyricTimeline,
    sub: Option<&'a LyricTimeline>,
    query: DisplayQuery,
    radius: usize,
    strategy: OverlapStrategy,
) -> DisplaySnapshot<'a> {
    let active = match query {
        DisplayQuery::Time(time) => main.active_at_time(time),
        DisplayQuery::Frame(frame) => main.active_at_frame(frame),
    };

    let translation = match (active, sub) {
        (Some(index), Some(sub)) => resolve_translation(&main.lines[index], sub, query, strategy),
        _ => None,
    };

    DisplaySnapshot {
        active,
        window: main.window_around(active, radius),
        translation,
    }
}
