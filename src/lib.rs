//! # lyrsync
//!
//! Time-synchronization engine for lyric videos — parse timestamped
//! subtitle tracks, resolve the active line for any playback position, and
//! correlate an independently-timed translation track into one coherent
//! per-instant display state.
//!
//! The engine is the reusable core of a lyric-video generator: the page
//! layout, upload plumbing, and the video encoder itself are external
//! collaborators. Everything here is pure and allocation-light, cheap
//! enough to call once per UI tick or once per rendered output frame.
//!
//! ## Quick Start
//!
//! ### Parse a Track and Resolve the Active Line
//!
//! ```
//! use lyrsync::parse_srt;
//!
//! let timeline = parse_srt(
//!     "1\n00:00:01,000 --> 00:00:04,000\nFirst line\n\n\
//!      2\n00:00:05,500 --> 00:00:08,000\nSecond line\n",
//!     30,
//! );
//!
//! assert_eq!(timeline.active_at_time(2.0), Some(0));
//! assert_eq!(timeline.active_at_frame(180), Some(1));
//! ```
//!
//! ### Per-Instant Display State
//!
//! ```
//! use lyrsync::{parse_srt, snapshot, DisplayQuery, OverlapStrategy};
//!
//! let main = parse_srt("1\n00:00:01,000 --> 00:00:04,000\n안녕하세요\n", 30);
//! let sub = parse_srt("1\n00:00:01,000 --> 00:00:04,000\nHello\n", 30);
//!
//! let state = snapshot(
//!     &main,
//!     Some(&sub),
//!     DisplayQuery::Time(2.0),
//!     3,
//!     OverlapStrategy::Containment,
//! );
//! assert!(state.translation.is_some());
//! ```
//!
//! ### Offline Cue Export
//!
//! ```
//! use lyrsync::{parse_srt, write_cue_sheet, CueOptions};
//!
//! let main = parse_srt("1\n00:00:00,000 --> 00:00:01,000\nHello\n", 30);
//! let mut sheet = Vec::new();
//! let written = write_cue_sheet(&mut sheet, &main, None, 30, 30, &CueOptions::new())?;
//! assert_eq!(written, 30);
//! # Ok::<(), lyrsync::LyrsyncError>(())
//! ```
//!
//! ## Features
//!
//! - **SRT parsing** — best-effort, byte-compatible with hand-edited
//!   files in the wild; malformed blocks are dropped, never fatal
//! - **Dual-domain resolver** — continuous seconds for interactive
//!   preview, integer frames for deterministic offline rendering, one
//!   algorithm for both
//! - **Gap persistence** — the previous line stays active through silent
//!   gaps, so the display never goes blank mid-song
//! - **Track correlation** — containment or minimum-overlap matching of
//!   an independently-timed translation track
//! - **Language-aware suppression** — redundant same-language captions
//!   are suppressed via an ASCII-ratio heuristic
//! - **Windowing** — bounded neighborhoods of lines for scrolling display
//! - **Cue export** — lazy per-frame iterator and JSON cue sheets with
//!   progress callbacks and cooperative cancellation
//! - **Render plans** — serialized job descriptions for an external
//!   renderer, palette and settings included
//! - **Validation** — inspect a parsed track for timing oddities before
//!   rendering

pub mod correlate;
pub mod cue;
pub mod display;
pub mod error;
pub mod language;
pub mod palette;
pub mod progress;
pub mod settings;
pub mod srt;
pub mod timecode;
pub mod timeline;
pub mod validate;

pub use correlate::{
    find_translation_at_frame, find_translation_at_time, find_translation_overlapping,
    resolve_translation, should_show_subtitle, OverlapStrategy, DEFAULT_MIN_OVERLAP,
};
pub use cue::{write_cue_sheet, CueIterator, CueOptions, FrameCue, RenderPlan};
pub use display::{snapshot, DisplayQuery, DisplaySnapshot};
pub use error::LyrsyncError;
pub use language::{contains_hangul, is_target_language_text};
pub use palette::Palette;
pub use progress::{CancellationToken, ProgressCallback, ProgressInfo};
pub use settings::VideoSettings;
pub use srt::{load_srt, parse_srt};
pub use timecode::{
    duration_in_frames, format_srt_timestamp, format_time, frames_to_seconds, frames_to_timecode,
    seconds_to_frames,
};
pub use timeline::{LyricLine, LyricTimeline, TimingMetrics, WindowSlot};
pub use validate::{validate_timeline, TimelineReport};
