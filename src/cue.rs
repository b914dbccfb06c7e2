//! Offline per-frame walk and render-plan assembly.
//!
//! Frame-accurate offline rendering queries the engine once per output
//! frame. [`CueIterator`] is the lazy, pull-based form of that walk: each
//! call to [`next()`](Iterator::next) computes the display snapshot for
//! the next frame and nothing else. [`write_cue_sheet`] drives the walk to
//! completion and serializes one JSON record per frame, with progress
//! callbacks and cooperative cancellation. [`RenderPlan`] bundles
//! everything an external renderer needs for one job.
//!
//! # Example
//!
//! ```
//! use lyrsync::{parse_srt, CueIterator, CueOptions};
//!
//! let main = parse_srt("1\n00:00:00,000 --> 00:00:01,000\nHello\n", 30);
//! let options = CueOptions::new().with_radius(2);
//!
//! let cues = CueIterator::new(&main, None, 30, 30, &options)?;
//! for cue in cues {
//!     assert_eq!(cue.snapshot.active, Some(0));
//! }
//! # Ok::<(), lyrsync::LyrsyncError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::correlate::OverlapStrategy;
use crate::display::{snapshot, DisplayQuery, DisplaySnapshot};
use crate::error::LyrsyncError;
use crate::palette::Palette;
use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback, ProgressTracker};
use crate::settings::VideoSettings;
use crate::timecode::{duration_in_frames, frames_to_seconds};
use crate::timeline::LyricTimeline;

/// Options for the per-frame cue walk.
///
/// Carries progress-, cancellation-, and tuning-related settings without
/// polluting every function signature. A default-constructed value walks
/// every frame with a window radius of 3 and the containment strategy.
#[derive(Clone)]
pub struct CueOptions {
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) cancellation: Option<CancellationToken>,
    /// How often to fire the progress callback (every N frames).
    pub(crate) batch_size: u64,
    /// Emit a cue every N frames. 1 means every frame.
    pub(crate) stride: i64,
    /// Window radius around the active line.
    pub(crate) radius: usize,
    /// How translation entries are matched.
    pub(crate) strategy: OverlapStrategy,
}

impl Debug for CueOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CueOptions")
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .field("stride", &self.stride)
            .field("radius", &self.radius)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl Default for CueOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CueOptions {
    /// Create options with default settings.
    ///
    /// Defaults: no progress callback, no cancellation, batch size 30,
    /// stride 1, radius 3, containment matching.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 30,
            stride: 1,
            radius: 3,
            strategy: OverlapStrategy::Containment,
        }
    }

    /// Attach a progress callback.
    ///
    /// The callback is invoked every
    /// [`batch_size`](CueOptions::with_batch_size) frames during the walk.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled, the walk stops and returns
    /// [`LyrsyncError::Cancelled`].
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum
    /// of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Emit a cue only every `stride` frames. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_stride(mut self, stride: i64) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Set the window radius around the active line.
    #[must_use]
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Set the translation matching strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: OverlapStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

/// The display state for one output frame.
#[derive(Debug, Clone)]
pub struct FrameCue<'a> {
    /// The output frame number.
    pub frame: i64,
    /// The frame's playback time in seconds.
    pub time: f64,
    /// The resolved display state at this frame.
    pub snapshot: DisplaySnapshot<'a>,
}

/// A lazy iterator over per-frame display states.
///
/// Each call to [`next()`](Iterator::next) resolves one output frame —
/// nothing is precomputed or buffered, so walking a multi-minute video
/// allocates only the window of each yielded cue.
///
/// Created via [`CueIterator::new`].
pub struct CueIterator<'a> {
    main: &'a LyricTimeline,
    sub: Option<&'a LyricTimeline>,
    fps: u32,
    total_frames: i64,
    next_frame: i64,
    stride: i64,
    radius: usize,
    strategy: OverlapStrategy,
}

impl<'a> CueIterator<'a> {
    /// Create an iterator over frames `0..total_frames`, stepping by the
    /// options' stride.
    ///
    /// # Errors
    ///
    /// [`LyrsyncError::InvalidFrameRate`] if `fps` is zero.
    pub fn new(
        main: &'a LyricTimeline,
        sub: Option<&'a LyricTimeline>,
        fps: u32,
        total_frames: i64,
        options: &CueOptions,
    ) -> Result<Self, LyrsyncError> {
        if fps == 0 {
            return Err(LyrsyncError::InvalidFrameRate { fps });
        }

        Ok(Self {
            main,
            sub,
            fps,
            total_frames,
            next_frame: 0,
            stride: options.stride.max(1),
            radius: options.radius,
            strategy: options.strategy,
        })
    }

    /// Number of cues this iterator will yield in total.
    pub fn cue_count(&self) -> u64 {
        if self.total_frames <= 0 {
            return 0;
        }
        (self.total_frames as u64).div_ceil(self.stride as u64)
    }
}

impl<'a> Iterator for CueIterator<'a> {
    type Item = FrameCue<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_frame >= self.total_frames {
            return None;
        }

        let frame = self.next_frame;
        self.next_frame += self.stride;

        Some(FrameCue {
            frame,
            time: frames_to_seconds(frame, self.fps),
            snapshot: snapshot(
                self.main,
                self.sub,
                DisplayQuery::Frame(frame),
                self.radius,
                self.strategy,
            ),
        })
    }
}

/// One record of a serialized cue sheet.
#[derive(Serialize)]
struct CueRecord<'a> {
    frame: i64,
    time: f64,
    active: Option<usize>,
    line: Option<&'a str>,
    translation: Option<&'a str>,
}

/// Walk every output frame and write a JSON cue-sheet array.
///
/// Each record carries the frame number, its playback time, the active
/// line index, the active line's text, and the translation text if one
/// survived suppression. Progress fires per batch; cancellation is
/// checked before every frame.
///
/// Returns the number of cues written.
///
/// # Errors
///
/// - [`LyrsyncError::InvalidFrameRate`] if `fps` is zero.
/// - [`LyrsyncError::Cancelled`] if the token fires mid-walk.
/// - [`LyrsyncError::Io`] on write failure.
pub fn write_cue_sheet<W: Write>(
    writer: &mut W,
    main: &LyricTimeline,
    sub: Option<&LyricTimeline>,
    fps: u32,
    total_frames: i64,
    options: &CueOptions,
) -> Result<u64, LyrsyncError> {
    let cues = CueIterator::new(main, sub, fps, total_frames, options)?;
    let mut tracker = ProgressTracker::new(
        Arc::clone(&options.progress),
        Some(cues.cue_count()),
        options.batch_size,
    );

    writer.write_all(b"[")?;
    let mut written = 0_u64;

    for cue in cues {
        if options.is_cancelled() {
            log::debug!("Cue export cancelled at frame {}", cue.frame);
            return Err(LyrsyncError::Cancelled);
        }

        if written > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(b"\n")?;

        let record = CueRecord {
            frame: cue.frame,
            time: cue.time,
            active: cue.snapshot.active,
            line: cue
                .snapshot
                .active
                .and_then(|index| main.get(index))
                .map(|line| line.text.as_str()),
            translation: cue.snapshot.translation.map(|line| line.text.as_str()),
        };
        serde_json::to_writer(&mut *writer, &record)?;

        written += 1;
        tracker.advance(Some(cue.frame), Some(cue.time));
    }

    writer.write_all(b"\n]\n")?;
    tracker.finish();

    log::debug!("Wrote {written} cue(s) across {total_frames} frame(s)");
    Ok(written)
}

/// Everything an external renderer needs for one job.
///
/// Serializable so the orchestration layer can hand it to a rendering
/// worker as JSON. The palette is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// The primary lyric track.
    pub main: LyricTimeline,
    /// The optional translation track.
    pub sub: Option<LyricTimeline>,
    /// Cover-art colors for the renderer.
    pub palette: Palette,
    /// Output settings.
    pub settings: VideoSettings,
    /// Total output frames, `ceil(duration * fps)`.
    pub duration_in_frames: i64,
}

impl RenderPlan {
    /// Assemble a render plan.
    ///
    /// The video duration comes from `audio_duration` when supplied (the
    /// audio track outlives the last lyric line in most songs), otherwise
    /// from the primary timeline's duration.
    ///
    /// # Errors
    ///
    /// - [`LyrsyncError::InvalidFrameRate`] if the settings carry a zero
    ///   frame rate.
    /// - [`LyrsyncError::EmptyPlan`] if no duration source exists: no
    ///   audio duration and no timed lines.
    pub fn new(
        main: LyricTimeline,
        sub: Option<LyricTimeline>,
        palette: Palette,
        settings: VideoSettings,
        audio_duration: Option<f64>,
    ) -> Result<Self, LyrsyncError> {
        if settings.fps == 0 {
            return Err(LyrsyncError::InvalidFrameRate { fps: settings.fps });
        }

        let duration = audio_duration.unwrap_or(main.duration);
        if duration <= 0.0 {
            return Err(LyrsyncError::EmptyPlan);
        }

        Ok(Self {
            duration_in_frames: duration_in_frames(duration, settings.fps),
            main,
            sub,
            palette,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_srt;

    const MAIN: &str = "1\n00:00:00,000 --> 00:00:02,000\n안녕\n\n\
                        2\n00:00:02,000 --> 00:00:04,000\n사랑\n";

    #[test]
    fn cue_iterator_walks_with_stride() {
        let main = parse_srt(MAIN, 30);
        let options = CueOptions::new().with_stride(30);

        let cues = CueIterator::new(&main, None, 30, 120, &options).unwrap();
        assert_eq!(cues.cue_count(), 4);

        let frames: Vec<i64> = cues.map(|cue| cue.frame).collect();
        assert_eq!(frames, vec![0, 30, 60, 90]);
    }

    #[test]
    fn cue_iterator_rejects_zero_fps() {
        let main = parse_srt(MAIN, 30);
        let result = CueIterator::new(&main, None, 0, 120, &CueOptions::new());
        assert!(matches!(
            result,
            Err(LyrsyncError::InvalidFrameRate { fps: 0 })
        ));
    }

    #[test]
    fn render_plan_prefers_audio_duration() {
        let main = parse_srt(MAIN, 30);
        let plan = RenderPlan::new(
            main.clone(),
            None,
            Palette::fallback(),
            VideoSettings::default(),
            Some(10.5),
        )
        .unwrap();
        assert_eq!(plan.duration_in_frames, 315);

        let from_lyrics =
            RenderPlan::new(main, None, Palette::fallback(), VideoSettings::default(), None)
                .unwrap();
        assert_eq!(from_lyrics.duration_in_frames, 120);
    }

    #[test]
    fn render_plan_without_duration_source_fails() {
        let empty = LyricTimeline::default();
        let result = RenderPlan::new(
            empty,
            None,
            Palette::fallback(),
            VideoSettings::default(),
            None,
        );
        assert!(matches!(result, Err(LyrsyncError::EmptyPlan)));
    }
}
