//! Lyric timelines and the active-line resolver.
//!
//! A [`LyricTimeline`] is the normalized, time-sorted collection of
//! [`LyricLine`] entries parsed from one subtitle track. It answers the
//! question "which line is active right now?" for any playback position —
//! a continuous time in seconds for interactive preview and scrubbing, or
//! a discrete frame number for deterministic offline rendering.
//!
//! Every lookup is a pure function of the timeline and the query value; no
//! cursor is kept between calls, so seeking backward, replacing a track, or
//! querying from multiple loops needs no coordination.
//!
//! # Example
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
//! // Gap between the two lines keeps the previous one active.
//! assert_eq!(timeline.active_at_time(4.5), Some(0));
//! assert_eq!(timeline.active_at_frame(200), Some(1));
//! // Before the first line there is nothing to display.
//! assert_eq!(timeline.active_at_time(0.2), None);
//! ```

use serde::{Deserialize, Serialize};

/// One timed subtitle entry.
///
/// Carries the interval in both time domains: seconds (double precision, as
/// written in the source file) and frame numbers derived at parse time with
/// `round(seconds * fps)`. Storing both up front lets the resolver run the
/// same algorithm in either domain without conversion drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    /// Sequence index from the source file. Source-file order, not
    /// necessarily display order.
    pub id: i64,
    /// When this line starts displaying, in seconds.
    pub start_time: f64,
    /// When this line stops displaying, in seconds.
    pub end_time: f64,
    /// Start of the display interval as a frame number.
    pub start_frame: i64,
    /// End of the display interval as a frame number.
    pub end_frame: i64,
    /// The text content. May contain embedded newlines.
    pub text: String,
}

impl LyricLine {
    /// Display duration in seconds.
    ///
    /// Negative for inverted intervals — the parser passes those through
    /// untouched (see [`validate_timeline`](crate::validate_timeline)).
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// One entry of a display window, annotated with its offset from the
/// active entry.
///
/// Produced by [`LyricTimeline::window_around`]. The active entry has
/// `offset == 0`; entries before it have negative offsets.
#[derive(Debug, Clone, Copy)]
pub struct WindowSlot<'a> {
    /// Position of this entry in the timeline.
    pub index: usize,
    /// `index` minus the active index.
    pub offset: isize,
    /// The entry itself.
    pub line: &'a LyricLine,
}

/// Aggregate timing statistics for a timeline.
///
/// Produced by [`LyricTimeline::timing_metrics`]; feeds the validation
/// report and the CLI `inspect` output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingMetrics {
    /// Mean line duration in seconds.
    pub average_duration: f64,
    /// Shortest line duration in seconds.
    pub min_duration: f64,
    /// Longest line duration in seconds.
    pub max_duration: f64,
    /// Mean silent gap between consecutive lines, in seconds. Overlapping
    /// neighbors contribute a gap of zero.
    pub average_gap: f64,
}

/// The full sorted set of lyric lines parsed from one subtitle track.
///
/// Immutable once constructed — a re-uploaded or edited track is parsed
/// into a fresh timeline rather than mutated in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LyricTimeline {
    /// Entries sorted ascending by start time.
    pub lines: Vec<LyricLine>,
    /// Maximum end time across all entries, in seconds.
    pub duration: f64,
}

impl LyricTimeline {
    /// Build a timeline from parsed lines.
    ///
    /// Sorts the lines ascending by start time (stable — entries with equal
    /// start times keep their input order) and derives the total duration
    /// as the maximum end time observed.
    pub fn from_lines(mut lines: Vec<LyricLine>) -> Self {
        lines.sort_by(|a, b| {
            a.start_time
                .partial_cmp(&b.start_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let duration = lines.iter().fold(0.0_f64, |max, line| max.max(line.end_time));
        Self { lines, duration }
    }

    /// Number of lines in the timeline.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the timeline has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    /// The last line in sort order, if any.
    pub fn last(&self) -> Option<&LyricLine> {
        self.lines.last()
    }

    /// Iterate over the lines in sort order.
    pub fn iter(&self) -> std::slice::Iter<'_, LyricLine> {
        self.lines.iter()
    }

    /// Index of the line active at `time` seconds, or `None` if the query
    /// precedes the first line.
    ///
    /// Membership is half-open: a line is active for `start <= time < end`.
    /// When the query falls in a gap between lines, the previously active
    /// line stays active until the next one begins — lyric display should
    /// never go blank between two timed lines. A query past every line's
    /// end returns the last line.
    ///
    /// When intervals overlap, the first match in sort order wins.
    pub fn active_at_time(&self, time: f64) -> Option<usize> {
        self.active_index(time, |line| (line.start_time, line.end_time))
    }

    /// Index of the line active at `frame`, or `None` if the query
    /// precedes the first line.
    ///
    /// Same policy as [`active_at_time`](LyricTimeline::active_at_time),
    /// evaluated on the derived frame numbers. Used by frame-accurate
    /// offline rendering where every output frame queries once.
    pub fn active_at_frame(&self, frame: i64) -> Option<usize> {
        self.active_index(frame, |line| (line.start_frame, line.end_frame))
    }

    /// One resolver, parameterized over the comparison domain. Keeping a
    /// single scan avoids drift between the time and frame variants.
    fn active_index<T, F>(&self, query: T, bounds: F) -> Option<usize>
    where
        T: PartialOrd + Copy,
        F: Fn(&LyricLine) -> (T, T),
    {
        for (index, line) in self.lines.iter().enumerate() {
            let (start, end) = bounds(line);
            if query >= start && query < end {
                return Some(index);
            }
        }

        // Between lines: keep the line that just ended active through
        // the gap.
        for (index, line) in self.lines.iter().enumerate() {
            let (start, _) = bounds(line);
            if query < start {
                return index.checked_sub(1);
            }
        }

        // Past all lines.
        self.lines.len().checked_sub(1)
    }

    /// The bounded neighborhood of lines a consumer should render.
    ///
    /// Returns the lines from `active - radius` to `active + radius`
    /// inclusive, clamped to the timeline bounds and annotated with their
    /// offset from the active line. With `active == None` the window
    /// anchors just before the first line, so the upcoming `radius` lines
    /// appear with positive offsets.
    ///
    /// # Example
    ///
    /// ```
    /// use lyrsync::parse_srt;
    ///
    /// let timeline = parse_srt(
    ///     "1\n00:00:00,000 --> 00:00:01,000\nA\n\n\
    ///      2\n00:00:01,000 --> 00:00:02,000\nB\n\n\
    ///      3\n00:00:02,000 --> 00:00:03,000\nC\n",
    ///     30,
    /// );
    ///
    /// let window = timeline.window_around(Some(1), 1);
    /// let offsets: Vec<isize> = window.iter().map(|slot| slot.offset).collect();
    /// assert_eq!(offsets, vec![-1, 0, 1]);
    /// ```
    pub fn window_around(&self, active: Option<usize>, radius: usize) -> Vec<WindowSlot<'_>> {
        let anchor = match active {
            Some(index) => index as isize,
            None => -1,
        };

        let start = (anchor - radius as isize).max(0) as usize;
        let end = ((anchor + radius as isize + 1).max(0) as usize).min(self.lines.len());

        (start..end)
            .map(|index| WindowSlot {
                index,
                offset: index as isize - anchor,
                line: &self.lines[index],
            })
            .collect()
    }

    /// Aggregate timing statistics, or `None` for an empty timeline.
    pub fn timing_metrics(&self) -> Option<TimingMetrics> {
        let first = self.lines.first()?;

        let mut min_duration = first.duration();
        let mut max_duration = first.duration();
        let mut total_duration = 0.0;
        for line in &self.lines {
            let duration = line.duration();
            min_duration = min_duration.min(duration);
            max_duration = max_duration.max(duration);
            total_duration += duration;
        }

        let mut total_gap = 0.0;
        for pair in self.lines.windows(2) {
            total_gap += (pair[1].start_time - pair[0].end_time).max(0.0);
        }
        let gap_count = self.lines.len().saturating_sub(1);

        Some(TimingMetrics {
            average_duration: total_duration / self.lines.len() as f64,
            min_duration,
            max_duration,
            average_gap: if gap_count > 0 {
                total_gap / gap_count as f64
            } else {
                0.0
            },
        })
    }
}
