//! Timeline diagnostics.
//!
//! [`validate_timeline`] inspects a parsed [`LyricTimeline`] and returns a
//! [`TimelineReport`] describing its structure and any timing oddities.
//! This is diagnostics only — parsing stays best-effort and nothing here
//! corrects the data. Inverted intervals, for example, are surfaced as
//! warnings but passed through to the resolver untouched.
//!
//! # Example
//!
//! ```
//! use lyrsync::{parse_srt, validate_timeline};
//!
//! let timeline = parse_srt("1\n00:00:01,000 --> 00:00:04,000\nHello\n", 30);
//! let report = validate_timeline(&timeline, 30);
//! if report.is_valid() {
//!     println!("Track looks usable");
//! } else {
//!     for error in &report.errors {
//!         println!("Error: {error}");
//!     }
//! }
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::timecode::format_time;
use crate::timeline::LyricTimeline;

/// Gaps longer than this, in seconds, are flagged — the previous line
/// stays frozen on screen the whole time.
const LONG_GAP_SECONDS: f64 = 10.0;

/// Summary of timeline validation.
///
/// Produced by [`validate_timeline`]. Contains lists of informational
/// notices, warnings, and errors found during validation.
#[derive(Debug, Clone, Default)]
pub struct TimelineReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Non-fatal issues that may affect display quality.
    pub warnings: Vec<String>,
    /// Fatal issues that make the track unusable.
    pub errors: Vec<String>,
}

impl TimelineReport {
    /// Returns `true` if no errors were found.
    ///
    /// Warnings do not affect this result — only errors make the report
    /// invalid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of issues (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for TimelineReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Run validation checks on a parsed timeline.
pub fn validate_timeline(timeline: &LyricTimeline, fps: u32) -> TimelineReport {
    let mut report = TimelineReport::default();

    if timeline.is_empty() {
        report
            .errors
            .push("Track contains no usable subtitle blocks".to_string());
        return report;
    }

    report.info.push(format!(
        "Track: {} line(s), {} long @ {} fps",
        timeline.len(),
        format_time(timeline.duration),
        fps,
    ));

    if let Some(metrics) = timeline.timing_metrics() {
        report.info.push(format!(
            "Line durations: avg {:.2}s, min {:.2}s, max {:.2}s; avg gap {:.2}s",
            metrics.average_duration,
            metrics.min_duration,
            metrics.max_duration,
            metrics.average_gap,
        ));
    }

    for line in timeline.iter() {
        if line.end_time < line.start_time {
            report.warnings.push(format!(
                "Line {} has an inverted interval ({:.3}s -> {:.3}s); it can never become active by containment",
                line.id, line.start_time, line.end_time,
            ));
        } else if line.end_time == line.start_time {
            report.warnings.push(format!(
                "Line {} has a zero-width interval at {:.3}s",
                line.id, line.start_time,
            ));
        }
    }

    for pair in timeline.lines.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        if current.start_time < previous.end_time {
            report.warnings.push(format!(
                "Lines {} and {} overlap by {:.3}s; the earlier line wins while both are live",
                previous.id,
                current.id,
                previous.end_time - current.start_time,
            ));
        }

        let gap = current.start_time - previous.end_time;
        if gap > LONG_GAP_SECONDS {
            report.warnings.push(format!(
                "Silent gap of {:.1}s between lines {} and {}; line {} stays on screen throughout",
                gap, previous.id, current.id, previous.id,
            ));
        }

        if current.id < previous.id {
            report.warnings.push(format!(
                "Source indices out of order: line {} starts after line {}",
                current.id, previous.id,
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_srt;

    #[test]
    fn clean_track_has_no_warnings() {
        let timeline = parse_srt(
            "1\n00:00:01,000 --> 00:00:04,000\nA\n\n\
             2\n00:00:05,000 --> 00:00:08,000\nB\n",
            30,
        );
        let report = validate_timeline(&timeline, 30);

        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert!(!report.info.is_empty());
    }

    #[test]
    fn empty_track_is_an_error() {
        let timeline = parse_srt("", 30);
        let report = validate_timeline(&timeline, 30);

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn inverted_interval_is_a_warning_not_an_error() {
        let timeline = parse_srt("1\n00:00:04,000 --> 00:00:01,000\nbackwards\n", 30);
        let report = validate_timeline(&timeline, 30);

        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("inverted")));
        // The data itself is untouched.
        assert_eq!(timeline.lines[0].start_time, 4.0);
        assert_eq!(timeline.lines[0].end_time, 1.0);
    }

    #[test]
    fn long_gap_and_overlap_are_flagged() {
        let timeline = parse_srt(
            "1\n00:00:00,000 --> 00:00:02,000\nA\n\n\
             2\n00:00:01,000 --> 00:00:03,000\nB\n\n\
             3\n00:00:20,000 --> 00:00:22,000\nC\n",
            30,
        );
        let report = validate_timeline(&timeline, 30);

        assert!(report.warnings.iter().any(|w| w.contains("overlap")));
        assert!(report.warnings.iter().any(|w| w.contains("Silent gap")));
    }

    #[test]
    fn display_labels_sections() {
        let timeline = parse_srt("1\n00:00:04,000 --> 00:00:01,000\nx\n", 30);
        let rendered = validate_timeline(&timeline, 30).to_string();

        assert!(rendered.contains("[INFO]"));
        assert!(rendered.contains("[WARN]"));
    }
}
