//! SRT subtitle parsing and serialization.
//!
//! [`parse_srt`] converts raw SubRip text into a [`LyricTimeline`]. Parsing
//! is best-effort and infallible: subtitle files in the wild are frequently
//! hand-edited and imperfect, so malformed blocks (bad index, bad timestamp
//! pattern, empty text) are silently dropped rather than surfaced as errors.
//!
//! The parser performs no I/O — it consumes a string and a frame rate,
//! nothing else. [`load_srt`] is the file-reading convenience wrapper.
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
//! assert_eq!(timeline.len(), 2);
//! assert_eq!(timeline.lines[0].start_frame, 30);
//! assert_eq!(timeline.lines[1].end_frame, 240);
//! assert_eq!(timeline.duration, 8.0);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LyrsyncError;
use crate::timecode::{format_srt_timestamp, seconds_to_frames};
use crate::timeline::{LyricLine, LyricTimeline};

/// `HH:MM:SS,mmm --> HH:MM:SS,mmm`, with either `,` or `.` before the
/// milliseconds. Searched, not anchored — leading cue settings or trailing
/// garbage on the timestamp line are tolerated.
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9]{2}):([0-9]{2}):([0-9]{2})[,.]([0-9]{3})\s*-->\s*([0-9]{2}):([0-9]{2}):([0-9]{2})[,.]([0-9]{3})",
    )
    .expect("timestamp regex is valid")
});

/// Blocks are separated by one or more blank lines.
static BLOCK_SPLIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n+").expect("block split regex is valid"));

/// Parse SRT content into a [`LyricTimeline`].
///
/// Line endings are normalized first, then the text is split into blocks on
/// blank lines. Each block must carry at least three lines — index,
/// timestamp, and one or more text lines — to be considered. Blocks whose
/// index line is not an integer, whose timestamp line does not match the
/// SRT pattern, or whose text trims to nothing are skipped; skipped blocks
/// do not contribute to the timeline duration.
///
/// Frame numbers are derived per entry as `round(seconds * fps)`. The
/// output is sorted ascending by start time regardless of block order in
/// the input.
///
/// Inverted intervals (end before start) are accepted and passed through
/// without correction; [`validate_timeline`](crate::validate_timeline)
/// surfaces them as warnings.
pub fn parse_srt(content: &str, fps: u32) -> LyricTimeline {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines = Vec::new();
    let mut skipped = 0_usize;

    for block in BLOCK_SPLIT_REGEX.split(normalized.trim()) {
        match parse_block(block, fps) {
            Some(line) => lines.push(line),
            None => {
                skipped += 1;
            }
        }
    }

    log::debug!(
        "Parsed SRT content: {} line(s) kept, {} block(s) skipped",
        lines.len(),
        skipped,
    );

    LyricTimeline::from_lines(lines)
}

/// Read an SRT file and parse it.
///
/// The read failure belongs to this wrapper, not the parser — [`parse_srt`]
/// is never invoked on absent input.
///
/// # Errors
///
/// [`LyrsyncError::FileRead`] if the file cannot be read.
pub fn load_srt<P: AsRef<Path>>(path: P, fps: u32) -> Result<LyricTimeline, LyrsyncError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LyrsyncError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_srt(&content, fps))
}

/// Parse one block. `None` means the block is skipped.
fn parse_block(block: &str, fps: u32) -> Option<LyricLine> {
    let block_lines: Vec<&str> = block.trim().split('\n').collect();

    if block_lines.len() < 3 {
        log::trace!("Skipping block: fewer than 3 lines");
        return None;
    }

    let Some(id) = leading_integer(block_lines[0]) else {
        log::trace!("Skipping block: index line {:?} is not an integer", block_lines[0]);
        return None;
    };

    let Some((start_time, end_time)) = parse_timestamp_line(block_lines[1]) else {
        log::trace!("Skipping block {id}: malformed timestamp line {:?}", block_lines[1]);
        return None;
    };

    let text = block_lines[2..].join("\n").trim().to_string();
    if text.is_empty() {
        log::trace!("Skipping block {id}: empty text");
        return None;
    }

    Some(LyricLine {
        id,
        start_time,
        end_time,
        start_frame: seconds_to_frames(start_time, fps),
        end_frame: seconds_to_frames(end_time, fps),
        text,
    })
}

/// Parse the leading decimal integer of a line, ignoring trailing garbage.
///
/// Accepts optional surrounding whitespace and an optional sign. Returns
/// `None` when no digits are present.
fn leading_integer(line: &str) -> Option<i64> {
    let trimmed = line.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let value: i64 = rest[..digit_count].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Extract `(start_seconds, end_seconds)` from an SRT timestamp line.
fn parse_timestamp_line(line: &str) -> Option<(f64, f64)> {
    let captures = TIMESTAMP_REGEX.captures(line)?;

    let field = |index: usize| -> f64 {
        // Every capture group is 2-3 ASCII digits, always a valid u32.
        captures[index].parse::<u32>().map_or(0.0, f64::from)
    };

    let start = field(1) * 3600.0 + field(2) * 60.0 + field(3) + field(4) / 1000.0;
    let end = field(5) * 3600.0 + field(6) * 60.0 + field(7) + field(8) / 1000.0;
    Some((start, end))
}

impl Display for LyricLine {
    /// Render this line as one SRT block (index, timestamp line, text).
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", self.id)?;
        writeln!(
            f,
            "{} --> {}",
            format_srt_timestamp(self.start_time),
            format_srt_timestamp(self.end_time),
        )?;
        write!(f, "{}", self.text)
    }
}

impl LyricTimeline {
    /// Serialize the timeline back to SRT text.
    ///
    /// Blocks are emitted in sort order with `HH:MM:SS,mmm` timestamps and
    /// separated by blank lines.
    ///
    /// # Example
    ///
    /// ```
    /// use lyrsync::parse_srt;
    ///
    /// let source = "1\n00:00:01,000 --> 00:00:04,000\nFirst line\n";
    /// let timeline = parse_srt(source, 30);
    /// assert_eq!(timeline.to_srt_string().trim(), source.trim());
    /// ```
    pub fn to_srt_string(&self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(&line.to_string());
            output.push_str("\n\n");
        }
        output
    }
}
