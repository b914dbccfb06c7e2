//! Time/frame conversions and timestamp formatting.

/// Convert seconds to the nearest frame number at the given frame rate.
pub fn seconds_to_frames(seconds: f64, fps: u32) -> i64 {
    (seconds * f64::from(fps)).round() as i64
}

/// Convert a frame number back to seconds.
pub fn frames_to_seconds(frames: i64, fps: u32) -> f64 {
    frames as f64 / f64::from(fps).max(1.0)
}

/// Total frame count covering a duration, rounded up so the last partial
/// frame is included.
pub fn duration_in_frames(duration_seconds: f64, fps: u32) -> i64 {
    (duration_seconds * f64::from(fps)).ceil() as i64
}

/// Format seconds as `m:ss` for display (e.g. `3:07`).
pub fn format_time(seconds: f64) -> String {
    let clamped = seconds.max(0.0);
    let minutes = (clamped / 60.0).floor() as u64;
    let secs = (clamped % 60.0).floor() as u64;
    format!("{minutes}:{secs:02}")
}

/// Format a frame count as an `HH:MM:SS:FF` timecode.
pub fn frames_to_timecode(frames: i64, fps: u32) -> String {
    let fps = i64::from(fps.max(1));
    let frames = frames.max(0);
    let total_seconds = frames / fps;
    let remaining_frames = frames % fps;

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}:{remaining_frames:02}")
}

/// Format seconds as an SRT timestamp, `HH:MM:SS,mmm`.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let millis = total_millis % 1000;
    let total_seconds = total_millis / 1000;

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_and_frames_round_trip() {
        assert_eq!(seconds_to_frames(1.0, 30), 30);
        assert_eq!(seconds_to_frames(5.5, 30), 165);
        assert_eq!(frames_to_seconds(165, 30), 5.5);
    }

    #[test]
    fn duration_rounds_up() {
        assert_eq!(duration_in_frames(1.0, 30), 30);
        assert_eq!(duration_in_frames(1.001, 30), 31);
        assert_eq!(duration_in_frames(0.0, 30), 0);
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(75.4), "1:15");
        assert_eq!(format_time(187.0), "3:07");
    }

    #[test]
    fn timecode_splits_fields() {
        assert_eq!(frames_to_timecode(0, 30), "00:00:00:00");
        assert_eq!(frames_to_timecode(95, 30), "00:00:03:05");
        assert_eq!(frames_to_timecode(30 * 3661 + 7, 30), "01:01:01:07");
    }

    #[test]
    fn srt_timestamp_formats_milliseconds() {
        assert_eq!(format_srt_timestamp(1.0), "00:00:01,000");
        assert_eq!(format_srt_timestamp(5.5), "00:00:05,500");
        assert_eq!(format_srt_timestamp(3723.042), "01:02:03,042");
    }
}
