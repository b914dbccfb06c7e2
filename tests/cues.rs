//! Cue export and render plan integration tests.

use std::io::Read;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use lyrsync::{
    parse_srt, write_cue_sheet, CancellationToken, CueIterator, CueOptions, LyrsyncError,
    Palette, ProgressCallback, ProgressInfo, RenderPlan, VideoSettings,
};

const MAIN: &str = "1\n00:00:00,000 --> 00:00:02,000\n안녕\n\n2\n00:00:02,000 --> 00:00:04,000\n사랑\n";
const SUB: &str = "1\n00:00:00,000 --> 00:00:02,000\nHi\n\n2\n00:00:02,000 --> 00:00:04,000\nLove\n";

#[test]
fn cue_walk_covers_every_frame() {
    let main = parse_srt(MAIN, 30);
    let cues = CueIterator::new(&main, None, 30, 120, &CueOptions::new()).unwrap();

    let collected: Vec<_> = cues.collect();
    assert_eq!(collected.len(), 120);
    assert_eq!(collected[0].frame, 0);
    assert_eq!(collected[119].frame, 119);
    assert_eq!(collected[0].snapshot.active, Some(0));
    assert_eq!(collected[70].snapshot.active, Some(1));
}

#[test]
fn cue_times_track_frames() {
    let main = parse_srt(MAIN, 30);
    let cues = CueIterator::new(&main, None, 30, 60, &CueOptions::new()).unwrap();

    for cue in cues {
        assert_eq!(cue.time, cue.frame as f64 / 30.0);
    }
}

#[test]
fn cue_sheet_is_valid_json_with_translations() {
    let main = parse_srt(MAIN, 30);
    let sub = parse_srt(SUB, 30);

    let mut sheet = Vec::new();
    let written =
        write_cue_sheet(&mut sheet, &main, Some(&sub), 30, 120, &CueOptions::new()).unwrap();
    assert_eq!(written, 120);

    let parsed: serde_json::Value = serde_json::from_slice(&sheet).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 120);

    assert_eq!(records[0]["frame"], 0);
    assert_eq!(records[0]["active"], 0);
    assert_eq!(records[0]["line"], "안녕");
    assert_eq!(records[0]["translation"], "Hi");
    assert_eq!(records[90]["active"], 1);
    assert_eq!(records[90]["translation"], "Love");
}

#[test]
fn cue_sheet_with_stride_skips_frames() {
    let main = parse_srt(MAIN, 30);
    let mut sheet = Vec::new();
    let options = CueOptions::new().with_stride(30);

    let written = write_cue_sheet(&mut sheet, &main, None, 30, 120, &options).unwrap();
    assert_eq!(written, 4);

    let parsed: serde_json::Value = serde_json::from_slice(&sheet).unwrap();
    let frames: Vec<i64> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["frame"].as_i64().unwrap())
        .collect();
    assert_eq!(frames, vec![0, 30, 60, 90]);
}

struct CountingProgress {
    calls: AtomicU64,
    last_current: AtomicU64,
}

impl ProgressCallback for CountingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.last_current.store(info.current, Ordering::Relaxed);
        if let Some(percentage) = info.percentage {
            assert!((0.0..=100.0).contains(&percentage));
        }
    }
}

#[test]
fn progress_fires_per_batch() {
    let main = parse_srt(MAIN, 30);
    let progress = Arc::new(CountingProgress {
        calls: AtomicU64::new(0),
        last_current: AtomicU64::new(0),
    });
    let options = CueOptions::new()
        .with_batch_size(40)
        .with_progress(Arc::clone(&progress) as Arc<dyn ProgressCallback>);

    let mut sheet = Vec::new();
    write_cue_sheet(&mut sheet, &main, None, 30, 120, &options).unwrap();

    // 3 batch reports plus the final one.
    assert_eq!(progress.calls.load(Ordering::Relaxed), 4);
    assert_eq!(progress.last_current.load(Ordering::Relaxed), 120);
}

#[test]
fn cancellation_aborts_the_walk() {
    let main = parse_srt(MAIN, 30);
    let token = CancellationToken::new();
    token.cancel();

    let options = CueOptions::new().with_cancellation(token);
    let mut sheet = Vec::new();
    let result = write_cue_sheet(&mut sheet, &main, None, 30, 120, &options);

    assert!(matches!(result, Err(LyrsyncError::Cancelled)));
}

#[test]
fn cue_sheet_writes_to_disk() {
    let main = parse_srt(MAIN, 30);
    let mut file = tempfile::tempfile().unwrap();

    write_cue_sheet(&mut file, &main, None, 30, 60, &CueOptions::new()).unwrap();

    use std::io::Seek;
    file.rewind().unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 60);
}

#[test]
fn render_plan_serializes_round_trip() {
    let main = parse_srt(MAIN, 30);
    let sub = parse_srt(SUB, 30);
    let plan = RenderPlan::new(
        main,
        Some(sub),
        Palette::fallback(),
        VideoSettings::default(),
        Some(187.0),
    )
    .unwrap();

    assert_eq!(plan.duration_in_frames, 187 * 30);

    let json = serde_json::to_string(&plan).unwrap();
    let parsed: RenderPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, plan);
}

#[test]
fn render_plan_falls_back_to_lyrics_duration() {
    let main = parse_srt(MAIN, 30);
    let plan = RenderPlan::new(
        main,
        None,
        Palette::fallback(),
        VideoSettings::default(),
        None,
    )
    .unwrap();

    assert_eq!(plan.duration_in_frames, 120);
}

#[test]
fn render_plan_rejects_zero_fps_settings() {
    // The settings builder clamps fps to 1, so a zero can only arrive via
    // a hand-built struct.
    let settings = VideoSettings {
        fps: 0,
        ..VideoSettings::default()
    };
    let result = RenderPlan::new(
        parse_srt(MAIN, 30),
        None,
        Palette::fallback(),
        settings,
        Some(10.0),
    );

    assert!(matches!(
        result,
        Err(LyrsyncError::InvalidFrameRate { fps: 0 })
    ));
}
