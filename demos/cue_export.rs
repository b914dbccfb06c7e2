//! Demonstrate progress callbacks and cancellation during cue export.
//!
//! Usage:
//!   cargo run --example cue_export -- [lyrics.srt] [translation.srt]
//!
//! Without arguments embedded sample tracks are used.

use std::error::Error;
use std::sync::Arc;

use lyrsync::{
    load_srt, parse_srt, write_cue_sheet, CancellationToken, CueOptions, ProgressCallback,
    ProgressInfo,
};

const MAIN: &str = "1
00:00:00,000 --> 00:00:02,000
안녕하세요

2
00:00:02,000 --> 00:00:04,000
사랑해요
";

const SUB: &str = "1
00:00:00,000 --> 00:00:02,000
Hello

2
00:00:02,000 --> 00:00:04,000
I love you
";

// ── Progress callback ──────────────────────────────────────────────

struct PrintProgress;

impl ProgressCallback for PrintProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        match info.percentage {
            Some(percentage) => println!(
                "  frame {}/{} ({percentage:.0}%)",
                info.current,
                info.total.unwrap_or(0),
            ),
            None => println!("  frame {}", info.current),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let main = match args.next() {
        Some(path) => load_srt(&path, 30)?,
        None => parse_srt(MAIN, 30),
    };
    let sub = match args.next() {
        Some(path) => Some(load_srt(&path, 30)?),
        None => Some(parse_srt(SUB, 30)),
    };

    let total_frames = (main.duration * 30.0).ceil() as i64;

    // ── Export with progress reporting ─────────────────────────────
    println!("Exporting {total_frames} frame(s) of cues:");
    let options = CueOptions::new()
        .with_progress(Arc::new(PrintProgress))
        .with_batch_size(30);

    let mut sheet = Vec::new();
    let written = write_cue_sheet(&mut sheet, &main, sub.as_ref(), 30, total_frames, &options)?;
    println!("Wrote {written} cue(s), {} bytes of JSON", sheet.len());

    // ── Cancellation ───────────────────────────────────────────────
    println!("\nCancelling an export before it starts:");
    let token = CancellationToken::new();
    token.cancel();

    let cancelled = CueOptions::new().with_cancellation(token);
    let mut discard = Vec::new();
    match write_cue_sheet(&mut discard, &main, None, 30, total_frames, &cancelled) {
        Err(error) => println!("  export stopped: {error}"),
        Ok(count) => println!("  unexpectedly wrote {count} cue(s)"),
    }

    println!("\nDone!");
    Ok(())
}
