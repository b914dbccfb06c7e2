//! Parse a subtitle track and resolve the active line at a few instants.
//!
//! Usage:
//!   cargo run --example parse_and_resolve -- [lyrics.srt]
//!
//! Without an argument a small embedded track is used.

use std::error::Error;

use lyrsync::{format_srt_timestamp, format_time, load_srt, parse_srt};

const SAMPLE: &str = "1
00:00:01,000 --> 00:00:04,000
First line

2
00:00:05,500 --> 00:00:08,000
Second line

3
00:00:09,000 --> 00:00:12,000
Third line
";

fn main() -> Result<(), Box<dyn Error>> {
    let timeline = match std::env::args().nth(1) {
        Some(path) => load_srt(&path, 30)?,
        None => parse_srt(SAMPLE, 30),
    };

    println!(
        "Parsed {} line(s), track is {} long\n",
        timeline.len(),
        format_time(timeline.duration),
    );

    for line in timeline.iter() {
        println!(
            "  [{} --> {}] {}",
            format_srt_timestamp(line.start_time),
            format_srt_timestamp(line.end_time),
            line.text.replace('\n', " / "),
        );
    }

    // ── Resolve a few playback instants ────────────────────────────
    println!("\nResolving playback instants:");
    for time in [0.0, 2.0, 4.5, 6.0, 100.0] {
        match timeline.active_at_time(time) {
            Some(index) => println!(
                "  t={time:>5.1}s -> line {} ({:?})",
                index, timeline.lines[index].text,
            ),
            None => println!("  t={time:>5.1}s -> nothing to display yet"),
        }
    }

    // ── Display window around the active line ──────────────────────
    let active = timeline.active_at_time(6.0);
    println!("\nWindow at t=6.0s (radius 1):");
    for slot in timeline.window_around(active, 1) {
        let marker = if slot.offset == 0 { ">" } else { " " };
        println!("  {marker} {:+} {}", slot.offset, slot.line.text);
    }

    Ok(())
}
