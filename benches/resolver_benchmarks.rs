//! Benchmarks for the resolver, snapshot, and cue-walk hot paths.
//!
//! Run with: cargo bench
//!
//! The resolver pair is invoked once per output frame during offline
//! rendering, so these measure the per-call cost on a realistic
//! multi-minute synthetic track.

use criterion::{criterion_group, criterion_main, Criterion};
use lyrsync::{
    parse_srt, snapshot, write_cue_sheet, CueOptions, DisplayQuery, LyricTimeline,
    OverlapStrategy,
};

/// A synthetic track: `count` lines of 3 seconds each with 1-second gaps.
fn synthetic_track(count: usize) -> LyricTimeline {
    let mut content = String::new();
    for index in 0..count {
        let start = index * 4;
        let end = start + 3;
        content.push_str(&format!(
            "{}\n{:02}:{:02}:{:02},000 --> {:02}:{:02}:{:02},000\nsynthetic line {}\n\n",
            index + 1,
            start / 3600,
            (start % 3600) / 60,
            start % 60,
            end / 3600,
            (end % 3600) / 60,
            end % 60,
            index,
        ));
    }
    parse_srt(&content, 30)
}

fn benchmark_parse(criterion: &mut Criterion) {
    let track = synthetic_track(300);
    let content = track.to_srt_string();

    criterion.bench_function("parse 300-line track", |bencher| {
        bencher.iter(|| parse_srt(std::hint::black_box(&content), 30));
    });
}

fn benchmark_resolver(criterion: &mut Criterion) {
    let track = synthetic_track(300);
    let mid = track.duration / 2.0;

    criterion.bench_function("active_at_time (mid-track)", |bencher| {
        bencher.iter(|| track.active_at_time(std::hint::black_box(mid)));
    });

    criterion.bench_function("active_at_frame (mid-track)", |bencher| {
        let frame = (mid * 30.0).round() as i64;
        bencher.iter(|| track.active_at_frame(std::hint::black_box(frame)));
    });
}

fn benchmark_snapshot(criterion: &mut Criterion) {
    let main = synthetic_track(300);
    let sub = synthetic_track(300);
    let mid = main.duration / 2.0;

    criterion.bench_function("snapshot with translation", |bencher| {
        bencher.iter(|| {
            snapshot(
                &main,
                Some(&sub),
                DisplayQuery::Time(std::hint::black_box(mid)),
                3,
                OverlapStrategy::Containment,
            )
        });
    });
}

fn benchmark_cue_walk(criterion: &mut Criterion) {
    let main = synthetic_track(60); // 4-minute track
    let sub = synthetic_track(60);
    let total_frames = (main.duration * 30.0).ceil() as i64;

    criterion.bench_function("cue sheet for 4-minute track @ 30 fps", |bencher| {
        bencher.iter(|| {
            let mut sink = std::io::sink();
            write_cue_sheet(
                &mut sink,
                &main,
                Some(&sub),
                30,
                std::hint::black_box(total_frames),
                &CueOptions::new(),
            )
            .unwrap()
        });
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_resolver,
    benchmark_snapshot,
    benchmark_cue_walk,
);
criterion_main!(benches);
