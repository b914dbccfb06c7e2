use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lyrsync::{
    load_srt, snapshot, validate_timeline, write_cue_sheet, CueOptions, DisplayQuery,
    LyricTimeline, OverlapStrategy, Palette, ProgressCallback, ProgressInfo, RenderPlan,
    VideoSettings,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  lyrsync inspect lyrics.srt --limit 5\n  lyrsync resolve lyrics.srt --at 1:23.5 --sub translation.srt\n  lyrsync cues lyrics.srt --out cues.json --duration 3:07 --progress\n  lyrsync plan lyrics.srt --sub translation.srt --duration 187 --out plan.json\n  lyrsync completions zsh > _lyrsync";

#[derive(Debug, Parser)]
#[command(
    name = "lyrsync",
    version,
    about = "Parse lyric subtitle tracks, resolve active lines, and export render cues",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long)]
    progress: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a parsed timeline summary (alias: info).
    #[command(
        about = "Inspect a subtitle track",
        visible_alias = "info",
        after_help = "Examples:\n  lyrsync inspect lyrics.srt\n  lyrsync inspect lyrics.srt --json --limit 10"
    )]
    Inspect {
        /// Input SRT path.
        input: PathBuf,

        /// Frame rate used to derive frame numbers.
        #[arg(long, default_value_t = 30)]
        fps: u32,

        /// Output as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Print at most N lines.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Validate a subtitle track and print a report.
    #[command(
        about = "Validate a subtitle track",
        after_help = "Examples:\n  lyrsync validate lyrics.srt"
    )]
    Validate {
        /// Input SRT path.
        input: PathBuf,

        /// Frame rate used to derive frame numbers.
        #[arg(long, default_value_t = 30)]
        fps: u32,
    },

    /// Resolve the display state at one playback instant.
    #[command(
        about = "Resolve one playback instant",
        after_help = "Examples:\n  lyrsync resolve lyrics.srt --at 75.5\n  lyrsync resolve lyrics.srt --frame 2265 --sub translation.srt --json"
    )]
    Resolve {
        /// Input SRT path (primary track).
        input: PathBuf,

        /// Playback time (seconds, MM:SS, or HH:MM:SS[.fff]).
        #[arg(long, conflicts_with = "frame")]
        at: Option<String>,

        /// Output frame number.
        #[arg(long)]
        frame: Option<i64>,

        /// Optional translation track.
        #[arg(long)]
        sub: Option<PathBuf>,

        /// Frame rate used to derive frame numbers.
        #[arg(long, default_value_t = 30)]
        fps: u32,

        /// Window radius around the active line.
        #[arg(long, default_value_t = 3)]
        radius: usize,

        /// Require the translation to overlap the primary line by 0.1s
        /// instead of containing the query instant.
        #[arg(long)]
        strict_overlap: bool,

        /// Output as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Walk every output frame and write a JSON cue sheet.
    #[command(
        about = "Export a per-frame cue sheet",
        after_help = "Examples:\n  lyrsync cues lyrics.srt --out cues.json --duration 3:07\n  lyrsync cues lyrics.srt --out cues.json --every 30 --progress"
    )]
    Cues {
        /// Input SRT path (primary track).
        input: PathBuf,

        /// Output JSON file.
        #[arg(long)]
        out: PathBuf,

        /// Optional translation track.
        #[arg(long)]
        sub: Option<PathBuf>,

        /// Output frame rate.
        #[arg(long, default_value_t = 30)]
        fps: u32,

        /// Video duration (seconds, MM:SS, or HH:MM:SS[.fff]). Defaults
        /// to the primary track's duration.
        #[arg(long)]
        duration: Option<String>,

        /// Emit a cue every Nth frame.
        #[arg(long, default_value_t = 1)]
        every: i64,

        /// Window radius around the active line.
        #[arg(long, default_value_t = 3)]
        radius: usize,

        /// Require the translation to overlap the primary line by 0.1s.
        #[arg(long)]
        strict_overlap: bool,
    },

    /// Assemble a render-plan JSON for the external renderer.
    #[command(
        about = "Assemble a render plan",
        after_help = "Examples:\n  lyrsync plan lyrics.srt --duration 187 --out plan.json\n  lyrsync plan lyrics.srt --sub translation.srt --palette palette.json --fps 60"
    )]
    Plan {
        /// Input SRT path (primary track).
        input: PathBuf,

        /// Optional translation track.
        #[arg(long)]
        sub: Option<PathBuf>,

        /// Palette JSON file from the color extractor. Defaults to the
        /// fallback palette.
        #[arg(long)]
        palette: Option<PathBuf>,

        /// Audio duration (seconds, MM:SS, or HH:MM:SS[.fff]).
        #[arg(long)]
        duration: Option<String>,

        /// Output frame rate.
        #[arg(long, default_value_t = 30)]
        fps: u32,

        /// Lyric font size (16-48).
        #[arg(long, default_value_t = 36)]
        font_size: u32,

        /// Background blur intensity (20-120).
        #[arg(long, default_value_t = 80)]
        blur: u32,

        /// Output width in pixels.
        #[arg(long, default_value_t = 1920)]
        width: u32,

        /// Output height in pixels.
        #[arg(long, default_value_t = 1080)]
        height: u32,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_timecode(value: &str) -> Result<f64, Box<dyn std::error::Error>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("time value cannot be empty".into());
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        return Ok(seconds.max(0.0));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(format!("invalid time format: {trimmed}").into());
    }

    let (hours, minutes, seconds_str) = if parts.len() == 3 {
        (parts[0].parse::<u64>()?, parts[1].parse::<u64>()?, parts[2])
    } else {
        (0_u64, parts[0].parse::<u64>()?, parts[1])
    };

    let seconds = seconds_str.parse::<f64>()?;
    let total_seconds = (hours as f64 * 3600.0) + (minutes as f64 * 60.0) + seconds;
    Ok(total_seconds.max(0.0))
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

fn load_optional_track(
    path: Option<&PathBuf>,
    fps: u32,
) -> Result<Option<LyricTimeline>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(load_srt(path, fps)?)),
        None => Ok(None),
    }
}

fn overlap_strategy(strict: bool) -> OverlapStrategy {
    if strict {
        OverlapStrategy::primary_overlap()
    } else {
        OverlapStrategy::Containment
    }
}

struct BarProgress {
    bar: ProgressBar,
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.current);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match cli.command {
        Commands::Inspect {
            input,
            fps,
            json,
            limit,
        } => {
            let timeline = load_srt(&input, fps)?;
            let shown = limit.unwrap_or(timeline.len()).min(timeline.len());

            if json {
                let payload = json!({
                    "lines": &timeline.lines[..shown],
                    "line_count": timeline.len(),
                    "duration_seconds": timeline.duration,
                    "fps": fps,
                    "metrics": timeline.timing_metrics(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "Track: {} line(s), {} long",
                    timeline.len(),
                    lyrsync::format_time(timeline.duration),
                );
                if let Some(metrics) = timeline.timing_metrics() {
                    println!(
                        "Durations: avg {:.2}s, min {:.2}s, max {:.2}s; avg gap {:.2}s",
                        metrics.average_duration,
                        metrics.min_duration,
                        metrics.max_duration,
                        metrics.average_gap,
                    );
                }
                for line in timeline.iter().take(shown) {
                    println!(
                        "  [{} --> {}] {}",
                        lyrsync::format_srt_timestamp(line.start_time),
                        lyrsync::format_srt_timestamp(line.end_time),
                        line.text.replace('\n', " / "),
                    );
                }
                if shown < timeline.len() {
                    println!("  ... and {} more", timeline.len() - shown);
                }
            }
        }
        Commands::Validate { input, fps } => {
            let timeline = load_srt(&input, fps)?;
            let report = validate_timeline(&timeline, fps);
            print!("{report}");

            if !report.is_valid() {
                return Err("track failed validation".into());
            }
        }
        Commands::Resolve {
            input,
            at,
            frame,
            sub,
            fps,
            radius,
            strict_overlap,
            json,
        } => {
            let main = load_srt(&input, fps)?;
            let sub = load_optional_track(sub.as_ref(), fps)?;

            let query = match (at, frame) {
                (Some(time), None) => DisplayQuery::Time(parse_timecode(&time)?),
                (None, Some(frame)) => DisplayQuery::Frame(frame),
                (None, None) => return Err("provide --at or --frame".into()),
                (Some(_), Some(_)) => unreachable!("clap rejects --at with --frame"),
            };

            let state = snapshot(
                &main,
                sub.as_ref(),
                query,
                radius,
                overlap_strategy(strict_overlap),
            );

            if json {
                let payload = json!({
                    "active": state.active,
                    "line": state.active.and_then(|index| main.get(index)),
                    "translation": state.translation,
                    "window": state.window.iter().map(|slot| json!({
                        "index": slot.index,
                        "offset": slot.offset,
                        "text": slot.line.text,
                    })).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                match state.active.and_then(|index| main.get(index)) {
                    Some(line) => println!("active: {}", line.text.replace('\n', " / ")),
                    None => println!("active: (none)"),
                }
                if let Some(translation) = state.translation {
                    println!("translation: {}", translation.text.replace('\n', " / "));
                }
                for slot in &state.window {
                    let marker = if slot.offset == 0 { ">" } else { " " };
                    println!(
                        "{marker} {:+} {}",
                        slot.offset,
                        slot.line.text.replace('\n', " / "),
                    );
                }
            }
        }
        Commands::Cues {
            input,
            out,
            sub,
            fps,
            duration,
            every,
            radius,
            strict_overlap,
        } => {
            ensure_writable_path(&out, cli.global.overwrite)?;

            let main = load_srt(&input, fps)?;
            let sub = load_optional_track(sub.as_ref(), fps)?;

            let duration_seconds = match duration {
                Some(value) => parse_timecode(&value)?,
                None => main.duration,
            };
            let total_frames = lyrsync::duration_in_frames(duration_seconds, fps);

            let mut options = CueOptions::new()
                .with_stride(every)
                .with_radius(radius)
                .with_strategy(overlap_strategy(strict_overlap));

            let progress_bar = if cli.global.progress {
                let pb = ProgressBar::new(total_frames.max(0) as u64);
                let style = ProgressStyle::with_template(
                    "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?;
                pb.set_style(style.progress_chars("##-"));
                options = options.with_progress(Arc::new(BarProgress { bar: pb.clone() }));
                Some(pb)
            } else {
                None
            };

            let mut file = fs::File::create(&out)?;
            let written = write_cue_sheet(&mut file, &main, sub.as_ref(), fps, total_frames, &options)?;

            if let Some(pb) = progress_bar {
                pb.finish_with_message("done");
            }

            println!(
                "{} {}",
                "success:".green().bold(),
                format!("Wrote {written} cue(s) to {}", out.display()).green()
            );
        }
        Commands::Plan {
            input,
            sub,
            palette,
            duration,
            fps,
            font_size,
            blur,
            width,
            height,
            out,
        } => {
            let main = load_srt(&input, fps)?;
            let sub = load_optional_track(sub.as_ref(), fps)?;

            let palette = match palette {
                Some(path) => serde_json::from_str::<Palette>(&fs::read_to_string(&path)?)?,
                None => Palette::fallback(),
            };

            let settings = VideoSettings::new()
                .with_font_size(font_size)
                .with_blur_intensity(blur)
                .with_fps(fps)
                .with_dimensions(width, height);

            let audio_duration = duration.as_deref().map(parse_timecode).transpose()?;
            let plan = RenderPlan::new(main, sub, palette, settings, audio_duration)?;
            let rendered = serde_json::to_string_pretty(&plan)?;

            match out {
                Some(path) => {
                    ensure_writable_path(&path, cli.global.overwrite)?;
                    fs::write(&path, rendered)?;
                    println!("{} {}", "saved".green().bold(), path.display());
                }
                None => println!("{rendered}"),
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "lyrsync", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{overlap_strategy, parse_timecode};
    use lyrsync::OverlapStrategy;

    #[test]
    fn parse_timecode_formats() {
        assert_eq!(parse_timecode("75").unwrap(), 75.0);
        assert_eq!(parse_timecode("01:15").unwrap(), 75.0);
        assert_eq!(parse_timecode("00:01:15.5").unwrap(), 75.5);
        assert!(parse_timecode("").is_err());
        assert!(parse_timecode("1:2:3:4").is_err());
    }

    #[test]
    fn strict_flag_selects_overlap_strategy() {
        assert_eq!(overlap_strategy(false), OverlapStrategy::Containment);
        assert!(matches!(
            overlap_strategy(true),
            OverlapStrategy::PrimaryOverlap { .. }
        ));
    }
}
