//! Circular frame runner
//!
//! Mounts one indicator, drives the animation scheduler at a fixed frame
//! rate over simulated time, and reports the animated values and draw
//! command counts of each frame.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use circular_animation::AnimationScheduler;
use circular_core::{RecordingContext, Size};
use circular_indicator::{ArcIndicator, Indicator, IndicatorConfig, PulsingArcIndicator};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Side of the square viewport frames are painted into
const VIEWPORT: f32 = 120.0;

/// Upper bound on simulated frames per run
const MAX_FRAMES: f64 = 10_000_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Variant {
    /// Fixed-length spinning arc
    Arc,
    /// Arc that pulses in length while spinning
    Pulsing,
}

#[derive(Parser, Debug)]
#[command(name = "circular-frames")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a Circular indicator headlessly and sample its frames", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Indicator to run
    #[arg(long, value_enum, default_value = "arc")]
    variant: Variant,

    /// TOML file with the indicator configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated time to run, in seconds
    #[arg(long, default_value = "2.0")]
    seconds: f64,

    /// Frames per simulated second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Report every Nth frame
    #[arg(long, default_value = "1")]
    every: u64,

    /// Arc length for the arc variant, as a fraction of the circle
    #[arg(long)]
    sweep: Option<f32>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Animated state and paint output of one frame
#[derive(Debug, Serialize)]
struct FrameSample {
    frame: u64,
    time_ms: f64,
    rotation_degrees: f32,
    displayed_angle: f32,
    sweep_fraction: f32,
    draw_commands: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    variant: Variant,
    cycle_seconds: f64,
    fps: u32,
    registrations: usize,
    frames: Vec<FrameSample>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let report = run(&cli)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        print_table(&report);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<Report> {
    if cli.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    if !cli.seconds.is_finite() || cli.seconds < 0.0 {
        anyhow::bail!("--seconds must be a non-negative number, got {}", cli.seconds);
    }
    if cli.every == 0 {
        anyhow::bail!("--every must be at least 1");
    }
    let frame_budget = cli.seconds * f64::from(cli.fps);
    if frame_budget > MAX_FRAMES {
        anyhow::bail!(
            "--seconds {} at {} fps is {} frames, more than the limit of {}",
            cli.seconds,
            cli.fps,
            frame_budget,
            MAX_FRAMES
        );
    }

    let config = match &cli.config {
        Some(path) => IndicatorConfig::load(path)
            .with_context(|| format!("failed to load indicator config {}", path.display()))?,
        None => IndicatorConfig::default(),
    };

    let scheduler = AnimationScheduler::new();
    let (mut indicator, cycle_seconds): (Box<dyn Indicator>, f64) = match cli.variant {
        Variant::Arc => {
            let arc = match cli.sweep {
                Some(sweep) => ArcIndicator::with_sweep(scheduler.handle(), config, sweep),
                None => ArcIndicator::new(scheduler.handle(), config),
            };
            let seconds = arc.animation().duration_seconds;
            (Box::new(arc) as Box<dyn Indicator>, seconds)
        }
        Variant::Pulsing => {
            let pulsing = PulsingArcIndicator::new(scheduler.handle(), config);
            let seconds = pulsing.animation().duration_seconds;
            (Box::new(pulsing) as Box<dyn Indicator>, seconds)
        }
    };

    info!(
        "running {:?} for {}s at {} fps ({}s per cycle)",
        cli.variant, cli.seconds, cli.fps, cycle_seconds
    );

    indicator.mount();
    let registrations = indicator.registration_count();

    let frame_time = Duration::from_secs_f64(1.0 / f64::from(cli.fps));
    let total_frames = frame_budget.round() as u64;
    let mut ctx = RecordingContext::new(Size::new(VIEWPORT, VIEWPORT));
    let bounds = ctx.viewport();
    let mut frames = Vec::new();

    for frame in 0..=total_frames {
        if frame > 0 {
            scheduler.tick_by(frame_time);
        }
        if frame % cli.every != 0 {
            continue;
        }

        ctx.clear();
        indicator.paint(&mut ctx, bounds);
        let snapshot = indicator.snapshot();

        frames.push(FrameSample {
            frame,
            time_ms: frame as f64 * frame_time.as_secs_f64() * 1000.0,
            rotation_degrees: snapshot.rotation_degrees,
            displayed_angle: snapshot.displayed_angle(),
            sweep_fraction: snapshot.sweep_fraction,
            draw_commands: ctx.commands().len(),
        });
    }

    indicator.unmount();
    debug!(
        "sampled {} frame(s), scheduler holds {} tween(s)",
        frames.len(),
        scheduler.tween_count()
    );

    Ok(Report {
        variant: cli.variant,
        cycle_seconds,
        fps: cli.fps,
        registrations,
        frames,
    })
}

fn print_table(report: &Report) {
    println!(
        "{:?}: {}s per cycle, {} fps, {} animation(s)",
        report.variant, report.cycle_seconds, report.fps, report.registrations
    );
    println!(
        "{:>6}  {:>9}  {:>9}  {:>7}  {:>6}  {:>4}",
        "frame", "time_ms", "rotation", "angle", "sweep", "cmds"
    );
    for f in &report.frames {
        println!(
            "{:>6}  {:>9.1}  {:>9.2}  {:>7.2}  {:>6.3}  {:>4}",
            f.frame,
            f.time_ms,
            f.rotation_degrees,
            f.displayed_angle,
            f.sweep_fraction,
            f.draw_commands
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("circular-frames").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.variant, Variant::Arc);
        assert_eq!(cli.seconds, 2.0);
        assert_eq!(cli.fps, 60);
        assert!(!cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["circular-frames", "--variant", "square"]).is_err());
    }

    #[test]
    fn test_run_arc() {
        let report = run(&cli(&["--seconds", "1", "--fps", "10"])).unwrap();
        assert_eq!(report.variant, Variant::Arc);
        assert_eq!(report.cycle_seconds, 0.75);
        assert_eq!(report.registrations, 1);
        assert_eq!(report.frames.len(), 11);

        let first = &report.frames[0];
        assert_eq!(first.rotation_degrees, 0.0);
        assert_eq!(first.sweep_fraction, 0.3);
        // opacity push/pop, ring, two rotations around the arc
        assert_eq!(first.draw_commands, 8);
    }

    #[test]
    fn test_run_pulsing() {
        let args = ["--variant", "pulsing", "--seconds", "6", "--every", "30"];
        let report = run(&cli(&args)).unwrap();
        assert_eq!(report.registrations, 2);
        assert_eq!(report.cycle_seconds, 3.0);
        assert_eq!(report.frames.len(), 13);

        // No arc is drawn before the sweep has grown
        assert_eq!(report.frames[0].draw_commands, 3);
        assert!(report
            .frames
            .iter()
            .all(|f| (0.0..=0.999).contains(&f.sweep_fraction)));
    }

    #[test]
    fn test_run_rejects_bad_arguments() {
        assert!(run(&cli(&["--fps", "0"])).is_err());
        assert!(run(&cli(&["--every", "0"])).is_err());
        assert!(run(&cli(&["--config", "/definitely/not/here.toml"])).is_err());
    }

    #[test]
    fn test_run_rejects_runaway_frame_counts() {
        let err = run(&cli(&["--seconds", "1e300"])).unwrap_err();
        assert!(err.to_string().contains("frames"), "{err}");

        let err = run(&cli(&["--seconds", "100000", "--fps", "1000"])).unwrap_err();
        assert!(err.to_string().contains("limit"), "{err}");
    }

    #[test]
    fn test_report_json() {
        let report = run(&cli(&["--seconds", "0"])).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["variant"], "arc");
        assert_eq!(json["frames"].as_array().map(Vec::len), Some(1));
    }
}
