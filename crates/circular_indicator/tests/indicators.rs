//! End-to-end behavior of both indicators against a real scheduler

use std::time::Duration;

use circular_animation::{AnimationScheduler, Easing};
use circular_core::{Color, DrawCommand, FontWeight, RecordingContext, Rect, Size};
use circular_indicator::prelude::*;
use circular_indicator::ConfigError;

const FRAME: Duration = Duration::from_micros(16_667);

fn run_frames(scheduler: &AnimationScheduler, frames: usize) {
    for _ in 0..frames {
        scheduler.tick_by(FRAME);
    }
}

fn paint(indicator: &impl Indicator) -> Vec<DrawCommand> {
    let mut ctx = RecordingContext::new(Size::new(120.0, 120.0));
    indicator.paint(&mut ctx, Rect::new(0.0, 0.0, 120.0, 120.0));
    ctx.take_commands()
}

#[test]
fn test_arc_repeats_without_bound() {
    let scheduler = AnimationScheduler::new();
    let mut spinner = arc_indicator(scheduler.handle()).duration_seconds(0.05);
    spinner.mount();

    // Thousands of cycles later the tween is still running
    run_frames(&scheduler, 10_000);
    assert!(scheduler.has_active_animations());
    assert_eq!(spinner.registration_count(), 1);

    let angle = spinner.snapshot().rotation_degrees;
    assert!((0.0..=360.0).contains(&angle), "angle {angle}");
}

#[test]
fn test_pulsing_repeats_without_bound() {
    let scheduler = AnimationScheduler::new();
    let mut pulsing = pulsing_arc_indicator(scheduler.handle()).duration_seconds(0.1);
    pulsing.mount();

    run_frames(&scheduler, 10_000);
    assert!(scheduler.has_active_animations());
    assert_eq!(scheduler.tween_count(), 2);
}

#[test]
fn test_remount_starts_fresh() {
    let scheduler = AnimationScheduler::new();
    let mut spinner = arc_indicator(scheduler.handle());
    let mut pulsing = pulsing_arc_indicator(scheduler.handle());

    spinner.mount();
    pulsing.mount();
    run_frames(&scheduler, 20);
    assert!(spinner.snapshot().rotation_degrees > 0.0);
    assert!(pulsing.snapshot().sweep_fraction > 0.0);
    assert_eq!(scheduler.tween_count(), 3);

    spinner.unmount();
    pulsing.unmount();
    assert_eq!(scheduler.tween_count(), 0);
    assert_eq!(spinner.snapshot().rotation_degrees, 0.0);
    assert_eq!(pulsing.snapshot().sweep_fraction, 0.0);

    spinner.mount();
    pulsing.mount();
    assert_eq!(spinner.snapshot().rotation_degrees, 0.0);
    assert_eq!(pulsing.snapshot().rotation_degrees, 0.0);
    assert_eq!(spinner.registration_count(), 1);
    assert_eq!(pulsing.registration_count(), 2);
    assert_eq!(scheduler.tween_count(), 3);
}

#[test]
fn test_second_mount_is_ignored() {
    let scheduler = AnimationScheduler::new();
    let mut pulsing = pulsing_arc_indicator(scheduler.handle());

    pulsing.mount();
    run_frames(&scheduler, 10);
    let before = pulsing.snapshot();

    pulsing.mount();
    assert_eq!(pulsing.snapshot(), before);
    assert_eq!(scheduler.tween_count(), 2);
}

#[test]
fn test_dropping_a_mounted_indicator_releases_tweens() {
    let scheduler = AnimationScheduler::new();
    {
        let mut spinner = arc_indicator(scheduler.handle());
        spinner.mount();
        assert_eq!(scheduler.tween_count(), 1);
    }
    assert_eq!(scheduler.tween_count(), 0);
}

#[test]
fn test_caption_visibility() {
    let scheduler = AnimationScheduler::new();

    let silent = arc_indicator(scheduler.handle());
    assert!(silent.body().caption().is_none());
    assert!(!paint(&silent)
        .iter()
        .any(|cmd| matches!(cmd, DrawCommand::DrawText { .. })));

    let captioned = arc_indicator(scheduler.handle())
        .title("Loading")
        .text_color(Color::RED);
    let text = paint(&captioned).into_iter().find_map(|cmd| match cmd {
        DrawCommand::DrawText { text, style, .. } => Some((text, style)),
        _ => None,
    });
    let (text, style) = text.expect("caption should be drawn");
    assert_eq!(text, "Loading");
    assert_eq!(style.weight, FontWeight::Bold);
    assert_eq!(style.color, Color::RED);
}

#[test]
fn test_default_arc_scenario() {
    let scheduler = AnimationScheduler::new();
    let mut spinner = ArcIndicator::new(
        scheduler.handle(),
        IndicatorConfig::new().title("").duration_seconds(0.75),
    );
    spinner.mount();

    let commands = paint(&spinner);
    let ring = commands.iter().find_map(|cmd| match cmd {
        DrawCommand::StrokeCircle { color, opacity, .. } => Some((*color, *opacity)),
        _ => None,
    });
    let (ring_color, ring_opacity) = ring.expect("ring should be drawn");
    assert_eq!(ring_opacity, 0.3);
    assert_eq!(ring_color, Color::SYSTEM_BLUE.with_alpha(0.3));

    match spinner.body().arc() {
        Some(IndicatorNode::Arc { trim_to, color, .. }) => {
            assert_eq!(*trim_to, 0.3);
            assert_eq!(*color, Color::SYSTEM_BLUE);
        }
        other => panic!("expected an arc, got {other:?}"),
    }

    // Forward only: just before the cycle ends the angle is near 360,
    // just after it has started over near 0
    scheduler.tick_by(Duration::from_millis(740));
    assert!(spinner.snapshot().rotation_degrees > 355.0);
    scheduler.tick_by(Duration::from_millis(20));
    assert!(spinner.snapshot().rotation_degrees < 5.0);
}

#[test]
fn test_pulsing_scenario() {
    let scheduler = AnimationScheduler::new();
    let mut pulsing = PulsingArcIndicator::new(
        scheduler.handle(),
        IndicatorConfig::new().duration_seconds(3.0),
    );
    pulsing.mount();

    // Peak sweep at the end of the first cycle, rotation about to restart
    scheduler.tick_by(Duration::from_millis(2990));
    let peak = pulsing.snapshot();
    assert!(peak.sweep_fraction > 0.99);
    assert!(peak.rotation_degrees > 715.0);

    // Second cycle runs the sweep back down while rotation starts over
    scheduler.tick_by(Duration::from_millis(20));
    let next = pulsing.snapshot();
    assert!(next.sweep_fraction > 0.99);
    assert!(next.rotation_degrees < 5.0);

    // Back to nothing after two cycles
    scheduler.tick_by(Duration::from_millis(2980));
    assert!(pulsing.snapshot().sweep_fraction < 0.01);
}

#[test]
fn test_pulsing_sweep_stays_in_range() {
    for curve in [
        Easing::Linear,
        Easing::EaseInOut,
        Easing::CubicBezier(0.3, -0.5, 0.7, 1.5),
    ] {
        let scheduler = AnimationScheduler::new();
        let mut pulsing = PulsingArcIndicator::new(
            scheduler.handle(),
            IndicatorConfig::new().duration_seconds(0.5).curve(curve),
        );
        pulsing.mount();

        for _ in 0..600 {
            scheduler.tick_by(Duration::from_millis(7));
            let sweep = pulsing.snapshot().sweep_fraction;
            assert!((0.0..=0.999).contains(&sweep), "{curve:?}: sweep {sweep}");
        }
    }
}

#[test]
fn test_invalid_duration_is_clamped() {
    let scheduler = AnimationScheduler::new();
    let spinner = arc_indicator(scheduler.handle()).duration_seconds(-2.0);
    assert_eq!(spinner.animation().duration_seconds, 0.01);

    let pulsing = pulsing_arc_indicator(scheduler.handle()).duration_seconds(f64::NAN);
    assert_eq!(pulsing.animation().duration_seconds, 0.01);
}

#[test]
fn test_indicators_from_toml() {
    let config = IndicatorConfig::from_toml_str(
        r##"
        title = "Syncing"
        foreground_color = "#34C759"
        "##,
    )
    .unwrap();

    let scheduler = AnimationScheduler::new();
    let spinner = ArcIndicator::new(scheduler.handle(), config.clone());
    let pulsing = PulsingArcIndicator::new(scheduler.handle(), config);

    assert_eq!(spinner.animation().duration_seconds, 0.75);
    assert_eq!(pulsing.animation().duration_seconds, 3.0);
    assert_eq!(spinner.config().foreground_color.to_hex_string(), "#34C759");
}

#[test]
fn test_huge_duration_spins_slowly() {
    let scheduler = AnimationScheduler::new();
    let mut spinner = arc_indicator(scheduler.handle())
        .duration_seconds(1e36)
        .curve(Easing::Linear);
    spinner.mount();

    scheduler.tick_by(Duration::from_micros(500));
    let rotation = spinner.snapshot().rotation_degrees;
    assert!(rotation < 1e-3, "rotation {rotation}");
}

#[test]
fn test_non_finite_curve_from_toml() {
    let config =
        IndicatorConfig::from_toml_str("curve = { cubic_bezier = [nan, 0.0, 0.5, 1.0] }").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidCurve(_))));

    // Still animates, on the default curve
    let scheduler = AnimationScheduler::new();
    let mut pulsing = PulsingArcIndicator::new(scheduler.handle(), config);
    assert_eq!(pulsing.animation().curve, Easing::EaseInOut);
    pulsing.mount();

    scheduler.tick_by(Duration::from_millis(500));
    let snapshot = pulsing.snapshot();
    assert!(snapshot.sweep_fraction > 0.01, "sweep {}", snapshot.sweep_fraction);
    assert!(snapshot.rotation_degrees > 1.0);
}
