//! Spinning arc indicator
//!
//! A fixed-length arc that turns a full circle every cycle, drawn over a
//! faint background ring.
//!
//! # Example
//!
//! ```rust
//! use circular_animation::AnimationScheduler;
//! use circular_indicator::prelude::*;
//!
//! let scheduler = AnimationScheduler::new();
//!
//! // Default: three tenths of a turn, 0.75s per revolution
//! let spinner = arc_indicator(scheduler.handle());
//!
//! // Short arc with a caption
//! let compact = ArcIndicator::with_preset(
//!     scheduler.handle(),
//!     IndicatorConfig::new().title("Loading"),
//!     SweepPreset::Compact,
//! );
//! assert_eq!(compact.sweep_fraction(), 0.1);
//! ```

use circular_animation::{
    animate_forever, AnimationConfig, Easing, MountHook, Mountable, SchedulerHandle,
};
use circular_core::Color;

use crate::config::IndicatorConfig;
use crate::lifecycle::{Lifecycle, Phase};
use crate::node::IndicatorNode;
use crate::state::{wrap_degrees, AnimationSnapshot, AnimationState};
use crate::style::{clamp_sweep, ArcStyle, SweepPreset};
use crate::Indicator;

/// Seconds per revolution when the config leaves it unset
pub const DEFAULT_DURATION_SECONDS: f64 = 0.75;

/// Rotation target of one cycle
pub const ROTATION_TARGET_DEGREES: f32 = 360.0;

/// Fixed-length arc that spins continuously while mounted
///
/// Each cycle turns the arc from 0° to 360° under the configured curve and
/// starts over; the two ends of a cycle show the same angle, so the
/// restart is seamless.
pub struct ArcIndicator {
    config: IndicatorConfig,
    style: ArcStyle,
    sweep: f32,
    animation: AnimationConfig,
    state: AnimationState,
    lifecycle: Lifecycle,
}

impl ArcIndicator {
    /// Create an indicator with the default arc length
    pub fn new(handle: SchedulerHandle, config: IndicatorConfig) -> Self {
        Self::build(handle, config, SweepPreset::Default.fraction())
    }

    pub fn with_preset(
        handle: SchedulerHandle,
        config: IndicatorConfig,
        preset: SweepPreset,
    ) -> Self {
        Self::build(handle, config, preset.fraction())
    }

    /// Create an indicator with a custom arc length, clamped to `[0, 1]`
    pub fn with_sweep(handle: SchedulerHandle, config: IndicatorConfig, fraction: f32) -> Self {
        Self::build(handle, config, clamp_sweep(fraction))
    }

    fn build(handle: SchedulerHandle, config: IndicatorConfig, sweep: f32) -> Self {
        let animation = config.animation_config(DEFAULT_DURATION_SECONDS);
        let state = AnimationState::rotating();

        let rotation = state.rotation_degrees.clone();
        let lifecycle = animate_forever(
            state.bind(Lifecycle::new(handle)),
            animation,
            false,
            move |tx| tx.animate(&rotation, ROTATION_TARGET_DEGREES),
        );

        Self {
            config,
            style: ArcStyle::default(),
            sweep,
            animation,
            state,
            lifecycle,
        }
    }

    /// Rebuild with a modified config
    ///
    /// Setters are meant for construction: the result is always unmounted.
    fn reconfigure(self, f: impl FnOnce(&mut IndicatorConfig)) -> Self {
        let handle = self.lifecycle.handle().clone();
        let mut config = self.config.clone();
        f(&mut config);
        Self::build(handle, config, self.sweep)
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.reconfigure(|c| c.title = title)
    }

    pub fn text_color(self, color: impl Into<Color>) -> Self {
        let color = color.into();
        self.reconfigure(|c| c.text_color = color)
    }

    pub fn background_color(self, color: impl Into<Color>) -> Self {
        let color = color.into();
        self.reconfigure(|c| c.background_color = color)
    }

    pub fn foreground_color(self, color: impl Into<Color>) -> Self {
        let color = color.into();
        self.reconfigure(|c| c.foreground_color = color)
    }

    /// Seconds per revolution
    pub fn duration_seconds(self, seconds: f64) -> Self {
        self.reconfigure(|c| c.duration_seconds = Some(seconds))
    }

    pub fn curve(self, curve: Easing) -> Self {
        self.reconfigure(|c| c.curve = curve)
    }

    /// Arc length as a fraction of the circle, clamped to `[0, 1]`
    pub fn sweep(self, fraction: f32) -> Self {
        let handle = self.lifecycle.handle().clone();
        Self::build(handle, self.config.clone(), clamp_sweep(fraction))
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn style(&self) -> &ArcStyle {
        &self.style
    }

    /// Resolved curve and clamped cycle duration
    pub fn animation(&self) -> AnimationConfig {
        self.animation
    }

    pub fn sweep_fraction(&self) -> f32 {
        self.sweep
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }
}

impl Indicator for ArcIndicator {
    fn mount(&mut self) {
        tracing::debug!("ArcIndicator: mount (sweep {})", self.sweep);
        self.lifecycle.mount();
    }

    fn unmount(&mut self) {
        tracing::debug!("ArcIndicator: unmount");
        self.lifecycle.unmount();
    }

    fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    fn body(&self) -> IndicatorNode {
        IndicatorNode::indicator(
            &self.config,
            &self.style,
            self.sweep,
            wrap_degrees(self.state.rotation_degrees.get()),
        )
    }

    fn snapshot(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            rotation_degrees: self.state.rotation_degrees.get(),
            sweep_fraction: self.sweep,
        }
    }

    fn registration_count(&self) -> usize {
        self.lifecycle.registration_count()
    }
}

impl Mountable for ArcIndicator {
    fn on_mount(&mut self, hook: MountHook) {
        self.lifecycle.on_mount(hook);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circular_animation::AnimationScheduler;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let scheduler = AnimationScheduler::new();
        let spinner = ArcIndicator::new(scheduler.handle(), IndicatorConfig::default());

        assert_eq!(spinner.sweep_fraction(), 0.3);
        assert_eq!(spinner.animation().duration_seconds, 0.75);
        assert_eq!(spinner.animation().curve, Easing::EaseInOut);
        assert_eq!(spinner.phase(), Phase::Unmounted);
        assert_eq!(scheduler.tween_count(), 0);
    }

    #[test]
    fn test_mount_spins_to_full_turn() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let mut spinner = ArcIndicator::new(handle.clone(), IndicatorConfig::default());

        spinner.mount();
        assert_eq!(spinner.registration_count(), 1);

        let id = spinner.lifecycle.registration_ids()[0];
        let (from, to, reversing) = handle
            .with_tween(id, |t| (t.from_value(), t.to_value(), t.is_autoreversing()))
            .unwrap();
        assert_eq!((from, to, reversing), (0.0, 360.0, false));

        scheduler.tick_by(Duration::from_millis(375));
        assert!((spinner.snapshot().rotation_degrees - 180.0).abs() < 0.5);
    }

    #[test]
    fn test_sweep_is_clamped() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let wide = ArcIndicator::with_sweep(handle.clone(), IndicatorConfig::default(), 1.4);
        assert_eq!(wide.sweep_fraction(), 1.0);

        let custom = ArcIndicator::new(handle, IndicatorConfig::default()).sweep(-0.5);
        assert_eq!(custom.sweep_fraction(), 0.0);
    }

    #[test]
    fn test_setters_keep_sweep_and_rebuild_animation() {
        let scheduler = AnimationScheduler::new();
        let spinner = ArcIndicator::with_preset(
            scheduler.handle(),
            IndicatorConfig::default(),
            SweepPreset::Compact,
        )
        .duration_seconds(2.0)
        .curve(Easing::Linear)
        .title("Loading");

        assert_eq!(spinner.sweep_fraction(), 0.1);
        assert_eq!(spinner.animation(), AnimationConfig::linear(2.0));
        assert_eq!(spinner.config().title, "Loading");
    }

    #[test]
    fn test_body_wraps_displayed_angle() {
        let scheduler = AnimationScheduler::new();
        let spinner = crate::arc_indicator(scheduler.handle());
        spinner.state().rotation_degrees.set(450.0);

        match spinner.body().arc() {
            Some(IndicatorNode::Arc {
                rotations, trim_to, ..
            }) => {
                assert_eq!(rotations, &vec![270.0, 90.0]);
                assert_eq!(*trim_to, 0.3);
            }
            other => panic!("expected an arc, got {other:?}"),
        }
    }
}
