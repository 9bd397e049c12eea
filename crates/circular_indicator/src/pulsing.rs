//! Pulsing arc indicator
//!
//! A slower variant whose arc grows from nothing to an almost closed circle
//! and back while turning two full circles per cycle. Two independent
//! repeating animations start on the same mount:
//!
//! 1. the sweep runs 0 → 0.999 and back (autoreversing, so one full pulse
//!    takes two cycles)
//! 2. the rotation runs 0° → 720° and starts over every cycle

use circular_animation::{
    animate_forever, AnimatedProperty, AnimationConfig, Easing, MountHook, Mountable,
    SchedulerHandle,
};
use circular_core::Color;

use crate::config::IndicatorConfig;
use crate::lifecycle::{Lifecycle, Phase};
use crate::node::IndicatorNode;
use crate::state::{wrap_degrees, AnimationSnapshot, AnimationState};
use crate::style::ArcStyle;
use crate::Indicator;

/// Seconds per cycle when the config leaves it unset
pub const DEFAULT_DURATION_SECONDS: f64 = 3.0;

/// Longest the arc gets; stops short of a full turn so the ends never meet
pub const SWEEP_TARGET: f32 = 0.999;

/// Rotation target of one cycle
pub const ROTATION_TARGET_DEGREES: f32 = 720.0;

/// Arc that pulses in length while spinning
pub struct PulsingArcIndicator {
    config: IndicatorConfig,
    style: ArcStyle,
    animation: AnimationConfig,
    state: AnimationState,
    sweep: AnimatedProperty,
    lifecycle: Lifecycle,
}

impl PulsingArcIndicator {
    pub fn new(handle: SchedulerHandle, config: IndicatorConfig) -> Self {
        let animation = config.animation_config(DEFAULT_DURATION_SECONDS);
        let state = AnimationState::rotating_and_sweeping();
        let sweep = state.sweep_fraction.clone().unwrap_or_default();

        let lifecycle = state.bind(Lifecycle::new(handle));

        let target = sweep.clone();
        let lifecycle = animate_forever(lifecycle, animation, true, move |tx| {
            tx.animate(&target, SWEEP_TARGET)
        });

        let rotation = state.rotation_degrees.clone();
        let lifecycle = animate_forever(lifecycle, animation, false, move |tx| {
            tx.animate(&rotation, ROTATION_TARGET_DEGREES)
        });

        Self {
            config,
            style: ArcStyle::default(),
            animation,
            state,
            sweep,
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
        Self::new(handle, config)
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

    /// Seconds per cycle; a full pulse takes twice as long
    pub fn duration_seconds(self, seconds: f64) -> Self {
        self.reconfigure(|c| c.duration_seconds = Some(seconds))
    }

    pub fn curve(self, curve: Easing) -> Self {
        self.reconfigure(|c| c.curve = curve)
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn style(&self) -> &ArcStyle {
        &self.style
    }

    pub fn animation(&self) -> AnimationConfig {
        self.animation
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Current arc length; custom curves that overshoot are held to `[0, SWEEP_TARGET]`
    pub fn sweep_fraction(&self) -> f32 {
        self.sweep.get().clamp(0.0, SWEEP_TARGET)
    }

    pub(crate) fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}

impl Indicator for PulsingArcIndicator {
    fn mount(&mut self) {
        tracing::debug!("PulsingArcIndicator: mount");
        self.lifecycle.mount();
    }

    fn unmount(&mut self) {
        tracing::debug!("PulsingArcIndicator: unmount");
        self.lifecycle.unmount();
    }

    fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    fn body(&self) -> IndicatorNode {
        IndicatorNode::indicator(
            &self.config,
            &self.style,
            self.sweep_fraction(),
            wrap_degrees(self.state.rotation_degrees.get()),
        )
    }

    fn snapshot(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            rotation_degrees: self.state.rotation_degrees.get(),
            sweep_fraction: self.sweep_fraction(),
        }
    }

    fn registration_count(&self) -> usize {
        self.lifecycle.registration_count()
    }
}

impl Mountable for PulsingArcIndicator {
    fn on_mount(&mut self, hook: MountHook) {
        self.lifecycle.on_mount(hook);
    }
}
