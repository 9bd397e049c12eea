//! Per-instance animation state

use circular_animation::{AnimatedProperty, Mountable};
use serde::Serialize;

use crate::lifecycle::Lifecycle;

/// Animated values owned by one indicator instance
///
/// Created with every value at 0; reset to 0 whenever the instance mounts or
/// unmounts, so each mount starts from fresh state.
#[derive(Clone, Debug, Default)]
pub struct AnimationState {
    pub rotation_degrees: AnimatedProperty,
    /// Only present on indicators whose arc length animates
    pub sweep_fraction: Option<AnimatedProperty>,
}

impl AnimationState {
    /// State with only a rotation
    pub fn rotating() -> Self {
        Self::default()
    }

    /// State with a rotation and an animated sweep
    pub fn rotating_and_sweeping() -> Self {
        Self {
            rotation_degrees: AnimatedProperty::new(0.0),
            sweep_fraction: Some(AnimatedProperty::new(0.0)),
        }
    }

    /// Reset this state whenever `lifecycle` mounts or unmounts
    ///
    /// Call before adding animations so the reset runs first on mount.
    pub fn bind(&self, mut lifecycle: Lifecycle) -> Lifecycle {
        let state = self.clone();
        lifecycle.on_mount(Box::new(move |_| state.reset()));
        let state = self.clone();
        lifecycle.on_unmount(move || state.reset())
    }

    pub fn reset(&self) {
        self.rotation_degrees.set(0.0);
        if let Some(sweep) = &self.sweep_fraction {
            sweep.set(0.0);
        }
    }
}

/// Point-in-time copy of an indicator's animated values
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnimationSnapshot {
    /// Accumulated rotation, before wrapping
    pub rotation_degrees: f32,
    pub sweep_fraction: f32,
}

impl AnimationSnapshot {
    /// Rotation as drawn, in `[0, 360)`
    pub fn displayed_angle(&self) -> f32 {
        wrap_degrees(self.rotation_degrees)
    }
}

/// Wrap an angle into `[0, 360)`
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
