//! Circular Animation System
//!
//! Eased, endlessly repeating tweens and the machinery that ties them to a
//! node's mount lifecycle.
//!
//! # Features
//!
//! - **Easing**: named timing curves (linear, ease-in, ease-out,
//!   ease-in-out) and arbitrary cubic Béziers
//! - **Repeating Tweens**: unbounded repeats, forward-only or autoreversing
//! - **Scheduler**: ticks every registered tween each frame and commits the
//!   interpolated value into the animated property, optionally from a
//!   background thread
//! - **Animate Forever**: `animate_forever` registers a repeating transition
//!   the first time a node mounts and releases it when the node unmounts
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use circular_animation::{
//!     AnimatedProperty, AnimationConfig, AnimationScheduler, MountScope, Transaction,
//! };
//!
//! let scheduler = AnimationScheduler::new();
//! let rotation = AnimatedProperty::new(0.0);
//!
//! let mut tx = Transaction::new(scheduler.handle(), AnimationConfig::linear(1.0), false);
//! tx.animate(&rotation, 360.0);
//! let mut scope = MountScope::new(scheduler.handle());
//! scope.adopt(tx.into_registrations());
//!
//! scheduler.tick_by(Duration::from_millis(250));
//! assert!((rotation.get() - 90.0).abs() < 1e-3);
//! ```

pub mod driver;
pub mod easing;
pub mod property;
pub mod scheduler;
pub mod tween;

pub use driver::{
    animate_forever, clamp_duration_seconds, AnimateForeverExt, AnimationConfig, MountHook,
    MountScope, Mountable, Registration, Transaction, MIN_DURATION_SECONDS,
};
pub use easing::Easing;
pub use property::AnimatedProperty;
pub use scheduler::{AnimationScheduler, SchedulerHandle, TweenId, WakeCallback};
pub use tween::RepeatingTween;
