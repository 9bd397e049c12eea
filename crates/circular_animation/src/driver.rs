//! Animate-forever driver
//!
//! Ties a repeating transition to a node's mount lifecycle. The caller hands
//! over a mutation closure; the first time the node mounts, the closure runs
//! inside a `Transaction` and every property it assigns becomes a
//! `RepeatingTween` registered with the scheduler.
//!
//! ```text
//!   Unmounted ──mount──▶ Animating
//! ```
//!
//! The driver never transitions back on its own. The host lifecycle owns the
//! `Registration` guards collected in the `MountScope` and drops them when
//! the node unmounts, which removes the tweens from the scheduler.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::property::AnimatedProperty;
use crate::scheduler::{SchedulerHandle, TweenId};
use crate::tween::RepeatingTween;

/// Shortest accepted cycle duration, in seconds
pub const MIN_DURATION_SECONDS: f64 = 0.01;

/// Clamp a cycle duration to a usable value
///
/// Non-finite or too-short durations fall back to `MIN_DURATION_SECONDS`
/// with a warning.
pub fn clamp_duration_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds >= MIN_DURATION_SECONDS {
        seconds
    } else {
        tracing::warn!(
            "animation duration {}s is out of range, clamping to {}s",
            seconds,
            MIN_DURATION_SECONDS
        );
        MIN_DURATION_SECONDS
    }
}

/// Curve and per-cycle duration of a repeating transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub curve: Easing,
    pub duration_seconds: f64,
}

impl AnimationConfig {
    pub fn new(curve: Easing, duration_seconds: f64) -> Self {
        Self {
            curve,
            duration_seconds,
        }
    }

    pub fn ease_in_out(duration_seconds: f64) -> Self {
        Self::new(Easing::EaseInOut, duration_seconds)
    }

    pub fn linear(duration_seconds: f64) -> Self {
        Self::new(Easing::Linear, duration_seconds)
    }

    /// Cycle duration in milliseconds, clamped
    ///
    /// Durations too long for an `f32` saturate at `f32::MAX`.
    pub fn duration_ms(&self) -> f32 {
        let ms = clamp_duration_seconds(self.duration_seconds) * 1000.0;
        ms.min(f64::from(f32::MAX)) as f32
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::ease_in_out(1.0)
    }
}

/// Owns one registered tween; dropping it removes the tween
pub struct Registration {
    handle: SchedulerHandle,
    id: TweenId,
}

impl Registration {
    pub fn id(&self) -> TweenId {
        self.id
    }

    /// Whether the tween is still registered with a live scheduler
    pub fn is_active(&self) -> bool {
        self.handle.contains(self.id)
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if self.handle.remove_tween(self.id) {
            tracing::debug!("released tween {:?}", self.id);
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").field("id", &self.id).finish()
    }
}

/// Transition scope handed to the mutation closure
///
/// Every `animate` call turns one property assignment into an unbounded
/// repeating tween from the property's current value to the target.
pub struct Transaction {
    handle: SchedulerHandle,
    config: AnimationConfig,
    autoreverses: bool,
    registrations: Vec<Registration>,
}

impl Transaction {
    pub fn new(handle: SchedulerHandle, config: AnimationConfig, autoreverses: bool) -> Self {
        Self {
            handle,
            config,
            autoreverses,
            registrations: Vec::new(),
        }
    }

    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    pub fn autoreverses(&self) -> bool {
        self.autoreverses
    }

    /// Assign `target` to `property`, repeating the transition forever
    pub fn animate(&mut self, property: &AnimatedProperty, target: f32) {
        let tween = RepeatingTween::new(
            property.get(),
            target,
            self.config.duration_ms(),
            self.config.curve,
        )
        .autoreverses(self.autoreverses);

        match self.handle.register_tween(tween, property.clone()) {
            Some(id) => {
                tracing::debug!(
                    "registered tween {:?}: -> {} over {:.3}s, autoreverses={}",
                    id,
                    target,
                    self.config.duration_seconds,
                    self.autoreverses
                );
                self.registrations.push(Registration {
                    handle: self.handle.clone(),
                    id,
                });
            }
            None => {
                tracing::debug!("scheduler is gone, assigning {} without animation", target);
                property.set(target);
            }
        }
    }

    pub fn into_registrations(self) -> Vec<Registration> {
        self.registrations
    }
}

/// Collects the registrations created while a node mounts
pub struct MountScope {
    handle: SchedulerHandle,
    registrations: Vec<Registration>,
}

impl MountScope {
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            registrations: Vec::new(),
        }
    }

    pub fn handle(&self) -> &SchedulerHandle {
        &self.handle
    }

    pub fn adopt(&mut self, registrations: impl IntoIterator<Item = Registration>) {
        self.registrations.extend(registrations);
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn into_registrations(self) -> Vec<Registration> {
        self.registrations
    }
}

/// Callback run each time a node mounts
pub type MountHook = Box<dyn FnMut(&mut MountScope)>;

/// A node that can run callbacks when it enters the tree
pub trait Mountable {
    fn on_mount(&mut self, hook: MountHook);
}

/// Repeat a transition for as long as `node` stays mounted
///
/// On mount, `mutate` runs once inside a `Transaction` configured with
/// `config` and `autoreverses`; each property it assigns animates toward its
/// target and repeats without bound. Returns the node for chaining.
pub fn animate_forever<N, F>(
    mut node: N,
    config: AnimationConfig,
    autoreverses: bool,
    mut mutate: F,
) -> N
where
    N: Mountable,
    F: FnMut(&mut Transaction) + 'static,
{
    node.on_mount(Box::new(move |scope| {
        let mut tx = Transaction::new(scope.handle().clone(), config, autoreverses);
        mutate(&mut tx);
        scope.adopt(tx.into_registrations());
    }));
    node
}

/// Method-call form of [`animate_forever`]
pub trait AnimateForeverExt: Mountable + Sized {
    fn animate_forever<F>(self, config: AnimationConfig, autoreverses: bool, mutate: F) -> Self
    where
        F: FnMut(&mut Transaction) + 'static,
    {
        animate_forever(self, config, autoreverses, mutate)
    }
}

impl<N: Mountable> AnimateForeverExt for N {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::AnimationScheduler;
    use std::time::Duration;

    #[derive(Default)]
    struct TestNode {
        hooks: Vec<MountHook>,
    }

    impl Mountable for TestNode {
        fn on_mount(&mut self, hook: MountHook) {
            self.hooks.push(hook);
        }
    }

    impl TestNode {
        fn mount(&mut self, handle: &SchedulerHandle) -> Vec<Registration> {
            let mut scope = MountScope::new(handle.clone());
            for hook in &mut self.hooks {
                hook(&mut scope);
            }
            scope.into_registrations()
        }
    }

    #[test]
    fn test_nothing_registered_before_mount() {
        let scheduler = AnimationScheduler::new();
        let rotation = AnimatedProperty::new(0.0);
        let target = rotation.clone();

        let _node = TestNode::default().animate_forever(
            AnimationConfig::linear(1.0),
            false,
            move |tx| tx.animate(&target, 360.0),
        );
        assert_eq!(scheduler.tween_count(), 0);
    }

    #[test]
    fn test_mount_registers_and_drop_releases() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let rotation = AnimatedProperty::new(0.0);
        let target = rotation.clone();

        let mut node = animate_forever(
            TestNode::default(),
            AnimationConfig::linear(0.75),
            false,
            move |tx| tx.animate(&target, 360.0),
        );

        let registrations = node.mount(&handle);
        assert_eq!(registrations.len(), 1);
        assert!(registrations[0].is_active());

        scheduler.tick_by(Duration::from_millis(375));
        assert!((rotation.get() - 180.0).abs() < 1e-2);

        drop(registrations);
        assert_eq!(scheduler.tween_count(), 0);
    }

    #[test]
    fn test_transaction_settings_reach_the_tween() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let sweep = AnimatedProperty::new(0.0);

        let mut tx = Transaction::new(handle.clone(), AnimationConfig::ease_in_out(3.0), true);
        tx.animate(&sweep, 0.999);
        let registrations = tx.into_registrations();

        let id = registrations[0].id();
        let (to, duration, reversing, easing) = handle
            .with_tween(id, |t| {
                (t.to_value(), t.duration_ms(), t.is_autoreversing(), t.easing())
            })
            .unwrap();
        assert_eq!(to, 0.999);
        assert_eq!(duration, 3000.0);
        assert!(reversing);
        assert_eq!(easing, Easing::EaseInOut);
    }

    #[test]
    fn test_dead_scheduler_assigns_directly() {
        let handle = AnimationScheduler::new().handle();
        let rotation = AnimatedProperty::new(0.0);

        let mut tx = Transaction::new(handle, AnimationConfig::default(), false);
        tx.animate(&rotation, 360.0);
        assert!(tx.into_registrations().is_empty());
        assert_eq!(rotation.get(), 360.0);
    }

    #[test]
    fn test_duration_is_clamped() {
        assert_eq!(AnimationConfig::linear(0.0).duration_ms(), 10.0);
        assert_eq!(AnimationConfig::linear(-3.0).duration_ms(), 10.0);
        assert_eq!(AnimationConfig::linear(f64::INFINITY).duration_ms(), 10.0);
        assert_eq!(AnimationConfig::linear(0.75).duration_ms(), 750.0);
    }

    #[test]
    fn test_huge_duration_saturates() {
        assert_eq!(AnimationConfig::linear(1e36).duration_ms(), f32::MAX);
        assert_eq!(AnimationConfig::linear(f64::MAX).duration_ms(), f32::MAX);

        // An enormous cycle barely moves, it never wraps to the shortest one
        let scheduler = AnimationScheduler::new();
        let rotation = AnimatedProperty::new(0.0);
        let mut tx = Transaction::new(scheduler.handle(), AnimationConfig::linear(1e36), false);
        tx.animate(&rotation, 360.0);
        let _registrations = tx.into_registrations();

        scheduler.tick_by(Duration::from_micros(500));
        assert!(rotation.get() < 1e-6, "rotation {}", rotation.get());
    }

    #[test]
    fn test_default_config() {
        let config = AnimationConfig::default();
        assert_eq!(config.curve, Easing::EaseInOut);
        assert_eq!(config.duration_seconds, 1.0);
    }
}
