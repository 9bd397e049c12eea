//! Animation scheduler
//!
//! Owns every active repeating tween and advances them each frame. On every
//! tick the interpolated value of each tween is committed into the
//! `AnimatedProperty` it drives, so renderers only ever read plain values.
//!
//! Tweens are registered through a weak `SchedulerHandle` and removed when
//! the `Registration` guard that owns them is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::property::AnimatedProperty;
use crate::tween::RepeatingTween;

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

/// A tween together with the property it writes
struct ActiveTween {
    tween: RepeatingTween,
    target: AnimatedProperty,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, ActiveTween>,
    last_frame: Instant,
}

impl SchedulerInner {
    /// Advance all tweens and commit their values.
    ///
    /// Returns true if any tween is still playing.
    fn advance(&mut self, dt_ms: f32) -> bool {
        let mut active = false;
        for (_, entry) in self.tweens.iter_mut() {
            entry.tween.tick(dt_ms);
            entry.target.set(entry.tween.value());
            active |= entry.tween.is_playing();
        }
        active
    }

    fn has_active(&self) -> bool {
        self.tweens.iter().any(|(_, e)| e.tween.is_playing())
    }
}

/// Lock the scheduler state, recovering the data if a holder panicked
fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Callback type for waking up the main thread from the animation thread
///
/// This is called when there are active animations that need to be rendered.
/// The callback should wake up the host's event loop.
pub type WakeCallback = Arc<dyn Fn() + Send + Sync>;

/// The animation scheduler that ticks all active tweens
///
/// Typically held by the host and shared with components via
/// `SchedulerHandle`. Drive it either from the host's frame loop with
/// `tick()` / `tick_by()`, or from its own thread with `start_background()`.
///
/// ```ignore
/// let mut scheduler = AnimationScheduler::new();
/// scheduler.start_background(); // Runs at the target fps in a background thread
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    /// Stop signal for background thread
    stop_flag: Arc<AtomicBool>,
    /// Set by the background thread when animations need a redraw.
    /// The main thread should check and clear this to request redraws.
    needs_redraw: Arc<AtomicBool>,
    /// Background thread handle (if running)
    thread_handle: Option<JoinHandle<()>>,
    /// Optional callback to wake up the main thread
    wake_callback: Option<WakeCallback>,
    target_fps: u32,
}

impl AnimationScheduler {
    pub const DEFAULT_FPS: u32 = 120;

    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
            stop_flag: Arc::new(AtomicBool::new(false)),
            needs_redraw: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
            wake_callback: None,
            target_fps: Self::DEFAULT_FPS,
        }
    }

    /// Set a wake callback that will be called when animations need a redraw
    ///
    /// The callback is invoked from the background animation thread while
    /// there are active animations.
    pub fn set_wake_callback<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.wake_callback = Some(Arc::new(callback));
    }

    /// Set the frame rate used by the background thread
    ///
    /// Takes effect the next time the background thread is started.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Start the scheduler on a background thread
    ///
    /// The thread runs at the target fps and sets the `needs_redraw` flag
    /// whenever tweens are active. The main thread should call
    /// `take_needs_redraw()` to check and clear it.
    pub fn start_background(&mut self) {
        if self.thread_handle.is_some() {
            return; // Already running
        }

        let inner = Arc::clone(&self.inner);
        let stop_flag = Arc::clone(&self.stop_flag);
        let needs_redraw = Arc::clone(&self.needs_redraw);
        let wake_callback = self.wake_callback.clone();
        let frame_duration = Duration::from_micros(1_000_000 / u64::from(self.target_fps));

        tracing::debug!(
            "AnimationScheduler: starting background thread at {} fps",
            self.target_fps
        );

        self.thread_handle = Some(thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let start = Instant::now();

                let has_active = {
                    let mut inner = lock(&inner);
                    let now = Instant::now();
                    let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
                    inner.last_frame = now;
                    inner.advance(dt_ms)
                };

                if has_active {
                    needs_redraw.store(true, Ordering::Release);
                    if let Some(ref callback) = wake_callback {
                        callback();
                    }
                }

                // Sleep for remaining frame time
                let elapsed = start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }));
    }

    /// Stop the background thread
    pub fn stop_background(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
            tracing::debug!("AnimationScheduler: background thread stopped");
        }
        self.stop_flag.store(false, Ordering::Relaxed);
    }

    /// Check if the background thread is running
    pub fn is_background_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Check and clear the needs_redraw flag
    pub fn take_needs_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::Acquire)
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tick all tweens by the wall-clock time since the previous frame
    ///
    /// Returns true if any tweens are still active (need another tick).
    pub fn tick(&self) -> bool {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;
        inner.advance(dt_ms)
    }

    /// Tick all tweens by an explicit amount of time
    ///
    /// Used by hosts with their own frame clock and by tests that need
    /// deterministic time.
    pub fn tick_by(&self, dt: Duration) -> bool {
        let mut inner = lock(&self.inner);
        inner.last_frame = Instant::now();
        inner.advance(dt.as_secs_f32() * 1000.0)
    }

    /// Check if any tweens are still active
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).has_active()
    }

    /// Get the number of registered tweens
    pub fn tween_count(&self) -> usize {
        lock(&self.inner).tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        // Stop background thread when scheduler is dropped
        self.stop_background();
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to components that need to register animations.
/// It won't prevent the scheduler from being dropped; every operation
/// quietly does nothing once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Start a tween and register it, writing into `target` every tick
    ///
    /// The tween's starting value is committed to `target` immediately.
    /// Returns `None` if the scheduler has been dropped.
    pub fn register_tween(
        &self,
        mut tween: RepeatingTween,
        target: AnimatedProperty,
    ) -> Option<TweenId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = lock(&inner);
            // Reset last_frame so the new tween doesn't see a huge first dt
            guard.last_frame = Instant::now();
            tween.start();
            target.set(tween.value());
            guard.tweens.insert(ActiveTween { tween, target })
        })
    }

    /// Remove a tween. Returns true if it was registered.
    pub fn remove_tween(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).tweens.remove(id).is_some())
            .unwrap_or(false)
    }

    /// Inspect a registered tween
    pub fn with_tween<F, R>(&self, id: TweenId, f: F) -> Option<R>
    where
        F: FnOnce(&RepeatingTween) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get(id).map(|e| f(&e.tween)))
    }

    /// Check whether a tween is registered
    pub fn contains(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).tweens.contains_key(id))
            .unwrap_or(false)
    }

    /// Number of registered tweens (0 if the scheduler is gone)
    pub fn tween_count(&self) -> usize {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).tweens.len())
            .unwrap_or(0)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    fn spin(duration_ms: f32) -> RepeatingTween {
        RepeatingTween::new(0.0, 360.0, duration_ms, Easing::Linear)
    }

    #[test]
    fn test_tick_commits_values() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let rotation = AnimatedProperty::new(0.0);

        let id = handle.register_tween(spin(1000.0), rotation.clone()).unwrap();
        assert!(scheduler.tick_by(Duration::from_millis(250)));

        assert!((rotation.get() - 90.0).abs() < 1e-3);
        assert_eq!(handle.with_tween(id, |t| t.value()), Some(rotation.get()));
    }

    #[test]
    fn test_remove_stops_writing() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let rotation = AnimatedProperty::new(0.0);

        let id = handle.register_tween(spin(1000.0), rotation.clone()).unwrap();
        scheduler.tick_by(Duration::from_millis(100));
        assert!(handle.remove_tween(id));
        assert!(!handle.remove_tween(id));

        let frozen = rotation.get();
        scheduler.tick_by(Duration::from_millis(100));
        assert_eq!(rotation.get(), frozen);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        // Scheduler is dropped, handle should not be alive
        assert!(!handle.is_alive());

        // Operations should safely no-op
        assert!(handle
            .register_tween(spin(1000.0), AnimatedProperty::new(0.0))
            .is_none());
        assert_eq!(handle.tween_count(), 0);
    }

    #[test]
    fn test_scheduler_counts() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        assert_eq!(scheduler.tween_count(), 0);

        let a = handle.register_tween(spin(750.0), AnimatedProperty::new(0.0));
        let b = handle.register_tween(spin(3000.0), AnimatedProperty::new(0.0));
        assert_eq!(scheduler.tween_count(), 2);
        assert!(handle.contains(a.unwrap()));
        assert!(handle.with_tween(b.unwrap(), |t| t.duration_ms()) == Some(3000.0));
    }

    #[test]
    fn test_background_thread_signals_redraw() {
        let mut scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let rotation = AnimatedProperty::new(0.0);
        let _id = handle.register_tween(spin(10_000.0), rotation.clone());

        let woke = Arc::new(AtomicBool::new(false));
        let woke_flag = Arc::clone(&woke);
        scheduler.set_wake_callback(move || woke_flag.store(true, Ordering::Relaxed));
        scheduler.set_target_fps(240);
        scheduler.start_background();
        assert!(scheduler.is_background_running());

        thread::sleep(Duration::from_millis(50));
        scheduler.stop_background();
        assert!(!scheduler.is_background_running());

        assert!(scheduler.take_needs_redraw());
        assert!(!scheduler.take_needs_redraw());
        assert!(woke.load(Ordering::Relaxed));
        assert!(rotation.get() > 0.0);
    }
}
