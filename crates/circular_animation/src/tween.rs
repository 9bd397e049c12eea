//! Repeating tweens
//!
//! A `RepeatingTween` interpolates between two values over a fixed duration
//! and then starts over, with no repeat limit. In forward-only mode every
//! cycle runs `from → to` and snaps back to `from`; with `autoreverses` the
//! odd cycles run `to → from`, so the value moves back and forth.
//!
//! Only the position inside the current cycle and a completed-cycle counter
//! are kept, so precision does not degrade however long the tween runs.

use crate::easing::Easing;

/// An eased interpolation that repeats without bound
#[derive(Clone, Debug)]
pub struct RepeatingTween {
    from: f32,
    to: f32,
    /// Duration of one cycle in milliseconds
    duration_ms: f32,
    easing: Easing,
    autoreverses: bool,
    /// Position inside the current cycle in milliseconds
    cycle_time: f32,
    /// Completed cycles since start
    cycles: u64,
    playing: bool,
}

impl RepeatingTween {
    /// Shortest cycle accepted, in milliseconds
    pub const MIN_DURATION_MS: f32 = 1.0;

    /// Create a tween; it does not advance until started
    ///
    /// NaN and too-short durations become `MIN_DURATION_MS`; an infinite one
    /// saturates at `f32::MAX`.
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        let duration_ms = if duration_ms.is_nan() {
            Self::MIN_DURATION_MS
        } else {
            duration_ms.clamp(Self::MIN_DURATION_MS, f32::MAX)
        };

        Self {
            from,
            to,
            duration_ms,
            easing,
            autoreverses: false,
            cycle_time: 0.0,
            cycles: 0,
            playing: false,
        }
    }

    /// Reverse direction on every other cycle (builder pattern)
    pub fn autoreverses(mut self, enabled: bool) -> Self {
        self.autoreverses = enabled;
        self
    }

    /// Start from the beginning of the first cycle
    pub fn start(&mut self) {
        self.cycle_time = 0.0;
        self.cycles = 0;
        self.playing = true;
    }

    /// Stop advancing; the value holds where it is
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// A started tween plays until stopped; it never finishes on its own
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn from_value(&self) -> f32 {
        self.from
    }

    pub fn to_value(&self) -> f32 {
        self.to
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_autoreversing(&self) -> bool {
        self.autoreverses
    }

    /// Number of completed cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the current cycle runs `to → from`
    pub fn is_reversed(&self) -> bool {
        self.autoreverses && self.cycles % 2 == 1
    }

    /// Linear progress through the current cycle (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        (self.cycle_time / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing || dt_ms.is_nan() || dt_ms <= 0.0 {
            return;
        }

        self.cycle_time += dt_ms;
        if self.cycle_time >= self.duration_ms {
            let wraps = (self.cycle_time / self.duration_ms).floor();
            self.cycle_time -= wraps * self.duration_ms;
            // Float rounding can leave cycle_time a hair below zero
            self.cycle_time = self.cycle_time.max(0.0);
            self.cycles += wraps as u64;
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        self.value_at(self.progress(), self.is_reversed())
    }

    /// Sample the value `elapsed_ms` after start, without mutating the tween
    pub fn sample(&self, elapsed_ms: f64) -> f32 {
        if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
            return self.from;
        }
        let duration = self.duration_ms as f64;
        let cycles = (elapsed_ms / duration).floor();
        let progress = ((elapsed_ms - cycles * duration) / duration) as f32;
        let reversed = self.autoreverses && (cycles as u64) % 2 == 1;
        self.value_at(progress, reversed)
    }

    fn value_at(&self, progress: f32, reversed: bool) -> f32 {
        let progress = if reversed { 1.0 - progress } else { progress };
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }
}
