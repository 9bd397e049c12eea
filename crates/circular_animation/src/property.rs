//! Animated properties
//!
//! An `AnimatedProperty` is the render-state cell for one animated value,
//! such as an arc's rotation. The owning component reads it when painting;
//! the scheduler writes the interpolated value into it on every tick.
//! Clones share the same cell.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Shared `f32` cell written by the scheduler and read by the renderer
///
/// The value is stored as raw bits in an atomic so the scheduler's
/// background thread can commit frames without locking.
#[derive(Clone, Debug)]
pub struct AnimatedProperty {
    bits: Arc<AtomicU32>,
}

impl AnimatedProperty {
    pub fn new(initial: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(initial.to_bits())),
        }
    }

    /// Current presentation value
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Set the value immediately, without animating
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for AnimatedProperty {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_cell() {
        let rotation = AnimatedProperty::new(0.0);
        let writer = rotation.clone();

        writer.set(270.0);
        assert_eq!(rotation.get(), 270.0);

        let other = AnimatedProperty::default();
        other.set(90.0);
        assert_eq!(rotation.get(), 270.0);
    }
}
