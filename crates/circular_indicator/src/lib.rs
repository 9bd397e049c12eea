//! Circular Indicators
//!
//! Decorative loading indicators: a background ring with an animated arc on
//! top and an optional caption underneath.
//!
//! - [`ArcIndicator`]: a fixed-length arc spinning a full turn per cycle
//! - [`PulsingArcIndicator`]: an arc that grows and shrinks while turning
//!   two full turns per cycle
//!
//! Both animate for as long as they stay mounted. Each instance owns its
//! animated values; the scheduler writes them, painting reads them.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use circular_animation::AnimationScheduler;
//! use circular_core::{RecordingContext, Rect, Size};
//! use circular_indicator::prelude::*;
//!
//! let scheduler = AnimationScheduler::new();
//! let mut spinner = arc_indicator(scheduler.handle()).title("Loading");
//!
//! spinner.mount();
//! scheduler.tick_by(Duration::from_millis(100));
//!
//! let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
//! spinner.paint(&mut ctx, Rect::new(0.0, 0.0, 100.0, 100.0));
//! assert!(!ctx.commands().is_empty());
//! ```

pub mod arc;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod node;
pub mod pulsing;
pub mod state;
pub mod style;

use circular_animation::SchedulerHandle;
use circular_core::{DrawContext, Rect, Size};

pub use arc::ArcIndicator;
pub use config::IndicatorConfig;
pub use error::{ConfigError, Result};
pub use lifecycle::{Lifecycle, Phase, UnmountHook};
pub use node::IndicatorNode;
pub use pulsing::PulsingArcIndicator;
pub use state::{wrap_degrees, AnimationSnapshot, AnimationState};
pub use style::{ArcStyle, SweepPreset};

/// Common surface of the mountable indicators
pub trait Indicator {
    /// Enter the tree and start animating; a no-op when already mounted
    fn mount(&mut self);

    /// Leave the tree, releasing every animation; a no-op when not mounted
    fn unmount(&mut self);

    fn is_mounted(&self) -> bool;

    /// Build the render tree from the current animation state
    fn body(&self) -> IndicatorNode;

    /// Current animated values
    fn snapshot(&self) -> AnimationSnapshot;

    /// Live scheduler registrations owned by this indicator
    fn registration_count(&self) -> usize;

    /// Paint the current frame into `bounds`
    fn paint(&self, ctx: &mut dyn DrawContext, bounds: Rect) {
        self.body().render(ctx, bounds);
    }

    fn preferred_size(&self) -> Size {
        self.body().preferred_size()
    }
}

/// Create a spinning arc indicator with the default configuration
pub fn arc_indicator(handle: SchedulerHandle) -> ArcIndicator {
    ArcIndicator::new(handle, IndicatorConfig::default())
}

/// Create a pulsing arc indicator with the default configuration
pub fn pulsing_arc_indicator(handle: SchedulerHandle) -> PulsingArcIndicator {
    PulsingArcIndicator::new(handle, IndicatorConfig::default())
}

/// Common imports for building indicators
pub mod prelude {
    pub use crate::{
        arc_indicator, pulsing_arc_indicator, AnimationSnapshot, ArcIndicator, ArcStyle,
        Indicator, IndicatorConfig, IndicatorNode, PulsingArcIndicator, SweepPreset,
    };
    pub use circular_animation::Easing;
    pub use circular_core::Color;
}
