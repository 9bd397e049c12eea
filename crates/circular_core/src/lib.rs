//! Circular Core
//!
//! Foundational types shared by the Circular crates:
//!
//! - **Geometry**: `Point`, `Size`, `Rect` and 2D affine transforms
//! - **Color**: linear RGBA colors with hex parsing and serde support
//! - **Draw Context**: a small 2D drawing API (`DrawContext`) and a
//!   `RecordingContext` that captures draw commands for later replay or
//!   inspection
//!
//! # Example
//!
//! ```rust
//! use circular_core::{Color, DrawContext, Point, RecordingContext, Size, Stroke};
//!
//! let mut ctx = RecordingContext::new(Size::new(50.0, 50.0));
//! ctx.push_opacity(0.3);
//! ctx.stroke_circle(Point::new(25.0, 25.0), 20.0, &Stroke::new(10.0), Color::BLUE);
//! ctx.pop_opacity();
//!
//! assert_eq!(ctx.commands().len(), 3);
//! ```

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use draw::{
    DrawCommand, DrawContext, FontWeight, LineCap, LineJoin, Path, PathCommand, RecordingContext,
    Stroke, TextAlign, TextStyle, Transform,
};
pub use geometry::{Affine2D, Point, Rect, Size};
