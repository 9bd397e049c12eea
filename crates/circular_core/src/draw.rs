//! Draw Context - 2D Rendering API
//!
//! The `DrawContext` trait is the surface indicators paint into. It keeps a
//! transform stack and an opacity stack and exposes the handful of path, circle
//! and text operations a ring-and-arc indicator needs.
//!
//! `RecordingContext` implements the trait by recording `DrawCommand`s, which
//! a host renderer can replay and tests can inspect.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.push_transform(Transform::rotate_centered(PI, 25.0, 25.0));
//!     ctx.stroke_path(&Path::arc(center, 20.0, 0.0, PI), &Stroke::new(10.0), Color::BLUE);
//!     ctx.pop_transform();
//! }
//! ```

use std::f32::consts::FRAC_PI_2;

use crate::color::Color;
use crate::geometry::{Affine2D, Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Transform Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D transform pushed onto a draw context's transform stack
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform(pub Affine2D);

impl Transform {
    /// Create a 2D rotation centered around a specific point
    ///
    /// Equivalent to translate(center) * rotate(angle) * translate(-center).
    pub fn rotate_centered(angle: f32, center_x: f32, center_y: f32) -> Self {
        let to_center = Affine2D::translation(center_x, center_y);
        let from_center = Affine2D::translation(-center_x, -center_y);
        Transform(
            to_center
                .then(&Affine2D::rotation(angle))
                .then(&from_center),
        )
    }

    /// Create identity transform
    pub fn identity() -> Self {
        Transform(Affine2D::IDENTITY)
    }

    /// Compose with a transform that is applied first
    pub fn then(&self, inner: &Transform) -> Transform {
        Transform(self.0.then(&inner.0))
    }

    pub fn transform_point(&self, point: Point) -> Point {
        self.0.transform_point(point)
    }
}

impl From<Affine2D> for Transform {
    fn from(t: Affine2D) -> Self {
        Transform(t)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Set line cap style
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set line join style
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

/// Text style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Text color
    pub color: Color,
    /// Text alignment relative to the origin
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            weight: FontWeight::Regular,
            color: Color::BLACK,
            align: TextAlign::Left,
        }
    }
}

impl TextStyle {
    /// Create a new text style with font size
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set text color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font weight
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set text alignment
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// Create a circular arc path
    ///
    /// Angles are in radians, measured from the positive x axis (3 o'clock)
    /// and increasing clockwise in y-down space. The arc is approximated with
    /// one cubic Bézier segment per quarter turn or less. A zero sweep yields
    /// an empty path.
    pub fn arc(center: Point, radius: f32, start_angle: f32, sweep_angle: f32) -> Self {
        if sweep_angle == 0.0 || radius <= 0.0 {
            return Self::new();
        }

        // Tolerance keeps an exact quarter-turn multiple from gaining a sliver segment
        let segments = (sweep_angle.abs() / FRAC_PI_2 - 1e-4).ceil().max(1.0) as usize;
        let step = sweep_angle / segments as f32;
        // Control-point distance for a circular segment of angle `step`
        let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;

        let point_at = |angle: f32| {
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        };

        let start = point_at(start_angle);
        let mut path = Self::new().move_to(start.x, start.y);

        for i in 0..segments {
            let a0 = start_angle + step * i as f32;
            let a1 = a0 + step;
            let p0 = point_at(a0);
            let p3 = point_at(a1);
            let c1 = Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos());
            let c2 = Point::new(p3.x + k * a1.sin(), p3.y - k * a1.cos());
            path = path.cubic_to(c1.x, c1.y, c2.x, c2.y, p3.x, p3.y);
        }

        path
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The first point of the path
    pub fn start_point(&self) -> Option<Point> {
        self.commands.iter().find_map(|cmd| match cmd {
            PathCommand::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    /// The point the last drawing command ends at
    pub fn end_point(&self) -> Option<Point> {
        self.commands.last().map(|cmd| match cmd {
            PathCommand::MoveTo(p) => *p,
            PathCommand::CubicTo { end, .. } => *end,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// The 2D drawing surface
pub trait DrawContext {
    /// Push a transform onto the stack (composed with the current one)
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Get the current combined transform
    fn current_transform(&self) -> Transform;

    /// Push an opacity value (multiplied with parent)
    fn push_opacity(&mut self, opacity: f32);

    /// Pop the top opacity from the stack
    fn pop_opacity(&mut self);

    /// Get the current combined opacity
    fn current_opacity(&self) -> f32;

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color);

    /// Stroke a circle (convenience method)
    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, color: Color);

    /// Draw text at a position
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Transform),
    PopTransform,
    PushOpacity(f32),
    PopOpacity,

    // 2D Drawing
    StrokePath {
        path: Path,
        stroke: Stroke,
        color: Color,
        /// Combined transform at the time of recording
        transform: Transform,
        /// Combined opacity at the time of recording
        opacity: f32,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        stroke: Stroke,
        color: Color,
        opacity: f32,
    },
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform>,
    opacity_stack: Vec<f32>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Transform::identity()],
            opacity_stack: vec![1.0],
            viewport,
        }
    }

    /// The viewport this context records for
    pub fn viewport(&self) -> Rect {
        self.viewport.to_rect()
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack = vec![Transform::identity()];
        self.opacity_stack = vec![1.0];
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = self.current_opacity();
        self.opacity_stack.push(current * opacity);
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    fn current_opacity(&self) -> f32 {
        *self.opacity_stack.last().unwrap_or(&1.0)
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
            transform: self.current_transform(),
            opacity: self.current_opacity(),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
            color,
            opacity: self.current_opacity(),
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }
}
