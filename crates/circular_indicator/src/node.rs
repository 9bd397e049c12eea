//! Retained node tree
//!
//! An indicator describes each frame as a small tree:
//!
//! ```text
//! VStack
//! ├── ZStack (square frame)
//! │   ├── Ring
//! │   └── Arc
//! └── Caption (only when the title is non-empty)
//! ```
//!
//! The tree is rebuilt from the current animation state every frame and
//! painted into any `DrawContext` with `render`.

use std::f32::consts::TAU;

use circular_core::{Color, DrawContext, Path, Point, Rect, Size, Stroke, TextStyle, Transform};

use crate::config::IndicatorConfig;
use crate::style::ArcStyle;

/// Average glyph advance as a fraction of the font size, used to estimate caption width
const GLYPH_ADVANCE: f32 = 0.55;

/// One node of an indicator's render tree
#[derive(Clone, Debug, PartialEq)]
pub enum IndicatorNode {
    /// Children stacked top to bottom, each centered horizontally
    VStack { children: Vec<IndicatorNode> },
    /// Children painted on top of each other inside a square frame
    ZStack {
        side: f32,
        children: Vec<IndicatorNode>,
    },
    /// Full circle inscribed in the parent frame
    Ring {
        stroke: Stroke,
        color: Color,
        opacity: f32,
    },
    /// Part of the circle from `trim_from` to `trim_to` (fractions of a turn,
    /// starting at 3 o'clock), turned by each of `rotations` in order
    Arc {
        trim_from: f32,
        trim_to: f32,
        stroke: Stroke,
        color: Color,
        rotations: Vec<f32>,
    },
    /// Text line with padding on every side
    Caption {
        text: String,
        style: TextStyle,
        padding: f32,
    },
}

impl IndicatorNode {
    /// Ring, arc trimmed to `sweep`, and caption for one frame
    ///
    /// The arc is turned by the style's static offset and then by
    /// `rotation_degrees`.
    pub fn indicator(
        config: &IndicatorConfig,
        style: &ArcStyle,
        sweep: f32,
        rotation_degrees: f32,
    ) -> IndicatorNode {
        let mut children = vec![IndicatorNode::ZStack {
            side: style.diameter,
            children: vec![
                IndicatorNode::Ring {
                    stroke: style.ring_stroke(),
                    color: config.background_color,
                    opacity: style.ring_opacity,
                },
                IndicatorNode::Arc {
                    trim_from: 0.0,
                    trim_to: sweep,
                    stroke: style.arc_stroke(),
                    color: config.foreground_color,
                    rotations: vec![style.rotation_offset_degrees, rotation_degrees],
                },
            ],
        }];

        if !config.title.is_empty() {
            children.push(IndicatorNode::Caption {
                text: config.title.clone(),
                style: style.caption_style().with_color(config.text_color),
                padding: style.caption_padding,
            });
        }

        IndicatorNode::VStack { children }
    }

    pub fn children(&self) -> &[IndicatorNode] {
        match self {
            IndicatorNode::VStack { children } | IndicatorNode::ZStack { children, .. } => {
                children
            }
            _ => &[],
        }
    }

    /// First node, depth first, matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Option<&IndicatorNode>
    where
        P: Fn(&IndicatorNode) -> bool + Copy,
    {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find(predicate))
    }

    pub fn caption(&self) -> Option<&IndicatorNode> {
        self.find(|n| matches!(n, IndicatorNode::Caption { .. }))
    }

    pub fn ring(&self) -> Option<&IndicatorNode> {
        self.find(|n| matches!(n, IndicatorNode::Ring { .. }))
    }

    pub fn arc(&self) -> Option<&IndicatorNode> {
        self.find(|n| matches!(n, IndicatorNode::Arc { .. }))
    }

    /// Space the node asks for; leaves that fill their parent report zero
    pub fn preferred_size(&self) -> Size {
        match self {
            IndicatorNode::VStack { children } => {
                children.iter().fold(Size::ZERO, |acc, child| {
                    let size = child.preferred_size();
                    Size::new(acc.width.max(size.width), acc.height + size.height)
                })
            }
            IndicatorNode::ZStack { side, .. } => Size::new(*side, *side),
            IndicatorNode::Ring { .. } | IndicatorNode::Arc { .. } => Size::ZERO,
            IndicatorNode::Caption {
                text,
                style,
                padding,
            } => Size::new(
                text.chars().count() as f32 * style.size * GLYPH_ADVANCE + padding * 2.0,
                style.size + padding * 2.0,
            ),
        }
    }

    /// Paint the node into `bounds`
    pub fn render(&self, ctx: &mut dyn DrawContext, bounds: Rect) {
        match self {
            IndicatorNode::VStack { children } => {
                let mut y = bounds.y();
                for child in children {
                    let height = child.preferred_size().height;
                    child.render(ctx, Rect::new(bounds.x(), y, bounds.width(), height));
                    y += height;
                }
            }
            IndicatorNode::ZStack { side, children } => {
                let side = side.min(bounds.width()).min(bounds.height()).max(0.0);
                let center = bounds.center();
                let frame = Rect::new(center.x - side / 2.0, center.y - side / 2.0, side, side);
                for child in children {
                    child.render(ctx, frame);
                }
            }
            IndicatorNode::Ring {
                stroke,
                color,
                opacity,
            } => {
                let (center, radius) = inscribed_circle(bounds, stroke.width);
                ctx.push_opacity(*opacity);
                ctx.stroke_circle(center, radius, stroke, *color);
                ctx.pop_opacity();
            }
            IndicatorNode::Arc {
                trim_from,
                trim_to,
                stroke,
                color,
                rotations,
            } => {
                let (center, radius) = inscribed_circle(bounds, stroke.width);
                let path = Path::arc(
                    center,
                    radius,
                    trim_from * TAU,
                    (trim_to - trim_from) * TAU,
                );
                if path.is_empty() {
                    return;
                }

                for degrees in rotations {
                    ctx.push_transform(Transform::rotate_centered(
                        degrees.to_radians(),
                        center.x,
                        center.y,
                    ));
                }
                ctx.stroke_path(&path, stroke, *color);
                for _ in rotations {
                    ctx.pop_transform();
                }
            }
            IndicatorNode::Caption {
                text,
                style,
                padding,
            } => {
                let origin = Point::new(bounds.center().x, bounds.y() + padding);
                ctx.draw_text(text, origin, style);
            }
        }
    }
}

/// Center and radius of a circle whose stroke stays inside `bounds`
fn inscribed_circle(bounds: Rect, stroke_width: f32) -> (Point, f32) {
    let side = bounds.width().min(bounds.height());
    let radius = ((side - stroke_width) / 2.0).max(0.0);
    (bounds.center(), radius)
}
