//! Fixed rendering constants shared by both indicators

use circular_core::{FontWeight, LineCap, LineJoin, Stroke, TextAlign, TextStyle};

/// Geometry and stroke styling of the ring-and-arc indicators
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcStyle {
    /// Side of the square frame holding the ring
    pub diameter: f32,
    pub stroke_width: f32,
    /// Opacity applied on top of the ring's own color
    pub ring_opacity: f32,
    /// Static rotation applied before the animated one, so the arc starts at 12 o'clock
    pub rotation_offset_degrees: f32,
    pub caption_padding: f32,
    pub caption_font_size: f32,
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self {
            diameter: 50.0,
            stroke_width: 10.0,
            ring_opacity: 0.3,
            rotation_offset_degrees: 270.0,
            caption_padding: 6.0,
            caption_font_size: 17.0,
        }
    }
}

impl ArcStyle {
    /// Plain stroke for the background ring
    pub fn ring_stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width)
    }

    /// Rounded stroke for the animated arc
    pub fn arc_stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Round)
    }

    pub fn caption_style(&self) -> TextStyle {
        TextStyle::new(self.caption_font_size)
            .with_weight(FontWeight::Bold)
            .with_align(TextAlign::Center)
    }
}

/// Arc length presets for the spinning indicator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepPreset {
    /// Three tenths of a turn
    #[default]
    Default,
    /// One tenth of a turn
    Compact,
}

impl SweepPreset {
    pub fn fraction(&self) -> f32 {
        match self {
            SweepPreset::Default => 0.3,
            SweepPreset::Compact => 0.1,
        }
    }
}

/// Clamp a sweep fraction to `[0, 1]`, warning when it was out of range
pub fn clamp_sweep(fraction: f32) -> f32 {
    if (0.0..=1.0).contains(&fraction) {
        fraction
    } else {
        let clamped = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        tracing::warn!("sweep fraction {} is out of range, clamping to {}", fraction, clamped);
        clamped
    }
}
