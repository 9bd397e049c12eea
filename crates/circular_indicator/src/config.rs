//! Indicator configuration
//!
//! `IndicatorConfig` carries the caller-supplied appearance and timing of an
//! indicator. It is plain data: build it in code with the chained setters,
//! or load it from TOML.
//!
//! ```toml
//! title = "Loading"
//! text_color = "#000000"
//! background_color = "#007AFF4D"
//! foreground_color = "#007AFF"
//! duration_seconds = 0.75
//! curve = "ease_in_out"
//! ```
//!
//! Every field is optional in the file; missing fields take the defaults.
//! A missing `duration_seconds` means "use the component's default".

use std::path::Path;

use circular_animation::{clamp_duration_seconds, AnimationConfig, Easing, MIN_DURATION_SECONDS};
use circular_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Appearance and timing of an indicator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Caption shown beneath the arc; empty hides it
    pub title: String,
    pub text_color: Color,
    /// Tint of the background ring
    pub background_color: Color,
    /// Tint of the animated arc
    pub foreground_color: Color,
    /// Seconds per animation cycle; `None` uses the component default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    pub curve: Easing,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            text_color: Color::BLACK,
            background_color: Color::SYSTEM_BLUE.with_alpha(0.3),
            foreground_color: Color::SYSTEM_BLUE,
            duration_seconds: None,
            curve: Easing::EaseInOut,
        }
    }
}

impl IndicatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn text_color(mut self, color: impl Into<Color>) -> Self {
        self.text_color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn foreground_color(mut self, color: impl Into<Color>) -> Self {
        self.foreground_color = color.into();
        self
    }

    pub fn duration_seconds(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn curve(mut self, curve: Easing) -> Self {
        self.curve = curve;
        self
    }

    /// Cycle duration, falling back to `default_seconds` and clamped
    pub fn resolved_duration(&self, default_seconds: f64) -> f64 {
        clamp_duration_seconds(self.duration_seconds.unwrap_or(default_seconds))
    }

    /// Curve to animate with; a curve with non-finite control points falls
    /// back to ease-in-out
    pub fn resolved_curve(&self) -> Easing {
        if self.curve.is_finite() {
            self.curve
        } else {
            tracing::warn!(
                "curve {:?} has non-finite control points, using ease_in_out",
                self.curve
            );
            Easing::EaseInOut
        }
    }

    /// Animation settings for a component whose default cycle is `default_seconds`
    pub fn animation_config(&self, default_seconds: f64) -> AnimationConfig {
        AnimationConfig::new(self.resolved_curve(), self.resolved_duration(default_seconds))
    }

    /// Strict check of every field
    ///
    /// Components never require this; they clamp out-of-range values instead.
    pub fn validate(&self) -> Result<()> {
        if let Some(seconds) = self.duration_seconds {
            if !seconds.is_finite() || seconds < MIN_DURATION_SECONDS {
                return Err(ConfigError::InvalidDuration(seconds));
            }
        }

        if !self.curve.is_finite() {
            return Err(ConfigError::InvalidCurve(self.curve));
        }

        for (name, color) in [
            ("text_color", self.text_color),
            ("background_color", self.background_color),
            ("foreground_color", self.foreground_color),
        ] {
            let in_range = color
                .to_array()
                .iter()
                .all(|c| c.is_finite() && (0.0..=1.0).contains(c));
            if !in_range {
                return Err(ConfigError::InvalidColor(format!(
                    "{name} has components outside 0..=1: {:?}",
                    color.to_array()
                )));
            }
        }

        Ok(())
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("loaded indicator config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
