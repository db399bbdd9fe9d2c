//! Board configuration: every tunable constant with its default value.

use crate::color::{ColorParseError, SerializableColor};
use crate::history::MAX_HISTORY;
use crate::selection::{HANDLE_DRAW_HALF_SIZE, HANDLE_SIZE, MIN_RESIZE_EXTENT};
use crate::shapes::{StickyNote, Text};
use crate::tools::{MIN_CREATE_EXTENT, SIMPLIFY_TOLERANCE};
use crate::viewport::{MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON syntax or type error (including malformed color strings).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A color value could not be parsed.
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),
    /// Zoom limits are not a finite, positive, ordered range.
    #[error("invalid zoom range [{min}, {max}]")]
    ZoomRange { min: f64, max: f64 },
    /// The sticky palette has no colors.
    #[error("sticky palette is empty")]
    EmptyPalette,
    /// History must hold at least one snapshot.
    #[error("history capacity must be at least 1")]
    HistoryCapacity,
    /// A size or length that must be positive is not.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    /// A margin or tolerance is negative or not finite.
    #[error("{field} must be zero or more, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Tunable engine constants.
///
/// Colors serialize as CSS strings (`#rrggbb`, `rgba(...)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(with = "css_color")]
    pub stroke_color: SerializableColor,
    #[serde(with = "css_color")]
    pub fill_color: SerializableColor,
    /// New shapes get no fill.
    pub no_fill: bool,
    pub stroke_width: f64,

    /// Sticky colors, cycled by creation order.
    #[serde(with = "css_palette")]
    pub sticky_palette: Vec<SerializableColor>,
    pub sticky_width: f64,
    pub sticky_height: f64,

    /// Font size of new text labels.
    pub text_font_size: f64,
    /// Font family for all text measurement and rendering.
    pub font_family: String,

    /// Hit-test margin in screen pixels.
    pub hit_tolerance: f64,
    /// Handle hit half-size in screen pixels.
    pub handle_size: f64,
    /// Drawn handle half-size in screen pixels.
    pub handle_draw_size: f64,
    pub min_create_extent: f64,
    pub min_resize_extent: f64,

    pub history_capacity: usize,

    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Factor applied by the zoom buttons.
    pub zoom_step: f64,
    /// Factor applied per wheel notch.
    pub wheel_zoom_step: f64,

    pub grid_spacing: f64,
    pub grid_dot_radius: f64,
    /// Grid dot color used when the host style input is missing or invalid.
    #[serde(with = "css_color")]
    pub grid_color: SerializableColor,

    /// Freehand simplification tolerance in canvas units.
    pub simplify_tolerance: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::white(),
            fill_color: SerializableColor::rgb(0x3a, 0x3a, 0x55),
            no_fill: true,
            stroke_width: 2.0,
            sticky_palette: vec![
                SerializableColor::rgb(0xfe, 0xf0, 0x8a),
                SerializableColor::rgb(0xbb, 0xf7, 0xd0),
                SerializableColor::rgb(0xbf, 0xdb, 0xfe),
                SerializableColor::rgb(0xfb, 0xcf, 0xe8),
                SerializableColor::rgb(0xfc, 0xd5, 0xb4),
            ],
            sticky_width: StickyNote::DEFAULT_WIDTH,
            sticky_height: StickyNote::DEFAULT_HEIGHT,
            text_font_size: Text::DEFAULT_FONT_SIZE,
            font_family: "system-ui, sans-serif".to_string(),
            hit_tolerance: 6.0,
            handle_size: HANDLE_SIZE,
            handle_draw_size: HANDLE_DRAW_HALF_SIZE,
            min_create_extent: MIN_CREATE_EXTENT,
            min_resize_extent: MIN_RESIZE_EXTENT,
            history_capacity: MAX_HISTORY,
            min_zoom: MIN_SCALE,
            max_zoom: MAX_SCALE,
            zoom_step: 1.2,
            wheel_zoom_step: 1.1,
            grid_spacing: 25.0,
            grid_dot_radius: 1.0,
            grid_color: SerializableColor::new(255, 255, 255, 15),
            simplify_tolerance: SIMPLIFY_TOLERANCE,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded board config");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is within its acceptable range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.min_zoom.is_finite() && self.max_zoom.is_finite();
        if !finite || self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(ConfigError::ZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if self.sticky_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::HistoryCapacity);
        }
        let positive = [
            ("stroke_width", self.stroke_width),
            ("sticky_width", self.sticky_width),
            ("sticky_height", self.sticky_height),
            ("text_font_size", self.text_font_size),
            ("handle_size", self.handle_size),
            ("handle_draw_size", self.handle_draw_size),
            ("zoom_step", self.zoom_step),
            ("wheel_zoom_step", self.wheel_zoom_step),
            ("grid_spacing", self.grid_spacing),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let non_negative = [
            ("hit_tolerance", self.hit_tolerance),
            ("min_create_extent", self.min_create_extent),
            ("min_resize_extent", self.min_resize_extent),
            ("grid_dot_radius", self.grid_dot_radius),
            ("simplify_tolerance", self.simplify_tolerance),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Palette color for the `n`th sticky created.
    pub fn sticky_color(&self, n: usize) -> SerializableColor {
        match self.sticky_palette.len() {
            0 => SerializableColor::white(),
            len => self.sticky_palette[n % len],
        }
    }
}

mod css_color {
    use crate::color::SerializableColor;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &SerializableColor, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SerializableColor, D::Error> {
        let s = String::deserialize(deserializer)?;
        SerializableColor::parse(&s).map_err(serde::de::Error::custom)
    }
}

mod css_palette {
    use crate::color::SerializableColor;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(colors: &[SerializableColor], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(colors.iter().map(ToString::to_string))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<SerializableColor>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| SerializableColor::parse(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
