//! Overlay render configuration.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::FieldarError;

/// Symbol used for point markers in the 3d scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointSymbol {
    /// A sphere.
    #[default]
    Sphere,
    /// An axis-aligned box.
    Box,
    /// An upward cone.
    Cone,
}

/// Render configuration of the overlay.
///
/// These are pure styling parameters: they affect which primitives are
/// emitted and how they look, never the geodesy results. The engine takes the
/// whole struct fresh on every change, there is no per-field update.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OverlayOptions {
    /// Fill color of polygon fences.
    pub polygon_fill: Color,
    /// Opacity of polygon fences, in `[0, 1]`, multiplied with the global
    /// transparency.
    pub polygon_opacity: f64,
    /// Color of polygon outlines.
    pub polygon_stroke: Color,
    /// Stroke width of polygon outlines in pixels.
    pub polygon_width: f64,
    /// Color of line features.
    pub line_color: Color,
    /// Width of line features in pixels.
    pub line_width: f64,
    /// Color of point markers.
    pub point_color: Color,
    /// Symbol used for point markers.
    pub point_symbol: PointSymbol,
    /// Whether marker labels are attached to point markers.
    pub show_labels: bool,
    /// Extra vertical offset of the estimated ground level in meters.
    pub height_offset: f64,
    /// Douglas-Peucker tolerance for lines and rings in meters.
    pub simplify_tolerance: f64,
    /// Global transparency in `[0, 1]`; 0 is fully opaque.
    pub transparency: f64,
    /// Assumed height of the position sensor above the ground in meters.
    /// Used to estimate the terrain level from the reported altitude.
    pub observer_height: f64,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            polygon_fill: Color::rgba(0x22, 0xD3, 0xEE, 0xFF),
            polygon_opacity: 0.25,
            polygon_stroke: Color::rgba(0x22, 0xD3, 0xEE, 0xFF),
            polygon_width: 4.0,
            line_color: Color::rgba(0x22, 0xC5, 0x5E, 0xFF),
            line_width: 3.0,
            point_color: Color::rgba(0xEA, 0xB3, 0x08, 0xFF),
            point_symbol: PointSymbol::Sphere,
            show_labels: true,
            height_offset: 0.0,
            simplify_tolerance: 1.0,
            transparency: 0.0,
            observer_height: 1.6,
        }
    }
}

impl OverlayOptions {
    /// Opacity multiplier derived from the global transparency.
    pub fn global_opacity(&self) -> f64 {
        1.0 - self.transparency
    }

    /// Checks that all parameters are within their valid ranges.
    pub fn validate(&self) -> Result<(), FieldarError> {
        fn check_unit(name: &str, value: f64) -> Result<(), FieldarError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(FieldarError::InvalidOptions(format!(
                    "{name} must be in [0, 1], got {value}"
                )))
            }
        }

        fn check_non_negative(name: &str, value: f64) -> Result<(), FieldarError> {
            if value >= 0.0 {
                Ok(())
            } else {
                Err(FieldarError::InvalidOptions(format!(
                    "{name} must not be negative, got {value}"
                )))
            }
        }

        check_unit("polygon_opacity", self.polygon_opacity)?;
        check_unit("transparency", self.transparency)?;
        check_non_negative("polygon_width", self.polygon_width)?;
        check_non_negative("line_width", self.line_width)?;
        check_non_negative("simplify_tolerance", self.simplify_tolerance)?;
        check_non_negative("observer_height", self.observer_height)?;

        Ok(())
    }
}
