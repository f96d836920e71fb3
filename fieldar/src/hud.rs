//! 2d heads-up layout of aim targets.
//!
//! The HUD is a deliberately simple radial projection: the compass heading
//! (yaw) is the only sensor input, there is no pitch or roll compensation.
//! Targets within the field of view map to a horizontal position by their
//! relative bearing and to a fixed vertical band by their distance.

use fieldar_types::Size;
use serde::{Deserialize, Serialize};

use crate::geodesy::{normalize_bearing, relative_bearing};
use crate::target::Target;

/// Default field of view of the HUD frustum in degrees.
pub const DEFAULT_FOV: f64 = 65.0;

/// Default maximum distance at which targets are shown, in meters.
pub const DEFAULT_VISIBLE_RADIUS: f64 = 50_000.0;

/// Distance at which a target reaches the top of the vertical band, in
/// meters.
const DEPTH_BAND_RANGE: f64 = 3_000.0;

/// A single target placed on the HUD.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HudMarker {
    /// Horizontal screen position in pixels.
    pub x: f64,
    /// Vertical screen position in pixels.
    pub y: f64,
    /// Display label of the target.
    pub label: String,
    /// Human-readable distance, e.g. `"750 m"` or `"1.25 km"`.
    pub distance_text: String,
    /// Human-readable absolute bearing, e.g. `"132°"`.
    pub bearing_text: String,
}

/// Result of one HUD recomputation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HudFrame {
    /// Markers to draw, one per visible target.
    pub markers: Vec<HudMarker>,
    /// Number of visible targets.
    pub overlay_count: usize,
    /// Number of distinct features with at least one visible target.
    pub visible_feature_count: usize,
    /// Number of distinct features that produced any target.
    pub total_feature_count: usize,
    /// True while the heading is not calibrated; the surface should render
    /// a calibration prompt instead of markers.
    pub calibrating: bool,
}

impl HudFrame {
    /// Frame shown while no heading sample has arrived: no markers, zero
    /// visible counts, calibration prompt requested.
    pub fn uncalibrated(total_feature_count: usize) -> Self {
        Self {
            total_feature_count,
            calibrating: true,
            ..Default::default()
        }
    }
}

/// Projects targets onto a 2d viewport using the current heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HudProjector {
    fov: f64,
    max_radius: f64,
    viewport: Size,
}

impl Default for HudProjector {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            max_radius: DEFAULT_VISIBLE_RADIUS,
            viewport: Size::default(),
        }
    }
}

impl HudProjector {
    /// Creates a projector for the given viewport with default field of view
    /// and visible radius.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Returns a projector with the given field of view in degrees.
    pub fn with_fov(self, fov: f64) -> Self {
        Self { fov, ..self }
    }

    /// Returns a projector with the given maximum visible distance in
    /// meters.
    pub fn with_max_radius(self, max_radius: f64) -> Self {
        Self { max_radius, ..self }
    }

    /// Returns a projector with the given viewport size.
    pub fn with_viewport(self, viewport: Size) -> Self {
        Self { viewport, ..self }
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// True if the target is within both the visible radius and the field of
    /// view for the given heading. Both boundaries are inclusive.
    pub fn is_visible(&self, target: &Target, heading: f64) -> bool {
        target.distance() <= self.max_radius
            && relative_bearing(target.bearing(), heading).abs() <= self.fov / 2.0
    }

    /// Lays out all visible targets for the given heading.
    pub fn project(&self, targets: &[Target], heading: f64) -> HudFrame {
        let total_feature_count = distinct_features(targets.iter());

        let visible: Vec<&Target> = targets
            .iter()
            .filter(|t| self.is_visible(t, heading))
            .collect();

        let markers = visible
            .iter()
            .map(|target| self.place(target, heading))
            .collect();

        HudFrame {
            markers,
            overlay_count: visible.len(),
            visible_feature_count: distinct_features(visible.iter().copied()),
            total_feature_count,
            calibrating: false,
        }
    }

    fn place(&self, target: &Target, heading: f64) -> HudMarker {
        let width = self.viewport.width();
        let height = self.viewport.height();

        let ratio = relative_bearing(target.bearing(), heading) / (self.fov / 2.0);
        let x = width / 2.0 + ratio * width / 2.0;

        // Nearer targets sit lower in the band, farther ones higher,
        // clamped at DEPTH_BAND_RANGE.
        let depth = (target.distance() / DEPTH_BAND_RANGE).min(1.0);
        let y = height * 0.4 + depth * height * 0.3;

        HudMarker {
            x,
            y,
            label: target.label().to_owned(),
            distance_text: format_distance(target.distance()),
            bearing_text: format!("{:.0}°", normalize_bearing(target.bearing())),
        }
    }
}

fn distinct_features<'a>(targets: impl Iterator<Item = &'a Target>) -> usize {
    let mut indices: Vec<usize> = targets.map(Target::feature_index).collect();
    indices.sort_unstable();
    indices.dedup();
    indices.len()
}

/// Formats a distance in meters for display: meters below 1 km, kilometers
/// with two decimals above.
pub fn format_distance(distance: f64) -> String {
    if distance >= 1000.0 {
        format!("{:.2} km", distance / 1000.0)
    } else {
        format!("{distance:.0} m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldar_types::{Feature, FeatureCollection, GeoPoint, Geom};

    use crate::target::{extract_targets, testing};

    fn target_at(bearing_deg: f64, distance_m: f64) -> Target {
        testing::target(bearing_deg, distance_m, 0)
    }

    fn projector() -> HudProjector {
        HudProjector::new(Size::new(1000.0, 800.0))
    }

    #[test]
    fn visibility_by_relative_bearing() {
        let projector = projector();
        // Heading 90, FOV 65: visible iff |relative| <= 32.5.
        assert!(projector.is_visible(&target_at(100.0, 1000.0), 90.0));
        assert!(!projector.is_visible(&target_at(140.0, 1000.0), 90.0));
        // Exactly at the FOV boundary is visible.
        assert!(projector.is_visible(&target_at(122.5, 1000.0), 90.0));
        assert!(projector.is_visible(&target_at(57.5, 1000.0), 90.0));
    }

    #[test]
    fn visibility_by_distance() {
        let projector = projector();
        assert!(projector.is_visible(&target_at(90.0, 49_000.0), 90.0));
        assert!(!projector.is_visible(&target_at(90.0, 51_000.0), 90.0));
    }

    #[test]
    fn marker_positions() {
        let projector = projector();

        // Dead ahead: centered horizontally.
        let frame = projector.project(&[target_at(90.0, 1500.0)], 90.0);
        assert_eq!(frame.overlay_count, 1);
        let marker = &frame.markers[0];
        assert!((marker.x - 500.0).abs() < 1.0);
        // Half of the depth band: y = 800*0.4 + 0.5*800*0.3 = 440.
        assert!((marker.y - 440.0).abs() < 5.0);

        // To the right half of the FOV: x = 500 + (10/32.5)*500.
        let frame = projector.project(&[target_at(100.0, 1500.0)], 90.0);
        let marker = &frame.markers[0];
        assert!((marker.x - (500.0 + 10.0 / 32.5 * 500.0)).abs() < 1.0);
    }

    #[test]
    fn far_targets_clamp_to_band_top() {
        let projector = projector();
        let frame = projector.project(&[target_at(90.0, 40_000.0)], 90.0);
        // y = 800*0.4 + 1.0*800*0.3.
        assert!((frame.markers[0].y - 560.0).abs() < 1e-9);
    }

    #[test]
    fn counters_distinguish_targets_from_features() {
        let origin = GeoPoint::latlon(0.0, 0.0);
        let collection: FeatureCollection = vec![
            // A line due east: 2 vertices + centroid, one feature.
            Feature::new(Geom::LineString(vec![
                GeoPoint::latlon(0.0, 0.01),
                GeoPoint::latlon(0.0, 0.02),
            ])),
            // A point due west, outside a 90°-heading FOV.
            Feature::new(Geom::Point(GeoPoint::latlon(0.0, -0.01))),
        ]
        .into();

        let targets = extract_targets(&origin, &collection);
        let frame = projector().project(&targets, 90.0);

        assert_eq!(frame.total_feature_count, 2);
        assert_eq!(frame.visible_feature_count, 1);
        assert_eq!(frame.overlay_count, 3);
        assert!(!frame.calibrating);
    }

    #[test]
    fn uncalibrated_frame_is_empty() {
        let frame = HudFrame::uncalibrated(7);
        assert!(frame.calibrating);
        assert!(frame.markers.is_empty());
        assert_eq!(frame.overlay_count, 0);
        assert_eq!(frame.visible_feature_count, 0);
        assert_eq!(frame.total_feature_count, 7);
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(750.0), "750 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1250.0), "1.25 km");
        assert_eq!(format_distance(50_000.0), "50.00 km");
    }
}
