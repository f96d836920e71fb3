//! Spherical and flat-earth geodesy math.
//!
//! All functions treat the Earth as a sphere with the mean radius
//! [`EARTH_RADIUS`]. That is accurate to a fraction of a percent for the
//! distances an AR overlay deals with and keeps every operation cheap enough
//! to run on each sensor tick.

use fieldar_types::{GeoPoint, TangentVector};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Great-circle (haversine) distance between two points in meters.
///
/// Symmetric in its arguments; the distance of a point to itself is 0.
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();
    let lat1 = a.lat_rad();
    let lat2 = b.lat_rad();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS * h.sqrt().asin()
}

/// Initial great-circle bearing from `a` to `b`, in degrees in `[0, 360)`.
///
/// For coincident points both atan2 arguments vanish and the bearing is
/// defined as 0 rather than being left undefined.
pub fn bearing(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat_rad();
    let lat2 = b.lat_rad();
    let d_lon = (b.lon() - a.lon()).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    normalize_bearing(y.atan2(x).to_degrees())
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_bearing(value: f64) -> f64 {
    ((value % 360.0) + 360.0) % 360.0
}

/// Signed shortest angular offset of `target_bearing` from `heading`, in
/// degrees in `(-180, 180]`. Negative values are to the left of the heading.
pub fn relative_bearing(target_bearing: f64, heading: f64) -> f64 {
    let delta = normalize_bearing(target_bearing - heading);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Projects `point` into the local tangent plane centered at `origin`.
///
/// This is the flat-earth linear approximation: `east = Δlon·cos(lat₀)·R`,
/// `north = Δlat·R`, `up = Δalt` (missing altitudes read as 0). The error
/// grows with distance and towards the poles; the approximation is only
/// usable for ranges up to a few tens of kilometers and away from
/// `|lat| → 90°`.
pub fn to_tangent_plane(origin: &GeoPoint, point: &GeoPoint) -> TangentVector {
    let d_lat = (point.lat() - origin.lat()).to_radians();
    let d_lon = (point.lon() - origin.lon()).to_radians();

    TangentVector::new(
        d_lon * origin.lat_rad().cos() * EARTH_RADIUS,
        d_lat * EARTH_RADIUS,
        point.alt_or_zero() - origin.alt_or_zero(),
    )
}

/// Projects `point` into the tangent plane at `origin` with the vertical zero
/// placed at `ground_altitude` instead of at the origin altitude.
///
/// Horizontal components are identical to [`to_tangent_plane`]; only the
/// vertical reference differs. Use [`ground_altitude`] to estimate the
/// terrain level from the sensor altitude.
pub fn to_ground_frame(origin: &GeoPoint, point: &GeoPoint, ground_altitude: f64) -> TangentVector {
    to_tangent_plane(origin, point).with_up(point.alt_or_zero() - ground_altitude)
}

/// Estimated terrain altitude at the observer position.
///
/// The position sensor reports the altitude of the device, not of the ground
/// it stands on; subtracting the assumed observer height and the configured
/// render offset puts the vertical zero of the ground frame at the estimated
/// terrain level.
pub fn ground_altitude(origin: &GeoPoint, observer_height: f64, height_offset: f64) -> f64 {
    origin.alt_or_zero() - observer_height - height_offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn athens() -> GeoPoint {
        GeoPoint::latlon(37.9838, 23.7275)
    }

    fn larissa() -> GeoPoint {
        GeoPoint::latlon(39.639, 22.4191)
    }

    #[test]
    fn distance_properties() {
        assert_eq!(distance(&athens(), &athens()), 0.0);
        assert_abs_diff_eq!(
            distance(&athens(), &larissa()),
            distance(&larissa(), &athens()),
            epsilon = 1e-9
        );

        let d = distance(&athens(), &larissa());
        assert!(
            (180_000.0..250_000.0).contains(&d),
            "Athens-Larissa distance out of range: {d}"
        );
    }

    #[test]
    fn distance_ignores_altitude() {
        let low = GeoPoint::latlon_alt(37.9838, 23.7275, 0.0);
        let high = GeoPoint::latlon_alt(37.9838, 23.7275, 2000.0);
        assert_eq!(distance(&low, &high), 0.0);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::latlon(0.0, 0.0);
        assert_abs_diff_eq!(
            bearing(&origin, &GeoPoint::latlon(1.0, 0.0)),
            0.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            bearing(&origin, &GeoPoint::latlon(0.0, 1.0)),
            90.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            bearing(&origin, &GeoPoint::latlon(-1.0, 0.0)),
            180.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            bearing(&origin, &GeoPoint::latlon(0.0, -1.0)),
            270.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn bearing_to_self_is_zero() {
        assert_eq!(bearing(&athens(), &athens()), 0.0);
    }

    #[test]
    fn normalize_bearing_range() {
        assert_eq!(normalize_bearing(370.0), 10.0);
        assert_eq!(normalize_bearing(-10.0), 350.0);
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-720.0), 0.0);
        for value in [-1000.0, -359.9, 12.34, 359.9, 7200.5] {
            let normalized = normalize_bearing(value);
            assert!((0.0..360.0).contains(&normalized), "{value} -> {normalized}");
        }
    }

    #[test]
    fn relative_bearing_range() {
        assert_eq!(relative_bearing(90.0, 90.0), 0.0);
        assert_eq!(relative_bearing(100.0, 90.0), 10.0);
        assert_eq!(relative_bearing(80.0, 90.0), -10.0);
        // Wraps across north.
        assert_eq!(relative_bearing(10.0, 350.0), 20.0);
        assert_eq!(relative_bearing(350.0, 10.0), -20.0);
        // The antipodal direction maps to +180, not -180.
        assert_eq!(relative_bearing(180.0, 0.0), 180.0);
    }

    #[test]
    fn tangent_plane_at_origin_is_zero() {
        let origin = GeoPoint::latlon_alt(37.9838, 23.7275, 153.0);
        assert_abs_diff_eq!(
            to_tangent_plane(&origin, &origin),
            TangentVector::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn tangent_plane_directions() {
        let origin = GeoPoint::latlon(45.0, 10.0);
        let north = to_tangent_plane(&origin, &GeoPoint::latlon(45.01, 10.0));
        assert!(north.north() > 0.0);
        assert_abs_diff_eq!(north.east(), 0.0, epsilon = 1e-9);

        let east = to_tangent_plane(&origin, &GeoPoint::latlon(45.0, 10.01));
        assert!(east.east() > 0.0);
        assert_abs_diff_eq!(east.north(), 0.0, epsilon = 1e-9);

        // At 45° latitude a degree of longitude is shorter than a degree of
        // latitude by cos(45°).
        assert_abs_diff_eq!(
            east.east() / north.north(),
            45f64.to_radians().cos(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn tangent_plane_agrees_with_haversine_at_short_range() {
        let origin = athens();
        let point = GeoPoint::latlon(37.99, 23.74);
        let flat = to_tangent_plane(&origin, &point).horizontal_length();
        let sphere = distance(&origin, &point);
        assert_abs_diff_eq!(flat, sphere, epsilon = sphere * 1e-4);
    }

    #[test]
    fn ground_frame_vertical_reference() {
        let origin = GeoPoint::latlon_alt(37.9838, 23.7275, 100.0);
        let ground = ground_altitude(&origin, 1.6, 0.5);
        assert_abs_diff_eq!(ground, 97.9);

        // The sensor itself sits observer_height + height_offset above the
        // estimated terrain.
        let at_origin = to_ground_frame(&origin, &origin, ground);
        assert_abs_diff_eq!(at_origin.up(), 2.1, epsilon = 1e-9);

        // Horizontal components are unaffected by the vertical reference.
        let point = GeoPoint::latlon_alt(37.99, 23.74, 120.0);
        let tangent = to_tangent_plane(&origin, &point);
        let grounded = to_ground_frame(&origin, &point, ground);
        assert_eq!(tangent.horizontal(), grounded.horizontal());
        assert_abs_diff_eq!(grounded.up(), 120.0 - 97.9, epsilon = 1e-9);
    }
}
