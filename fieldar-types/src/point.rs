//! Geographic point type.

use serde::{Deserialize, Serialize};

/// Point on the surface of the Earth given as WGS84-like spherical
/// coordinates. No datum correction is applied anywhere in the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
    alt: Option<f64>,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees, with no
    /// altitude.
    pub fn latlon(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            alt: None,
        }
    }

    /// Creates a point from latitude and longitude in degrees and altitude in
    /// meters.
    pub fn latlon_alt(lat: f64, lon: f64, alt: f64) -> Self {
        Self {
            lat,
            lon,
            alt: Some(alt),
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Altitude in meters, if known.
    pub fn alt(&self) -> Option<f64> {
        self.alt
    }

    /// Altitude in meters, reading a missing altitude as `0.0`.
    pub fn alt_or_zero(&self) -> f64 {
        self.alt.unwrap_or(0.0)
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }
}

/// Creates a new [`GeoPoint`](crate::GeoPoint) from latitude and longitude
/// values in degrees.
///
/// ```
/// use fieldar_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        ::fieldar_types::GeoPoint::latlon($lat, $lon)
    };
    ($lat:expr, $lon:expr, $alt:expr) => {
        ::fieldar_types::GeoPoint::latlon_alt($lat, $lon, $alt)
    };
}
