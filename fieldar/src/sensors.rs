//! Sensor-facing types: position fixes, permission status and the observer
//! state the engine derives its origin from.
//!
//! The actual sensor plumbing (geolocation and compass subscriptions, the
//! permission UX) is the embedding surface's job; the engine only consumes
//! the samples it is handed.

use std::collections::VecDeque;

use fieldar_types::GeoPoint;
use serde::{Deserialize, Serialize};

/// Number of recent fixes averaged into the observer origin.
const SMOOTHING_WINDOW: usize = 5;

/// A single position sample from the location sensor.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PositionFix {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Altitude in meters, if the sensor reports one.
    pub alt: Option<f64>,
    /// Estimated accuracy radius in meters, if the sensor reports one.
    pub accuracy: Option<f64>,
}

impl PositionFix {
    /// The geographic point of the fix.
    pub fn to_point(self) -> GeoPoint {
        match self.alt {
            Some(alt) => GeoPoint::latlon_alt(self.lat, self.lon, alt),
            None => GeoPoint::latlon(self.lat, self.lon),
        }
    }
}

/// Permission state of the sensor subscriptions.
///
/// `Denied` covers both an explicit permission denial and a permanently
/// unavailable sensor; either way the engine keeps projecting with whatever
/// origin and heading it already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum SensorStatus {
    /// No permission decision has been made yet.
    #[default]
    Idle,
    /// Sensors are delivering samples.
    Granted,
    /// Permission was denied or the sensor is unavailable.
    Denied,
}

/// Arithmetic-mean smoother over the most recent position fixes.
///
/// GPS fixes jitter by meters between samples; averaging a short window
/// keeps the overlay from swimming without adding perceptible lag.
#[derive(Debug, Clone, Default)]
pub struct PositionSmoother {
    samples: VecDeque<GeoPoint>,
}

impl PositionSmoother {
    /// Creates an empty smoother.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fix to the window, evicting the oldest one when full.
    pub fn push(&mut self, point: GeoPoint) {
        if self.samples.len() == SMOOTHING_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(point);
    }

    /// Mean of the window, or `None` if no fix has arrived yet.
    ///
    /// The mean altitude treats missing altitudes as 0, so the result always
    /// carries an altitude once any sample does not.
    pub fn smoothed(&self) -> Option<GeoPoint> {
        if self.samples.is_empty() {
            return None;
        }

        let count = self.samples.len() as f64;
        let (lat, lon, alt) = self
            .samples
            .iter()
            .fold((0.0, 0.0, 0.0), |(lat, lon, alt), p| {
                (lat + p.lat(), lon + p.lon(), alt + p.alt_or_zero())
            });

        Some(GeoPoint::latlon_alt(lat / count, lon / count, alt / count))
    }

    /// Drops all accumulated samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Mutable observer state fed by the external sensor streams.
#[derive(Debug, Clone, Default)]
pub struct ObserverState {
    smoother: PositionSmoother,
    heading: Option<f64>,
    accuracy: Option<f64>,
}

impl ObserverState {
    /// Creates an observer with no position or heading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new position fix.
    pub fn position_update(&mut self, fix: PositionFix) {
        self.smoother.push(fix.to_point());
        self.accuracy = fix.accuracy;
    }

    /// Records a new heading sample, or the loss of the heading signal.
    ///
    /// Values are normalized into `[0, 360)`. A `None` reading drops the
    /// heading entirely; no previous value is cached.
    pub fn heading_update(&mut self, heading: Option<f64>) {
        self.heading = heading.map(crate::geodesy::normalize_bearing);
    }

    /// Smoothed observer origin, or `None` before the first fix.
    pub fn origin(&self) -> Option<GeoPoint> {
        self.smoother.smoothed()
    }

    /// Latest compass heading in degrees in `[0, 360)`, if calibrated.
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    /// Accuracy radius of the latest fix in meters, if reported.
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Drops all sensor state. Used on deactivation so that reactivation
    /// re-derives everything from scratch.
    pub fn reset(&mut self) {
        self.smoother.clear();
        self.heading = None;
        self.accuracy = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn fix(lat: f64, lon: f64) -> PositionFix {
        PositionFix {
            lat,
            lon,
            alt: None,
            accuracy: Some(5.0),
        }
    }

    #[test]
    fn empty_smoother_has_no_origin() {
        assert_eq!(PositionSmoother::new().smoothed(), None);
    }

    #[test]
    fn smoother_averages_samples() {
        let mut smoother = PositionSmoother::new();
        smoother.push(GeoPoint::latlon_alt(38.0, 23.0, 100.0));
        smoother.push(GeoPoint::latlon_alt(38.2, 23.2, 200.0));

        let smoothed = smoother.smoothed().expect("no smoothed position");
        assert_abs_diff_eq!(smoothed.lat(), 38.1, epsilon = 1e-12);
        assert_abs_diff_eq!(smoothed.lon(), 23.1, epsilon = 1e-12);
        assert_abs_diff_eq!(smoothed.alt_or_zero(), 150.0, epsilon = 1e-12);
    }

    #[test]
    fn smoother_window_is_bounded() {
        let mut smoother = PositionSmoother::new();
        smoother.push(GeoPoint::latlon(0.0, 0.0));
        for _ in 0..SMOOTHING_WINDOW {
            smoother.push(GeoPoint::latlon(10.0, 10.0));
        }

        // The initial outlier has been evicted.
        let smoothed = smoother.smoothed().expect("no smoothed position");
        assert_abs_diff_eq!(smoothed.lat(), 10.0);
        assert_abs_diff_eq!(smoothed.lon(), 10.0);
    }

    #[test]
    fn heading_is_normalized_and_not_cached() {
        let mut observer = ObserverState::new();
        observer.heading_update(Some(370.0));
        assert_eq!(observer.heading(), Some(10.0));

        observer.heading_update(None);
        assert_eq!(observer.heading(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut observer = ObserverState::new();
        observer.position_update(fix(38.0, 23.0));
        observer.heading_update(Some(90.0));
        observer.reset();

        assert_eq!(observer.origin(), None);
        assert_eq!(observer.heading(), None);
        assert_eq!(observer.accuracy(), None);
    }
}
