//! Local tangent-plane (east-north-up) vectors.

use approx::AbsDiffEq;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Offset from an observer origin expressed in the local east-north-up
/// tangent plane, in meters.
///
/// Which altitude the `up` component is measured against depends on how the
/// vector was produced: a plain tangent-plane transform references the origin
/// altitude, a ground-frame transform references an estimated terrain level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct TangentVector {
    east: f64,
    north: f64,
    up: f64,
}

impl TangentVector {
    /// Creates a vector from its components in meters.
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    /// Eastward component in meters.
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Northward component in meters.
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Upward component in meters.
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Returns a copy of the vector with the `up` component replaced.
    pub fn with_up(&self, up: f64) -> Self {
        Self { up, ..*self }
    }

    /// Horizontal (east, north) part of the vector.
    pub fn horizontal(&self) -> Point2<f64> {
        Point2::new(self.east, self.north)
    }

    /// The full vector as a 3d point in (east, north, up) order.
    pub fn to_point3(&self) -> Point3<f64> {
        Point3::new(self.east, self.north, self.up)
    }

    /// Straight-line horizontal distance from the origin in meters.
    pub fn horizontal_length(&self) -> f64 {
        self.east.hypot(self.north)
    }
}

impl From<TangentVector> for Point3<f64> {
    fn from(value: TangentVector) -> Self {
        value.to_point3()
    }
}

impl AbsDiffEq for TangentVector {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.east.abs_diff_eq(&other.east, epsilon)
            && self.north.abs_diff_eq(&other.north, epsilon)
            && self.up.abs_diff_eq(&other.up, epsilon)
    }
}
