//! Geographic and local-frame geometry types used by the `fieldar` overlay
//! engine.
//!
//! The crate defines the vector feature model (points, lines, polygons with
//! their multi-part variants), the geographic point type used throughout the
//! engine, and the east-north-up tangent-plane vector that observer-relative
//! placement is expressed in. No geodesy math lives here; see the `fieldar`
//! crate for that.

pub mod geometry;
pub mod point;
pub mod size;
pub mod tangent;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use geometry::{Feature, FeatureCollection, Geom, Polygon};
pub use point::GeoPoint;
pub use size::Size;
pub use tangent::TangentVector;
