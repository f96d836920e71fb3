//! Fieldar is a geodesy-and-projection engine for geographic AR overlays. It
//! turns a vector feature collection and a stream of position and heading
//! samples into observer-relative aim targets, a 2d heads-up layout and a 3d
//! tangent-plane scene.
//!
//! # Quick start
//!
//! ```no_run
//! use fieldar::engine::OverlayEngine;
//! use fieldar::sensors::PositionFix;
//! use fieldar::OverlayOptions;
//! use fieldar_types::{latlon, Feature, FeatureCollection, Geom, Size};
//!
//! let mut engine = OverlayEngine::new(OverlayOptions::default())?;
//! engine.set_viewport(Size::new(1080.0, 1920.0));
//! engine.set_features(
//!     vec![Feature::new(Geom::Point(latlon!(37.9838, 23.7275))).with_property("name", "Acropolis")]
//!         .into(),
//! );
//! engine.activate();
//!
//! // Feed sensor samples as they arrive; each one triggers a full
//! // synchronous recomputation.
//! engine.position_update(PositionFix {
//!     lat: 37.98,
//!     lon: 23.72,
//!     alt: Some(70.0),
//!     accuracy: Some(5.0),
//! });
//! engine.heading_update(Some(45.0));
//!
//! for marker in &engine.hud_frame().markers {
//!     println!("{} at ({:.0}, {:.0}): {}", marker.label, marker.x, marker.y, marker.distance_text);
//! }
//! # Ok::<(), fieldar::error::FieldarError>(())
//! ```
//!
//! # Main components
//!
//! * [`geodesy`] - spherical distance and bearing math plus the flat-earth
//!   tangent-plane and ground-frame transforms everything else is built on.
//! * [`target`] - extraction of aim targets (points, vertices, centroids)
//!   from a feature collection relative to an observer origin.
//! * [`simplify`] - Douglas-Peucker reduction of tangent-plane polylines.
//! * [`hud`] - the 2d heads-up layout: visibility filtering by field of view
//!   and range, and screen placement by relative bearing.
//! * [`render`] - the 3d scene: markers, simplified polylines and extruded
//!   polygon fences in tangent-plane coordinates, grouped into bundles with
//!   a clear-then-draw replacement contract.
//! * [`engine`] - the event loop glue: an [`OverlayEngine`] that owns the
//!   observer state and re-runs the whole pipeline on every sensor tick.
//!
//! Everything the engine consumes from the outside world - video frames,
//! sensor permissions, file parsing, basemap tiles - is somebody else's job;
//! the engine only sees feature collections and sensor samples.
//!
//! [`OverlayEngine`]: engine::OverlayEngine

mod color;
pub mod engine;
pub mod error;
pub mod geodesy;
pub mod hud;
mod messenger;
pub mod options;
pub mod render;
pub mod sensors;
pub mod simplify;
pub mod target;

pub use color::Color;
pub use engine::{OverlayEngine, OVERLAY_TAG};
pub use hud::{HudFrame, HudMarker, HudProjector};
pub use messenger::{DummyMessenger, Messenger};
pub use options::{OverlayOptions, PointSymbol};
pub use render::{Scene, SceneBundle, ScenePrimitive};
pub use target::{Target, TargetKind};

// Reexport fieldar_types
pub use fieldar_types;
