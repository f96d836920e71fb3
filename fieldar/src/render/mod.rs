//! 3d scene primitives and the shared scene they are drawn into.
//!
//! The engine does not rasterize anything. Each recomputation produces a
//! [`SceneBundle`] of placed primitives in tangent-plane coordinates; a
//! downstream 3d renderer owns the camera (and applies the heading rotation)
//! and turns the primitives into meshes.

use nalgebra::Point3;

use crate::color::Color;
use crate::options::PointSymbol;

mod builder;

pub use builder::SceneBuilder;

/// Height of polygon fence quads in meters.
pub const FENCE_HEIGHT: f64 = 2.0;

/// A single primitive placed in the local tangent plane.
///
/// Coordinates are (east, north, up) meters relative to the observer, with
/// the vertical zero at the estimated ground level.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenePrimitive {
    /// A point marker.
    Marker {
        /// Placement of the marker.
        position: Point3<f64>,
        /// Symbol to render.
        symbol: PointSymbol,
        /// Marker color.
        color: Color,
        /// Marker opacity in `[0, 1]`.
        opacity: f64,
        /// Label to attach, when labels are enabled.
        label: Option<String>,
    },
    /// A polyline at ground level.
    Polyline {
        /// Simplified path of the line.
        path: Vec<Point3<f64>>,
        /// Line color.
        color: Color,
        /// Line width in pixels.
        width: f64,
        /// Line opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Vertical quads extruded from a polygon boundary, one per simplified
    /// edge. The fence gives the flat boundary a readable depth cue.
    Fence {
        /// Corner points of each quad, bottom edge first.
        quads: Vec<[Point3<f64>; 4]>,
        /// Fill color of the quads.
        color: Color,
        /// Quad opacity in `[0, 1]`.
        opacity: f64,
    },
}

/// A group of primitives owned by one producer, replaced atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBundle {
    tag: String,
    primitives: Vec<ScenePrimitive>,
}

impl SceneBundle {
    /// Creates an empty bundle with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            primitives: Vec::new(),
        }
    }

    /// Tag identifying the producer of the bundle.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The primitives of the bundle.
    pub fn primitives(&self) -> &[ScenePrimitive] {
        &self.primitives
    }

    /// Adds a primitive to the bundle.
    pub fn push(&mut self, primitive: ScenePrimitive) {
        self.primitives.push(primitive);
    }

    /// Number of primitives in the bundle.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// True if the bundle has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// The shared scene primitives are drawn into.
///
/// Multiple producers may each own a bundle in the same scene; replacing or
/// removing a bundle never touches bundles with other tags. This is the
/// clear-then-draw contract: a producer that recomputes replaces its own
/// bundle wholesale, so redraws are idempotent and leave no ghost
/// primitives behind.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    bundles: Vec<SceneBundle>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// All bundles currently in the scene.
    pub fn bundles(&self) -> &[SceneBundle] {
        &self.bundles
    }

    /// The bundle with the given tag, if present.
    pub fn bundle(&self, tag: &str) -> Option<&SceneBundle> {
        self.bundles.iter().find(|b| b.tag() == tag)
    }

    /// Removes any bundle with the same tag, then inserts the new one.
    pub fn replace_bundle(&mut self, bundle: SceneBundle) {
        self.bundles.retain(|b| b.tag != bundle.tag);
        self.bundles.push(bundle);
    }

    /// Removes the bundle with the given tag, if present.
    pub fn remove_bundle(&mut self, tag: &str) {
        self.bundles.retain(|b| b.tag() != tag);
    }
}
