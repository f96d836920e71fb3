//! Vector feature model: geometries, features and feature collections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::point::GeoPoint;

/// Geographic geometry of a single feature.
///
/// This is a closed tagged union; all geometry-kind dispatch in the engine is
/// done by matching on it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Geom {
    /// A single point.
    Point(GeoPoint),
    /// A set of points sharing one feature's properties.
    MultiPoint(Vec<GeoPoint>),
    /// An ordered open sequence of points.
    LineString(Vec<GeoPoint>),
    /// A set of line strings.
    MultiLineString(Vec<Vec<GeoPoint>>),
    /// A polygon with an outer ring and zero or more holes.
    Polygon(Polygon),
    /// A set of polygons.
    MultiPolygon(Vec<Polygon>),
}

/// Polygon geometry. The outer ring defines the boundary; inner rings are
/// holes cut out of it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Polygon {
    outer: Vec<GeoPoint>,
    inner: Vec<Vec<GeoPoint>>,
}

impl Polygon {
    /// Creates a polygon from its rings.
    pub fn new(outer: Vec<GeoPoint>, inner: Vec<Vec<GeoPoint>>) -> Self {
        Self { outer, inner }
    }

    /// The outer boundary ring.
    pub fn outer_ring(&self) -> &[GeoPoint] {
        &self.outer
    }

    /// The holes of the polygon.
    pub fn inner_rings(&self) -> &[Vec<GeoPoint>] {
        &self.inner
    }
}

impl From<Vec<GeoPoint>> for Polygon {
    fn from(outer: Vec<GeoPoint>) -> Self {
        Self {
            outer,
            inner: Vec::new(),
        }
    }
}

/// A single vector feature: an optional geometry paired with a property map.
///
/// A feature without geometry is valid input everywhere in the engine and is
/// simply skipped by all processing steps.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Feature {
    geometry: Option<Geom>,
    properties: HashMap<String, String>,
}

impl Feature {
    /// Creates a feature with the given geometry and no properties.
    pub fn new(geometry: impl Into<Option<Geom>>) -> Self {
        Self {
            geometry: geometry.into(),
            properties: HashMap::new(),
        }
    }

    /// Adds a property to the feature.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The feature's geometry, if present.
    pub fn geometry(&self) -> Option<&Geom> {
        self.geometry.as_ref()
    }

    /// Value of the given property.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The `name` property of the feature. This is the only property the
    /// overlay engine consumes.
    pub fn name(&self) -> Option<&str> {
        self.property("name")
    }
}

/// An ordered collection of features.
///
/// Feature order is significant: derived target identifiers encode feature
/// indices, so the same collection always produces the same identifiers.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FeatureCollection(Vec<Feature>);

impl FeatureCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The features of this collection, in order.
    pub fn features(&self) -> &[Feature] {
        &self.0
    }

    /// Number of features in the collection, including ones without geometry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a feature to the collection.
    pub fn push(&mut self, feature: Feature) {
        self.0.push(feature);
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self(features)
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_name_lookup() {
        let feature = Feature::new(Geom::Point(GeoPoint::latlon(10.0, 20.0)))
            .with_property("name", "Water tower")
            .with_property("kind", "infrastructure");

        assert_eq!(feature.name(), Some("Water tower"));
        assert_eq!(feature.property("kind"), Some("infrastructure"));
        assert_eq!(feature.property("missing"), None);
        assert_eq!(Feature::new(None).name(), None);
    }

    #[test]
    fn collection_keeps_feature_order() {
        let collection: FeatureCollection = vec![
            Feature::new(Geom::Point(GeoPoint::latlon(1.0, 1.0))),
            Feature::new(None),
            Feature::new(Geom::Point(GeoPoint::latlon(2.0, 2.0))),
        ]
        .into();

        assert_eq!(collection.len(), 3);
        assert!(collection.features()[1].geometry().is_none());
    }
}
