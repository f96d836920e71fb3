//! Extraction of aim targets from a feature collection.

use std::fmt;

use fieldar_types::{Feature, FeatureCollection, GeoPoint, Geom};
use serde::{Deserialize, Serialize};

use crate::geodesy;

/// What part of a feature a target was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TargetKind {
    /// The feature's own point geometry.
    Point,
    /// A vertex of a line or of a polygon's outer ring.
    Vertex,
    /// Arithmetic-mean centroid of a line or of a polygon's outer ring.
    Centroid,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Point => write!(f, "point"),
            TargetKind::Vertex => write!(f, "vertex"),
            TargetKind::Centroid => write!(f, "centroid"),
        }
    }
}

/// A single aim-able point derived from a feature, with its precomputed
/// distance and bearing from the observer origin.
///
/// Targets are immutable; when the origin or the feature collection changes
/// the whole set is re-derived. For a given (origin, collection) pair the
/// derivation is deterministic, so ids are stable across calls.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Target {
    id: String,
    label: String,
    feature_index: usize,
    point: GeoPoint,
    distance: f64,
    bearing: f64,
    kind: TargetKind,
}

impl Target {
    /// Stable identifier encoding the geometry kind, the feature index and
    /// the sub-index within the feature.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label: the feature's `name` property, or the target kind.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Index of the source feature in the collection.
    pub fn feature_index(&self) -> usize {
        self.feature_index
    }

    /// Geographic position of the target.
    pub fn point(&self) -> &GeoPoint {
        &self.point
    }

    /// Great-circle distance from the origin in meters. Never negative.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Bearing from the origin in degrees in `[0, 360)`.
    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    /// What part of the feature the target was derived from.
    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

/// Derives the flat list of aim targets for `collection` as seen from
/// `origin`.
///
/// Features without geometry or with empty coordinate lists are skipped
/// silently. Point geometries produce one target per point; lines and
/// polygon outer rings produce one target per vertex plus a centroid target.
/// Polygon holes are ignored. The centroid is the arithmetic mean of the
/// vertices, an approximation that is only meaningful for geographically
/// compact shapes.
pub fn extract_targets(origin: &GeoPoint, collection: &FeatureCollection) -> Vec<Target> {
    let mut targets = Vec::new();

    for (feature_index, feature) in collection.features().iter().enumerate() {
        let Some(geometry) = feature.geometry() else {
            log::trace!("skipping feature {feature_index}: no geometry");
            continue;
        };

        let mut builder = TargetBuilder {
            origin,
            feature,
            feature_index,
            targets: &mut targets,
        };

        match geometry {
            Geom::Point(point) => {
                builder.push(format!("point-{feature_index}"), point, TargetKind::Point);
            }
            Geom::MultiPoint(points) => {
                for (i, point) in points.iter().enumerate() {
                    builder.push(
                        format!("multipoint-{feature_index}-p{i}"),
                        point,
                        TargetKind::Point,
                    );
                }
            }
            Geom::LineString(points) => {
                builder.push_line(format!("linestring-{feature_index}"), points);
            }
            Geom::MultiLineString(lines) => {
                for (i, points) in lines.iter().enumerate() {
                    builder.push_line(format!("multilinestring-{feature_index}-l{i}"), points);
                }
            }
            Geom::Polygon(polygon) => {
                builder.push_line(format!("polygon-{feature_index}"), polygon.outer_ring());
            }
            Geom::MultiPolygon(polygons) => {
                for (i, polygon) in polygons.iter().enumerate() {
                    builder.push_line(
                        format!("multipolygon-{feature_index}-g{i}"),
                        polygon.outer_ring(),
                    );
                }
            }
        }
    }

    targets
}

struct TargetBuilder<'a> {
    origin: &'a GeoPoint,
    feature: &'a Feature,
    feature_index: usize,
    targets: &'a mut Vec<Target>,
}

impl TargetBuilder<'_> {
    fn push(&mut self, id: String, point: &GeoPoint, kind: TargetKind) {
        let label = self
            .feature
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| kind.to_string());

        self.targets.push(Target {
            id,
            label,
            feature_index: self.feature_index,
            point: *point,
            distance: geodesy::distance(self.origin, point),
            bearing: geodesy::bearing(self.origin, point),
            kind,
        });
    }

    /// One vertex target per point plus a centroid target. Empty vertex
    /// lists produce nothing.
    fn push_line(&mut self, id_base: String, points: &[GeoPoint]) {
        if points.is_empty() {
            log::trace!(
                "skipping empty coordinate list of feature {}",
                self.feature_index
            );
            return;
        }

        for (i, point) in points.iter().enumerate() {
            self.push(format!("{id_base}-v{i}"), point, TargetKind::Vertex);
        }

        let centroid = mean_centroid(points);
        self.push(format!("{id_base}-centroid"), &centroid, TargetKind::Centroid);
    }
}

/// Arithmetic mean of the vertices. Not a geodesic centroid: only valid for
/// compact shapes that do not cross the antimeridian.
fn mean_centroid(points: &[GeoPoint]) -> GeoPoint {
    let count = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat(), lon + p.lon()));
    GeoPoint::latlon(lat / count, lon / count)
}


#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use fieldar_types::{Feature, Polygon};

    fn origin() -> GeoPoint {
        GeoPoint::latlon(38.0, 23.7)
    }

    fn triangle() -> Polygon {
        Polygon::new(
            vec![
                GeoPoint::latlon(38.01, 23.70),
                GeoPoint::latlon(38.01, 23.71),
                GeoPoint::latlon(38.02, 23.70),
            ],
            vec![],
        )
    }

    #[test]
    fn point_and_polygon_collection_yields_five_targets() {
        let collection: FeatureCollection = vec![
            Feature::new(Geom::Point(GeoPoint::latlon(38.05, 23.75))).with_property("name", "Peak"),
            Feature::new(Geom::Polygon(triangle())),
        ]
        .into();

        let targets = extract_targets(&origin(), &collection);
        assert_eq!(targets.len(), 5);

        assert_eq!(targets[0].id(), "point-0");
        assert_eq!(targets[0].label(), "Peak");
        assert_matches!(targets[0].kind(), TargetKind::Point);

        assert_eq!(targets[1].id(), "polygon-1-v0");
        assert_eq!(targets[4].id(), "polygon-1-centroid");
        assert_eq!(targets[1].label(), "vertex");
        assert_eq!(targets[4].label(), "centroid");

        let ids: std::collections::HashSet<_> = targets.iter().map(Target::id).collect();
        assert_eq!(ids.len(), 5, "ids must be unique");

        for target in &targets {
            assert!(target.distance() >= 0.0);
            assert!((0.0..360.0).contains(&target.bearing()));
        }
    }

    #[test]
    fn ids_are_stable_across_calls() {
        let collection: FeatureCollection = vec![
            Feature::new(Geom::MultiPoint(vec![
                GeoPoint::latlon(38.1, 23.7),
                GeoPoint::latlon(38.2, 23.7),
            ])),
            Feature::new(Geom::LineString(vec![
                GeoPoint::latlon(38.0, 23.8),
                GeoPoint::latlon(38.0, 23.9),
            ])),
        ]
        .into();

        let first: Vec<String> = extract_targets(&origin(), &collection)
            .iter()
            .map(|t| t.id().to_owned())
            .collect();
        let second: Vec<String> = extract_targets(&origin(), &collection)
            .iter()
            .map(|t| t.id().to_owned())
            .collect();

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "multipoint-0-p0",
                "multipoint-0-p1",
                "linestring-1-v0",
                "linestring-1-v1",
                "linestring-1-centroid",
            ]
        );
    }

    #[test]
    fn missing_and_empty_geometry_is_skipped() {
        let collection: FeatureCollection = vec![
            Feature::new(None),
            Feature::new(Geom::LineString(vec![])),
            Feature::new(Geom::Polygon(Polygon::default())),
            Feature::new(Geom::MultiPolygon(vec![])),
        ]
        .into();

        assert!(extract_targets(&origin(), &collection).is_empty());
    }

    #[test]
    fn centroid_is_vertex_mean() {
        let collection: FeatureCollection =
            vec![Feature::new(Geom::Polygon(triangle()))].into();

        let targets = extract_targets(&origin(), &collection);
        let centroid = targets
            .iter()
            .find(|t| t.kind() == TargetKind::Centroid)
            .expect("no centroid target");

        let lat = (38.01 + 38.01 + 38.02) / 3.0;
        let lon = (23.70 + 23.71 + 23.70) / 3.0;
        assert!((centroid.point().lat() - lat).abs() < 1e-12);
        assert!((centroid.point().lon() - lon).abs() < 1e-12);
    }

    #[test]
    fn holes_do_not_produce_targets() {
        let with_hole = Polygon::new(
            triangle().outer_ring().to_vec(),
            vec![vec![
                GeoPoint::latlon(38.011, 23.701),
                GeoPoint::latlon(38.012, 23.702),
                GeoPoint::latlon(38.013, 23.701),
            ]],
        );
        let collection: FeatureCollection =
            vec![Feature::new(Geom::Polygon(with_hole))].into();

        // 3 vertices + centroid, nothing from the hole.
        assert_eq!(extract_targets(&origin(), &collection).len(), 4);
    }
}
