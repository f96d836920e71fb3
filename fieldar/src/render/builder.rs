//! Construction of the 3d scene bundle from a feature collection.

use fieldar_types::{FeatureCollection, GeoPoint, Geom, Polygon};
use nalgebra::{Point2, Point3};

use crate::geodesy;
use crate::options::OverlayOptions;
use crate::render::{SceneBundle, ScenePrimitive, FENCE_HEIGHT};
use crate::simplify::douglas_peucker;

/// Places a feature collection into the local tangent plane around an
/// observer origin.
///
/// All primitives use the ground frame: the vertical zero is the estimated
/// terrain level, derived from the origin altitude, the assumed observer
/// height and the configured height offset. Heading is not applied; the
/// downstream 3d camera rotates the whole scene.
pub struct SceneBuilder<'a> {
    origin: GeoPoint,
    ground_altitude: f64,
    options: &'a OverlayOptions,
}

impl<'a> SceneBuilder<'a> {
    /// Creates a builder for the given origin and render options.
    pub fn new(origin: GeoPoint, options: &'a OverlayOptions) -> Self {
        let ground_altitude =
            geodesy::ground_altitude(&origin, options.observer_height, options.height_offset);
        Self {
            origin,
            ground_altitude,
            options,
        }
    }

    /// Builds the scene bundle for the collection under the given tag.
    ///
    /// Features without geometry or with empty coordinate lists contribute
    /// nothing. Lines and polygon outer rings are simplified with the
    /// configured tolerance before placement to bound the primitive count.
    pub fn build(&self, collection: &FeatureCollection, tag: &str) -> SceneBundle {
        let mut bundle = SceneBundle::new(tag);

        for feature in collection {
            let Some(geometry) = feature.geometry() else {
                continue;
            };

            let label = feature.name().map(str::to_owned);
            match geometry {
                Geom::Point(point) => self.place_marker(&mut bundle, point, label.clone()),
                Geom::MultiPoint(points) => {
                    for point in points {
                        self.place_marker(&mut bundle, point, label.clone());
                    }
                }
                Geom::LineString(points) => self.place_line(&mut bundle, points),
                Geom::MultiLineString(lines) => {
                    for points in lines {
                        self.place_line(&mut bundle, points);
                    }
                }
                Geom::Polygon(polygon) => self.place_polygon(&mut bundle, polygon),
                Geom::MultiPolygon(polygons) => {
                    for polygon in polygons {
                        self.place_polygon(&mut bundle, polygon);
                    }
                }
            }
        }

        bundle
    }

    fn place_marker(&self, bundle: &mut SceneBundle, point: &GeoPoint, label: Option<String>) {
        let position = geodesy::to_ground_frame(&self.origin, point, self.ground_altitude);
        bundle.push(ScenePrimitive::Marker {
            position: position.to_point3(),
            symbol: self.options.point_symbol,
            color: self.options.point_color,
            opacity: self.options.global_opacity(),
            label: if self.options.show_labels { label } else { None },
        });
    }

    fn place_line(&self, bundle: &mut SceneBundle, points: &[GeoPoint]) {
        let path = self.simplified_ground_path(points);
        if path.is_empty() {
            return;
        }

        bundle.push(ScenePrimitive::Polyline {
            path,
            color: self.options.line_color,
            width: self.options.line_width,
            opacity: self.options.global_opacity(),
        });
    }

    /// Outer ring only: an outline polyline plus one vertical fence quad per
    /// simplified boundary edge. Holes are not rendered.
    fn place_polygon(&self, bundle: &mut SceneBundle, polygon: &Polygon) {
        // A closed ring duplicates its first coordinate; fed to the
        // simplifier as-is the zero-length chord would collapse the whole
        // ring. Simplify the open ring and close it again afterwards.
        let mut points = polygon.outer_ring();
        if points.len() >= 2 && points[0] == points[points.len() - 1] {
            points = &points[..points.len() - 1];
        }

        let ring = self.simplified_ground_path(points);
        if ring.len() < 2 {
            return;
        }

        let mut quads = Vec::new();
        for edge in ring.windows(2) {
            quads.push(fence_quad(&edge[0], &edge[1]));
        }
        quads.push(fence_quad(&ring[ring.len() - 1], &ring[0]));

        bundle.push(ScenePrimitive::Fence {
            quads,
            color: self.options.polygon_fill,
            opacity: self.options.polygon_opacity * self.options.global_opacity(),
        });

        let mut path = ring;
        path.push(path[0]);
        bundle.push(ScenePrimitive::Polyline {
            path,
            color: self.options.polygon_stroke,
            width: self.options.polygon_width,
            opacity: self.options.global_opacity(),
        });
    }

    /// Projects the points into the tangent plane, simplifies them
    /// horizontally and lays them flat on the estimated ground.
    fn simplified_ground_path(&self, points: &[GeoPoint]) -> Vec<Point3<f64>> {
        let horizontal: Vec<Point2<f64>> = points
            .iter()
            .map(|p| geodesy::to_tangent_plane(&self.origin, p).horizontal())
            .collect();

        douglas_peucker(&horizontal, self.options.simplify_tolerance)
            .into_iter()
            .map(|p| Point3::new(p.x, p.y, 0.0))
            .collect()
    }
}

fn fence_quad(a: &Point3<f64>, b: &Point3<f64>) -> [Point3<f64>; 4] {
    [
        *a,
        *b,
        Point3::new(b.x, b.y, b.z + FENCE_HEIGHT),
        Point3::new(a.x, a.y, a.z + FENCE_HEIGHT),
    ]
}
