//! Conversion of parsed [`geojson`] types into the crate's feature model.
//!
//! Conversions are lossy by design: geometry kinds the engine cannot place
//! (geometry collections, positions with fewer than two ordinates) convert to
//! a feature without geometry rather than to an error, and only scalar
//! property values are retained.

use geojson::{JsonValue, LineStringType, PointType, PolygonType, Value};

use crate::geometry::{Feature, FeatureCollection, Geom, Polygon};
use crate::point::GeoPoint;

/// Converts a GeoJSON geometry into a [`Geom`], if it is representable.
pub fn geometry_to_geom(geometry: &geojson::Geometry) -> Option<Geom> {
    match &geometry.value {
        Value::Point(p) => Some(Geom::Point(convert_position(p)?)),
        Value::MultiPoint(points) => Some(Geom::MultiPoint(convert_positions(points)?)),
        Value::LineString(points) => Some(Geom::LineString(convert_positions(points)?)),
        Value::MultiLineString(lines) => Some(Geom::MultiLineString(
            lines
                .iter()
                .map(|l| convert_positions(l))
                .collect::<Option<Vec<_>>>()?,
        )),
        Value::Polygon(polygon) => Some(Geom::Polygon(convert_polygon(polygon)?)),
        Value::MultiPolygon(mp) => Some(Geom::MultiPolygon(
            mp.iter()
                .map(convert_polygon)
                .collect::<Option<Vec<_>>>()?,
        )),
        Value::GeometryCollection(_) => None,
    }
}

fn convert_position(position: &PointType) -> Option<GeoPoint> {
    if position.len() < 2 {
        return None;
    }

    // GeoJSON positions are (lon, lat, alt?).
    Some(match position.get(2) {
        Some(alt) => GeoPoint::latlon_alt(position[1], position[0], *alt),
        None => GeoPoint::latlon(position[1], position[0]),
    })
}

fn convert_positions(positions: &LineStringType) -> Option<Vec<GeoPoint>> {
    positions
        .iter()
        .map(convert_position)
        .collect::<Option<Vec<_>>>()
}

fn convert_polygon(polygon: &PolygonType) -> Option<Polygon> {
    let mut rings = polygon.iter().map(|r| convert_positions(r));
    let outer = rings.next()??;
    let inner = rings.collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(outer, inner))
}

impl From<&geojson::Feature> for Feature {
    fn from(value: &geojson::Feature) -> Self {
        let geometry = value.geometry.as_ref().and_then(geometry_to_geom);
        let mut feature = Feature::new(geometry);
        if let Some(properties) = &value.properties {
            for (key, json_value) in properties {
                if let Some(string_value) = stringify_scalar(json_value) {
                    feature = feature.with_property(key.as_str(), string_value);
                }
            }
        }

        feature
    }
}

impl From<&geojson::FeatureCollection> for FeatureCollection {
    fn from(value: &geojson::FeatureCollection) -> Self {
        value.features.iter().map(Feature::from).collect()
    }
}

fn stringify_scalar(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(v) => Some(v.clone()),
        JsonValue::Number(v) => Some(v.to_string()),
        JsonValue::Bool(v) => Some(v.to_string()),
        _ => None,
    }
}
