//! Simulates a slow compass sweep over a small feature collection and
//! prints the HUD frames the engine produces.
//!
//! Run with `cargo run --example hud_demo`.

use fieldar::engine::OverlayEngine;
use fieldar::sensors::PositionFix;
use fieldar::OverlayOptions;
use fieldar_types::{FeatureCollection, Size};

const DATA: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [23.7275, 37.9838, 156.0]},
            "properties": {"name": "Acropolis"}
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [23.7348, 37.9715]},
            "properties": {"name": "Stadium"}
        },
        {
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[23.72, 37.97], [23.725, 37.975], [23.73, 37.976]]
            },
            "properties": {"name": "Trail"}
        }
    ]
}"#;

fn main() {
    env_logger::init();

    let parsed: geojson::FeatureCollection = DATA
        .parse::<geojson::GeoJson>()
        .expect("invalid embedded GeoJSON")
        .try_into()
        .expect("not a feature collection");

    let mut engine = OverlayEngine::new(OverlayOptions::default()).expect("invalid options");
    engine.set_viewport(Size::new(120.0, 40.0));
    engine.set_features(FeatureCollection::from(&parsed));
    engine.activate();

    engine.position_update(PositionFix {
        lat: 37.9755,
        lon: 23.7265,
        alt: Some(80.0),
        accuracy: Some(4.0),
    });

    for heading in (0..360).step_by(45) {
        engine.heading_update(Some(f64::from(heading)));
        let frame = engine.hud_frame();
        println!(
            "heading {heading:>3}°: {} overlays, {}/{} features",
            frame.overlay_count, frame.visible_feature_count, frame.total_feature_count
        );
        for marker in &frame.markers {
            println!(
                "    {:<12} x={:>5.1} y={:>4.1} {} {}",
                marker.label, marker.x, marker.y, marker.distance_text, marker.bearing_text
            );
        }
    }
}
