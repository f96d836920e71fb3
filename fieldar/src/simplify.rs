//! Douglas-Peucker polyline simplification.

use nalgebra::Point2;

/// Reduces an ordered sequence of tangent-plane points to the subset that
/// stays within `epsilon` meters of the original polyline.
///
/// Sequences of fewer than 3 points are returned unchanged. Otherwise the
/// point with the maximum perpendicular distance from the chord joining the
/// first and last point is found (ties broken by the lowest index); if that
/// distance exceeds `epsilon` the two sub-chains split at it are simplified
/// recursively, else the sequence collapses to its two endpoints.
///
/// Deterministic for a given input. Average complexity is O(n log n) with an
/// O(n²) worst case on adversarial input, which is acceptable for the tens to
/// low hundreds of vertices a feature carries.
pub fn douglas_peucker(points: &[Point2<f64>], epsilon: f64) -> Vec<Point2<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_distance = 0.0;
    let mut max_index = 0;
    for (index, point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let distance = perpendicular_distance(point, &first, &last);
        if distance > max_distance {
            max_distance = distance;
            max_index = index;
        }
    }

    if max_distance > epsilon {
        let mut head = douglas_peucker(&points[..=max_index], epsilon);
        let tail = douglas_peucker(&points[max_index..], epsilon);

        // The split point is the last point of the head and the first point
        // of the tail; keep only one copy.
        head.pop();
        head.extend(tail);
        head
    } else {
        vec![first, last]
    }
}

/// Distance of `point` from the line through `start` and `end`. A
/// degenerate (zero-length) chord gives 0 for every point.
fn perpendicular_distance(point: &Point2<f64>, start: &Point2<f64>, end: &Point2<f64>) -> f64 {
    let chord = end - start;
    let length = chord.norm();
    if length == 0.0 {
        return 0.0;
    }

    let offset = point - start;
    (chord.x * offset.y - chord.y * offset.x).abs() / length
}
