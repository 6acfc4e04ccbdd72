use crate::models::Point;

/// Indices of every point within `eps` of `points[idx]`, `idx` included.
///
/// Linear scan over the whole set; the point clouds coming out of the
/// detectors are small enough that a spatial index does not pay off.
pub fn region_query(points: &[Point], idx: usize, eps: f32) -> Vec<usize> {
    let center = points[idx];
    let eps = f64::from(eps);

    points
        .iter()
        .enumerate()
        .filter(|(_, p)| center.distance(p) <= eps)
        .map(|(i, _)| i)
        .collect()
}
