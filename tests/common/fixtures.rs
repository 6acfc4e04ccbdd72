#![allow(dead_code)]

use densebox::{ClusterResult, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Builds points from `(x, y)` tuples.
pub fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

/// A `cols x rows` lattice with `step` spacing starting at `(x0, y0)`.
pub fn grid(x0: i32, y0: i32, cols: i32, rows: i32, step: i32) -> Vec<Point> {
    let mut points = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            points.push(Point::new(x0 + c * step, y0 + r * step));
        }
    }
    points
}

/// Three well-separated lattices plus isolated noise. No point is within
/// reach of two clusters, so the partition does not depend on input order.
pub fn separated_scene() -> Vec<Point> {
    let mut points = grid(0, 0, 4, 4, 2);
    points.extend(grid(300, 40, 3, 2, 2));
    points.extend(grid(120, 500, 5, 3, 2));
    points.extend(pts(&[(900, 900), (700, 20), (20, 700), (450, 450)]));
    points
}

/// Seeded permutation of `points`.
pub fn shuffled(points: &[Point], seed: u64) -> Vec<Point> {
    let mut out = points.to_vec();
    out.shuffle(&mut StdRng::seed_from_u64(seed));
    out
}

/// Order-independent view of a clustering: each cluster sorted, clusters
/// sorted, noise sorted.
pub fn canonical(result: &ClusterResult) -> (Vec<Vec<Point>>, Vec<Point>) {
    let mut clusters: Vec<Vec<Point>> = result
        .clusters
        .iter()
        .map(|c| {
            let mut c = c.clone();
            c.sort();
            c
        })
        .collect();
    clusters.sort();
    let mut noise = result.noise.clone();
    noise.sort();
    (clusters, noise)
}

/// Every point of the result, sorted (to compare against the sorted input).
pub fn flattened(result: &ClusterResult) -> Vec<Point> {
    let mut all: Vec<Point> = result.clusters.iter().flatten().copied().collect();
    all.extend(result.noise.iter().copied());
    all.sort();
    all
}
