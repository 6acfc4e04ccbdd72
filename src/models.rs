use serde::{Deserialize, Serialize};

/// Integer pixel coordinate produced by an upstream detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance, computed in floating point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle bounding the densest cluster.
///
/// The all-zero rectangle doubles as "nothing found"; check
/// [`ClusterResult::clusters`] when that distinction matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DenseRegion {
    pub const fn empty() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Tight bounds of a point set: `width = x_max - x_min`, `height = y_max - y_min`.
    /// Returns the empty rectangle for an empty slice.
    pub fn from_points(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::empty();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self {
            x: min_x,
            y: min_y,
            width: max_x.abs_diff(min_x),
            height: max_y.abs_diff(min_y),
        }
    }

    /// Right edge (exclusive corner used in annotation lines)
    pub fn x2(&self) -> i32 {
        saturate_i32(self.x2_wide())
    }

    pub fn y2(&self) -> i32 {
        saturate_i32(self.y2_wide())
    }

    /// `x + width` without overflow; always representable for regions built by `from_points`
    fn x2_wide(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    fn y2_wide(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Overlapping rectangle, or the empty rectangle if the two do not overlap.
    pub fn intersection(&self, other: &DenseRegion) -> DenseRegion {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x2_wide().min(other.x2_wide());
        let y2 = self.y2_wide().min(other.y2_wide());

        if x2 <= i64::from(x1) || y2 <= i64::from(y1) {
            return DenseRegion::empty();
        }

        DenseRegion {
            x: x1,
            y: y1,
            width: (x2 - i64::from(x1)) as u32,
            height: (y2 - i64::from(y1)) as u32,
        }
    }

    /// Intersection over union, 0.0 when both rectangles have no area
    pub fn iou(&self, other: &DenseRegion) -> f32 {
        // two areas near u64::MAX can exceed it, sum in u128
        let inter = u128::from(self.intersection(other).area());
        let union = u128::from(self.area()) + u128::from(other.area()) - inter;
        if union == 0 {
            return 0.0;
        }
        (inter as f64 / union as f64) as f32
    }
}

fn saturate_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Partition of an input point set into clusters and noise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterResult {
    /// One group per cluster, ordered by cluster formation
    pub clusters: Vec<Vec<Point>>,
    pub noise: Vec<Point>,
}

impl ClusterResult {
    /// Number of clusters found
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.noise.len() + self.clusters.iter().map(Vec::len).sum::<usize>()
    }

    /// Index of the largest cluster. Ties go to the earliest-formed cluster.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (idx, cluster) in self.clusters.iter().enumerate() {
            match best {
                Some((_, size)) if cluster.len() <= size => {}
                _ => best = Some((idx, cluster.len())),
            }
        }
        best.map(|(idx, _)| idx)
    }
}
