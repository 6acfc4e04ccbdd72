pub mod densest;
pub mod neighbors;

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ClusterError;
use crate::models::{ClusterResult, Point};

pub use densest::DensestRegionSelector;
pub use neighbors::region_query;

/// Density parameters shared by every clustering call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterParams {
    /// Neighborhood radius in pixels
    pub eps: f32,
    /// Minimum neighborhood size (the point itself included) for a core point
    pub min_pts: usize,
}

impl ClusterParams {
    pub fn new(eps: f32, min_pts: usize) -> Self {
        Self { eps, min_pts }
    }

    pub fn with_eps(mut self, eps: f32) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    pub fn validate(&self) -> Result<(), ClusterError> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(ClusterError::invalid("eps", self.eps));
        }
        if self.min_pts == 0 {
            return Err(ClusterError::invalid("min_pts", self.min_pts));
        }
        Ok(())
    }
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            eps: 30.0,
            min_pts: 5,
        }
    }
}

/// Per-point clustering state, indexed by position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Unvisited,
    /// Not dense enough so far. May still be claimed as a border point.
    Noise,
    /// Cluster id, starting at 1 in formation order
    Cluster(usize),
}

/// DBSCAN over integer 2D points.
#[derive(Debug, Clone)]
pub struct Clusterer {
    params: ClusterParams,
}

impl Clusterer {
    pub fn new(params: ClusterParams) -> Result<Self, ClusterError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> ClusterParams {
        self.params
    }

    /// Label every input index. Cluster ids are handed out in the order
    /// seed points are visited.
    pub fn run_labels(&self, points: &[Point]) -> Vec<Label> {
        let ClusterParams { eps, min_pts } = self.params;
        let mut labels = vec![Label::Unvisited; points.len()];
        let mut next_id = 1;

        for idx in 0..points.len() {
            if labels[idx] != Label::Unvisited {
                continue;
            }

            let neighbors = region_query(points, idx, eps);
            if neighbors.len() < min_pts {
                labels[idx] = Label::Noise;
                continue;
            }

            let id = next_id;
            labels[idx] = Label::Cluster(id);
            let mut frontier: VecDeque<usize> = neighbors.into();

            while let Some(current) = frontier.pop_front() {
                match labels[current] {
                    Label::Noise => labels[current] = Label::Cluster(id),
                    Label::Unvisited => {
                        labels[current] = Label::Cluster(id);
                        let reach = region_query(points, current, eps);
                        if reach.len() >= min_pts {
                            frontier.extend(reach);
                        }
                    }
                    Label::Cluster(_) => {}
                }
            }

            next_id += 1;
        }

        labels
    }

    /// Partition `points` into clusters and noise.
    pub fn run(&self, points: &[Point]) -> ClusterResult {
        let labels = self.run_labels(points);
        let result = assemble(points, &labels);

        debug!(
            "dbscan: {} points, eps={}, min_pts={} -> {} clusters, {} noise",
            points.len(),
            self.params.eps,
            self.params.min_pts,
            result.clusters.len(),
            result.noise.len()
        );

        result
    }
}

/// One-shot DBSCAN with parameter validation.
pub fn dbscan(points: &[Point], eps: f32, min_pts: usize) -> Result<ClusterResult, ClusterError> {
    Ok(Clusterer::new(ClusterParams::new(eps, min_pts))?.run(points))
}

/// Bucket points by label. Cluster `n` lands at `clusters[n - 1]`.
fn assemble(points: &[Point], labels: &[Label]) -> ClusterResult {
    let mut result = ClusterResult::default();

    for (point, label) in points.iter().zip(labels) {
        match *label {
            Label::Cluster(id) => {
                if result.clusters.len() < id {
                    result.clusters.resize_with(id, Vec::new);
                }
                result.clusters[id - 1].push(*point);
            }
            // every index is labeled by the time run_labels returns
            Label::Noise | Label::Unvisited => result.noise.push(*point),
        }
    }

    result
}
