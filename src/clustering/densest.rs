use log::debug;

use crate::clustering::{ClusterParams, Clusterer};
use crate::error::ClusterError;
use crate::models::{ClusterResult, DenseRegion, Point};

/// Runs DBSCAN and reduces the result to the bounding box of its largest cluster.
#[derive(Debug, Clone)]
pub struct DensestRegionSelector {
    clusterer: Clusterer,
}

impl DensestRegionSelector {
    pub fn new(params: ClusterParams) -> Result<Self, ClusterError> {
        Ok(Self {
            clusterer: Clusterer::new(params)?,
        })
    }

    pub fn params(&self) -> ClusterParams {
        self.clusterer.params()
    }

    /// Bounding rectangle of the densest cluster, or the empty rectangle.
    pub fn select(&self, points: &[Point]) -> DenseRegion {
        self.select_with_clusters(points).1
    }

    /// Same as [`select`](Self::select) but also hands back the clustering it was derived from.
    pub fn select_with_clusters(&self, points: &[Point]) -> (ClusterResult, DenseRegion) {
        let result = self.clusterer.run(points);
        let region = densest_region(&result);
        (result, region)
    }
}

/// Bounding rectangle of the largest cluster in `result`.
/// Equal sizes resolve to the earliest-formed cluster.
pub fn densest_region(result: &ClusterResult) -> DenseRegion {
    let Some(idx) = result.largest() else {
        return DenseRegion::empty();
    };

    let cluster = &result.clusters[idx];
    let region = DenseRegion::from_points(cluster);
    debug!(
        "densest cluster #{} of {}: {} points -> {:?}",
        idx + 1,
        result.clusters.len(),
        cluster.len(),
        region
    );
    region
}

/// One-shot densest-region selection with parameter validation.
pub fn densest_cluster_rect(
    points: &[Point],
    eps: f32,
    min_pts: usize,
) -> Result<DenseRegion, ClusterError> {
    Ok(DensestRegionSelector::new(ClusterParams::new(eps, min_pts))?.select(points))
}
