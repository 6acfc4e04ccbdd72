use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clustering::{ClusterParams, DensestRegionSelector};
use crate::error::ClusterError;
use crate::models::{ClusterResult, DenseRegion, Point};

/// Anything that yields candidate points for an object class
/// (cascade box centers, inlier keypoints of a matcher, ...).
pub trait PointSource: Send + Sync {
    fn points(&self) -> Vec<Point>;

    /// Human-readable detector name (used in log output)
    fn name(&self) -> &str;
}

/// Points already produced by a detector, held in memory
#[derive(Debug, Clone)]
pub struct DetectorPoints {
    pub name: String,
    pub points: Vec<Point>,
}

impl DetectorPoints {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

impl PointSource for DetectorPoints {
    fn points(&self) -> Vec<Point> {
        self.points.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Keep each point of `groups[i]` with probability `weights[i]`.
///
/// Output keeps group order, then point order within a group.
pub fn sample_by_weights<R: Rng + ?Sized>(
    groups: &[Vec<Point>],
    weights: &[f64],
    rng: &mut R,
) -> Result<Vec<Point>, ClusterError> {
    if groups.len() != weights.len() {
        return Err(ClusterError::WeightMismatch {
            groups: groups.len(),
            weights: weights.len(),
        });
    }
    if let Some(w) = weights.iter().find(|w| !(0.0..=1.0).contains(*w)) {
        return Err(ClusterError::invalid("weight", w));
    }

    let mut sampled = Vec::new();
    for (group, &weight) in groups.iter().zip(weights) {
        for point in group {
            if rng.r#gen::<f64>() < weight {
                sampled.push(*point);
            }
        }
    }
    Ok(sampled)
}

/// Fused output for one object class
#[derive(Debug, Clone)]
pub struct FusedDetection {
    pub class_name: String,
    /// Points that survived sampling and were clustered
    pub points: Vec<Point>,
    pub clusters: ClusterResult,
    pub region: DenseRegion,
}

impl FusedDetection {
    /// `<class> <x1> <y1> <x2> <y2>`
    pub fn annotation_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.class_name,
            self.region.x,
            self.region.y,
            self.region.x2(),
            self.region.y2()
        )
    }

    /// False when no cluster formed and `region` is only the empty placeholder
    pub fn found(&self) -> bool {
        !self.clusters.is_empty()
    }
}

struct WeightedSource {
    source: Arc<dyn PointSource>,
    weight: f64,
}

struct ClassEntry {
    name: String,
    sources: Vec<WeightedSource>,
}

/// Merges several detectors' points per object class and picks one region per class.
pub struct FusionPipeline {
    classes: Vec<ClassEntry>,
    params: ClusterParams,
    seed: u64,
    verbose: bool,
}

impl FusionPipeline {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            params: ClusterParams::default(),
            seed: 0,
            verbose: false,
        }
    }

    pub fn with_params(mut self, params: ClusterParams) -> Self {
        self.params = params;
        self
    }

    /// Seed for the per-point sampling draws
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Log per-source statistics at info level instead of debug
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Register an object class. Adding an existing name is a no-op.
    pub fn add_class(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.classes.iter().any(|c| c.name == name) {
            self.classes.push(ClassEntry {
                name,
                sources: Vec::new(),
            });
        }
        self
    }

    /// Attach a detector's points to a registered class
    pub fn add_source(
        mut self,
        class: &str,
        source: Arc<dyn PointSource>,
        weight: f64,
    ) -> Result<Self, ClusterError> {
        let entry = self
            .classes
            .iter_mut()
            .find(|c| c.name == class)
            .ok_or_else(|| ClusterError::UnknownClass(class.to_string()))?;
        entry.sources.push(WeightedSource { source, weight });
        Ok(self)
    }

    pub fn add_source_boxed(
        self,
        class: &str,
        source: Box<dyn PointSource>,
        weight: f64,
    ) -> Result<Self, ClusterError> {
        self.add_source(class, Arc::from(source), weight)
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    /// Fuse every class, in registration order.
    pub fn run(&self) -> Result<Vec<FusedDetection>, ClusterError> {
        let selector = DensestRegionSelector::new(self.params)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut detections = Vec::with_capacity(self.classes.len());

        for class in &self.classes {
            let groups: Vec<Vec<Point>> = class.sources.iter().map(|s| s.source.points()).collect();
            let weights: Vec<f64> = class.sources.iter().map(|s| s.weight).collect();

            for (src, group) in class.sources.iter().zip(&groups) {
                let msg = format!(
                    "{}: {} points from {} (weight {:.2})",
                    class.name,
                    group.len(),
                    src.source.name(),
                    src.weight
                );
                if self.verbose {
                    info!("{msg}");
                } else {
                    debug!("{msg}");
                }
            }

            let points = sample_by_weights(&groups, &weights, &mut rng)?;
            let (clusters, region) = selector.select_with_clusters(&points);

            if clusters.is_empty() {
                warn!(
                    "{}: no dense cluster among {} points (eps={}, min_pts={})",
                    class.name,
                    points.len(),
                    self.params.eps,
                    self.params.min_pts
                );
            }

            detections.push(FusedDetection {
                class_name: class.name.clone(),
                points,
                clusters,
                region,
            });
        }

        Ok(detections)
    }
}

impl Default for FusionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
