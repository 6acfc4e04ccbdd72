use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::clustering::ClusterParams;
use crate::fusion::{DetectorPoints, FusionPipeline};
use crate::models::Point;

/// A fusion job: detector outputs per object class plus clustering parameters.
///
/// ```json
/// {
///   "eps": 40.0,
///   "min_pts": 3,
///   "classes": [
///     { "name": "sugar_box",
///       "sources": [ { "name": "haar", "points": [[10, 12], [11, 14]] },
///                    { "name": "orb", "weight": 0.5, "points": [[12, 13]] } ] }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub eps: f32,
    pub min_pts: usize,
    pub seed: u64,
    pub classes: Vec<ClassConfig>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        let params = ClusterParams::default();
        Self {
            eps: params.eps,
            min_pts: params.min_pts,
            seed: 0,
            classes: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassConfig {
    pub name: String,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(default = "full_weight")]
    pub weight: f64,
    #[serde(default)]
    pub points: Vec<Point>,
}

fn full_weight() -> f64 {
    1.0
}

impl FusionConfig {
    pub fn params(&self) -> ClusterParams {
        ClusterParams::new(self.eps, self.min_pts)
    }

    pub fn build_pipeline(&self, verbose: bool) -> Result<FusionPipeline> {
        let mut pipeline = FusionPipeline::new()
            .with_params(self.params())
            .with_seed(self.seed)
            .with_verbose(verbose);

        for class in &self.classes {
            pipeline = pipeline.add_class(class.name.clone());
            for source in &class.sources {
                let points = DetectorPoints::new(source.name.clone(), source.points.clone());
                pipeline = pipeline.add_source(&class.name, Arc::new(points), source.weight)?;
            }
        }

        Ok(pipeline)
    }
}

pub fn load_config(path: &Path) -> Result<FusionConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_config(&data).with_context(|| format!("Failed to parse config {}", path.display()))
}

pub fn parse_config(data: &str) -> Result<FusionConfig> {
    Ok(serde_json::from_str(data)?)
}

/// Parse a plain points listing: one `x y` pair per line, `#` starts a comment.
pub fn parse_points(data: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (lineno, line) in data.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [x, y] = fields.as_slice() else {
            anyhow::bail!("line {}: expected `x y`, got {:?}", lineno + 1, line);
        };
        let x: i32 = x.parse().with_context(|| format!("line {}: bad x {:?}", lineno + 1, x))?;
        let y: i32 = y.parse().with_context(|| format!("line {}: bad y {:?}", lineno + 1, y))?;
        points.push(Point::new(x, y));
    }
    Ok(points)
}

pub fn load_points(path: &Path) -> Result<Vec<Point>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read points file {}", path.display()))?;
    parse_points(&data).with_context(|| format!("Failed to parse points file {}", path.display()))
}
