pub mod clustering;
pub mod config;
pub mod error;
pub mod fusion;
pub mod models;
pub mod render;
pub mod synthetic;

pub use models::{ClusterResult, DenseRegion, Point};
pub use error::ClusterError;
pub use clustering::{
    ClusterParams, Clusterer, DensestRegionSelector, Label, dbscan,
    densest::{densest_cluster_rect, densest_region},
};
pub use fusion::{DetectorPoints, FusedDetection, FusionPipeline, PointSource, sample_by_weights};
pub use render::Visualizer;
pub use synthetic::SyntheticPointGenerator;
