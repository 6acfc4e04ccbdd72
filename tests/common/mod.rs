mod fixtures;
#[allow(unused_imports)]
pub use fixtures::*;

// Re-export commonly used types from densebox for tests
#[allow(unused_imports)]
pub use densebox::{
    ClusterError, ClusterParams, ClusterResult, Clusterer, DenseRegion, DensestRegionSelector,
    DetectorPoints, FusionPipeline, Label, Point, SyntheticPointGenerator, Visualizer,
};
