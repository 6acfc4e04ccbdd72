//! Integration tests for densest-cluster selection.

mod common;

use common::*;
use densebox::{densest_cluster_rect, densest_region};

fn selector(eps: f32, min_pts: usize) -> DensestRegionSelector {
    DensestRegionSelector::new(ClusterParams::new(eps, min_pts)).expect("valid parameters")
}

#[test]
fn test_concrete_scenario_selects_three_point_cluster() -> anyhow::Result<()> {
    let points = pts(&[(0, 0), (1, 0), (0, 1), (50, 50), (51, 50)]);
    let region = densest_cluster_rect(&points, 3.0, 2)?;
    assert_eq!(
        region,
        DenseRegion {
            x: 0,
            y: 0,
            width: 1,
            height: 1
        }
    );
    Ok(())
}

#[test]
fn test_larger_group_wins_regardless_of_order() {
    // the 3-point group comes first in the input
    let mut points = grid(1000, 1000, 3, 1, 2);
    points.extend(grid(10, 20, 5, 2, 3));

    let region = selector(5.0, 3).select(&points);
    assert_eq!(
        region,
        DenseRegion {
            x: 10,
            y: 20,
            width: 12,
            height: 3
        }
    );
}

#[test]
fn test_tie_goes_to_first_formed_cluster() {
    let mut points = grid(400, 400, 2, 2, 1);
    points.extend(grid(0, 0, 2, 2, 3));

    let (result, region) = selector(3.0, 3).select_with_clusters(&points);
    assert_eq!(result.clusters.len(), 2);
    assert_eq!(result.clusters[0].len(), result.clusters[1].len());
    assert_eq!(
        region,
        DenseRegion {
            x: 400,
            y: 400,
            width: 1,
            height: 1
        }
    );
}

#[test]
fn test_tie_with_interleaved_input() {
    // Seeds alternate between the two groups; the group at (0, 0) starts first.
    let a = grid(0, 0, 2, 2, 1);
    let b = grid(200, 200, 2, 2, 1);
    let points: Vec<Point> = a.iter().zip(&b).flat_map(|(p, q)| [*p, *q]).collect();

    let region = selector(2.0, 4).select(&points);
    assert_eq!(region, DenseRegion::from_points(&a));
}

#[test]
fn test_empty_input_gives_empty_region() -> anyhow::Result<()> {
    let region = densest_cluster_rect(&[], 30.0, 5)?;
    assert!(region.is_empty());
    assert_eq!(region, DenseRegion::empty());
    Ok(())
}

#[test]
fn test_no_core_point_gives_empty_region() {
    let points = pts(&[(0, 0), (100, 0), (0, 100), (100, 100)]);
    let (result, region) = selector(10.0, 2).select_with_clusters(&points);
    assert!(result.clusters.is_empty());
    assert_eq!(result.noise.len(), 4);
    assert!(region.is_empty());
}

#[test]
fn test_region_from_clustering_matches_select() {
    let points = separated_scene();
    let s = selector(3.0, 3);
    let (result, region) = s.select_with_clusters(&points);

    assert_eq!(densest_region(&result), region);
    assert_eq!(s.select(&points), region);
    assert_eq!(
        region,
        DenseRegion {
            x: 0,
            y: 0,
            width: 6,
            height: 6
        }
    );
}

#[test]
fn test_select_rejects_invalid_parameters() {
    assert!(DensestRegionSelector::new(ClusterParams::new(-3.0, 5)).is_err());
    assert!(densest_cluster_rect(&pts(&[(1, 1)]), 3.0, 0).is_err());
}
