use std::path::Path;

use anyhow::Result;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ClusterResult, DenseRegion, Point};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const NOISE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const REGION_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Draws clusters, noise and the selected region for visual inspection
#[derive(Debug, Clone)]
pub struct Visualizer {
    pub width: u32,
    pub height: u32,
    pub point_radius: i32,
    pub rect_thickness: u32,
    /// Seed for the per-cluster palette
    pub seed: u64,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            width: 1200,
            height: 1200,
            point_radius: 3,
            rect_thickness: 2,
            seed: 12345,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_point_radius(mut self, radius: i32) -> Self {
        self.point_radius = radius;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// One color per cluster, stable for a given seed
    pub fn palette(&self, count: usize) -> Vec<Rgb<u8>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..count)
            .map(|_| Rgb([rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255)]))
            .collect()
    }

    /// Render onto a blank white canvas of the configured size
    pub fn render(&self, result: &ClusterResult, region: &DenseRegion) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.width, self.height, WHITE);
        self.render_onto(&mut canvas, result, region);
        canvas
    }

    /// Draw over an existing image, e.g. the photograph the points came from.
    /// Anything outside the image is clipped. The region is outlined only
    /// when `result` has a cluster, so a zero-extent cluster at the origin
    /// still gets its box.
    pub fn render_onto(&self, image: &mut RgbImage, result: &ClusterResult, region: &DenseRegion) {
        let colors = self.palette(result.clusters.len());
        for (cluster, color) in result.clusters.iter().zip(colors) {
            self.draw_points(image, cluster, color);
        }
        self.draw_points(image, &result.noise, NOISE_COLOR);
        if !result.is_empty() {
            self.draw_region(image, region, REGION_COLOR);
        }
    }

    /// Filled dots; points whose dot cannot touch the image are skipped
    pub fn draw_points(&self, image: &mut RgbImage, points: &[Point], color: Rgb<u8>) {
        let r = i64::from(self.point_radius.max(0));
        let (w, h) = (i64::from(image.width()), i64::from(image.height()));

        for p in points {
            let (x, y) = (i64::from(p.x), i64::from(p.y));
            if x < -r || y < -r || x >= w + r || y >= h + r {
                continue;
            }
            draw_filled_circle_mut(image, (p.x, p.y), self.point_radius, color);
        }
    }

    /// Outline `region` through both corners (x, y) and (x2, y2); extra
    /// thickness grows outward. Edges are clamped to one pixel outside the
    /// image so far-away regions cannot overflow the rectangle math.
    pub fn draw_region(&self, image: &mut RgbImage, region: &DenseRegion, color: Rgb<u8>) {
        let (w, h) = (i64::from(image.width()), i64::from(image.height()));
        let x1 = i64::from(region.x);
        let y1 = i64::from(region.y);
        let x2 = x1 + i64::from(region.width);
        let y2 = y1 + i64::from(region.height);

        for t in 0..i64::from(self.rect_thickness) {
            let left = (x1 - t).clamp(-1, w);
            let top = (y1 - t).clamp(-1, h);
            let right = (x2 + t).clamp(-1, w);
            let bottom = (y2 + t).clamp(-1, h);

            let rect = Rect::at(left as i32, top as i32)
                .of_size((right - left + 1) as u32, (bottom - top + 1) as u32);
            draw_hollow_rect_mut(image, rect, color);
        }
    }

    pub fn save_render(&self, path: &Path, result: &ClusterResult, region: &DenseRegion) -> Result<()> {
        self.render(result, region)
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to save visualization {}: {}", path.display(), e))
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
