use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Point;

/// Gaussian blobs plus uniform noise, for exercising the clusterer
#[derive(Debug, Clone)]
pub struct SyntheticPointGenerator {
    pub num_clusters: usize,
    pub points_per_cluster: usize,
    pub noise_points: usize,
    pub canvas_size: i32,
    /// Standard deviation of each blob, per axis
    pub spread: f64,
    pub seed: u64,
}

impl SyntheticPointGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            num_clusters: 5,
            points_per_cluster: 100,
            noise_points: 50,
            canvas_size: 1000,
            spread: 30.0,
            seed,
        }
    }

    pub fn with_clusters(mut self, num_clusters: usize, points_per_cluster: usize) -> Self {
        self.num_clusters = num_clusters;
        self.points_per_cluster = points_per_cluster;
        self
    }

    pub fn with_noise(mut self, noise_points: usize) -> Self {
        self.noise_points = noise_points;
        self
    }

    pub fn with_canvas_size(mut self, canvas_size: i32) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Blob points first (blob by blob), then noise.
    pub fn generate(&self) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let size = self.canvas_size.max(0);
        // centers keep a 100px margin when the canvas allows it
        let (lo, hi) = if size > 200 { (100, size - 100) } else { (0, size) };

        let mut points =
            Vec::with_capacity(self.num_clusters * self.points_per_cluster + self.noise_points);

        for _ in 0..self.num_clusters {
            let cx = rng.gen_range(lo..=hi) as f64;
            let cy = rng.gen_range(lo..=hi) as f64;
            for _ in 0..self.points_per_cluster {
                let x = cx + self.spread * standard_normal(&mut rng);
                let y = cy + self.spread * standard_normal(&mut rng);
                points.push(Point::new(x as i32, y as i32));
            }
        }

        for _ in 0..self.noise_points {
            points.push(Point::new(rng.gen_range(0..=size), rng.gen_range(0..=size)));
        }

        points
    }
}

/// Box-Muller draw from N(0, 1)
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1 = 1.0 - rng.r#gen::<f64>();
    let u2 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
