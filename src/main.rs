use clap::{Args, Parser, Subcommand};
use image::ImageReader;
use serde::Serialize;
use std::path::PathBuf;

use densebox::config::{load_config, load_points};
use densebox::{
    ClusterParams, ClusterResult, DenseRegion, DensestRegionSelector, Point,
    SyntheticPointGenerator, Visualizer,
};

#[derive(Parser)]
#[command(name = "densebox")]
#[command(about = "Fuse detector point clouds into one bounding box per object")]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DensityArgs {
    /// Neighborhood radius in pixels
    #[arg(long, default_value_t = 30.0)]
    eps: f32,

    /// Minimum neighborhood size for a core point
    #[arg(long, default_value_t = 5)]
    min_pts: usize,
}

impl DensityArgs {
    fn params(&self) -> ClusterParams {
        ClusterParams::new(self.eps, self.min_pts)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster randomly generated blobs and report the densest one
    Demo {
        #[command(flatten)]
        density: DensityArgs,

        /// RNG seed for point generation
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 5)]
        clusters: usize,

        #[arg(long, default_value_t = 100)]
        points_per_cluster: usize,

        #[arg(long, default_value_t = 50)]
        noise: usize,

        /// Save a PNG overlay of the clustering
        #[arg(short, long, value_name = "PNG")]
        output: Option<PathBuf>,
    },

    /// Cluster points read from a file with one `x y` pair per line
    Cluster {
        #[arg(value_name = "POINTS")]
        points: PathBuf,

        #[command(flatten)]
        density: DensityArgs,

        /// Print the full clustering as JSON
        #[arg(long)]
        json: bool,

        /// Save a PNG overlay of the clustering
        #[arg(short, long, value_name = "PNG")]
        output: Option<PathBuf>,
    },

    /// Run a JSON fusion job and print one `<class> x1 y1 x2 y2` line per class
    Fuse {
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Photograph to draw the fused regions onto
        #[arg(long, value_name = "IMAGE", requires = "output")]
        image: Option<PathBuf>,

        /// Where to write the annotated image
        #[arg(short, long, value_name = "PNG")]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    clusters: &'a ClusterResult,
    region: DenseRegion,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    env_logger::builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    match args.command {
        Commands::Demo {
            density,
            seed,
            clusters,
            points_per_cluster,
            noise,
            output,
        } => {
            let points = SyntheticPointGenerator::new(seed)
                .with_clusters(clusters, points_per_cluster)
                .with_noise(noise)
                .generate();
            log::info!("Generated {} points (seed {})", points.len(), seed);

            let (result, region) = cluster_points(&points, density.params())?;
            print_summary(&result, &region);

            if let Some(path) = output {
                Visualizer::new().save_render(&path, &result, &region)?;
                log::info!("Saved overlay to {}", path.display());
            }
        }
        Commands::Cluster {
            points,
            density,
            json,
            output,
        } => {
            let points = load_points(&points)?;
            log::info!("Loaded {} points", points.len());

            let (result, region) = cluster_points(&points, density.params())?;
            if json {
                let report = Report {
                    clusters: &result,
                    region,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&result, &region);
            }

            if let Some(path) = output {
                Visualizer::new().save_render(&path, &result, &region)?;
                log::info!("Saved overlay to {}", path.display());
            }
        }
        Commands::Fuse {
            config,
            image: photo,
            output,
        } => {
            let config = load_config(&config)?;
            let detections = config.build_pipeline(args.verbose)?.run()?;

            for detection in &detections {
                println!("{}", detection.annotation_line());
            }

            if let Some(path) = output {
                let visualizer = Visualizer::new();
                let mut canvas = match photo {
                    Some(image_path) => ImageReader::open(&image_path)?
                        .decode()
                        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?
                        .to_rgb8(),
                    None => image::RgbImage::from_pixel(
                        visualizer.width,
                        visualizer.height,
                        densebox::render::WHITE,
                    ),
                };

                let colors = visualizer.palette(detections.len());
                for (detection, color) in detections.iter().zip(colors) {
                    visualizer.draw_points(&mut canvas, &detection.points, color);
                    if detection.found() {
                        visualizer.draw_region(&mut canvas, &detection.region, color);
                    }
                }
                canvas
                    .save(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", path.display(), e))?;
                log::info!("Saved annotated image to {}", path.display());
            }
        }
    }

    Ok(())
}

fn cluster_points(
    points: &[Point],
    params: ClusterParams,
) -> anyhow::Result<(ClusterResult, DenseRegion)> {
    let selector = DensestRegionSelector::new(params)?;
    Ok(selector.select_with_clusters(points))
}

fn print_summary(result: &ClusterResult, region: &DenseRegion) {
    println!("\n=== Clustering Results ===");
    println!("Clusters: {}", result.len());
    for (i, cluster) in result.clusters.iter().enumerate() {
        println!("  Cluster {}: {} points", i + 1, cluster.len());
    }
    println!("Noise points: {}", result.noise.len());

    if result.is_empty() {
        println!("No dense region found.");
    } else {
        println!(
            "Densest region: x={} y={} width={} height={}",
            region.x, region.y, region.width, region.height
        );
    }
}
