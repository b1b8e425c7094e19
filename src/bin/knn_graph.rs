//! Command-line front end for nearest-neighbor graph construction.
//!
//! Usage:
//!   knn-graph create-graph points.txt 3 graph.txt   Connect each point to its 3 nearest
//!   knn-graph generate-points 1000 500 points.txt   500 distinct points in [0,1000]^2
//!   knn-graph hull points.txt                       Convex hull to stdout
//!
//! Output goes to stdout when no output file is given. Set `RUST_LOG` (or pass
//! `-v`/`-vv`) to see library logging on stderr.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use knn_graph::prelude::*;

/// Build and inspect nearest-neighbor graphs over 2D integer points.
#[derive(Parser)]
#[command(name = "knn-graph", version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect every point to its <DEGREE> closest neighbors
    ///
    /// Writes one edge per line: both endpoints and the distance.
    CreateGraph {
        /// File with one `(x,y)` point per line
        pointfile: PathBuf,
        /// Minimum number of neighbors per point
        degree: usize,
        /// Output file (stdout if omitted)
        graphfile: Option<PathBuf>,
    },
    /// Generate <NUM_POINTS> distinct points in a <SIZE> by <SIZE> grid
    GeneratePoints {
        /// Largest coordinate value
        size: i32,
        /// Number of points to generate
        num_points: usize,
        /// Output file (stdout if omitted)
        filename: Option<PathBuf>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Compute the convex hull of a point file
    Hull {
        /// File with one `(x,y)` point per line
        pointfile: PathBuf,
        /// Output file (stdout if omitted)
        outfile: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_points(path: &Path) -> Result<Vec<Point>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_points(BufReader::new(file))
        .with_context(|| format!("failed to read points from {}", path.display()))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::CreateGraph {
            pointfile,
            degree,
            graphfile,
        } => {
            let points = load_points(&pointfile)?;
            let graph = build_knn_graph(&points, degree)
                .with_context(|| format!("failed to build graph of degree {degree}"))?;
            tracing::info!(
                n_points = graph.number_of_vertices(),
                n_edges = graph.number_of_edges(),
                "graph built"
            );
            write_edges(&graph, open_output(graphfile.as_deref())?)
                .context("failed to write edges")?;
        }
        Commands::GeneratePoints {
            size,
            num_points,
            filename,
            seed,
        } => {
            let points = match seed {
                Some(seed) => generate_points_seeded(size, num_points, seed),
                None => generate_points(size, num_points),
            }
            .context("failed to generate points")?;
            write_points(&points, open_output(filename.as_deref())?)
                .context("failed to write points")?;
        }
        Commands::Hull { pointfile, outfile } => {
            let points = load_points(&pointfile)?;
            let hull = graham_scan(&points).context("failed to compute convex hull")?;
            write_points(&hull, open_output(outfile.as_deref())?)
                .context("failed to write hull")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
