use anyhow::Context;
use bsp_kmeans::io::{load_points, save_clustering};
use bsp_kmeans::{kmeans, KMeansConfig};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

/// Cluster 2-D points with Lloyd's k-means on a BSP engine.
///
/// Input lines are `<id>\t<x> <y>`; output lines are
/// `<id>\t<x> <y>\t<cluster>\t<centroid x> <centroid y>`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Point file to read
    input: PathBuf,

    /// Where to write the clustered points (overwritten if present)
    output: PathBuf,

    /// Number of clusters
    #[arg(short, long)]
    k: usize,

    /// Stop after this many supersteps even if points are still moving
    #[arg(long)]
    max_supersteps: Option<u64>,

    /// Seed for the initial random assignment (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Engine workers (defaults to one per thread)
    #[arg(long)]
    workers: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", "info"));
    let opts = Opts::parse();

    let mut config = KMeansConfig::new(opts.k);
    config.max_supersteps = opts.max_supersteps;
    config.seed = opts.seed;
    config.workers = opts.workers;

    let records = load_points(&opts.input)
        .with_context(|| format!("reading points from {}", opts.input.display()))?;
    let clustering = kmeans(records, &config).context("clustering failed")?;
    save_clustering(&opts.output, &clustering)
        .with_context(|| format!("writing clusters to {}", opts.output.display()))?;

    println!(
        "Assigned {} points to {} clusters in {} supersteps (seed {}){}",
        clustering.points.len(),
        opts.k,
        clustering.supersteps,
        clustering.seed,
        if clustering.converged() {
            ""
        } else {
            ", stopped before converging"
        }
    );
    Ok(())
}
