use crate::bsp::{Engine, Superstep, Termination};
use crate::error::{Error, Result};
use crate::kmeans::assignment::nearest_centroid;
use crate::kmeans::centroid::CentroidSet;
use crate::kmeans::point::{assign_randomly, Coordinate, Point, PointRecord};
use crate::kmeans::reducer::CentroidReducer;
use log::{info, warn};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Configuration options for a clustering run.
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters to find.
    pub k: usize,
    /// Stop after this many supersteps even if points are still moving.
    /// `None` runs until no point changes cluster.
    pub max_supersteps: Option<Superstep>,
    /// Seed for the initial random assignment. `None` derives one from the
    /// system clock; the seed actually used is reported in [`Clustering`].
    pub seed: Option<u64>,
    /// Number of engine workers. `None` uses one per rayon thread.
    pub workers: Option<usize>,
}

impl KMeansConfig {
    /// Create a new config that runs to a fixed point with a clock-derived
    /// seed and one worker per thread.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_supersteps: None,
            seed: None,
            workers: None,
        }
    }

    /// Bound the number of supersteps.
    pub fn with_max_supersteps(mut self, max_supersteps: Superstep) -> Self {
        self.max_supersteps = Some(max_supersteps);
        self
    }

    /// Fix the seed for the initial assignment.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of engine workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be > 0".into()));
        }
        if self.max_supersteps == Some(0) {
            return Err(Error::InvalidConfig("max_supersteps must be > 0".into()));
        }
        if self.workers == Some(0) {
            return Err(Error::InvalidConfig("workers must be > 0".into()));
        }
        Ok(())
    }
}

/// Result of a clustering run.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Every input point with its final cluster, sorted by id.
    pub points: Vec<Point>,
    pub centroids: CentroidSet,
    pub supersteps: Superstep,
    pub termination: Termination,
    /// Seed the initial assignment was drawn with.
    pub seed: u64,
}

impl Clustering {
    /// True if the run stopped because every point settled.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Quiescent
    }

    pub fn centroid_of(&self, point: &Point) -> Coordinate {
        self.centroids[point.cluster()]
    }

    /// Members per cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for point in &self.points {
            sizes[point.cluster()] += 1;
        }
        sizes
    }

    /// True if no point would move when re-assigned against the final centroids.
    pub fn is_fixed_point(&self) -> bool {
        self.points.iter().all(|point| {
            nearest_centroid(&point.coordinate(), self.centroids.as_slice())
                == Some(point.cluster())
        })
    }
}

/// Clusters `records`, giving each a random initial cluster drawn from the
/// configured seed.
///
/// # Example
///
/// ```
/// use bsp_kmeans::{kmeans, KMeansConfig, PointRecord};
///
/// let records = vec![
///     PointRecord::new(0, 1.0, 2.0),
///     PointRecord::new(1, 1.5, 1.8),
///     PointRecord::new(2, 5.0, 8.0),
///     PointRecord::new(3, 8.0, 8.0),
/// ];
///
/// let config = KMeansConfig::new(2).with_seed(42);
/// let clustering = kmeans(records, &config).unwrap();
///
/// assert!(clustering.converged());
/// assert!(clustering.is_fixed_point());
/// ```
pub fn kmeans(records: Vec<PointRecord>, config: &KMeansConfig) -> Result<Clustering> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    let points = assign_randomly(records, config.k, seed);
    run(points, config, seed)
}

/// Clusters points that already carry their initial cluster.
///
/// The reported seed is `config.seed`, or 0 when none was set.
pub fn cluster(points: Vec<Point>, config: &KMeansConfig) -> Result<Clustering> {
    config.validate()?;
    run(points, config, config.seed.unwrap_or(0))
}

fn run(points: Vec<Point>, config: &KMeansConfig, seed: u64) -> Result<Clustering> {
    let mut ids = HashSet::with_capacity(points.len());
    for point in &points {
        if point.cluster() >= config.k {
            return Err(Error::InvalidCluster {
                id: point.id(),
                cluster: point.cluster(),
                k: config.k,
            });
        }
        if !ids.insert(point.id()) {
            return Err(Error::DuplicateId(point.id()));
        }
    }

    let workers = config.workers.unwrap_or_else(rayon::current_num_threads);
    info!(
        "clustering {} points into {} clusters on {} workers (seed {})",
        points.len(),
        config.k,
        workers,
        seed
    );

    let mut engine = Engine::new(points, workers)?;
    let mut reducer = CentroidReducer::new(config.k);
    let outcome = engine.run(&mut reducer, config.max_supersteps);

    match outcome.termination {
        Termination::Quiescent => info!("converged after {} supersteps", outcome.supersteps),
        Termination::StepLimit => warn!(
            "stopped at the {} superstep limit with {} points still moving",
            outcome.supersteps,
            engine.active()
        ),
    }

    let mut points = engine.into_vertices();
    points.sort_by_key(Point::id);

    Ok(Clustering {
        points,
        centroids: reducer.into_centroids(),
        supersteps: outcome.supersteps,
        termination: outcome.termination,
        seed,
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
