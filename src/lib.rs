//! Lloyd's k-means clustering on a bulk-synchronous, vertex-centric engine.
//!
//! - [`bsp`]: the superstep engine, vertex and reducer traits
//! - [`kmeans`]: point state, the centroid reducer, the assignment step and
//!   the round driver
//! - [`io`]: reading point files and writing clustered output

pub mod bsp;
pub mod error;
pub mod io;
pub mod kmeans;

pub use error::{Error, Result};
pub use kmeans::{
    cluster, kmeans, CentroidReducer, CentroidSet, Clustering, Coordinate, KMeansConfig,
    PartialSums, Point, PointRecord,
};
