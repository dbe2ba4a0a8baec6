//! Lloyd's k-means as a vertex-centric BSP computation.
//!
//! Every point is a vertex. In superstep 1 points keep the cluster they were
//! randomly given at load time. In every later superstep each point moves to
//! the nearest centroid published at the end of the previous superstep,
//! votes to halt if it did not move, and wakes the whole graph if it did.
//! [`CentroidReducer`] folds the current assignments into per-worker
//! [`PartialSums`] and finalizes them into the next [`CentroidSet`]. The run
//! ends in the first superstep in which no point moves.

pub mod assignment;
pub mod centroid;
pub mod driver;
pub mod partial;
pub mod point;
pub mod reducer;

pub use assignment::nearest_centroid;
pub use centroid::CentroidSet;
pub use driver::{cluster, kmeans, Clustering, KMeansConfig};
pub use partial::{Bucket, PartialSums};
pub use point::{assign_randomly, Coordinate, Point, PointRecord};
pub use reducer::CentroidReducer;
