use crate::bsp::VertexId;
use thiserror::Error;

/// Errors raised while configuring a run or moving points in and out of it.
///
/// Clustering itself cannot fail once the points are loaded and the
/// configuration is valid.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed record on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("duplicate point id {0}")]
    DuplicateId(VertexId),

    #[error("point {id} starts in cluster {cluster}, outside [0, {k})")]
    InvalidCluster {
        id: VertexId,
        cluster: usize,
        k: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for every fallible operation in the crate
pub type Result<T> = std::result::Result<T, Error>;
