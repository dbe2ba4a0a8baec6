//! Line-oriented point files.
//!
//! Input, one point per line: `<id>\t<x> <y>`.
//!
//! Output, one point per line, coordinates truncated to integers:
//! `<id>\t<x> <y>\t<cluster>\t<centroid x> <centroid y>`.

pub mod reader;
pub mod writer;

pub use reader::{load_points, parse_record, read_points};
pub use writer::{format_record, save_clustering, write_clustering};
