//! A minimal in-process bulk-synchronous (BSP) engine.
//!
//! Computation proceeds in supersteps. In each superstep every active vertex
//! runs its compute callback exactly once, reading only its own state and an
//! immutable snapshot published by a [`Reducer`] at the end of the previous
//! superstep. A barrier separates the parallel compute phase from the
//! reduction phase:
//!
//! 1. `reducer.init(step)`
//! 2. every active vertex computes, and is folded into its worker's private
//!    partial through `reducer.combine`
//! 3. worker partials are merged into the reducer, then `reducer.finalize`
//!    publishes the snapshot for the next superstep
//!
//! The reducer is borrowed shared during phase 2 and exclusively during
//! phases 1 and 3, so the borrow checker enforces single-writer/multi-reader
//! access to the snapshot without any locking.
//!
//! The engine runs until a superstep leaves no vertex active, or until an
//! optional superstep limit is reached.

pub mod engine;
pub mod reducer;
pub mod vertex;

pub use engine::{Engine, RunOutcome, StepReport, Termination};
pub use reducer::Reducer;
pub use vertex::{Context, Superstep, Vertex, VertexId, Vote};
