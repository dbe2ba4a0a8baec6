use crate::bsp::vertex::Superstep;

/// A two-phase aggregator registered with the [`Engine`](crate::bsp::Engine).
///
/// Each worker accumulates into its own private `Partial` (obtained from
/// [`Reducer::local`]) while vertices compute in parallel. After the barrier
/// the engine hands every worker partial to [`Reducer::merge`] and then calls
/// [`Reducer::finalize`], which publishes the snapshot vertices read during
/// the next superstep.
///
/// `merge` must be commutative and associative: the engine is free to decide
/// how many workers exist and in what order their partials arrive.
pub trait Reducer<V>: Sync {
    /// Worker-local accumulator.
    type Partial: Send;
    /// Immutable result published to vertices.
    type Snapshot: Sync;

    /// Called before any vertex computes in `step`.
    fn init(&mut self, step: Superstep);

    /// A fresh, zeroed worker-local accumulator.
    fn local(&self) -> Self::Partial;

    /// Fold one computed vertex into a worker-local accumulator.
    fn combine(&self, partial: &mut Self::Partial, vertex: &V);

    /// Fold a worker's accumulator into the global state.
    fn merge(&mut self, partial: Self::Partial);

    /// Turn the merged state into the next snapshot.
    fn finalize(&mut self);

    /// The most recently published snapshot.
    fn snapshot(&self) -> &Self::Snapshot;
}
