/// Stable identifier of a vertex. Used by the engine to assign vertices to workers;
/// negative ids are allowed.
pub type VertexId = i64;

/// One-based superstep index.
pub type Superstep = u64;

/// A vertex's decision at the end of its compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    /// Remain active and compute again next superstep.
    Stay,
    /// Vote to halt. The vertex is skipped until something reactivates it.
    Halt,
    /// Reactivate every vertex in the graph for the next superstep,
    /// including this one.
    WakeAll,
}

/// What a vertex can see while it computes: the current superstep and the
/// snapshot finalized by the reducer at the end of the previous one.
#[derive(Debug)]
pub struct Context<'a, S> {
    step: Superstep,
    snapshot: &'a S,
}

impl<'a, S> Context<'a, S> {
    pub fn new(step: Superstep, snapshot: &'a S) -> Self {
        Self { step, snapshot }
    }

    pub fn step(&self) -> Superstep {
        self.step
    }

    pub fn snapshot(&self) -> &'a S {
        self.snapshot
    }
}

/// A unit of vertex-centric computation.
pub trait Vertex: Send {
    /// Read-only aggregate published between supersteps.
    type Snapshot: Sync;

    fn id(&self) -> VertexId;

    /// Invoked once per superstep while the vertex is active.
    fn compute(&mut self, ctx: &Context<'_, Self::Snapshot>) -> Vote;
}
