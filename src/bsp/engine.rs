use crate::bsp::reducer::Reducer;
use crate::bsp::vertex::{Context, Superstep, Vertex, VertexId, Vote};
use crate::error::{Error, Result};
use log::debug;
use rayon::prelude::*;

#[derive(Debug)]
struct Slot<V> {
    vertex: V,
    active: bool,
}

/// Counters produced by one worker during the compute phase.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    computed: usize,
    staying: usize,
    wake_all: usize,
}

impl Tally {
    fn add(mut self, other: Tally) -> Self {
        self.computed += other.computed;
        self.staying += other.staying;
        self.wake_all += other.wake_all;
        self
    }
}

/// Summary of a single completed superstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub step: Superstep,
    /// Vertices whose compute callback ran.
    pub computed: usize,
    /// Vertices that returned [`Vote::WakeAll`].
    pub wake_all_signals: usize,
    /// Vertices that will compute in the next superstep.
    pub active_after: usize,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A superstep ended with every vertex halted.
    Quiescent,
    /// The superstep limit was reached while vertices were still active.
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub supersteps: Superstep,
    pub termination: Termination,
}

/// In-process BSP engine. Vertices are hash-partitioned by id into worker
/// partitions; partitions compute in parallel on the rayon pool.
#[derive(Debug)]
pub struct Engine<V> {
    partitions: Vec<Vec<Slot<V>>>,
    completed: Superstep,
    active: usize,
}

impl<V: Vertex> Engine<V> {
    /// Distributes `vertices` over `workers` partitions. Every vertex starts active.
    pub fn new(vertices: Vec<V>, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidConfig(
                "engine needs at least one worker".into(),
            ));
        }
        let active = vertices.len();
        let mut partitions: Vec<Vec<Slot<V>>> = (0..workers).map(|_| Vec::new()).collect();
        for vertex in vertices {
            let worker = vertex.id().rem_euclid(workers as VertexId) as usize;
            partitions[worker].push(Slot {
                vertex,
                active: true,
            });
        }
        Ok(Self {
            partitions,
            completed: 0,
            active,
        })
    }

    pub fn workers(&self) -> usize {
        self.partitions.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    /// Number of supersteps run so far.
    pub fn completed(&self) -> Superstep {
        self.completed
    }

    /// Vertices that will compute in the next superstep.
    pub fn active(&self) -> usize {
        self.active
    }

    /// True once at least one superstep has run and no vertex is left active.
    pub fn is_quiescent(&self) -> bool {
        self.completed > 0 && self.active == 0
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.partitions
            .iter()
            .flat_map(|partition| partition.iter().map(|slot| &slot.vertex))
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.partitions
            .into_iter()
            .flat_map(|partition| partition.into_iter().map(|slot| slot.vertex))
            .collect()
    }

    /// Runs exactly one superstep: init, parallel compute with worker-local
    /// combine, then merge and finalize behind the barrier.
    pub fn superstep<R>(&mut self, reducer: &mut R) -> StepReport
    where
        R: Reducer<V, Snapshot = V::Snapshot>,
    {
        let step = self.completed + 1;
        reducer.init(step);

        let shared: &R = reducer;
        let results: Vec<(R::Partial, Tally)> = self
            .partitions
            .par_iter_mut()
            .map(|partition| {
                let ctx = Context::new(step, shared.snapshot());
                let mut partial = shared.local();
                let mut tally = Tally::default();
                for slot in partition.iter_mut().filter(|slot| slot.active) {
                    let vote = slot.vertex.compute(&ctx);
                    shared.combine(&mut partial, &slot.vertex);
                    tally.computed += 1;
                    match vote {
                        Vote::Stay => tally.staying += 1,
                        Vote::Halt => slot.active = false,
                        Vote::WakeAll => tally.wake_all += 1,
                    }
                }
                (partial, tally)
            })
            .collect();

        // Barrier: all workers are done, the reducer is exclusively ours again.
        let mut tally = Tally::default();
        for (partial, worker_tally) in results {
            reducer.merge(partial);
            tally = tally.add(worker_tally);
        }
        reducer.finalize();

        if tally.wake_all > 0 {
            for slot in self.partitions.iter_mut().flatten() {
                slot.active = true;
            }
            self.active = self.vertex_count();
        } else {
            self.active = tally.staying;
        }
        self.completed = step;

        debug!(
            "superstep {}: computed {}, wake-all signals {}, active after {}",
            step, tally.computed, tally.wake_all, self.active
        );

        StepReport {
            step,
            computed: tally.computed,
            wake_all_signals: tally.wake_all,
            active_after: self.active,
        }
    }

    /// Runs supersteps until no vertex is active or `max_supersteps` have
    /// completed. `None` runs to quiescence with no bound.
    pub fn run<R>(&mut self, reducer: &mut R, max_supersteps: Option<Superstep>) -> RunOutcome
    where
        R: Reducer<V, Snapshot = V::Snapshot>,
    {
        loop {
            if matches!(max_supersteps, Some(limit) if self.completed >= limit) {
                return RunOutcome {
                    supersteps: self.completed,
                    termination: Termination::StepLimit,
                };
            }
            let report = self.superstep(reducer);
            if report.active_after == 0 {
                return RunOutcome {
                    supersteps: self.completed,
                    termination: Termination::Quiescent,
                };
            }
        }
    }
}
