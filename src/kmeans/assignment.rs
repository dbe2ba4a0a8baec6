use crate::bsp::{Context, Vertex, VertexId, Vote};
use crate::kmeans::centroid::CentroidSet;
use crate::kmeans::point::{Coordinate, Point};

/// Index of the centroid closest to `coordinate`.
///
/// Centroids are scanned in ascending index order and a later centroid only
/// wins on a strictly smaller distance, so ties go to the lowest index.
/// Returns `None` only when `centroids` is empty.
pub fn nearest_centroid(coordinate: &Coordinate, centroids: &[Coordinate]) -> Option<usize> {
    let (first, rest) = centroids.split_first()?;
    let mut best = 0;
    let mut best_dist = coordinate.distance(first);
    for (offset, centroid) in rest.iter().enumerate() {
        let dist = coordinate.distance(centroid);
        if dist < best_dist {
            best_dist = dist;
            best = offset + 1;
        }
    }
    Some(best)
}

impl Vertex for Point {
    type Snapshot = CentroidSet;

    fn id(&self) -> VertexId {
        Point::id(self)
    }

    /// Superstep 1 only keeps the point active; its random cluster feeds the
    /// first centroids. Afterwards the point moves to its nearest centroid
    /// and halts if that is where it already was. Moving wakes every vertex,
    /// since the centroids everyone else reads will shift.
    fn compute(&mut self, ctx: &Context<'_, CentroidSet>) -> Vote {
        if ctx.step() == 1 {
            return Vote::Stay;
        }
        let Some(nearest) = nearest_centroid(&self.coordinate(), ctx.snapshot().as_slice()) else {
            return Vote::Halt;
        };
        if nearest == self.cluster() {
            Vote::Halt
        } else {
            self.assign(nearest);
            Vote::WakeAll
        }
    }
}
