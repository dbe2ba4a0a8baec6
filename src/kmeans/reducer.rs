use crate::bsp::{Reducer, Superstep};
use crate::kmeans::centroid::CentroidSet;
use crate::kmeans::partial::PartialSums;
use crate::kmeans::point::{Coordinate, Point};
use log::warn;

/// Reduces point assignments into the next [`CentroidSet`].
///
/// Workers each fill a private [`PartialSums`]; the engine merges them here
/// after the compute barrier, and [`Reducer::finalize`] turns the merged sums
/// into means. An empty cluster is published at the origin.
#[derive(Debug, Clone)]
pub struct CentroidReducer {
    k: usize,
    step: Superstep,
    partials: PartialSums,
    centroids: CentroidSet,
    sizes: Vec<u64>,
}

impl CentroidReducer {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            step: 0,
            partials: PartialSums::zeroed(k),
            centroids: CentroidSet::origin(k),
            sizes: vec![0; k],
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The superstep most recently passed to `init`.
    pub fn step(&self) -> Superstep {
        self.step
    }

    /// Merged sums for the current superstep.
    pub fn partials(&self) -> &PartialSums {
        &self.partials
    }

    /// Cluster sizes behind the published centroids.
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn into_centroids(self) -> CentroidSet {
        self.centroids
    }
}

impl Reducer<Point> for CentroidReducer {
    type Partial = PartialSums;
    type Snapshot = CentroidSet;

    fn init(&mut self, step: Superstep) {
        self.step = step;
        if step == 1 {
            self.partials = PartialSums::zeroed(self.k);
            self.centroids = CentroidSet::origin(self.k);
            self.sizes = vec![0; self.k];
        } else {
            self.partials.reset();
        }
    }

    fn local(&self) -> PartialSums {
        PartialSums::zeroed(self.k)
    }

    fn combine(&self, partial: &mut PartialSums, point: &Point) {
        partial.add(point.cluster(), point.coordinate());
    }

    fn merge(&mut self, partial: PartialSums) {
        self.partials.merge(&partial);
    }

    fn finalize(&mut self) {
        for (cluster, bucket) in self.partials.buckets().iter().enumerate() {
            if bucket.count == 0 && self.sizes[cluster] > 0 {
                warn!(
                    "cluster {} emptied in superstep {}, centroid reset to origin",
                    cluster, self.step
                );
            }
            self.sizes[cluster] = bucket.count;
            self.centroids
                .set(cluster, bucket.mean().unwrap_or(Coordinate::ORIGIN));
        }
    }

    fn snapshot(&self) -> &CentroidSet {
        &self.centroids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::VertexId;

    fn point(id: VertexId, x: f64, y: f64, cluster: usize) -> Point {
        Point::new(id, Coordinate::new(x, y), cluster)
    }

    fn reduce(reducer: &mut CentroidReducer, step: Superstep, workers: &[Vec<Point>]) {
        reducer.init(step);
        let partials: Vec<PartialSums> = workers
            .iter()
            .map(|points| {
                let mut partial = reducer.local();
                for p in points {
                    reducer.combine(&mut partial, p);
                }
                partial
            })
            .collect();
        for partial in partials {
            reducer.merge(partial);
        }
        reducer.finalize();
    }

    #[test]
    fn test_init_allocates_k_origin_centroids() {
        let mut reducer = CentroidReducer::new(4);
        reducer.init(1);
        assert_eq!(reducer.snapshot().len(), 4);
        assert_eq!(*reducer.snapshot(), CentroidSet::origin(4));
        assert_eq!(reducer.partials().total_count(), 0);
    }

    #[test]
    fn test_finalize_computes_means_across_workers() {
        let mut reducer = CentroidReducer::new(2);
        let workers = vec![
            vec![point(0, 0.0, 0.0, 0), point(1, 2.0, 2.0, 0)],
            vec![point(2, 10.0, 0.0, 1), point(3, 4.0, 4.0, 0)],
        ];
        reduce(&mut reducer, 1, &workers);
        assert_eq!(reducer.snapshot()[0], Coordinate::new(2.0, 2.0));
        assert_eq!(reducer.snapshot()[1], Coordinate::new(10.0, 0.0));
        assert_eq!(reducer.sizes(), &[3, 1]);
        assert_eq!(reducer.partials().total_count(), 4);
    }

    #[test]
    fn test_empty_cluster_resets_to_origin() {
        let mut reducer = CentroidReducer::new(3);
        reduce(
            &mut reducer,
            1,
            &[vec![point(0, 5.0, 5.0, 1), point(1, 7.0, 7.0, 2)]],
        );
        assert_eq!(reducer.snapshot()[2], Coordinate::new(7.0, 7.0));

        // Cluster 2 loses its member: its centroid jumps to the origin
        // rather than keeping (7, 7).
        reduce(
            &mut reducer,
            2,
            &[vec![point(0, 5.0, 5.0, 1), point(1, 7.0, 7.0, 1)]],
        );
        assert_eq!(reducer.snapshot()[0], Coordinate::ORIGIN);
        assert_eq!(reducer.snapshot()[1], Coordinate::new(6.0, 6.0));
        assert_eq!(reducer.snapshot()[2], Coordinate::ORIGIN);
        assert_eq!(reducer.sizes(), &[0, 2, 0]);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut reducer = CentroidReducer::new(3);
        reduce(
            &mut reducer,
            1,
            &[
                vec![point(0, 1.5, -2.0, 0), point(1, 3.25, 8.0, 2)],
                vec![point(2, -4.0, 0.5, 0)],
            ],
        );
        let first = reducer.snapshot().clone();
        reducer.finalize();
        assert_eq!(*reducer.snapshot(), first);
    }

    #[test]
    fn test_later_init_keeps_centroids_and_zeroes_partials() {
        let mut reducer = CentroidReducer::new(2);
        reduce(&mut reducer, 1, &[vec![point(0, 4.0, 6.0, 1)]]);
        let published = reducer.snapshot().clone();

        reducer.init(2);
        assert_eq!(reducer.step(), 2);
        assert_eq!(reducer.partials().total_count(), 0);
        assert_eq!(*reducer.snapshot(), published);
    }

    #[test]
    fn test_worker_split_does_not_change_result() {
        let points: Vec<Point> = (0..12)
            .map(|i| point(i, i as f64, (i * i) as f64, (i % 3) as usize))
            .collect();

        let mut together = CentroidReducer::new(3);
        reduce(&mut together, 1, &[points.clone()]);

        let mut split = CentroidReducer::new(3);
        let workers: Vec<Vec<Point>> = points.chunks(5).map(|c| c.to_vec()).collect();
        reduce(&mut split, 1, &workers);

        for (a, b) in together.snapshot().iter().zip(split.snapshot().iter()) {
            approx::assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            approx::assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }
    }
}
