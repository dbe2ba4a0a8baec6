use crate::kmeans::point::Coordinate;

/// Running total for one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bucket {
    pub count: u64,
    pub sum: Coordinate,
}

impl Bucket {
    /// Componentwise mean of the coordinates added so far, `None` if empty.
    pub fn mean(&self) -> Option<Coordinate> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum.scaled_down(self.count as f64))
        }
    }
}

/// One bucket per cluster. Each worker fills its own copy during a
/// superstep; copies are merged additively at the barrier.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialSums {
    buckets: Vec<Bucket>,
}

impl PartialSums {
    pub fn zeroed(k: usize) -> Self {
        Self {
            buckets: vec![Bucket::default(); k],
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Adds one point's coordinate to `cluster`'s bucket.
    pub fn add(&mut self, cluster: usize, coordinate: Coordinate) {
        let bucket = &mut self.buckets[cluster];
        bucket.count += 1;
        bucket.sum += coordinate;
    }

    /// Elementwise sum. Both sides must have the same number of buckets.
    pub fn merge(&mut self, other: &PartialSums) {
        debug_assert_eq!(self.len(), other.len(), "partials of different k");
        for (mine, theirs) in self.buckets.iter_mut().zip(&other.buckets) {
            mine.count += theirs.count;
            mine.sum += theirs.sum;
        }
    }

    pub fn reset(&mut self) {
        self.buckets.fill(Bucket::default());
    }

    /// Number of points folded in across every bucket.
    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}
