use crate::bsp::VertexId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::{Add, AddAssign};

/// A position in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Componentwise division, used to turn a coordinate sum into a mean.
    pub fn scaled_down(&self, divisor: f64) -> Coordinate {
        Coordinate::new(self.x / divisor, self.y / divisor)
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coordinate {
    fn add_assign(&mut self, rhs: Coordinate) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// An input point before it has been given a cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    pub id: VertexId,
    pub coordinate: Coordinate,
}

impl PointRecord {
    pub fn new(id: VertexId, x: f64, y: f64) -> Self {
        Self {
            id,
            coordinate: Coordinate::new(x, y),
        }
    }
}

/// Per-vertex state: an immutable id and coordinate plus the cluster the
/// point currently belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    id: VertexId,
    coordinate: Coordinate,
    cluster: usize,
}

impl Point {
    pub fn new(id: VertexId, coordinate: Coordinate, cluster: usize) -> Self {
        Self {
            id,
            coordinate,
            cluster,
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn cluster(&self) -> usize {
        self.cluster
    }

    pub(crate) fn assign(&mut self, cluster: usize) {
        self.cluster = cluster;
    }
}

/// Gives every record a cluster drawn uniformly from `[0, k)`.
///
/// The same `seed` always yields the same assignment for the same records
/// in the same order.
///
/// # Panics
///
/// - If `k == 0`.
pub fn assign_randomly<I>(records: I, k: usize, seed: u64) -> Vec<Point>
where
    I: IntoIterator<Item = PointRecord>,
{
    assert!(k > 0, "k must be > 0");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    records
        .into_iter()
        .map(|record| Point::new(record.id, record.coordinate, rng.gen_range(0..k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn records(n: VertexId) -> Vec<PointRecord> {
        (0..n)
            .map(|i| PointRecord::new(i, i as f64, -(i as f64)))
            .collect()
    }

    #[test]
    fn test_distance() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(b.distance(&a), 5.0);
        assert_relative_eq!(b.distance(&b), 0.0);
    }

    #[test]
    fn test_coordinate_arithmetic() {
        let mut sum = Coordinate::ORIGIN;
        sum += Coordinate::new(1.0, 2.0);
        sum += Coordinate::new(3.0, 4.0);
        assert_eq!(sum, Coordinate::new(4.0, 6.0));
        assert_eq!(sum + Coordinate::new(-4.0, -6.0), Coordinate::ORIGIN);
        assert_eq!(sum.scaled_down(2.0), Coordinate::new(2.0, 3.0));
    }

    #[test]
    fn test_random_assignment_in_range() {
        let points = assign_randomly(records(500), 7, 99);
        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|p| p.cluster() < 7));
        // 500 draws over 7 buckets should hit every bucket.
        for c in 0..7 {
            assert!(points.iter().any(|p| p.cluster() == c));
        }
    }

    #[test]
    fn test_random_assignment_is_seeded() {
        let a = assign_randomly(records(100), 4, 7);
        let b = assign_randomly(records(100), 4, 7);
        let c = assign_randomly(records(100), 4, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_single_cluster_assignment() {
        let points = assign_randomly(records(20), 1, 3);
        assert!(points.iter().all(|p| p.cluster() == 0));
    }

    #[test]
    #[should_panic]
    fn test_zero_clusters() {
        let _ = assign_randomly(records(3), 0, 1);
    }
}
