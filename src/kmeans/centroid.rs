use crate::kmeans::point::Coordinate;
use std::ops::Index;

/// The K published centroids. Entry `i` is the mean of cluster `i`, or the
/// origin when cluster `i` had no members.
///
/// Outside the crate a set can be read but not assembled from arbitrary
/// coordinates:
///
/// ```compile_fail
/// let set = bsp_kmeans::CentroidSet::from_coordinates(Vec::new());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidSet {
    centroids: Vec<Coordinate>,
}

impl CentroidSet {
    /// `k` centroids, all at the origin.
    pub fn origin(k: usize) -> Self {
        Self {
            centroids: vec![Coordinate::ORIGIN; k],
        }
    }

    #[cfg(test)]
    pub(crate) fn from_coordinates(centroids: Vec<Coordinate>) -> Self {
        Self { centroids }
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn get(&self, cluster: usize) -> Option<Coordinate> {
        self.centroids.get(cluster).copied()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.centroids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.centroids.iter()
    }

    pub(crate) fn set(&mut self, cluster: usize, centroid: Coordinate) {
        self.centroids[cluster] = centroid;
    }
}

impl Index<usize> for CentroidSet {
    type Output = Coordinate;

    fn index(&self, cluster: usize) -> &Coordinate {
        &self.centroids[cluster]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_set() {
        let set = CentroidSet::origin(3);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert!(set.iter().all(|c| *c == Coordinate::ORIGIN));
        assert_eq!(set.get(3), None);
    }

    #[test]
    fn test_set_and_index() {
        let mut set = CentroidSet::origin(2);
        set.set(1, Coordinate::new(2.5, -1.0));
        assert_eq!(set[1], Coordinate::new(2.5, -1.0));
        assert_eq!(set.get(0), Some(Coordinate::ORIGIN));
        assert_eq!(
            set,
            CentroidSet::from_coordinates(vec![Coordinate::ORIGIN, Coordinate::new(2.5, -1.0)])
        );
    }
}
