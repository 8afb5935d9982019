//! R-tree based occupancy index using the rstar crate.
//!
//! Provides O(log n) queries for:
//! - Nearest occupied point within a distance
//! - Incremental insertion while slots are being claimed

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::geometry::Position;

/// An occupied point with the local index of the node sitting on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupiedPoint {
    /// Local node index.
    pub index: usize,
    /// Where the node sits.
    pub position: Position,
}

impl RTreeObject for OccupiedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

impl PointDistance for OccupiedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over positions already taken by nodes.
///
/// Uses an R*-tree so claiming `n` slots costs O(n log n) instead of the
/// O(n^2) of scanning every placed node.
pub struct SpatialIndex {
    tree: RTree<OccupiedPoint>,
}

impl SpatialIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load an index from `(index, position)` pairs.
    pub fn from_points(points: &[(usize, Position)]) -> Self {
        let occupied = points
            .iter()
            .map(|&(index, position)| OccupiedPoint { index, position })
            .collect();
        Self {
            tree: RTree::bulk_load(occupied),
        }
    }

    /// Mark a position as occupied.
    pub fn insert(&mut self, index: usize, position: Position) {
        self.tree.insert(OccupiedPoint { index, position });
    }

    /// Find the nearest occupant within `max_distance` of a point.
    pub fn nearest_within(&self, position: Position, max_distance: f64) -> Option<usize> {
        let query = [position.x, position.y];
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&query)
            .filter(|point| point.distance_2(&query) <= max_distance_sq)
            .map(|point| point.index)
    }

    /// Returns true if any occupant lies within `radius` of the point.
    pub fn is_occupied(&self, position: Position, radius: f64) -> bool {
        self.nearest_within(position, radius).is_some()
    }

    /// Number of occupied points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
