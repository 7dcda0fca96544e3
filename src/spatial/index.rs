use crate::core::geo::Point;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A point item that can be indexed via an R-tree
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub id: String,
    pub position: Point,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(id: impl Into<String>, position: Point, data: T) -> Self {
        Self {
            id: id.into(),
            position,
            data,
        }
    }
}

impl<T> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for SpatialItem<T> {}

// --- rstar integration -------------------------------------------------------------------------

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

impl<T> PointDistance for SpatialItem<T> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree over point items, queried in the same units the items were inserted in
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    /// Builds a balanced tree in one pass; cheaper than repeated inserts
    pub fn bulk_load(items: Vec<SpatialItem<T>>) -> Self {
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    /// Items within `radius` of `center`, boundary included
    pub fn query_radius(&self, center: &Point, radius: f64) -> Vec<&SpatialItem<T>> {
        self.rtree
            .locate_within_distance([center.x, center.y], radius * radius)
            .collect()
    }
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SpatialIndex<usize> {
        let items = (0..5)
            .map(|i| SpatialItem::new(format!("item-{i}"), Point::new(i as f64 * 10.0, 0.0), i))
            .collect();
        SpatialIndex::bulk_load(items)
    }

    #[test]
    fn test_query_radius_includes_boundary() {
        let index = grid();
        let mut hits: Vec<usize> = index
            .query_radius(&Point::new(20.0, 0.0), 10.0)
            .into_iter()
            .map(|item| item.data)
            .collect();
        hits.sort_unstable();
        assert_eq!(hits, vec![1, 2, 3]);
    }

    #[test]
    fn test_query_radius_misses_far_items() {
        let index = grid();
        assert!(index.query_radius(&Point::new(100.0, 0.0), 5.0).is_empty());
        assert!(SpatialIndex::<usize>::new()
            .query_radius(&Point::new(0.0, 0.0), 50.0)
            .is_empty());
    }
}
