use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Represents a bounding box in screen/pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Degenerate bounds around a single point
    pub fn from_point(point: Point) -> Self {
        Self::new(point, point)
    }

    /// Checks if the bounds intersect with another bounds, edges included
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    /// Returns a new bounds expanded by the given amount on every side
    pub fn expanded(&self, amount: f64) -> Bounds {
        Bounds::from_coords(
            self.min.x - amount,
            self.min.y - amount,
            self.max.x + amount,
            self.max.y + amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bounds.min, Point::new(10.0, 20.0));
        assert_eq!(bounds.max, Point::new(30.0, 40.0));
    }

    #[test]
    fn test_expanded_point_intersects() {
        let marker = Bounds::from_point(Point::new(-5.0, 400.0));
        let view = Bounds::from_coords(0.0, 0.0, 1200.0, 800.0);

        assert!(!marker.intersects(&view));
        assert!(marker.expanded(10.0).intersects(&view));
        assert!(marker.expanded(5.0).intersects(&view));
        assert!(!marker.expanded(4.0).intersects(&view));
    }
}
