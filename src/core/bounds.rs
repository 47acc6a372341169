use crate::core::geo::Point;
use crate::traits::MatrixTransform;
use serde::{Deserialize, Serialize};

/// Represents a bounding box in authoring (floorplan page) coordinates
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

    /// Creates bounds from an SVG-style `x y width height` box
    pub fn from_origin_and_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_coords(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Checks if the bounds are valid (min <= max)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Gets the four corner points, clockwise from the top-left of the page
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,                           // top-left
            Point::new(self.max.x, self.min.y), // top-right
            self.max,                           // bottom-right
            Point::new(self.min.x, self.max.y), // bottom-left
        ]
    }

    /// Creates empty bounds (invalid bounds that can be extended)
    pub fn empty() -> Self {
        Self::new(
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}

/// SVG `transform` matrices act on authoring points
impl MatrixTransform for Point {
    fn apply_transform(&self, matrix: &[f64; 6]) -> Self {
        Point::new(
            matrix[0] * self.x + matrix[2] * self.y + matrix[4], // a*x + c*y + e
            matrix[1] * self.x + matrix[3] * self.y + matrix[5], // b*x + d*y + f
        )
    }
}
