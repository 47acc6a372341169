//! Shared trait abstractions
//!
//! Seams between the engine's coordinate spaces, and the small matrix helpers
//! shared by the floorplan parser and the converter.

use crate::core::geo::{LatLng, Point};

/// Trait for coordinate transformation between authoring and geographic space
pub trait CoordinateTransform {
    /// Authoring point to geographic coordinate
    fn to_geographic(&self, point: &Point) -> LatLng;

    /// Geographic coordinate to authoring point
    fn to_authoring(&self, lat_lng: &LatLng) -> Point;

    /// Convenience for transforming a batch of authoring points
    fn to_geographic_all(&self, points: &[Point]) -> Vec<LatLng> {
        points.iter().map(|p| self.to_geographic(p)).collect()
    }
}

/// Unified matrix transformation operations
pub trait MatrixTransform {
    /// Apply 2D transformation matrix `[a, b, c, d, e, f]`
    fn apply_transform(&self, matrix: &[f64; 6]) -> Self;

    /// Create transformation matrix from translation and scale
    fn create_transform_matrix(translate: Point, scale: f64) -> [f64; 6] {
        [scale, 0.0, 0.0, scale, translate.x, translate.y]
    }

    /// Identity matrix
    fn identity_matrix() -> [f64; 6] {
        [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    }

    /// Combine two transformation matrices (`a` applied after `b`)
    fn combine_matrices(a: &[f64; 6], b: &[f64; 6]) -> [f64; 6] {
        [
            a[0] * b[0] + a[2] * b[1],        // a
            a[1] * b[0] + a[3] * b[1],        // b
            a[0] * b[2] + a[2] * b[3],        // c
            a[1] * b[2] + a[3] * b[3],        // d
            a[0] * b[4] + a[2] * b[5] + a[4], // e
            a[1] * b[4] + a[3] * b[5] + a[5], // f
        ]
    }
}

/// Unified interpolation trait
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LatLng::new(
            Lerp::lerp(&self.lat, &other.lat, t),
            Lerp::lerp(&self.lng, &other.lng, t),
        )
    }
}
