//! Authoring space ⇄ geographic coordinate conversion.
//!
//! Two calibration anchors fix a similarity transform (uniform scale,
//! rotation, translation) between the floorplan page and a local metric
//! plane around the building. The plane is then unprojected to latitude
//! and longitude.

use crate::{
    core::{
        constants::DEGENERATE_BASELINE_EPSILON,
        geo::{LatLng, LocalPlane, Point},
    },
    traits::CoordinateTransform,
    MapError, Result,
};
use nalgebra::{Point2, Rotation2, Similarity2, Vector2};
use serde::{Deserialize, Serialize};

/// One authoring point pinned to its real-world coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationAnchor {
    pub authoring: Point,
    pub geographic: LatLng,
}

impl CalibrationAnchor {
    pub fn new(authoring: Point, geographic: LatLng) -> Self {
        Self {
            authoring,
            geographic,
        }
    }
}

/// The two correspondences a building is calibrated with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationAnchorPair {
    pub first: CalibrationAnchor,
    pub second: CalibrationAnchor,
}

impl CalibrationAnchorPair {
    pub fn new(first: CalibrationAnchor, second: CalibrationAnchor) -> Self {
        Self { first, second }
    }
}

/// Which way the authoring y axis points on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthoringAxis {
    /// SVG convention
    #[default]
    YDown,
    /// PDF convention
    YUp,
}

impl AuthoringAxis {
    fn orient(self, point: &Point) -> Point2<f64> {
        match self {
            AuthoringAxis::YDown => Point2::new(point.x, point.y),
            AuthoringAxis::YUp => Point2::new(point.x, -point.y),
        }
    }

    fn restore(self, point: &Point2<f64>) -> Point {
        match self {
            AuthoringAxis::YDown => Point::new(point.x, point.y),
            AuthoringAxis::YUp => Point::new(point.x, -point.y),
        }
    }
}

/// Bidirectional mapping between a floorplan page and the globe
#[derive(Debug, Clone)]
pub struct CoordinateConverter {
    anchors: CalibrationAnchorPair,
    axis: AuthoringAxis,
    plane: LocalPlane,
    similarity: Similarity2<f64>,
}

impl CoordinateConverter {
    /// Solves the similarity transform from the anchor pair.
    ///
    /// Fails with [`MapError::DegenerateCalibration`] when either baseline has
    /// zero length or an anchor is not a finite, valid coordinate.
    pub fn new(anchors: CalibrationAnchorPair, axis: AuthoringAxis) -> Result<Self> {
        for anchor in [&anchors.first, &anchors.second] {
            if !anchor.authoring.is_finite() || !anchor.geographic.is_valid() {
                return Err(MapError::DegenerateCalibration(format!(
                    "anchor {:?} is not a finite coordinate",
                    anchor
                )));
            }
        }

        let plane = LocalPlane::new(
            anchors
                .first
                .geographic
                .midpoint(&anchors.second.geographic),
        );

        let a1 = axis.orient(&anchors.first.authoring);
        let a2 = axis.orient(&anchors.second.authoring);
        let p1 = plane.project(&anchors.first.geographic);
        let p2 = plane.project(&anchors.second.geographic);
        let p1 = Vector2::new(p1.x, p1.y);
        let p2 = Vector2::new(p2.x, p2.y);

        let authoring_baseline = a2 - a1;
        let geographic_baseline = p2 - p1;

        if authoring_baseline.norm() <= DEGENERATE_BASELINE_EPSILON {
            return Err(MapError::DegenerateCalibration(
                "anchors coincide in authoring space".to_string(),
            ));
        }
        if geographic_baseline.norm() <= DEGENERATE_BASELINE_EPSILON {
            return Err(MapError::DegenerateCalibration(
                "anchors coincide in geographic space".to_string(),
            ));
        }

        let scale = geographic_baseline.norm() / authoring_baseline.norm();
        let angle = geographic_baseline.y.atan2(geographic_baseline.x)
            - authoring_baseline.y.atan2(authoring_baseline.x);
        let rotation = Rotation2::new(angle);
        let translation = p1 - (rotation * a1.coords) * scale;

        let similarity = Similarity2::new(translation, angle, scale);
        log::debug!(
            "calibrated converter: {:.6} m/unit, rotation {:.3}°",
            scale,
            angle.to_degrees()
        );

        Ok(Self {
            anchors,
            axis,
            plane,
            similarity,
        })
    }

    pub fn anchors(&self) -> &CalibrationAnchorPair {
        &self.anchors
    }

    /// Metres on the ground covered by one authoring unit
    pub fn meters_per_authoring_unit(&self) -> f64 {
        self.similarity.scaling()
    }

    /// Rotation of the authoring x axis relative to east, clockwise, in degrees
    pub fn rotation_degrees(&self) -> f64 {
        self.similarity.isometry.rotation.angle().to_degrees()
    }

    /// Camera heading (clockwise from north) that shows the page upright
    pub fn upright_heading(&self) -> f64 {
        // Both axis conventions put the page top at smaller oriented y
        self.rotation_degrees().rem_euclid(360.0)
    }

    pub fn to_geographic(&self, point: &Point) -> LatLng {
        let planar = self.similarity.transform_point(&self.axis.orient(point));
        self.plane.unproject(&Point::new(planar.x, planar.y))
    }

    pub fn to_authoring(&self, lat_lng: &LatLng) -> Point {
        let planar = self.plane.project(lat_lng);
        let authoring = self
            .similarity
            .inverse_transform_point(&Point2::new(planar.x, planar.y));
        self.axis.restore(&authoring)
    }
}

impl CoordinateTransform for CoordinateConverter {
    fn to_geographic(&self, point: &Point) -> LatLng {
        CoordinateConverter::to_geographic(self, point)
    }

    fn to_authoring(&self, lat_lng: &LatLng) -> Point {
        CoordinateConverter::to_authoring(self, lat_lng)
    }
}
