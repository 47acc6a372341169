use crate::{
    core::{
        bounds::Bounds,
        converter::CoordinateConverter,
        geo::{LatLng, LatLngBounds},
    },
    MapError, Result,
};
use std::path::{Path, PathBuf};

/// A floor's rendered floorplan image, pinned to the globe by its corners
#[derive(Debug, Clone, PartialEq)]
pub struct FloorOverlay {
    pub floor: usize,
    pub asset: PathBuf,
    /// Page extent in authoring units
    pub authoring_bounds: Bounds,
    /// Geographic corners, clockwise from the page's top-left
    pub corners: [LatLng; 4],
    pub bounds: LatLngBounds,
}

impl FloorOverlay {
    /// Geo-locates an overlay without touching the filesystem
    pub fn new(
        floor: usize,
        asset: impl Into<PathBuf>,
        authoring_bounds: Bounds,
        converter: &CoordinateConverter,
    ) -> Result<Self> {
        if !authoring_bounds.is_valid()
            || authoring_bounds.width() <= 0.0
            || authoring_bounds.height() <= 0.0
        {
            return Err(MapError::Configuration(format!(
                "floor {} overlay has empty page bounds {:?}",
                floor, authoring_bounds
            )));
        }

        let corners = authoring_bounds
            .corners()
            .map(|corner| converter.to_geographic(&corner));
        let bounds = LatLngBounds::from_points(corners.iter()).ok_or_else(|| {
            MapError::InvalidCoordinates(format!("floor {} overlay has no corners", floor))
        })?;

        Ok(Self {
            floor,
            asset: asset.into(),
            authoring_bounds,
            corners,
            bounds,
        })
    }

    /// Like [`FloorOverlay::new`], but the asset must exist on disk
    pub fn load(
        floor: usize,
        asset: &Path,
        authoring_bounds: Bounds,
        converter: &CoordinateConverter,
    ) -> Result<Self> {
        if !asset.is_file() {
            return Err(MapError::MissingOverlay(asset.to_path_buf()));
        }
        Self::new(floor, asset, authoring_bounds, converter)
    }

    pub fn center(&self) -> LatLng {
        self.bounds.center()
    }
}
