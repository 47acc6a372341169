use super::{level::Floor, overlay::FloorOverlay};
use crate::{
    building::BuildingConfig,
    catalog::ArtworkCatalog,
    core::{converter::CoordinateConverter, geo::LatLngBounds},
    floorplan::FloorplanSource,
    MapError, Result,
};

/// Every floor of a building plus the calibration they share
#[derive(Debug, Clone)]
pub struct FloorSet {
    converter: CoordinateConverter,
    floors: Vec<Floor>,
}

impl FloorSet {
    /// Builds a set from already-constructed floors, which must be indexed
    /// contiguously from 0.
    pub fn from_parts(converter: CoordinateConverter, mut floors: Vec<Floor>) -> Result<Self> {
        if floors.is_empty() {
            return Err(MapError::Configuration("a building needs at least one floor".to_string()));
        }
        floors.sort_by_key(|f| f.index());
        for (expected, floor) in floors.iter().enumerate() {
            if floor.index() != expected {
                return Err(MapError::Configuration(format!(
                    "floor {} found where {} was expected",
                    floor.index(),
                    expected
                )));
            }
        }
        Ok(Self { converter, floors })
    }

    /// Loads every floorplan and overlay a building config names.
    ///
    /// A missing overlay asset or an unreadable floorplan fails the load.
    pub fn load(config: &BuildingConfig, catalog: &dyn ArtworkCatalog) -> Result<Self> {
        config.validate()?;
        let converter = CoordinateConverter::new(config.anchors, config.axis)?;

        let mut floors = Vec::with_capacity(config.floors.len());
        for asset in &config.floors {
            let records = FloorplanSource::load(config.resolve(&asset.floorplan), asset.index)?;
            let page = records
                .view_box
                .clone()
                .or_else(|| asset.page_bounds.clone())
                .ok_or_else(|| {
                    MapError::Configuration(format!(
                        "floor {} declares no page bounds",
                        asset.index
                    ))
                })?;
            let overlay = FloorOverlay::load(
                asset.index,
                &config.resolve(&asset.overlay),
                page,
                &converter,
            )?;
            floors.push(Floor::new(asset.index, overlay, &records, &converter, catalog));
        }

        Self::from_parts(converter, floors)
    }

    pub fn converter(&self) -> &CoordinateConverter {
        &self.converter
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Floor> {
        self.floors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Floor> {
        self.floors.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Floor> {
        self.floors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Floor> {
        self.floors.iter_mut()
    }

    /// Union of every overlay's footprint
    pub fn building_bounds(&self) -> Option<LatLngBounds> {
        let corners: Vec<_> = self
            .floors
            .iter()
            .flat_map(|f| f.overlay().corners)
            .collect();
        LatLngBounds::from_points(corners.iter())
    }
}
