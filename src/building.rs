//! Building description: calibration, per-floor assets and engine options.
//!
//! ```json
//! {
//!   "name": "Art Institute",
//!   "anchors": {
//!     "first":  { "authoring": { "x": 0, "y": 0 },       "geographic": { "lat": 41.88, "lng": -87.624 } },
//!     "second": { "authoring": { "x": 1000, "y": 1000 }, "geographic": { "lat": 41.879, "lng": -87.6225 } }
//!   },
//!   "floors": [
//!     { "index": 0, "label": "LL", "floorplan": "floor0.svg", "overlay": "floor0.png" }
//!   ]
//! }
//! ```

use crate::{
    core::{
        bounds::Bounds,
        config::MapEngineOptions,
        converter::{AuthoringAxis, CalibrationAnchorPair},
        geo::LatLng,
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorAssetConfig {
    pub index: usize,
    #[serde(default)]
    pub label: String,
    /// Vector floorplan, relative to the config file
    pub floorplan: PathBuf,
    /// Raster overlay, relative to the config file
    pub overlay: PathBuf,
    /// Page extent when the floorplan declares no view box
    #[serde(default)]
    pub page_bounds: Option<Bounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    #[serde(default)]
    pub name: String,
    pub anchors: CalibrationAnchorPair,
    #[serde(default)]
    pub axis: AuthoringAxis,
    pub floors: Vec<FloorAssetConfig>,
    /// Floor shown when the map starts
    #[serde(default)]
    pub default_floor: usize,
    /// Camera target for the building overview; overlay centre when absent
    #[serde(default)]
    pub home: Option<LatLng>,
    #[serde(default)]
    pub options: MapEngineOptions,
    /// Directory relative asset paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl BuildingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.floors.sort_by_key(|f| f.index);
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file; assets resolve relative to its directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&json)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::info!(
            "loaded building '{}' with {} floors from {}",
            config.name,
            config.floors.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.floors.is_empty() {
            return Err(MapError::Configuration("building has no floors".to_string()));
        }
        for (expected, floor) in self.floors.iter().enumerate() {
            if floor.index != expected {
                return Err(MapError::Configuration(format!(
                    "floor indices must be contiguous from 0; found {} where {} was expected",
                    floor.index, expected
                )));
            }
        }
        if self.default_floor >= self.floors.len() {
            return Err(MapError::Configuration(format!(
                "default floor {} is out of range",
                self.default_floor
            )));
        }
        self.options.validate()
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.base_dir.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "name": "Test Museum",
        "anchors": {
            "first":  { "authoring": { "x": 0, "y": 0 },       "geographic": { "lat": 41.88, "lng": -87.624 } },
            "second": { "authoring": { "x": 1000, "y": 1000 }, "geographic": { "lat": 41.879, "lng": -87.6225 } }
        },
        "floors": [
            { "index": 1, "label": "1", "floorplan": "floor1.svg", "overlay": "floor1.png" },
            { "index": 0, "label": "LL", "floorplan": "floor0.svg", "overlay": "floor0.png" }
        ],
        "default_floor": 1
    }"#;

    #[test]
    fn test_parse_sorts_floors() {
        let config = BuildingConfig::from_json_str(CONFIG).unwrap();
        assert_eq!(config.floors[0].label, "LL");
        assert_eq!(config.axis, AuthoringAxis::YDown);
        assert_eq!(config.options, MapEngineOptions::default());
    }

    #[test]
    fn test_gaps_in_floor_indices_are_rejected() {
        let json = CONFIG.replace("\"index\": 1", "\"index\": 2");
        assert!(matches!(
            BuildingConfig::from_json_str(&json),
            Err(MapError::Configuration(_))
        ));
    }

    #[test]
    fn test_default_floor_out_of_range() {
        let json = CONFIG.replace("\"default_floor\": 1", "\"default_floor\": 5");
        assert!(BuildingConfig::from_json_str(&json).is_err());
    }
}
