mod common;

use common::*;
use museum_map::{
    catalog::InMemoryCatalog, BuildingConfig, MapCoordinator, MapError, MapMode, RecordingSurface,
};
use std::path::PathBuf;

const BUILDING_JSON: &str = r#"{
    "name": "Fixture Museum",
    "anchors": {
        "first":  { "authoring": { "x": 120, "y": 80 },    "geographic": { "lat": 41.88048, "lng": -87.62466 } },
        "second": { "authoring": { "x": 1880, "y": 1310 }, "geographic": { "lat": 41.87869, "lng": -87.62213 } }
    },
    "floors": [
        { "index": 0, "label": "1", "floorplan": "floor0.svg", "overlay": "floor0.png" },
        { "index": 1, "label": "2", "floorplan": "floor1.svg", "overlay": "floor1.png" }
    ],
    "default_floor": 1,
    "options": { "camera": { "animate": false } }
}"#;

/// Scratch directory holding a building description and its assets
struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str, with_overlays: bool) -> Self {
        let dir = std::env::temp_dir().join(format!("museum-map-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("building.json"), BUILDING_JSON).unwrap();
        std::fs::write(dir.join("floor0.svg"), FLOOR_ZERO_SVG).unwrap();
        std::fs::write(dir.join("floor1.svg"), FLOOR_ONE_SVG).unwrap();
        if with_overlays {
            std::fs::write(dir.join("floor0.png"), [0u8; 4]).unwrap();
            std::fs::write(dir.join("floor1.png"), [0u8; 4]).unwrap();
        }
        Self { dir }
    }

    fn config(&self) -> BuildingConfig {
        BuildingConfig::load(self.dir.join("building.json")).unwrap()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// A building loads from disk with assets resolved next to its config
#[test]
fn test_load_building_from_disk() {
    init_logging();
    let fixture = Fixture::new("load", true);
    let config = fixture.config();
    assert_eq!(config.floors.len(), 2);
    assert!(!config.options.camera.animate);

    let mut map =
        MapCoordinator::from_building(&config, &catalog(), RecordingSurface::new()).unwrap();
    assert_eq!(map.current_floor(), 1);
    assert_eq!(map.floors().len(), 2);
    assert_eq!(map.floors().get(0).unwrap().amenities().len(), 3);
    assert_eq!(map.floors().get(1).unwrap().objects().len(), 2);
    assert_eq!(
        map.floors().get(1).unwrap().overlay().asset,
        fixture.dir.join("floor1.png")
    );

    map.show_all_information();
    assert_eq!(map.current_mode(), MapMode::AllInformation);
    assert_eq!(map.surface().overlays(), &[1]);
}

/// A floor whose overlay image is missing fails the load
#[test]
fn test_missing_overlay_fails() {
    init_logging();
    let fixture = Fixture::new("missing-overlay", false);
    let config = fixture.config();

    let err =
        MapCoordinator::from_building(&config, &InMemoryCatalog::new(), RecordingSurface::new())
            .unwrap_err();
    assert!(matches!(err, MapError::MissingOverlay(path) if path.ends_with("floor0.png")));
}

/// Anchors that coincide cannot calibrate a building
#[test]
fn test_degenerate_anchors_fail() {
    let json = BUILDING_JSON.replace(r#""x": 1880, "y": 1310"#, r#""x": 120, "y": 80"#);
    let config = BuildingConfig::from_json_str(&json).unwrap();
    let err = museum_map::FloorSet::load(&config, &InMemoryCatalog::new()).unwrap_err();
    assert!(matches!(err, MapError::DegenerateCalibration(_)));
}

/// Floor indices must run from zero without gaps
#[test]
fn test_floor_gaps_are_rejected() {
    let json = BUILDING_JSON.replace(r#""index": 1"#, r#""index": 2"#);
    let err = BuildingConfig::from_json_str(&json).unwrap_err();
    assert!(matches!(err, MapError::Configuration(_)));
}
