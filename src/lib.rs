//! # museum-map
//!
//! Indoor, multi-floor map engine for a museum guide.
//!
//! Vector floorplans are parsed into typed landmarks, geo-located through a
//! two-anchor calibration, and shown floor by floor together with artworks,
//! tour stops and live-location pins. A [`MapCoordinator`] owns the map mode
//! and selection and drives any host view implementing [`MapSurface`].

pub mod annotation;
pub mod building;
pub mod catalog;
pub mod coordinator;
pub mod core;
pub mod floor;
pub mod floorplan;
pub mod images;
pub mod prelude;
pub mod runtime;
pub mod surface;
pub mod traits;
pub mod zoom;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{MapEngineOptions, MapEngineProfile},
    converter::{AuthoringAxis, CalibrationAnchor, CalibrationAnchorPair, CoordinateConverter},
    geo::{CoordinateWithFloor, LatLng, LatLngBounds, Point},
};

pub use annotation::{Annotation, AnnotationId, AnnotationKind, DisplayMode, VisualState};

pub use building::BuildingConfig;

pub use catalog::{ArtworkCatalog, InMemoryCatalog};

pub use coordinator::{MapCoordinator, MapMode};

pub use floor::{Floor, FloorOverlay, FloorSet};

pub use floorplan::{AmenityType, FloorplanSource};

pub use surface::{MapSurface, RecordingSurface};

pub use zoom::{ZoomLevelController, ZoomTier};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Degenerate calibration: {0}")]
    DegenerateCalibration(String),

    #[error("Missing floor overlay: {}", .0.display())]
    MissingOverlay(std::path::PathBuf),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Image fetch error: {0}")]
    ImageFetch(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
/// Calling it more than once is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
