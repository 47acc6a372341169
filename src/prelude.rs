//! Prelude module for common museum-map types and traits
//!
//! Re-exports the types most hosts need, for importing with
//! `use museum_map::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    camera::{CameraAnimation, CameraCommand, CameraTicket, EasingType},
    config::{MapEngineOptions, MapEngineProfile},
    converter::{AuthoringAxis, CalibrationAnchor, CalibrationAnchorPair, CoordinateConverter},
    geo::{CoordinateWithFloor, LatLng, LatLngBounds, Point},
};

pub use crate::annotation::{
    Annotation, AnnotationId, AnnotationKind, DisplayMode, Layout, ThumbnailSize, VisualState,
};

pub use crate::building::{BuildingConfig, FloorAssetConfig};

pub use crate::catalog::{Artwork, ArtworkCatalog, InMemoryCatalog, Language, Tour, TourStopEntry};

pub use crate::coordinator::{AmenityFocus, MapCoordinator, MapMode};

pub use crate::floor::{Floor, FloorOverlay, FloorSet};

pub use crate::floorplan::{AmenityType, FloorplanSource};

pub use crate::images::{ImageCache, ImageFetcher, ImageLoader};

pub use crate::runtime::{default_spawner, DeferredSpawner, TaskSpawner, ThreadSpawner};

pub use crate::surface::{AnnotationRender, MapSurface, RecordingSurface, SurfaceCommand};

pub use crate::traits::{CoordinateTransform, Lerp};

pub use crate::zoom::{ZoomLevelController, ZoomTier};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};

#[cfg(feature = "tokio-runtime")]
pub use futures::Future;
