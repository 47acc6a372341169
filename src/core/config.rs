//! Configuration system for map engine behavior tuning
//!
//! Options are grouped per concern and can be resolved from presets or
//! deserialized (partially) from a building description.

use crate::core::{camera::EasingType, constants::*};
use crate::{MapError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Presets tuned per device class
#[derive(Debug, Clone, PartialEq)]
pub enum MapEngineProfile {
    Standard,
    Compact,
    Custom(MapEngineOptions),
}

impl MapEngineProfile {
    pub fn resolve(&self) -> MapEngineOptions {
        match self {
            Self::Standard => MapEngineOptions {
                zoom: ZoomTierConfig::default(),
                camera: CameraConfig::default(),
                images: ImageLoadingConfig::default(),
                visibility: VisibilityConfig::default(),
                auto_advance_tour: true,
            },
            Self::Compact => MapEngineOptions {
                zoom: ZoomTierConfig {
                    zoomed_in_max_altitude: 220.0,
                    mid_max_altitude: 480.0,
                    zoomed_out_max_altitude: 1500.0,
                },
                camera: CameraConfig {
                    default_altitude: 500.0,
                    single_location_altitude: 200.0,
                    tour_overview_altitude: 380.0,
                    highlight_altitude: 160.0,
                    amenity_altitude: 300.0,
                    animation_duration_ms: 350,
                    easing: EasingType::EaseOut,
                    animate: true,
                },
                images: ImageLoadingConfig {
                    cache_size: 96,
                    max_attempts: IMAGE_FETCH_ATTEMPTS,
                },
                visibility: VisibilityConfig::default(),
                auto_advance_tour: true,
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for MapEngineProfile {
    fn default() -> Self {
        Self::Standard
    }
}

static STANDARD_OPTIONS: Lazy<MapEngineOptions> =
    Lazy::new(|| MapEngineProfile::Standard.resolve());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapEngineOptions {
    pub zoom: ZoomTierConfig,
    pub camera: CameraConfig,
    pub images: ImageLoadingConfig,
    pub visibility: VisibilityConfig,
    /// Highlight the next tour stop when the current stop's audio finishes
    pub auto_advance_tour: bool,
}

impl MapEngineOptions {
    /// Shared standard preset
    pub fn standard() -> &'static MapEngineOptions {
        &STANDARD_OPTIONS
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        self.zoom.validate()?;
        if self.images.cache_size == 0 {
            return Err(MapError::Configuration(
                "image cache size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MapEngineOptions {
    fn default() -> Self {
        MapEngineProfile::default().resolve()
    }
}

/// Normalized-altitude boundaries of the zoom tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomTierConfig {
    pub zoomed_in_max_altitude: f64,
    pub mid_max_altitude: f64,
    pub zoomed_out_max_altitude: f64,
}

impl ZoomTierConfig {
    pub fn validate(&self) -> Result<()> {
        let ordered = self.zoomed_in_max_altitude > 0.0
            && self.zoomed_in_max_altitude < self.mid_max_altitude
            && self.mid_max_altitude < self.zoomed_out_max_altitude;
        if !ordered {
            return Err(MapError::Configuration(format!(
                "zoom tier thresholds must be positive and strictly ascending: {:?}",
                self
            )));
        }
        Ok(())
    }
}

impl Default for ZoomTierConfig {
    fn default() -> Self {
        Self {
            zoomed_in_max_altitude: ZOOMED_IN_MAX_ALTITUDE,
            mid_max_altitude: MID_MAX_ALTITUDE,
            zoomed_out_max_altitude: ZOOMED_OUT_MAX_ALTITUDE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_altitude: f64,
    pub single_location_altitude: f64,
    pub tour_overview_altitude: f64,
    pub highlight_altitude: f64,
    pub amenity_altitude: f64,
    pub animation_duration_ms: u64,
    pub easing: EasingType,
    pub animate: bool,
}

impl CameraConfig {
    pub fn duration_ms(&self) -> u64 {
        if self.animate {
            self.animation_duration_ms
        } else {
            0
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_altitude: DEFAULT_CAMERA_ALTITUDE,
            single_location_altitude: SINGLE_LOCATION_ALTITUDE,
            tour_overview_altitude: TOUR_OVERVIEW_ALTITUDE,
            highlight_altitude: HIGHLIGHT_ALTITUDE,
            amenity_altitude: AMENITY_ALTITUDE,
            animation_duration_ms: CAMERA_ANIMATION_MS,
            easing: EasingType::EaseInOut,
            animate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLoadingConfig {
    pub cache_size: usize,
    pub max_attempts: u32,
}

impl Default for ImageLoadingConfig {
    fn default() -> Self {
        Self {
            cache_size: IMAGE_CACHE_CAPACITY,
            max_attempts: IMAGE_FETCH_ATTEMPTS,
        }
    }
}

/// Minimum text-density rank an annotation needs to stay visible per tier.
///
/// Ranks: artwork dots 0, galleries 1, spaces and amenities 2,
/// departments and landmarks 3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    pub zoomed_in_min_rank: u8,
    pub mid_min_rank: u8,
    pub zoomed_out_min_rank: u8,
    pub zoomed_max_min_rank: u8,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            zoomed_in_min_rank: 0,
            mid_min_rank: 1,
            zoomed_out_min_rank: 2,
            zoomed_max_min_rank: 3,
        }
    }
}
