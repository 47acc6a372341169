//! Maps camera altitude to a discrete zoom tier.
//!
//! Altitude is normalized by the ratio of viewport width to visible map width,
//! captured once per layout pass, so devices with different screens agree on
//! what "zoomed in" means.

use crate::core::config::ZoomTierConfig;
use serde::{Deserialize, Serialize};

/// Discrete zoom bucket, ordered from closest to farthest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomTier {
    ZoomedIn,
    Mid,
    ZoomedOut,
    ZoomedMax,
}

#[derive(Debug, Clone)]
pub struct ZoomLevelController {
    config: ZoomTierConfig,
    baseline: Option<f64>,
    previous: ZoomTier,
    current: ZoomTier,
}

impl ZoomLevelController {
    pub fn new(config: ZoomTierConfig) -> Self {
        Self {
            config,
            baseline: None,
            previous: ZoomTier::ZoomedOut,
            current: ZoomTier::ZoomedOut,
        }
    }

    /// Forgets the captured baseline; the next recompute captures a new one
    pub fn invalidate_layout(&mut self) {
        self.baseline = None;
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Recomputes the tier for `altitude` and returns it.
    ///
    /// The width arguments only matter on the first call after a layout
    /// invalidation.
    pub fn recompute(
        &mut self,
        altitude: f64,
        viewport_width: f64,
        visible_map_width: f64,
    ) -> ZoomTier {
        let baseline = match self.baseline {
            Some(baseline) => baseline,
            None => {
                let baseline = Self::width_ratio(viewport_width, visible_map_width);
                log::debug!("captured zoom baseline {:.4}", baseline);
                self.baseline = Some(baseline);
                baseline
            }
        };

        let tier = self.tier_for_normalized(altitude * baseline);
        self.previous = self.current;
        self.current = tier;
        if self.did_change() {
            log::debug!("zoom tier {:?} -> {:?}", self.previous, self.current);
        }
        tier
    }

    /// Tier for an already-normalized altitude
    pub fn tier_for_normalized(&self, normalized: f64) -> ZoomTier {
        if normalized <= self.config.zoomed_in_max_altitude {
            ZoomTier::ZoomedIn
        } else if normalized <= self.config.mid_max_altitude {
            ZoomTier::Mid
        } else if normalized <= self.config.zoomed_out_max_altitude {
            ZoomTier::ZoomedOut
        } else {
            ZoomTier::ZoomedMax
        }
    }

    pub fn current_tier(&self) -> ZoomTier {
        self.current
    }

    /// Tier held before the most recent recompute
    pub fn previous_tier(&self) -> ZoomTier {
        self.previous
    }

    pub fn did_change(&self) -> bool {
        self.previous != self.current
    }

    fn width_ratio(viewport_width: f64, visible_map_width: f64) -> f64 {
        let valid = viewport_width.is_finite()
            && visible_map_width.is_finite()
            && viewport_width > 0.0
            && visible_map_width > 0.0;
        if valid {
            viewport_width / visible_map_width
        } else {
            log::warn!(
                "unusable layout widths ({}, {}); zoom baseline defaults to 1",
                viewport_width,
                visible_map_width
            );
            1.0
        }
    }
}

impl Default for ZoomLevelController {
    fn default() -> Self {
        Self::new(ZoomTierConfig::default())
    }
}
