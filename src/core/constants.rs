//! Engine-wide calibration constants.
//! Keeping them in a single place makes it easier to tweak the magic numbers
//! a particular building or device class needs.

/// Anchor baselines shorter than this (authoring units or metres) are degenerate.
pub const DEGENERATE_BASELINE_EPSILON: f64 = 1e-9;

/// Normalized altitude at or below which the map counts as zoomed in.
///
/// Altitudes are normalized as `altitude * (viewport_width / visible_map_width)`
/// using the ratio captured at the last layout pass.
pub const ZOOMED_IN_MAX_ALTITUDE: f64 = 300.0;

/// Normalized altitude at or below which the map counts as mid zoom.
pub const MID_MAX_ALTITUDE: f64 = 650.0;

/// Above this normalized altitude the building is a speck: `ZoomedMax`.
pub const ZOOMED_OUT_MAX_ALTITUDE: f64 = 2000.0;

/// Camera altitude (metres) for the building overview.
pub const DEFAULT_CAMERA_ALTITUDE: f64 = 600.0;

/// Camera altitude when framing a single location pin.
pub const SINGLE_LOCATION_ALTITUDE: f64 = 250.0;

/// Camera altitude when framing a whole tour.
pub const TOUR_OVERVIEW_ALTITUDE: f64 = 450.0;

/// Camera altitude when a single tour stop is highlighted.
pub const HIGHLIGHT_ALTITUDE: f64 = 200.0;

/// Camera altitude when framing a group of amenities.
pub const AMENITY_ALTITUDE: f64 = 350.0;

/// Camera animation length.
pub const CAMERA_ANIMATION_MS: u64 = 500;

/// Thumbnail cache capacity (entries).
pub const IMAGE_CACHE_CAPACITY: usize = 256;

/// Thumbnail fetch attempts before giving up.
pub const IMAGE_FETCH_ATTEMPTS: u32 = 2;

/// Annotation view pool size kept around for reuse.
pub const VIEW_POOL_CAPACITY: usize = 64;
