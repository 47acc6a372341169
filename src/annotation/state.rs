//! Pure mapping from an annotation and its context to what it should look
//! like. Nothing in here touches a view or a surface.

use super::model::{Annotation, AnnotationId, AnnotationKind};
use crate::{coordinator::MapMode, core::config::VisibilityConfig, zoom::ZoomTier};
use serde::{Deserialize, Serialize};

/// How an artwork-like annotation presents itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Small dot; selecting expands to a full info card
    Dot,
    /// Circular thumbnail that grows when selected
    Image,
    /// Thumbnail plus a compact info card when selected
    SmallImageInfo,
    /// Large thumbnail plus an info card when selected
    ImageInfo,
}

/// Resolved presentation of one annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    pub mode: DisplayMode,
    pub selected: bool,
    pub in_tour: bool,
    /// 1-based stop number shown as an overlay, only when `in_tour`
    pub tour_stop_number: Option<u32>,
}

/// Inputs the state machine depends on besides the annotation itself
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub map_mode: MapMode,
    /// Mode the active map mode assigns to this annotation
    pub display_mode: DisplayMode,
    pub selection: Option<&'a AnnotationId>,
    pub zoom_tier: ZoomTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailSize {
    Small,
    Large,
}

/// Concrete view layout derived from a visual state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Dot,
    Thumbnail(ThumbnailSize),
    /// Title card; `thumbnail` is the marker kept beside it, if any
    InfoCard { thumbnail: Option<ThumbnailSize> },
    Icon,
    Label,
}

impl Layout {
    /// Layouts that draw the annotation's image
    pub fn shows_image(&self) -> bool {
        matches!(self, Layout::Thumbnail(_) | Layout::InfoCard { .. })
    }

    pub fn is_card(&self) -> bool {
        matches!(self, Layout::InfoCard { .. })
    }
}

/// Resolves the visual state for an annotation.
///
/// Returns `None` when the annotation should not be drawn at all: the map is
/// disabled, or the backing record lacks geometry.
pub fn resolve_visual_state(annotation: &Annotation, ctx: &ViewContext<'_>) -> Option<VisualState> {
    if ctx.map_mode == MapMode::Disabled {
        return None;
    }

    let Some(coordinate) = annotation.coordinate else {
        log::warn!("{} has no location; not drawing it", annotation.id);
        return None;
    };
    if !coordinate.is_valid() {
        log::warn!("{} has invalid location {:?}", annotation.id, coordinate);
        return None;
    }

    let selected = ctx.selection == Some(&annotation.id);
    let (in_tour, tour_stop_number) = match &annotation.kind {
        AnnotationKind::TourStop(stop) => (true, Some(stop.order)),
        _ => (false, None),
    };

    // Fully zoomed out, unselected thumbnails collapse to dots
    let mode = if ctx.zoom_tier == ZoomTier::ZoomedMax && !selected {
        DisplayMode::Dot
    } else {
        ctx.display_mode
    };

    Some(VisualState {
        mode,
        selected,
        in_tour,
        tour_stop_number,
    })
}

/// Layout for a resolved state
pub fn layout_for(annotation: &Annotation, state: &VisualState) -> Layout {
    match annotation.kind {
        AnnotationKind::Amenity(_) => return Layout::Icon,
        AnnotationKind::Department(_)
        | AnnotationKind::Space(_)
        | AnnotationKind::Landmark(_)
        | AnnotationKind::Gallery(_) => return Layout::Label,
        _ => {}
    }

    match (state.mode, state.selected) {
        (DisplayMode::Dot, false) => Layout::Dot,
        (DisplayMode::Dot, true) => Layout::InfoCard { thumbnail: None },
        (DisplayMode::Image, false) => Layout::Thumbnail(ThumbnailSize::Small),
        (DisplayMode::Image, true) => Layout::Thumbnail(ThumbnailSize::Large),
        (DisplayMode::SmallImageInfo, false) => Layout::Thumbnail(ThumbnailSize::Small),
        (DisplayMode::SmallImageInfo, true) => Layout::InfoCard {
            thumbnail: Some(ThumbnailSize::Small),
        },
        (DisplayMode::ImageInfo, false) => Layout::Thumbnail(ThumbnailSize::Large),
        (DisplayMode::ImageInfo, true) => Layout::InfoCard {
            thumbnail: Some(ThumbnailSize::Large),
        },
    }
}

/// Text-density rank: higher ranks survive further zooming out
pub fn density_rank(annotation: &Annotation) -> u8 {
    match annotation.kind {
        AnnotationKind::Artwork(_)
        | AnnotationKind::TourStop(_)
        | AnnotationKind::LiveLocation(_) => 0,
        AnnotationKind::Gallery(_) => 1,
        AnnotationKind::Space(_) | AnnotationKind::Amenity(_) => 2,
        AnnotationKind::Department(_) | AnnotationKind::Landmark(_) => 3,
    }
}

/// Alpha the zoom tier allows for an annotation in `state`
pub fn visibility_alpha(
    annotation: &Annotation,
    state: &VisualState,
    tier: ZoomTier,
    config: &VisibilityConfig,
) -> f32 {
    if state.selected || state.in_tour {
        return 1.0;
    }
    if matches!(annotation.kind, AnnotationKind::LiveLocation(_)) {
        return 1.0;
    }
    if annotation.is_artwork_like() && state.mode != DisplayMode::Dot {
        return 1.0;
    }

    let min_rank = match tier {
        ZoomTier::ZoomedIn => config.zoomed_in_min_rank,
        ZoomTier::Mid => config.mid_min_rank,
        ZoomTier::ZoomedOut => config.zoomed_out_min_rank,
        ZoomTier::ZoomedMax => config.zoomed_max_min_rank,
    };
    if density_rank(annotation) >= min_rank {
        1.0
    } else {
        0.0
    }
}
