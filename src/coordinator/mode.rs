use crate::{
    annotation::{Annotation, AnnotationKind, DisplayMode, LiveLocationSource},
    floorplan::AmenityType,
};
use serde::{Deserialize, Serialize};

/// What the map is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMode {
    Disabled,
    AllInformation,
    SingleLocation,
    Tour,
}

/// Amenity group an all-information view can be narrowed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityFocus {
    Dining,
    GiftShop,
    Restrooms,
    MembersLounge,
}

impl AmenityFocus {
    pub fn matches(self, amenity: AmenityType) -> bool {
        match self {
            AmenityFocus::Dining => amenity == AmenityType::Dining,
            AmenityFocus::GiftShop => amenity == AmenityType::GiftShop,
            AmenityFocus::Restrooms => amenity.is_restroom(),
            AmenityFocus::MembersLounge => amenity == AmenityType::MembersLounge,
        }
    }
}

/// Display mode `mode` assigns to `annotation`, or `None` when the
/// annotation is not part of that mode's picture.
pub(crate) fn display_mode_for(
    mode: MapMode,
    focus: Option<AmenityFocus>,
    annotation: &Annotation,
) -> Option<DisplayMode> {
    match (mode, &annotation.kind) {
        (MapMode::Disabled, _) => None,

        (_, AnnotationKind::Amenity(amenity)) => match focus {
            Some(focus) if !focus.matches(*amenity) => None,
            _ => Some(DisplayMode::Dot),
        },
        (
            _,
            AnnotationKind::Department(_)
            | AnnotationKind::Space(_)
            | AnnotationKind::Landmark(_)
            | AnnotationKind::Gallery(_),
        ) => Some(DisplayMode::Dot),

        // plain objects only in the unfocused overview
        (MapMode::AllInformation, AnnotationKind::Artwork(_)) if focus.is_none() => {
            Some(DisplayMode::Dot)
        }
        (_, AnnotationKind::Artwork(_)) => None,

        (MapMode::Tour, AnnotationKind::TourStop(_)) => Some(DisplayMode::Image),
        (_, AnnotationKind::TourStop(_)) => None,

        (MapMode::SingleLocation, AnnotationKind::LiveLocation(live)) => Some(match live.source {
            LiveLocationSource::SearchedArtwork => DisplayMode::SmallImageInfo,
            LiveLocationSource::Artwork
            | LiveLocationSource::Exhibition
            | LiveLocationSource::NewsItem => DisplayMode::ImageInfo,
        }),
        (_, AnnotationKind::LiveLocation(_)) => None,
    }
}
