use crate::{
    catalog::Artwork,
    core::{converter::CoordinateConverter, geo::LatLng},
    floorplan::{AmenityType, LandmarkKind, LandmarkRecord},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a map annotation.
///
/// Artwork-backed annotations are keyed by catalog id; the same artwork can
/// appear both as a floor object and as a tour stop, so those are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationId {
    Amenity {
        amenity: AmenityType,
        floor: usize,
        ordinal: usize,
    },
    Department { text: String, floor: usize },
    Space { text: String, floor: usize },
    Landmark { text: String, floor: usize },
    Gallery { text: String, floor: usize },
    Object(String),
    TourStop(String),
    LiveLocation(String),
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationId::Amenity {
                amenity,
                floor,
                ordinal,
            } => write!(f, "amenity:{}:{}:{}", amenity, floor, ordinal),
            AnnotationId::Department { text, floor } => write!(f, "department:{}:{}", floor, text),
            AnnotationId::Space { text, floor } => write!(f, "space:{}:{}", floor, text),
            AnnotationId::Landmark { text, floor } => write!(f, "landmark:{}:{}", floor, text),
            AnnotationId::Gallery { text, floor } => write!(f, "gallery:{}:{}", floor, text),
            AnnotationId::Object(nid) => write!(f, "object:{}", nid),
            AnnotationId::TourStop(nid) => write!(f, "tour-stop:{}", nid),
            AnnotationId::LiveLocation(key) => write!(f, "live:{}", key),
        }
    }
}

/// Runtime data for an artwork pinned on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkAnnotation {
    pub object_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub gallery: Option<String>,
    /// Whether the info card exposes a play button
    pub has_audio: bool,
}

impl ArtworkAnnotation {
    pub fn from_artwork(artwork: &Artwork, has_audio: bool) -> Self {
        Self {
            object_id: artwork.nid.clone(),
            title: artwork.title.clone(),
            thumbnail_url: artwork.thumbnail_url.clone(),
            gallery: artwork.gallery.clone(),
            has_audio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourStopAnnotation {
    pub artwork: ArtworkAnnotation,
    /// 1-based position in the active tour
    pub order: u32,
    pub is_currently_playing: bool,
}

/// What a live-location pin was raised for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiveLocationSource {
    Artwork,
    SearchedArtwork,
    Exhibition,
    NewsItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveLocationAnnotation {
    pub key: String,
    pub source: LiveLocationSource,
    pub title: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Backing artwork, for artwork pins
    pub artwork_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationKind {
    Amenity(AmenityType),
    Department(String),
    Space(String),
    Landmark(String),
    Gallery(String),
    Artwork(ArtworkAnnotation),
    TourStop(TourStopAnnotation),
    LiveLocation(LiveLocationAnnotation),
}

/// A geo-located item on one floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub floor: usize,
    /// `None` when the backing record has no geometry
    pub coordinate: Option<LatLng>,
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Geo-locates a parsed floorplan record
    pub fn from_record(
        record: &LandmarkRecord,
        ordinal: usize,
        converter: &CoordinateConverter,
    ) -> Self {
        let floor = record.floor;
        let (id, kind) = match &record.kind {
            LandmarkKind::Amenity(amenity) => (
                AnnotationId::Amenity {
                    amenity: *amenity,
                    floor,
                    ordinal,
                },
                AnnotationKind::Amenity(*amenity),
            ),
            LandmarkKind::Department(text) => (
                AnnotationId::Department { text: text.clone(), floor },
                AnnotationKind::Department(text.clone()),
            ),
            LandmarkKind::Space(text) => (
                AnnotationId::Space { text: text.clone(), floor },
                AnnotationKind::Space(text.clone()),
            ),
            LandmarkKind::Landmark(text) => (
                AnnotationId::Landmark { text: text.clone(), floor },
                AnnotationKind::Landmark(text.clone()),
            ),
            LandmarkKind::Gallery(text) => (
                AnnotationId::Gallery { text: text.clone(), floor },
                AnnotationKind::Gallery(text.clone()),
            ),
        };

        Self {
            id,
            floor,
            coordinate: Some(converter.to_geographic(&record.position)),
            kind,
        }
    }

    pub fn artwork(artwork: &Artwork, floor: usize, has_audio: bool) -> Self {
        Self {
            id: AnnotationId::Object(artwork.nid.clone()),
            floor,
            coordinate: artwork.location.map(|l| l.coordinate),
            kind: AnnotationKind::Artwork(ArtworkAnnotation::from_artwork(artwork, has_audio)),
        }
    }

    /// A tour stop showing `number`, its 1-based position in the tour
    pub fn tour_stop(artwork: &Artwork, floor: usize, number: u32) -> Self {
        Self {
            id: AnnotationId::TourStop(artwork.nid.clone()),
            floor,
            coordinate: artwork.location.map(|l| l.coordinate),
            kind: AnnotationKind::TourStop(TourStopAnnotation {
                // tour stops always carry their tour audio
                artwork: ArtworkAnnotation::from_artwork(artwork, true),
                order: number,
                is_currently_playing: false,
            }),
        }
    }

    pub fn live_location(live: LiveLocationAnnotation, coordinate: LatLng, floor: usize) -> Self {
        Self {
            id: AnnotationId::LiveLocation(live.key.clone()),
            floor,
            coordinate: Some(coordinate),
            kind: AnnotationKind::LiveLocation(live),
        }
    }

    /// Catalog id of the artwork behind this annotation, if any
    pub fn artwork_id(&self) -> Option<&str> {
        match &self.kind {
            AnnotationKind::Artwork(artwork) => Some(&artwork.object_id),
            AnnotationKind::TourStop(stop) => Some(&stop.artwork.object_id),
            AnnotationKind::LiveLocation(live) => live.artwork_id.as_deref(),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            AnnotationKind::Amenity(_) => None,
            AnnotationKind::Department(text)
            | AnnotationKind::Space(text)
            | AnnotationKind::Landmark(text)
            | AnnotationKind::Gallery(text) => Some(text),
            AnnotationKind::Artwork(artwork) => Some(&artwork.title),
            AnnotationKind::TourStop(stop) => Some(&stop.artwork.title),
            AnnotationKind::LiveLocation(live) => live.title.as_deref(),
        }
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        match &self.kind {
            AnnotationKind::Artwork(artwork) => artwork.thumbnail_url.as_deref(),
            AnnotationKind::TourStop(stop) => stop.artwork.thumbnail_url.as_deref(),
            AnnotationKind::LiveLocation(live) => live.thumbnail_url.as_deref(),
            _ => None,
        }
    }

    pub fn amenity(&self) -> Option<AmenityType> {
        match self.kind {
            AnnotationKind::Amenity(amenity) => Some(amenity),
            _ => None,
        }
    }

    /// Artwork-like annotations cycle through display modes; the rest are
    /// fixed icons and labels.
    pub fn is_artwork_like(&self) -> bool {
        matches!(
            self.kind,
            AnnotationKind::Artwork(_)
                | AnnotationKind::TourStop(_)
                | AnnotationKind::LiveLocation(_)
        )
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            AnnotationKind::TourStop(_) | AnnotationKind::LiveLocation(_)
        )
    }

    /// Tour-stop payload, for tour-stop annotations only
    pub fn as_tour_stop(&self) -> Option<&TourStopAnnotation> {
        match &self.kind {
            AnnotationKind::TourStop(stop) => Some(stop),
            _ => None,
        }
    }
}
