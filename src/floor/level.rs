use super::overlay::FloorOverlay;
use crate::{
    annotation::{Annotation, AnnotationId, AnnotationKind, LiveLocationAnnotation},
    catalog::{ArtworkCatalog, TourStopEntry},
    core::{converter::CoordinateConverter, geo::LatLng},
    floorplan::{AmenityType, FloorplanRecords},
    prelude::HashSet,
};

/// Which annotations a transient change added and removed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransientDelta {
    pub added: Vec<AnnotationId>,
    pub removed: Vec<AnnotationId>,
}

impl TransientDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn merge(&mut self, other: TransientDelta) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
    }
}

/// One building level: its overlay, its static annotations and whatever
/// transient markers the current map mode put on it.
#[derive(Debug, Clone)]
pub struct Floor {
    index: usize,
    overlay: FloorOverlay,
    amenities: Vec<Annotation>,
    departments: Vec<Annotation>,
    spaces: Vec<Annotation>,
    landmarks: Vec<Annotation>,
    galleries: Vec<Annotation>,
    objects: Vec<Annotation>,
    tour_stops: Vec<Annotation>,
    live_locations: Vec<Annotation>,
}

impl Floor {
    /// Geo-locates the floorplan records and pulls this floor's artworks from
    /// the catalog.
    pub fn new(
        index: usize,
        overlay: FloorOverlay,
        records: &FloorplanRecords,
        converter: &CoordinateConverter,
        catalog: &dyn ArtworkCatalog,
    ) -> Self {
        let locate = |records: &[crate::floorplan::LandmarkRecord]| -> Vec<Annotation> {
            records
                .iter()
                .enumerate()
                .map(|(ordinal, record)| Annotation::from_record(record, ordinal, converter))
                .collect()
        };

        let mut seen = HashSet::default();
        let mut objects = Vec::new();
        for artwork in catalog.objects_for_floor(index) {
            if let Some(floor) = artwork.floor() {
                if floor != index {
                    log::warn!(
                        "catalog listed artwork {} for floor {} but it is on floor {}",
                        artwork.nid,
                        index,
                        floor
                    );
                    continue;
                }
            }
            if !seen.insert(artwork.nid.clone()) {
                log::debug!("duplicate artwork {} on floor {}", artwork.nid, index);
                continue;
            }
            let has_audio = catalog.audio_file(&artwork, None).is_some();
            objects.push(Annotation::artwork(&artwork, index, has_audio));
        }

        let floor = Self {
            index,
            overlay,
            amenities: locate(&records.amenities),
            departments: locate(&records.departments),
            spaces: locate(&records.spaces),
            landmarks: locate(&records.landmarks),
            galleries: locate(&records.galleries),
            objects,
            tour_stops: Vec::new(),
            live_locations: Vec::new(),
        };
        log::info!(
            "floor {}: {} amenities, {} labels, {} objects",
            index,
            floor.amenities.len(),
            floor.departments.len()
                + floor.spaces.len()
                + floor.landmarks.len()
                + floor.galleries.len(),
            floor.objects.len()
        );
        floor
    }

    /// Zero-based floor number
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raster floorplan pinned to its geographic corners
    pub fn overlay(&self) -> &FloorOverlay {
        &self.overlay
    }

    /// Replaces this floor's tour stops with the numbered entries located
    /// on it. `stops` pairs each entry with its 1-based position in the
    /// whole tour, as [`crate::catalog::Tour::numbered_stops`] returns them.
    ///
    /// Entries on other floors are skipped; entries with no location are
    /// logged and skipped.
    pub fn activate_tour_stops(&mut self, stops: &[(u32, &TourStopEntry)]) -> TransientDelta {
        let removed = self.tour_stops.drain(..).map(|a| a.id).collect();

        let mut seen = HashSet::default();
        for &(number, stop) in stops {
            match stop.artwork.location {
                Some(location) if location.floor == self.index => {
                    if seen.insert(stop.artwork.nid.clone()) {
                        self.tour_stops
                            .push(Annotation::tour_stop(&stop.artwork, self.index, number));
                    }
                }
                Some(_) => {}
                None => log::warn!("tour stop {} ({}) has no location", number, stop.artwork.nid),
            }
        }

        TransientDelta {
            added: self.tour_stops.iter().map(|a| a.id.clone()).collect(),
            removed,
        }
    }

    /// Adds one live-location marker, replacing any with the same key
    pub fn activate_live_location(
        &mut self,
        live: LiveLocationAnnotation,
        coordinate: LatLng,
    ) -> TransientDelta {
        let annotation = Annotation::live_location(live, coordinate, self.index);
        let mut delta = TransientDelta::default();
        if let Some(pos) = self.live_locations.iter().position(|a| a.id == annotation.id) {
            delta.removed.push(self.live_locations.remove(pos).id);
        }
        delta.added.push(annotation.id.clone());
        self.live_locations.push(annotation);
        delta
    }

    /// Drops every tour stop and live location
    pub fn clear_transient(&mut self) -> TransientDelta {
        TransientDelta {
            added: Vec::new(),
            removed: self
                .tour_stops
                .drain(..)
                .chain(self.live_locations.drain(..))
                .map(|a| a.id)
                .collect(),
        }
    }

    /// True while any tour stop or live location is on this floor
    pub fn has_transient(&self) -> bool {
        !self.tour_stops.is_empty() || !self.live_locations.is_empty()
    }

    /// Annotation backed by an artwork; tour stops win over plain objects
    pub fn find_annotation(&self, artwork_id: &str) -> Option<&Annotation> {
        self.tour_stops
            .iter()
            .chain(self.objects.iter())
            .find(|a| a.artwork_id() == Some(artwork_id))
    }

    /// Any annotation on this floor, static or transient, by id
    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations().find(|a| &a.id == id)
    }

    /// Every annotation on the floor, static layers first
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.amenities
            .iter()
            .chain(self.departments.iter())
            .chain(self.spaces.iter())
            .chain(self.landmarks.iter())
            .chain(self.galleries.iter())
            .chain(self.objects.iter())
            .chain(self.tour_stops.iter())
            .chain(self.live_locations.iter())
    }

    /// Amenity icons in parse order
    pub fn amenities(&self) -> &[Annotation] {
        &self.amenities
    }

    /// Amenities whose type passes `filter`
    pub fn amenities_where<'a>(
        &'a self,
        filter: impl Fn(AmenityType) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.amenities
            .iter()
            .filter(move |a| a.amenity().map_or(false, &filter))
    }

    /// Amenities of exactly one type
    pub fn amenities_of(&self, amenity: AmenityType) -> impl Iterator<Item = &Annotation> {
        self.amenities_where(move |a| a == amenity)
    }

    /// Catalog artworks hanging on this floor, one per artwork
    pub fn objects(&self) -> &[Annotation] {
        &self.objects
    }

    /// Tour stops of the active tour located here, in tour order
    pub fn tour_stops(&self) -> &[Annotation] {
        &self.tour_stops
    }

    /// Single-location pins currently on this floor
    pub fn live_locations(&self) -> &[Annotation] {
        &self.live_locations
    }

    /// Marks the tour stop for `artwork_id` as playing and every other as
    /// not. Returns true when anything changed.
    pub fn set_playing(&mut self, artwork_id: Option<&str>) -> bool {
        let mut changed = false;
        for annotation in &mut self.tour_stops {
            if let AnnotationKind::TourStop(stop) = &mut annotation.kind {
                let playing = artwork_id == Some(stop.artwork.object_id.as_str());
                if stop.is_currently_playing != playing {
                    stop.is_currently_playing = playing;
                    changed = true;
                }
            }
        }
        changed
    }
}
