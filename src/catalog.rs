//! Read-only collaborators the map consumes: the artwork catalog, tours,
//! exhibitions and news items.
//!
//! The engine never reaches for shared app data; whoever builds a
//! [`crate::floor::Floor`] or [`crate::coordinator::MapCoordinator`] hands in
//! an [`ArtworkCatalog`].

use crate::core::geo::CoordinateWithFloor;
use crate::prelude::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An artwork record from the collection catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    /// Stable catalog id
    pub nid: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub gallery: Option<String>,
    /// Physical location; `None` when the catalog has no geometry for it
    #[serde(default)]
    pub location: Option<CoordinateWithFloor>,
    /// Audio selector numbers visitors can key in for this object
    #[serde(default)]
    pub audio_selectors: Vec<u32>,
}

impl Artwork {
    pub fn floor(&self) -> Option<usize> {
        self.location.map(|l| l.floor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioFile {
    pub nid: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language(pub String);

impl Language {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourStopEntry {
    /// Sort key within the tour. Need not start at 1 or be contiguous;
    /// badges come from [`Tour::numbered_stops`].
    pub order: u32,
    pub artwork: Artwork,
    pub audio: AudioFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub nid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub stops: Vec<TourStopEntry>,
}

impl Tour {
    /// Stops sorted by their tour order
    pub fn ordered_stops(&self) -> Vec<&TourStopEntry> {
        let mut stops: Vec<_> = self.stops.iter().collect();
        stops.sort_by_key(|s| s.order);
        stops
    }

    /// Stops in tour order paired with their 1-based position. An artwork
    /// listed more than once keeps only its first stop.
    pub fn numbered_stops(&self) -> Vec<(u32, &TourStopEntry)> {
        let mut seen = HashSet::default();
        self.ordered_stops()
            .into_iter()
            .filter(|s| seen.insert(s.artwork.nid.clone()))
            .zip(1..)
            .map(|(stop, number)| (number, stop))
            .collect()
    }

    /// 1-based position of the artwork's stop, as numbered by
    /// [`Self::numbered_stops`]
    pub fn stop_number(&self, artwork_id: &str) -> Option<u32> {
        self.numbered_stops()
            .into_iter()
            .find(|(_, s)| s.artwork.nid == artwork_id)
            .map(|(number, _)| number)
    }

    pub fn stop_for_audio(&self, audio: &AudioFile) -> Option<&TourStopEntry> {
        self.stops.iter().find(|s| s.audio.nid == audio.nid)
    }

    pub fn stop_after(&self, order: u32) -> Option<&TourStopEntry> {
        self.stops
            .iter()
            .filter(|s| s.order > order)
            .min_by_key(|s| s.order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibition {
    pub nid: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<CoordinateWithFloor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub nid: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<CoordinateWithFloor>,
}

/// Artwork catalog collaborator
pub trait ArtworkCatalog: Send + Sync {
    /// Every artwork physically on a floor
    fn objects_for_floor(&self, floor: usize) -> Vec<Artwork>;

    /// Audio for an object, optionally for a specific selector number
    fn audio_file(&self, artwork: &Artwork, selector_number: Option<u32>) -> Option<AudioFile>;
}

/// Catalog held entirely in memory, for hosts that preload their content
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    artworks: Vec<Artwork>,
    /// Audio keyed by selector number
    audio: HashMap<u32, AudioFile>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_artwork(mut self, artwork: Artwork) -> Self {
        self.artworks.push(artwork);
        self
    }

    pub fn with_audio(mut self, selector: u32, audio: AudioFile) -> Self {
        self.audio.insert(selector, audio);
        self
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn artwork(&self, nid: &str) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.nid == nid)
    }
}

impl ArtworkCatalog for InMemoryCatalog {
    fn objects_for_floor(&self, floor: usize) -> Vec<Artwork> {
        self.artworks
            .iter()
            .filter(|a| a.floor() == Some(floor))
            .cloned()
            .collect()
    }

    fn audio_file(&self, artwork: &Artwork, selector_number: Option<u32>) -> Option<AudioFile> {
        match selector_number {
            Some(selector) if artwork.audio_selectors.contains(&selector) => {
                self.audio.get(&selector).cloned()
            }
            Some(_) => None,
            None => artwork
                .audio_selectors
                .iter()
                .find_map(|s| self.audio.get(s).cloned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn artwork(nid: &str, floor: Option<usize>, selectors: Vec<u32>) -> Artwork {
        Artwork {
            nid: nid.to_string(),
            title: format!("Artwork {}", nid),
            thumbnail_url: None,
            gallery: None,
            location: floor.map(|f| CoordinateWithFloor::new(LatLng::new(41.88, -87.62), f)),
            audio_selectors: selectors,
        }
    }

    fn audio(nid: &str) -> AudioFile {
        AudioFile {
            nid: nid.to_string(),
            title: nid.to_string(),
            url: format!("https://example.org/{}.mp3", nid),
        }
    }

    #[test]
    fn test_objects_for_floor() {
        let catalog = InMemoryCatalog::new()
            .with_artwork(artwork("a", Some(0), vec![]))
            .with_artwork(artwork("b", Some(1), vec![]))
            .with_artwork(artwork("c", None, vec![]));

        let floor0: Vec<_> = catalog.objects_for_floor(0).into_iter().map(|a| a.nid).collect();
        assert_eq!(floor0, vec!["a"]);
        assert!(catalog.objects_for_floor(2).is_empty());
    }

    #[test]
    fn test_audio_lookup_by_selector() {
        let catalog = InMemoryCatalog::new()
            .with_audio(101, audio("intro"))
            .with_audio(102, audio("detail"));
        let art = artwork("a", Some(0), vec![101, 102]);

        assert_eq!(catalog.audio_file(&art, None).unwrap().nid, "intro");
        assert_eq!(catalog.audio_file(&art, Some(102)).unwrap().nid, "detail");
        assert!(catalog.audio_file(&art, Some(999)).is_none());
    }

    fn stop(order: u32, nid: &str, floor: usize) -> TourStopEntry {
        TourStopEntry {
            order,
            artwork: artwork(nid, Some(floor), vec![]),
            audio: audio(nid),
        }
    }

    #[test]
    fn test_tour_ordering_helpers() {
        let tour = Tour {
            nid: "t".to_string(),
            title: "Highlights".to_string(),
            description: String::new(),
            stops: vec![stop(2, "b", 0), stop(1, "a", 0), stop(3, "c", 1)],
        };
        let orders: Vec<_> = tour.ordered_stops().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(tour.stop_after(1).unwrap().artwork.nid, "b");
        assert!(tour.stop_after(3).is_none());
        assert_eq!(tour.stop_for_audio(&audio("c")).unwrap().order, 3);
    }

    #[test]
    fn test_numbered_stops_use_positions() {
        let tour = Tour {
            nid: "t".to_string(),
            title: "Sparse".to_string(),
            description: String::new(),
            stops: vec![
                stop(30, "c", 1),
                stop(0, "a", 0),
                stop(10, "b", 0),
                stop(20, "a", 0),
            ],
        };
        let numbered: Vec<_> = tour
            .numbered_stops()
            .into_iter()
            .map(|(number, s)| (number, s.artwork.nid.as_str()))
            .collect();
        assert_eq!(numbered, vec![(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(tour.stop_number("c"), Some(3));
        assert!(tour.stop_number("zzz").is_none());
    }
}
