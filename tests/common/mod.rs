//! Shared fixtures: a two-floor building with a small catalog and a tour
//! that spans both floors.

#![allow(dead_code)]

use async_trait::async_trait;
use museum_map::{
    catalog::{Artwork, AudioFile, InMemoryCatalog, Language, Tour, TourStopEntry},
    core::{
        bounds::Bounds,
        config::MapEngineOptions,
        converter::{AuthoringAxis, CalibrationAnchor, CalibrationAnchorPair, CoordinateConverter},
        geo::{CoordinateWithFloor, LatLng, Point},
    },
    floor::{Floor, FloorOverlay, FloorSet},
    floorplan::FloorplanSource,
    images::ImageFetcher,
    MapCoordinator, RecordingSurface, Result,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

pub const FLOOR_ZERO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2000 1400">
  <g id="Amenities">
    <circle id="Elevator" cx="100" cy="200" r="8"/>
    <circle id="Restroom_1_" cx="400" cy="300" r="8"/>
    <circle id="Cafe" cx="900" cy="1100" r="8"/>
  </g>
  <g id="Departments"><text x="600" y="500">Modern Art</text></g>
  <g id="Galleries"><text x="700" y="650">Gallery 101</text></g>
</svg>"##;

pub const FLOOR_ONE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2000 1400">
  <g id="Amenities">
    <circle id="Gift_Shop" cx="1500" cy="300" r="8"/>
    <circle id="Elevator" cx="100" cy="200" r="8"/>
  </g>
  <g id="Landmarks"><text x="1000" y="700">Grand Staircase</text></g>
</svg>"##;

pub const THUMBNAIL_URL: &str = "https://images.example.org/nighthawks.jpg";

/// Installs a test logger once per binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn converter() -> CoordinateConverter {
    let anchors = CalibrationAnchorPair::new(
        CalibrationAnchor::new(Point::new(120.0, 80.0), LatLng::new(41.88048, -87.62466)),
        CalibrationAnchor::new(Point::new(1880.0, 1310.0), LatLng::new(41.87869, -87.62213)),
    );
    CoordinateConverter::new(anchors, AuthoringAxis::YDown).unwrap()
}

pub fn located(floor: usize, x: f64, y: f64) -> CoordinateWithFloor {
    CoordinateWithFloor::new(converter().to_geographic(&Point::new(x, y)), floor)
}

pub fn artwork(nid: &str, floor: usize, x: f64, y: f64) -> Artwork {
    Artwork {
        nid: nid.to_string(),
        title: format!("Artwork {}", nid),
        thumbnail_url: None,
        gallery: None,
        location: Some(located(floor, x, y)),
        audio_selectors: Vec::new(),
    }
}

pub fn audio(nid: &str) -> AudioFile {
    AudioFile {
        nid: format!("audio-{}", nid),
        title: nid.to_string(),
        url: format!("https://audio.example.org/{}.mp3", nid),
    }
}

/// Artworks `a` and `b` on floor 0, `c` on floor 1, `d` on floor 1 with a
/// thumbnail
pub fn catalog() -> InMemoryCatalog {
    let mut d = artwork("d", 1, 1200.0, 900.0);
    d.thumbnail_url = Some(THUMBNAIL_URL.to_string());
    InMemoryCatalog::new()
        .with_artwork(artwork("a", 0, 300.0, 400.0))
        .with_artwork(artwork("b", 0, 800.0, 600.0))
        .with_artwork(artwork("c", 1, 1500.0, 1000.0))
        .with_artwork(d)
}

pub fn floors(catalog: &InMemoryCatalog) -> FloorSet {
    let converter = converter();
    let page = Bounds::from_coords(0.0, 0.0, 2000.0, 1400.0);
    let floors = [FLOOR_ZERO_SVG, FLOOR_ONE_SVG]
        .iter()
        .enumerate()
        .map(|(index, svg)| {
            let records = FloorplanSource::parse(svg, index).unwrap();
            let overlay =
                FloorOverlay::new(index, format!("floor{}.png", index), page.clone(), &converter)
                    .unwrap();
            Floor::new(index, overlay, &records, &converter, catalog)
        })
        .collect();
    FloorSet::from_parts(converter, floors).unwrap()
}

/// Standard options without camera animation
pub fn options() -> MapEngineOptions {
    let mut options = MapEngineOptions::default();
    options.camera.animate = false;
    options
}

pub fn coordinator() -> MapCoordinator<RecordingSurface> {
    init_logging();
    MapCoordinator::new(floors(&catalog()), RecordingSurface::new(), options()).unwrap()
}

/// Stops `a` (1) and `b` (2) on floor 0, `c` (3) on floor 1
pub fn tour() -> Tour {
    tour_with_orders(&[(1, "a"), (2, "b"), (3, "c")])
}

/// The highlights tour with the given `(order, artwork)` entries, in list order
pub fn tour_with_orders(entries: &[(u32, &str)]) -> Tour {
    let catalog = catalog();
    let stops = entries
        .iter()
        .map(|&(order, nid)| TourStopEntry {
            order,
            artwork: catalog.artwork(nid).cloned().unwrap(),
            audio: audio(nid),
        })
        .collect();
    Tour {
        nid: "highlights".to_string(),
        title: "Highlights".to_string(),
        description: String::new(),
        stops,
    }
}

pub fn english() -> Language {
    Language::new("en")
}

/// Answers every URL with the same bytes and counts the calls
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pub calls: AtomicUsize,
}

impl StaticFetcher {
    pub const BYTES: &'static [u8] = &[0x89, 0x50, 0x4e, 0x47];

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::BYTES.to_vec())
    }
}

pub fn shared_fetcher() -> Arc<StaticFetcher> {
    Arc::new(StaticFetcher::default())
}
