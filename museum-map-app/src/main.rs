use anyhow::Context;
use fxhash::FxHashMap;
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
    images::ImageLoader,
    runtime::default_spawner,
    surface::SurfaceCommand,
    BuildingConfig, MapCoordinator, RecordingSurface,
};
use std::sync::Arc;

/// Viewport the simulated device reports
const VIEWPORT_WIDTH: f64 = 1170.0;
const VISIBLE_MAP_WIDTH: f64 = 1300.0;
const CAMERA_STEPS: u32 = 8;

const DEMO_FLOOR_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2000 1400">
  <g id="Amenities">
    <circle id="Elevator" cx="100" cy="200" r="8"/>
    <circle id="Restroom" cx="400" cy="300" r="8"/>
    <circle id="Dining" cx="900" cy="1100" r="8"/>
    <circle id="Gift_Shop" cx="1500" cy="300" r="8"/>
  </g>
  <g id="Departments"><text x="600" y="500">Modern Art</text></g>
  <g id="Galleries"><text x="700" y="650">Gallery 101</text></g>
  <g id="Landmarks"><text x="1000" y="700">Grand Staircase</text></g>
</svg>"##;

/// Headless museum map host
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalog = demo_catalog();
    let surface = RecordingSurface::new();
    let map = match std::env::args().nth(1) {
        Some(path) => {
            let config = BuildingConfig::load(&path)
                .with_context(|| format!("loading building description {}", path))?;
            MapCoordinator::from_building(&config, &catalog, surface)?
        }
        None => {
            log::info!("no building description given; using the built-in demo building");
            MapCoordinator::new(demo_floors(&catalog)?, surface, MapEngineOptions::default())?
        }
    };

    let loader = ImageLoader::new(
        Arc::new(museum_map::images::HttpImageFetcher),
        default_spawner(),
        &map.options().images,
    );
    let mut map = map.with_image_loader(loader);

    run_visit(&mut map, &catalog).await;
    Ok(())
}

/// Walks through the modes a visitor typically hits in one session
async fn run_visit(map: &mut MapCoordinator<RecordingSurface>, catalog: &InMemoryCatalog) {
    map.on_layout();

    map.show_all_information();
    settle_camera(map).await;
    report(map, "overview");

    let tour = demo_tour(catalog);
    map.show_tour(&tour, &Language::new("en"), None);
    settle_camera(map).await;
    report(map, "tour");

    if let Some(first) = tour.ordered_stops().first() {
        map.audio_playback_did_start(&first.audio);
        settle_camera(map).await;
        if let Some(next) = map.audio_playback_did_finish(&first.audio) {
            log::info!("next stop: {} ({})", next.order, next.artwork.title);
        }
        report(map, "audio");
    }

    map.show_dining();
    settle_camera(map).await;
    report(map, "dining");

    if let Some(artwork) = catalog.artwork("nighthawks") {
        map.show_searched_artwork(artwork);
        settle_camera(map).await;
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
        let images = map.pump_images();
        log::info!("{} thumbnails arrived", images);
        report(map, "search");
    }

    map.disable();
    report(map, "disabled");
}

/// Plays the last camera command to its end, feeding every frame back as a
/// camera change the way a platform view would.
async fn settle_camera(map: &mut MapCoordinator<RecordingSurface>) {
    let Some((ticket, command)) = map.surface().camera().copied() else {
        return;
    };
    // assume the previous command finished where it was aimed
    let start = map
        .surface()
        .commands()
        .iter()
        .rev()
        .filter_map(|c| match c {
            SurfaceCommand::SetCamera(t, c) if *t != ticket => Some((c.center, c.altitude)),
            _ => None,
        })
        .next()
        .unwrap_or((command.center, command.altitude));

    let frame_ms = command
        .animation
        .map(|a| a.duration_ms / u64::from(CAMERA_STEPS))
        .unwrap_or(0);
    for step in 1..=CAMERA_STEPS {
        let t = f64::from(step) / f64::from(CAMERA_STEPS);
        let (_, altitude) = command.sample_from(start.0, start.1, t);
        map.on_camera_changed(altitude, VIEWPORT_WIDTH, VISIBLE_MAP_WIDTH);
        if frame_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(frame_ms)).await;
        }
    }
    map.camera_did_finish(ticket);
}

fn report(map: &mut MapCoordinator<RecordingSurface>, step: &str) {
    let commands = map.surface_mut().take_commands();
    let mut counts: FxHashMap<&'static str, usize> = FxHashMap::default();
    for command in &commands {
        let kind = match command {
            SurfaceCommand::SetCamera(..) => "camera",
            SurfaceCommand::AddOverlay(_) => "add-overlay",
            SurfaceCommand::RemoveOverlay(_) => "remove-overlay",
            SurfaceCommand::Upsert(_) => "upsert",
            SurfaceCommand::Remove(_) => "remove",
        };
        *counts.entry(kind).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort();
    log::info!(
        "[{}] mode {:?}, floor {}, zoom {:?}, {} visible of {} drawn, commands {:?}",
        step,
        map.current_mode(),
        map.current_floor(),
        map.zoom_tier(),
        map.surface().visible_annotations().len(),
        map.surface().annotations().len(),
        counts
    );
    for render in map.surface().visible_annotations() {
        log::debug!(
            "  {} {:?} alpha {} badge {:?}",
            render.id,
            render.layout,
            render.alpha,
            render.badge
        );
    }
}

fn demo_converter() -> anyhow::Result<CoordinateConverter> {
    let anchors = CalibrationAnchorPair::new(
        CalibrationAnchor::new(Point::new(120.0, 80.0), LatLng::new(41.88048, -87.62466)),
        CalibrationAnchor::new(Point::new(1880.0, 1310.0), LatLng::new(41.87869, -87.62213)),
    );
    Ok(CoordinateConverter::new(anchors, AuthoringAxis::YDown)?)
}

fn demo_floors(catalog: &InMemoryCatalog) -> anyhow::Result<FloorSet> {
    let converter = demo_converter()?;
    let page = Bounds::from_coords(0.0, 0.0, 2000.0, 1400.0);
    let mut floors = Vec::new();
    for index in 0..2 {
        let records = FloorplanSource::parse(DEMO_FLOOR_SVG, index)?;
        let overlay =
            FloorOverlay::new(index, format!("floor{}.png", index), page.clone(), &converter)?;
        floors.push(Floor::new(index, overlay, &records, &converter, catalog));
    }
    Ok(FloorSet::from_parts(converter, floors)?)
}

fn demo_catalog() -> InMemoryCatalog {
    let located = |floor: usize, x: f64, y: f64| {
        demo_converter()
            .ok()
            .map(|c| CoordinateWithFloor::new(c.to_geographic(&Point::new(x, y)), floor))
    };
    let artwork = |nid: &str, title: &str, floor: usize, x: f64, y: f64, selector: u32| Artwork {
        nid: nid.to_string(),
        title: title.to_string(),
        thumbnail_url: Some(format!("https://images.example.org/{}.jpg", nid)),
        gallery: Some("Gallery 101".to_string()),
        location: located(floor, x, y),
        audio_selectors: vec![selector],
    };
    let audio = |nid: &str| AudioFile {
        nid: format!("audio-{}", nid),
        title: nid.to_string(),
        url: format!("https://audio.example.org/{}.mp3", nid),
    };

    InMemoryCatalog::new()
        .with_artwork(artwork("nighthawks", "Nighthawks", 0, 720.0, 640.0, 101))
        .with_artwork(artwork("grande-jatte", "A Sunday on La Grande Jatte", 0, 820.0, 560.0, 102))
        .with_artwork(artwork("american-gothic", "American Gothic", 1, 1240.0, 900.0, 103))
        .with_audio(101, audio("nighthawks"))
        .with_audio(102, audio("grande-jatte"))
        .with_audio(103, audio("american-gothic"))
}

fn demo_tour(catalog: &InMemoryCatalog) -> Tour {
    let stops = catalog
        .artworks()
        .iter()
        .enumerate()
        .filter_map(|(i, artwork)| {
            let audio = museum_map::ArtworkCatalog::audio_file(catalog, artwork, None)?;
            Some(TourStopEntry {
                order: i as u32 + 1,
                artwork: artwork.clone(),
                audio,
            })
        })
        .collect();
    Tour {
        nid: "essentials".to_string(),
        title: "Essentials".to_string(),
        description: "Three paintings everyone asks about".to_string(),
        stops,
    }
}
