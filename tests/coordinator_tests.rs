mod common;

use common::*;
use museum_map::{
    annotation::{AnnotationId, Layout, ThumbnailSize},
    catalog::{Exhibition, NewsItem},
    core::geo::{LatLng, LatLngBounds},
    surface::SurfaceCommand,
    AmenityType, MapMode, ZoomTier,
};

fn tour_stop(nid: &str) -> AnnotationId {
    AnnotationId::TourStop(nid.to_string())
}

fn object(nid: &str) -> AnnotationId {
    AnnotationId::Object(nid.to_string())
}

fn assert_near(a: &LatLng, b: &LatLng) {
    assert!(
        (a.lat - b.lat).abs() < 1e-9 && (a.lng - b.lng).abs() < 1e-9,
        "{:?} != {:?}",
        a,
        b
    );
}

/// A fresh coordinator draws nothing until a mode is chosen
#[test]
fn test_starts_disabled_and_empty() {
    let map = coordinator();
    assert_eq!(map.current_mode(), MapMode::Disabled);
    assert_eq!(map.current_floor(), 0);
    assert!(map.surface().annotations().is_empty());
    assert!(map.surface().overlays().is_empty());
}

/// Tour stops are numbered by tour order and framed together
#[test]
fn test_tour_numbers_and_framing() {
    let mut map = coordinator();
    let tour = tour();
    map.show_tour(&tour, &english(), None);

    assert_eq!(map.current_mode(), MapMode::Tour);
    assert_eq!(map.current_floor(), 0);
    assert_eq!(map.tour_model().map(|t| t.nid.as_str()), Some("highlights"));
    let per_floor: Vec<usize> = map.floors().iter().map(|f| f.tour_stops().len()).collect();
    assert_eq!(per_floor, vec![2, 1]);

    let surface = map.surface();
    assert_eq!(surface.annotation(&tour_stop("a")).unwrap().badge, Some(1));
    assert_eq!(surface.annotation(&tour_stop("b")).unwrap().badge, Some(2));
    assert!(surface.annotation(&tour_stop("c")).is_none());
    // plain objects are hidden while touring
    assert!(surface.annotation(&object("a")).is_none());

    let stop_coordinates: Vec<LatLng> = tour
        .stops
        .iter()
        .map(|s| s.artwork.location.unwrap().coordinate)
        .collect();
    let expected = LatLngBounds::from_points(stop_coordinates.iter()).unwrap().center();
    let (_, camera) = surface.camera().unwrap();
    assert_near(&camera.center, &expected);
    assert_eq!(camera.altitude, map.options().camera.tour_overview_altitude);
    assert!(camera.animation.is_none());

    assert!(map.set_floor(1));
    let surface = map.surface();
    assert_eq!(surface.annotation(&tour_stop("c")).unwrap().badge, Some(3));
    assert!(surface.annotation(&tour_stop("a")).is_none());
    assert_eq!(surface.overlays(), &[1]);
}

/// Asking for a stop jumps to its floor and highlights it
#[test]
fn test_tour_with_requested_stop() {
    let mut map = coordinator();
    map.show_tour(&tour(), &english(), Some(2));

    assert_eq!(map.current_floor(), 1);
    assert_eq!(map.highlighted_stop(), Some(3));
    assert_eq!(map.selection(), Some(&tour_stop("c")));

    let render = map.surface().annotation(&tour_stop("c")).unwrap();
    assert!(render.state.selected);
    assert_eq!(render.layout, Layout::Thumbnail(ThumbnailSize::Large));

    let (_, camera) = map.surface().camera().unwrap();
    assert_eq!(camera.altitude, map.options().camera.highlight_altitude);
}

/// Badges count positions in the tour, whatever the raw order values are
#[test]
fn test_tour_numbers_ignore_sparse_orders() {
    let mut map = coordinator();
    let tour = tour_with_orders(&[(30, "c"), (10, "a"), (20, "b")]);
    map.show_tour(&tour, &english(), None);

    let surface = map.surface();
    assert_eq!(surface.annotation(&tour_stop("a")).unwrap().badge, Some(1));
    assert_eq!(surface.annotation(&tour_stop("b")).unwrap().badge, Some(2));

    assert!(map.set_floor(1));
    assert_eq!(map.surface().annotation(&tour_stop("c")).unwrap().badge, Some(3));

    // stop_index follows the same numbering
    map.show_tour(&tour, &english(), Some(2));
    assert_eq!(map.highlighted_stop(), Some(3));
    assert_eq!(map.selection(), Some(&tour_stop("c")));
}

/// Zero-based order values still produce badges starting at 1
#[test]
fn test_tour_numbers_from_zero_based_orders() {
    let mut map = coordinator();
    map.show_tour(&tour_with_orders(&[(0, "a"), (1, "b"), (2, "c")]), &english(), None);

    assert_eq!(map.surface().annotation(&tour_stop("a")).unwrap().badge, Some(1));
    assert!(map.select_annotation(&tour_stop("b")));
    assert_eq!(map.highlighted_stop(), Some(2));
    assert_eq!(map.surface().annotation(&tour_stop("b")).unwrap().badge, Some(2));
}

/// An artwork listed twice gets one marker and the numbering stays contiguous
#[test]
fn test_tour_with_duplicate_artwork() {
    let mut map = coordinator();
    let tour = tour_with_orders(&[(1, "a"), (2, "b"), (3, "a"), (4, "c")]);
    map.show_tour(&tour, &english(), None);

    let per_floor: Vec<usize> = map.floors().iter().map(|f| f.tour_stops().len()).collect();
    assert_eq!(per_floor, vec![2, 1]);
    assert_eq!(map.surface().annotation(&tour_stop("a")).unwrap().badge, Some(1));
    assert_eq!(map.surface().annotation(&tour_stop("b")).unwrap().badge, Some(2));

    assert!(map.set_floor(1));
    assert_eq!(map.surface().annotation(&tour_stop("c")).unwrap().badge, Some(3));
}

/// Re-showing the same tour touches nothing
#[test]
fn test_tour_is_idempotent() {
    let mut map = coordinator();
    let tour = tour();
    map.show_tour(&tour, &english(), None);
    map.surface_mut().take_commands();

    map.show_tour(&tour, &english(), None);
    assert!(map.surface().commands().is_empty());
    let per_floor: Vec<usize> = map.floors().iter().map(|f| f.tour_stops().len()).collect();
    assert_eq!(per_floor, vec![2, 1]);

    // another language rebuilds
    map.show_tour(&tour, &museum_map::catalog::Language::new("es"), None);
    assert!(!map.surface().commands().is_empty());
    assert_eq!(map.tour_language().map(|l| l.0.as_str()), Some("es"));
}

/// Leaving a mode removes every marker it put up
#[test]
fn test_mode_switch_clears_transients() {
    let mut map = coordinator();
    let catalog = catalog();
    map.show_tour(&tour(), &english(), None);

    map.show_artwork(catalog.artwork("d").unwrap());
    assert_eq!(map.current_mode(), MapMode::SingleLocation);
    assert_eq!(map.current_floor(), 1);
    assert!(map.tour_model().is_none());
    assert!(map.floors().iter().all(|f| f.tour_stops().is_empty()));

    let pin = AnnotationId::LiveLocation("artwork:d".to_string());
    assert_eq!(map.selection(), Some(&pin));
    let render = map.surface().annotation(&pin).unwrap();
    assert_eq!(render.alpha, 1.0);
    assert!(render.layout.is_card());

    map.show_all_information();
    assert!(map.surface().annotation(&pin).is_none());
    assert!(map.floors().iter().all(|f| !f.has_transient()));
    assert!(map.surface().annotation(&object("d")).is_some());
    assert!(map.selection().is_none());
}

/// Searched artworks, exhibitions and news items get their own pins
#[test]
fn test_single_location_sources() {
    let mut map = coordinator();
    let catalog = catalog();

    map.show_searched_artwork(catalog.artwork("a").unwrap());
    let searched = AnnotationId::LiveLocation("search:a".to_string());
    let render = map.surface().annotation(&searched).unwrap();
    assert_eq!(
        render.layout,
        Layout::InfoCard {
            thumbnail: Some(ThumbnailSize::Small)
        }
    );

    map.show_exhibition(&Exhibition {
        nid: "x".to_string(),
        title: "Impressionism".to_string(),
        image_url: None,
        location: Some(located(1, 1000.0, 500.0)),
    });
    assert!(map.surface().annotation(&searched).is_none());
    assert!(map
        .surface()
        .annotation(&AnnotationId::LiveLocation("exhibition:x".to_string()))
        .is_some());
    assert_eq!(map.current_floor(), 1);

    // without a location nothing changes
    map.show_news_item(&NewsItem {
        nid: "n".to_string(),
        title: "Reopening".to_string(),
        image_url: None,
        location: None,
    });
    assert_eq!(map.current_mode(), MapMode::SingleLocation);
    assert!(map
        .surface()
        .annotation(&AnnotationId::LiveLocation("exhibition:x".to_string()))
        .is_some());
}

/// Only the visible floor's annotations reach the surface
#[test]
fn test_floor_isolation() {
    let mut map = coordinator();
    map.show_all_information();
    assert!(!map.surface().annotations().is_empty());
    assert!(map.surface().annotations().iter().all(|r| r.floor == 0));

    assert!(map.set_floor(1));
    assert!(map.surface().annotations().iter().all(|r| r.floor == 1));
    assert_eq!(map.surface().overlays(), &[1]);

    assert!(!map.set_floor(1));
    assert!(!map.set_floor(7));
    assert_eq!(map.current_floor(), 1);
}

/// Selecting twice is a no-op; off-screen annotations cannot be selected
#[test]
fn test_selection_is_idempotent() {
    let mut map = coordinator();
    map.show_tour(&tour(), &english(), None);
    map.surface_mut().take_commands();

    assert!(map.select_annotation(&tour_stop("b")));
    assert_eq!(map.highlighted_stop(), Some(2));
    assert!(map.visual_state(&tour_stop("b")).unwrap().selected);
    let commands = map.surface_mut().take_commands();
    assert_eq!(commands, vec![SurfaceCommand::Upsert(tour_stop("b"))]);

    assert!(!map.select_annotation(&tour_stop("b")));
    assert!(map.surface().commands().is_empty());

    assert!(!map.select_annotation(&tour_stop("c")));
    assert_eq!(map.selection(), Some(&tour_stop("b")));

    assert!(map.deselect_annotation(&tour_stop("b")));
    assert!(!map.deselect_annotation(&tour_stop("b")));
    assert!(!map.visual_state(&tour_stop("b")).unwrap().selected);
}

/// Amenity focus narrows the overview and picks a floor that has matches
#[test]
fn test_amenity_focus() {
    let mut map = coordinator();
    map.show_gift_shop();

    assert_eq!(map.current_mode(), MapMode::AllInformation);
    assert_eq!(map.current_floor(), 1);
    let amenities: Vec<_> = map
        .surface()
        .annotations()
        .iter()
        .filter_map(|r| r.amenity)
        .collect();
    assert_eq!(amenities, vec![AmenityType::GiftShop]);
    assert!(map.surface().annotation(&object("c")).is_none());

    map.show_restrooms();
    assert_eq!(map.current_floor(), 0);
    let (_, camera) = map.surface().camera().unwrap();
    assert_eq!(camera.altitude, map.options().camera.amenity_altitude);
}

/// Zooming in reveals artwork dots, zooming far out keeps only big labels
#[test]
fn test_zoom_changes_visibility() {
    let mut map = coordinator();
    map.show_all_information();
    assert_eq!(map.zoom_tier(), ZoomTier::ZoomedOut);
    assert_eq!(map.surface().annotation(&object("a")).unwrap().alpha, 0.0);

    map.on_layout();
    assert_eq!(map.on_camera_changed(100.0, 1000.0, 1000.0), ZoomTier::ZoomedIn);
    assert_eq!(map.previous_zoom_tier(), ZoomTier::ZoomedOut);
    assert_eq!(map.surface().annotation(&object("a")).unwrap().alpha, 1.0);

    assert_eq!(map.on_camera_changed(5000.0, 0.0, 0.0), ZoomTier::ZoomedMax);
    let visible: Vec<_> = map
        .surface()
        .visible_annotations()
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert!(visible.iter().all(|id| matches!(id, AnnotationId::Department { .. })));
    assert!(!visible.is_empty());

    // same tier again: nothing is sent
    map.surface_mut().take_commands();
    map.on_camera_changed(6000.0, 0.0, 0.0);
    assert!(map.surface().commands().is_empty());
}

/// Audio playback marks the stop and auto-advance proposes the next one
#[test]
fn test_audio_playback_follows_tour() {
    let mut map = coordinator();
    map.show_tour(&tour(), &english(), None);

    map.audio_playback_did_start(&audio("a"));
    assert_eq!(map.playing_artwork(), Some("a"));
    assert_eq!(map.selection(), Some(&tour_stop("a")));
    assert!(map.surface().annotation(&tour_stop("a")).unwrap().playing);

    let next = map.audio_playback_did_finish(&audio("a")).unwrap();
    assert_eq!(next.order, 2);
    assert_eq!(map.playing_artwork(), None);
    assert_eq!(map.highlighted_stop(), Some(2));
    assert!(!map.surface().annotation(&tour_stop("a")).unwrap().playing);

    // audio outside the tour is ignored
    map.audio_playback_did_start(&audio("zzz"));
    assert_eq!(map.playing_artwork(), None);
}

/// Only the newest camera command's completion counts
#[test]
fn test_camera_last_writer_wins() {
    let mut map = coordinator();
    map.show_all_information();
    let (first, _) = *map.surface().camera().unwrap();

    map.show_tour(&tour(), &english(), None);
    let (second, _) = *map.surface().camera().unwrap();
    assert_ne!(first, second);

    assert!(!map.camera_did_finish(first));
    assert_eq!(map.camera_in_flight(), Some(second));
    assert!(map.camera_did_finish(second));
    assert_eq!(map.camera_in_flight(), None);
}

/// Disabling hides everything and clears tour state
#[test]
fn test_disable_clears_annotations() {
    let mut map = coordinator();
    map.show_tour(&tour(), &english(), None);
    map.show_artwork(&artwork("zzz", 1, 50.0, 50.0));
    map.show_tour(&tour(), &english(), None);
    map.disable();

    assert_eq!(map.current_mode(), MapMode::Disabled);
    assert!(map.surface().annotations().is_empty());
    assert!(map.tour_model().is_none());
    assert!(map.selection().is_none());
    assert!(map
        .floors()
        .iter()
        .all(|f| f.tour_stops().is_empty() && f.live_locations().is_empty()));
}

/// Highlighting an artwork that is nowhere on the map does nothing
#[test]
fn test_highlight_unknown_artwork() {
    let mut map = coordinator();
    map.show_all_information();
    let stranger = artwork("zzz", 0, 10.0, 10.0);
    assert!(!map.highlight_tour_stop(&stranger));

    let known = catalog().artwork("c").cloned().unwrap();
    assert!(map.highlight_tour_stop(&known));
    assert_eq!(map.current_floor(), 1);
    assert_eq!(map.selection(), Some(&object("c")));
}
