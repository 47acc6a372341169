mod common;

use async_trait::async_trait;
use common::*;
use museum_map::{
    annotation::AnnotationId,
    catalog::Exhibition,
    images::{ImageFetcher, ImageLoader},
    runtime::{DeferredSpawner, TaskSpawner},
    MapCoordinator, MapError, RecordingSurface, Result,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

fn pin(key: &str) -> AnnotationId {
    AnnotationId::LiveLocation(key.to_string())
}

fn coordinator_with(
    fetcher: Arc<dyn ImageFetcher>,
    spawner: &DeferredSpawner,
) -> MapCoordinator<RecordingSurface> {
    let map = coordinator();
    let spawner: Arc<dyn TaskSpawner> = Arc::new(spawner.clone());
    let loader = ImageLoader::new(fetcher, spawner, &map.options().images);
    map.with_image_loader(loader)
}

#[derive(Debug, Default)]
struct FailingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl ImageFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(MapError::ImageFetch(format!("404 for {}", url)))
    }
}

/// A thumbnail lands on the card once its fetch completes
#[test]
fn test_thumbnail_reaches_card() {
    let fetcher = shared_fetcher();
    let spawner = DeferredSpawner::new();
    let mut map = coordinator_with(fetcher.clone(), &spawner);
    let catalog = catalog();

    map.show_artwork(catalog.artwork("d").unwrap());
    assert_eq!(spawner.pending(), 1);
    assert!(map.surface().annotation(&pin("artwork:d")).unwrap().image.is_none());
    assert_eq!(map.pump_images(), 0);

    assert_eq!(spawner.run_pending(), 1);
    assert_eq!(map.pump_images(), 1);
    let render = map.surface().annotation(&pin("artwork:d")).unwrap();
    assert_eq!(render.image.as_deref().map(Vec::as_slice), Some(StaticFetcher::BYTES));

    // showing it again is served from the cache
    map.show_all_information();
    map.show_artwork(catalog.artwork("d").unwrap());
    assert_eq!(spawner.pending(), 0);
    assert!(map.surface().annotation(&pin("artwork:d")).unwrap().image.is_some());
    assert_eq!(fetcher.calls(), 1);
}

/// A fetch that completes after its annotation left the map is dropped
#[test]
fn test_stale_image_is_discarded() {
    let fetcher = shared_fetcher();
    let spawner = DeferredSpawner::new();
    let mut map = coordinator_with(fetcher.clone(), &spawner);
    let catalog = catalog();

    map.show_artwork(catalog.artwork("d").unwrap());
    map.show_all_information();
    assert!(map.surface().annotation(&pin("artwork:d")).is_none());

    spawner.run_pending();
    assert_eq!(map.pump_images(), 0);
    assert!(map.surface().annotations().iter().all(|r| r.image.is_none()));
    assert_eq!(fetcher.calls(), 1);
}

/// A recycled view waiting on the same URL gets the image for its new
/// annotation only, from a single fetch
#[test]
fn test_recycled_view_receives_its_own_image() {
    let fetcher = shared_fetcher();
    let spawner = DeferredSpawner::new();
    let mut map = coordinator_with(fetcher.clone(), &spawner);
    let catalog = catalog();

    map.show_artwork(catalog.artwork("d").unwrap());
    map.show_exhibition(&Exhibition {
        nid: "x".to_string(),
        title: "Nighthawks and Friends".to_string(),
        image_url: Some(THUMBNAIL_URL.to_string()),
        location: Some(located(1, 1100.0, 800.0)),
    });
    assert_eq!(spawner.pending(), 1);

    spawner.run_pending();
    assert_eq!(map.pump_images(), 1);
    assert!(map.surface().annotation(&pin("artwork:d")).is_none());
    assert!(map
        .surface()
        .annotation(&pin("exhibition:x"))
        .unwrap()
        .image
        .is_some());
    assert_eq!(fetcher.calls(), 1);
}

/// Failed fetches are retried, then the card goes on without an image
#[test]
fn test_failed_fetch_gives_up() {
    let fetcher = Arc::new(FailingFetcher::default());
    let spawner = DeferredSpawner::new();
    let mut map = coordinator_with(fetcher.clone(), &spawner);
    let attempts = map.options().images.max_attempts as usize;

    map.show_artwork(catalog().artwork("d").unwrap());
    spawner.run_pending();
    assert_eq!(map.pump_images(), 0);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), attempts);
    assert!(map.surface().annotation(&pin("artwork:d")).unwrap().image.is_none());
}

#[cfg(feature = "tokio-runtime")]
#[tokio::test]
async fn test_tokio_spawner_delivers_images() {
    use museum_map::runtime::tokio_impl::TokioSpawner;
    use std::time::Duration;

    let fetcher = shared_fetcher();
    let spawner: Arc<dyn TaskSpawner> = Arc::new(TokioSpawner::current().unwrap());
    let map = coordinator();
    let loader = ImageLoader::new(fetcher.clone(), spawner, &map.options().images);
    let mut map = map.with_image_loader(loader);

    map.show_artwork(catalog().artwork("d").unwrap());

    let mut applied = 0;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        applied = map.pump_images();
        if applied > 0 {
            break;
        }
    }
    assert_eq!(applied, 1);
    assert!(map.surface().annotation(&pin("artwork:d")).unwrap().image.is_some());
}
