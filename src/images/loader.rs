use super::{cache::ImageCache, fetcher::ImageFetcher};
use crate::{
    annotation::{AnnotationId, ViewSlot},
    core::config::ImageLoadingConfig,
    prelude::{Arc, HashMap},
    runtime::TaskSpawner,
    Result,
};
use crossbeam_channel::{Receiver, Sender};

/// The view an image was requested for, as it was bound at request time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageTarget {
    pub slot: ViewSlot,
    pub annotation: AnnotationId,
}

/// Outcome of [`ImageLoader::request`]
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRequest {
    /// Served from cache; no completion will follow
    Cached(Arc<Vec<u8>>),
    /// A completion for the target arrives later through
    /// [`ImageLoader::drain_completions`]
    Pending,
}

#[derive(Debug, Clone)]
pub struct ImageCompletion {
    pub url: String,
    pub target: ImageTarget,
    pub result: std::result::Result<Arc<Vec<u8>>, String>,
}

/// Fetches thumbnails in the background and hands results back to the
/// owning thread through a channel. Concurrent requests for one URL share a
/// single fetch.
pub struct ImageLoader {
    fetcher: Arc<dyn ImageFetcher>,
    spawner: Arc<dyn TaskSpawner>,
    cache: ImageCache,
    max_attempts: u32,
    tx: Sender<(String, Result<Vec<u8>>)>,
    rx: Receiver<(String, Result<Vec<u8>>)>,
    in_flight: HashMap<String, Vec<ImageTarget>>,
}

impl ImageLoader {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        spawner: Arc<dyn TaskSpawner>,
        config: &ImageLoadingConfig,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            fetcher,
            spawner,
            cache: ImageCache::new(config.cache_size),
            max_attempts: config.max_attempts.max(1),
            tx,
            rx,
            in_flight: HashMap::default(),
        }
    }

    /// Decoded bytes kept by URL, least recently used first out
    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Number of URLs with a fetch outstanding
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Asks for `url` on behalf of `target`.
    ///
    /// A cache hit returns [`ImageRequest::Cached`] at once and nothing is
    /// queued. Otherwise the target is queued and [`ImageRequest::Pending`]
    /// returned. A target re-requesting from the same slot replaces its
    /// earlier entry, and a URL already being fetched is not fetched again;
    /// every queued target gets its own completion.
    pub fn request(&mut self, url: &str, target: ImageTarget) -> ImageRequest {
        if let Some(bytes) = self.cache.get(url) {
            return ImageRequest::Cached(bytes);
        }

        let needs_fetch = !self.in_flight.contains_key(url);
        let targets = self.in_flight.entry(url.to_string()).or_default();
        targets.retain(|t| t.slot != target.slot);
        targets.push(target);

        if needs_fetch {
            self.spawn_fetch(url.to_string());
        }
        ImageRequest::Pending
    }

    /// Stops delivering anything to `slot`
    pub fn forget(&mut self, slot: ViewSlot) {
        for targets in self.in_flight.values_mut() {
            targets.retain(|t| t.slot != slot);
        }
    }

    fn spawn_fetch(&self, url: String) {
        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();
        let attempts = self.max_attempts;

        self.spawner.spawn_boxed(Box::pin(async move {
            let mut outcome = None;
            for attempt in 1..=attempts {
                log::debug!("fetch image {} attempt {}", url, attempt);
                match fetcher.fetch(&url).await {
                    Ok(data) => {
                        log::info!("downloaded image {} ({} bytes)", url, data.len());
                        outcome = Some(Ok(data));
                        break;
                    }
                    Err(e) => {
                        log::warn!("image {} failed on attempt {}: {}", url, attempt, e);
                        outcome = Some(Err(e));
                    }
                }
            }
            if let Some(result) = outcome {
                if result.is_err() {
                    log::error!("giving up on image {}", url);
                }
                let _ = tx.send((url, result));
            }
        }));
    }

    /// Collects finished fetches without blocking, one completion per
    /// waiting target.
    pub fn drain_completions(&mut self) -> Vec<ImageCompletion> {
        let mut completions = Vec::new();
        while let Ok((url, result)) = self.rx.try_recv() {
            let targets = self.in_flight.remove(&url).unwrap_or_default();
            let result = match result {
                Ok(data) => {
                    let bytes = Arc::new(data);
                    self.cache.put(&url, bytes.clone());
                    Ok(bytes)
                }
                Err(e) => Err(e.to_string()),
            };
            completions.extend(targets.into_iter().map(|target| ImageCompletion {
                url: url.clone(),
                target,
                result: result.clone(),
            }));
        }
        completions
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("cached", &self.cache.len())
            .field("in_flight", &self.in_flight.len())
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}
