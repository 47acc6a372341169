use crate::core::constants::IMAGE_CACHE_CAPACITY;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// In-memory image bytes keyed by URL, LRU-evicted. Clones share storage.
#[derive(Debug, Clone)]
pub struct ImageCache {
    cache: Arc<Mutex<LruCache<String, Arc<Vec<u8>>>>>,
}

impl ImageCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    pub fn get(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.cache.lock().ok()?.get(url).cloned()
    }

    pub fn put(&self, url: &str, data: Arc<Vec<u8>>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(url.to_string(), data);
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.contains(url))
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(IMAGE_CACHE_CAPACITY)
    }
}
