//! Runtime abstraction for background work
//!
//! Image fetches are async; the engine never picks an executor itself. Hosts
//! hand in a [`TaskSpawner`] backed by tokio, plain threads, or a deferred
//! queue they drive by hand.

use crate::prelude::{Arc, Mutex};
use futures::future::BoxFuture;

/// Spawns fire-and-forget futures (object-safe)
pub trait TaskSpawner: Send + Sync + 'static {
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>);
}

/// Runs each future to completion on its own OS thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSpawner;

impl TaskSpawner for ThreadSpawner {
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>) {
        std::thread::spawn(move || futures::executor::block_on(future));
    }
}

/// Holds futures until [`DeferredSpawner::run_pending`] is called.
///
/// Useful for headless hosts and for pinning down completion order.
#[derive(Clone, Default)]
pub struct DeferredSpawner {
    queue: Arc<Mutex<Vec<BoxFuture<'static, ()>>>>,
}

impl DeferredSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Runs every queued future in spawn order; returns how many ran
    pub fn run_pending(&self) -> usize {
        let tasks = match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => return 0,
        };
        let count = tasks.len();
        for task in tasks {
            futures::executor::block_on(task);
        }
        count
    }

    /// Runs only the oldest queued future
    pub fn run_next(&self) -> bool {
        let task = match self.queue.lock() {
            Ok(mut queue) if !queue.is_empty() => queue.remove(0),
            _ => return false,
        };
        futures::executor::block_on(task);
        true
    }
}

impl std::fmt::Debug for DeferredSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredSpawner")
            .field("pending", &self.pending())
            .finish()
    }
}

impl TaskSpawner for DeferredSpawner {
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(future);
        }
    }
}

#[cfg(feature = "tokio-runtime")]
pub mod tokio_impl {
    use super::*;
    use ::tokio::runtime::Handle;

    /// Spawns onto a tokio runtime
    #[derive(Debug, Clone)]
    pub struct TokioSpawner {
        handle: Handle,
    }

    impl TokioSpawner {
        pub fn new(handle: Handle) -> Self {
            Self { handle }
        }

        /// Spawner for the runtime the caller is running inside, if any
        pub fn current() -> Option<Self> {
            Handle::try_current().ok().map(Self::new)
        }
    }

    impl TaskSpawner for TokioSpawner {
        fn spawn_boxed(&self, future: BoxFuture<'static, ()>) {
            self.handle.spawn(future);
        }
    }
}

/// Best spawner available: tokio when running inside a runtime, otherwise
/// one thread per task.
pub fn default_spawner() -> Arc<dyn TaskSpawner> {
    #[cfg(feature = "tokio-runtime")]
    {
        if let Some(spawner) = tokio_impl::TokioSpawner::current() {
            return Arc::new(spawner);
        }
    }
    log::debug!("no async runtime in scope; falling back to thread spawner");
    Arc::new(ThreadSpawner)
}
