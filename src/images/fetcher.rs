use crate::Result;
use async_trait::async_trait;

/// Fetches image bytes for a URL
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[cfg(feature = "http")]
pub use http::HttpImageFetcher;

#[cfg(feature = "http")]
mod http {
    use super::ImageFetcher;
    use crate::{MapError, Result};
    use async_trait::async_trait;
    use once_cell::sync::Lazy;
    use reqwest::Client;

    /// Shared async client. Public image hosts reject requests without a
    /// User-Agent.
    static HTTP_CLIENT: Lazy<Option<Client>> = Lazy::new(|| {
        Client::builder()
            .user_agent(concat!("museum-map/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| log::error!("failed to build HTTP client: {}", e))
            .ok()
    });

    /// Fetches over HTTP(S). Needs a tokio runtime, so pair it with
    /// [`crate::runtime::tokio_impl::TokioSpawner`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct HttpImageFetcher;

    #[async_trait]
    impl ImageFetcher for HttpImageFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            let client = HTTP_CLIENT
                .as_ref()
                .ok_or_else(|| MapError::ImageFetch("HTTP client unavailable".to_string()))?;
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| MapError::ImageFetch(e.to_string()))?;
            if !response.status().is_success() {
                return Err(MapError::ImageFetch(format!("HTTP {} for {}", response.status(), url)));
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| MapError::ImageFetch(e.to_string()))?;
            Ok(bytes.to_vec())
        }
    }
}
