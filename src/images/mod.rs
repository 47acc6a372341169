pub mod cache;
pub mod fetcher;
pub mod loader;

pub use cache::ImageCache;
#[cfg(feature = "http")]
pub use fetcher::HttpImageFetcher;
pub use fetcher::ImageFetcher;
pub use loader::{ImageCompletion, ImageLoader, ImageRequest, ImageTarget};
