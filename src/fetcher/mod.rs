pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::FetchError;

pub use http_fetcher::HttpFetcher;
pub use parallel::ParallelFetcher;

/// One blocking-style GET: the whole response body or a transport error.
///
/// A non-2xx status is not an error here; the body is handed on and the
/// decoder decides whether it makes sense.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
