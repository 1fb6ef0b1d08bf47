//! Rate-limited fetcher implementation.

use super::{FetchError, RateLimiter};
use crate::provider::AsyncHttpClient;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Capability to fetch the raw bytes behind a tile URL.
///
/// The downloader depends on this trait rather than on a concrete client so
/// tests can script responses per URL.
pub trait TileFetcher: Send + Sync {
    /// Fetches the full body at `url`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Cancelled`] if `cancel` fires before the body arrives
    /// - [`FetchError::Network`] for transport failures and non-2xx statuses
    fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

impl<T: TileFetcher + ?Sized> TileFetcher for Arc<T> {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url, cancel).await
    }
}

/// HTTP client gated by a shared [`RateLimiter`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use std::time::Duration;
/// use panostitch::fetch::{RateLimitedFetcher, RateLimiter, TileFetcher};
/// use panostitch::provider::AsyncReqwestClient;
///
/// let limiter = Arc::new(RateLimiter::new(Duration::from_millis(200), 1));
/// let fetcher = RateLimitedFetcher::new(AsyncReqwestClient::new()?, limiter);
/// let bytes = fetcher.fetch(url, &cancel).await?;
/// ```
pub struct RateLimitedFetcher<C: AsyncHttpClient> {
    client: C,
    limiter: Arc<RateLimiter>,
}

impl<C: AsyncHttpClient> RateLimitedFetcher<C> {
    /// Creates a fetcher sharing the given limiter.
    pub fn new(client: C, limiter: Arc<RateLimiter>) -> Self {
        Self { client, limiter }
    }

    /// Returns the limiter this fetcher waits on.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

impl<C: AsyncHttpClient> TileFetcher for RateLimitedFetcher<C> {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<Vec<u8>, FetchError> {
        self.limiter.acquire(cancel).await?;

        tokio::select! {
            biased;

            _ = cancel.cancelled() => Err(FetchError::Cancelled),

            result = self.client.get(url) => {
                let data = result.map_err(|source| FetchError::Network {
                    url: url.to_string(),
                    source,
                })?;
                debug!(url = url, bytes = data.len(), "Tile fetched");
                Ok(data)
            }
        }
    }
}
