//! Rate-limited tile fetching.
//!
//! [`RateLimitedFetcher`] pairs an [`AsyncHttpClient`](crate::provider::AsyncHttpClient)
//! with a shared [`RateLimiter`]. Every request first waits for admission,
//! then performs the GET. Both steps observe the caller's cancellation token.

mod error;
mod fetcher;
mod rate_limiter;

pub use error::FetchError;
pub use fetcher::{RateLimitedFetcher, TileFetcher};
pub use rate_limiter::{RateLimiter, MAX_BURST, MAX_INTERVAL};
