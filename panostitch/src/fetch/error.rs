//! Fetch error types.

use crate::provider::ProviderError;
use thiserror::Error;

/// Errors that can occur while fetching a single tile.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The caller cancelled while the request waited for admission or was in flight
    #[error("fetch cancelled")]
    Cancelled,

    /// Transport failure or non-2xx response
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: ProviderError,
    },
}

impl FetchError {
    /// Returns true if this error was caused by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
