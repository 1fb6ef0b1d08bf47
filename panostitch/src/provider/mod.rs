//! Panorama tile source abstraction
//!
//! This module provides the HTTP transport trait used to fetch tiles and the
//! [`TileSource`] trait that maps a tile address to its URL.
//!
//! ```ignore
//! use panostitch::provider::{AsyncReqwestClient, StreetViewTileSource, TileSource};
//!
//! let http_client = AsyncReqwestClient::new()?;
//! let source = StreetViewTileSource::default();
//! let url = source.tile_url("ABC", 2, 0, 0);
//! ```

mod http;
mod street_view;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use street_view::{StreetViewTileSource, DEFAULT_ENDPOINT, DEFAULT_HOST};
pub use types::{ProviderError, TileSource};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
