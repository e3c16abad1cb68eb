// SPDX-License-Identifier: MPL-2.0
//! Resource fetch port.

use crate::error::Result;
use async_trait::async_trait;

/// Port for downloading a resource from a fully built URL.
///
/// Used for prefetching neighbours and for reading text files. Implementations
/// must not follow the viewer redirect; callers always pass `dl=1` URLs.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Downloads the body of `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
