// SPDX-License-Identifier: MPL-2.0
//! Directory listing port.
//!
//! The file manager answers two questions about a directory: which siblings
//! of a given kind it holds (`/medialist`) and what a single file looks like
//! (`/mediainfo`).

use crate::domain::media::{MediaInfo, MediaKind, MediaList};
use crate::error::Result;
use async_trait::async_trait;

/// Port for the server-side directory listing service.
///
/// # Example
///
/// ```ignore
/// use flfm_viewer::application::port::DirectoryListing;
/// use flfm_viewer::domain::media::MediaKind;
///
/// async fn count_images(listing: &dyn DirectoryListing, dir: &str) -> usize {
///     listing
///         .fetch_media_list(dir, MediaKind::Image)
///         .await
///         .map(|list| list.len())
///         .unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait DirectoryListing: Send + Sync {
    /// Fetches the ordered siblings of `kind` in `directory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a media list.
    async fn fetch_media_list(&self, directory: &str, kind: MediaKind) -> Result<MediaList>;

    /// Fetches dimensions and MIME type of `file` in `directory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn fetch_media_info(&self, directory: &str, file: &str) -> Result<MediaInfo>;
}
