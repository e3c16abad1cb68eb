// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Server**: Root prefix and route names of the file manager
//! - **Slideshow**: Auto-advance delay bounds
//! - **Video**: Real-time negotiation timeout
//! - **Prefetch**: Resource cache limits

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Default URL prefix the file manager is mounted under.
pub const DEFAULT_ROOT: &str = "/";

/// Route serving raw file contents.
pub const DEFAULT_SERVE_ROUTE: &str = "/serve";

/// Route rendering the viewer page.
pub const DEFAULT_VIEWER_ROUTE: &str = "/view";

/// Route returning the sibling media list.
pub const MEDIA_LIST_ROUTE: &str = "/medialist";

/// Route returning width/height/mimetype of a single file.
pub const MEDIA_INFO_ROUTE: &str = "/mediainfo";

// ==========================================================================
// Slideshow Defaults
// ==========================================================================

/// Default delay between slideshow advances (in milliseconds).
pub const DEFAULT_SLIDESHOW_DELAY_MS: u64 = 5000;

/// Minimum slideshow delay (in milliseconds).
pub const MIN_SLIDESHOW_DELAY_MS: u64 = 250;

/// Maximum slideshow delay (in milliseconds).
pub const MAX_SLIDESHOW_DELAY_MS: u64 = 600_000;

// ==========================================================================
// Video Defaults
// ==========================================================================

/// Default time to wait for the server to announce a prepared video.
pub const DEFAULT_VIDEO_TIMEOUT_SECS: u32 = 30;

/// Minimum video negotiation timeout (in seconds).
pub const MIN_VIDEO_TIMEOUT_SECS: u32 = 1;

/// Maximum video negotiation timeout (in seconds).
pub const MAX_VIDEO_TIMEOUT_SECS: u32 = 300;

// ==========================================================================
// Prefetch Defaults
// ==========================================================================

/// Default prefetch cache size in megabytes.
pub const DEFAULT_PREFETCH_CACHE_MB: u32 = 32;

/// Minimum prefetch cache size in megabytes.
pub const MIN_PREFETCH_CACHE_MB: u32 = 4;

/// Maximum prefetch cache size in megabytes.
pub const MAX_PREFETCH_CACHE_MB: u32 = 256;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_SLIDESHOW_DELAY_MS > 0);
    assert!(MAX_SLIDESHOW_DELAY_MS >= MIN_SLIDESHOW_DELAY_MS);
    assert!(DEFAULT_SLIDESHOW_DELAY_MS >= MIN_SLIDESHOW_DELAY_MS);
    assert!(DEFAULT_SLIDESHOW_DELAY_MS <= MAX_SLIDESHOW_DELAY_MS);

    assert!(MIN_VIDEO_TIMEOUT_SECS > 0);
    assert!(MAX_VIDEO_TIMEOUT_SECS >= MIN_VIDEO_TIMEOUT_SECS);
    assert!(DEFAULT_VIDEO_TIMEOUT_SECS >= MIN_VIDEO_TIMEOUT_SECS);
    assert!(DEFAULT_VIDEO_TIMEOUT_SECS <= MAX_VIDEO_TIMEOUT_SECS);

    assert!(MIN_PREFETCH_CACHE_MB > 0);
    assert!(MAX_PREFETCH_CACHE_MB >= MIN_PREFETCH_CACHE_MB);
    assert!(DEFAULT_PREFETCH_CACHE_MB >= MIN_PREFETCH_CACHE_MB);
    assert!(DEFAULT_PREFETCH_CACHE_MB <= MAX_PREFETCH_CACHE_MB);
};
