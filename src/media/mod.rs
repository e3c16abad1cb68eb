// SPDX-License-Identifier: MPL-2.0
//! Media resource handling.
//!
//! The viewer never decodes media itself; it only moves bytes from the
//! serving route into memory ahead of display.

pub mod prefetch;

// Re-export commonly used types
pub use prefetch::{PrefetchConfig, PrefetchStats, Prefetcher, ResourcePrefetchCache};
