// SPDX-License-Identifier: MPL-2.0
//! Viewer domain types.
//!
//! Value objects for viewer preferences, independent of where they are stored.

pub mod newtypes;

// Re-export commonly used types
pub use newtypes::{SlideshowDelay, VideoTimeout};
