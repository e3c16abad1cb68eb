// SPDX-License-Identifier: MPL-2.0
//! Query services over the sibling media list.
//!
//! # Available Services
//!
//! - [`cache`]: Session-scoped list cache with shared in-flight fetches
//! - [`navigation`]: Stepping, slideshow and effects (`MediaNavigator`)
//!
//! # Design Notes
//!
//! Navigation is part of the application layer because it coordinates the
//! listing service, the persistence store and the prefetch cache around pure
//! domain lists.

pub mod cache;
pub mod navigation;

// Re-export main types
pub use cache::{ListKey, MediaListCache};
pub use navigation::{
    MediaNavigator, NavigationEffect, NavigationInfo, NavigatorBuilder, NavigatorEvent,
};
