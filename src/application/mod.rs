// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`query`]: Navigation over the sibling media list
//! - [`slideshow`]: Timed auto-advance driven by the navigator
//! - [`video`]: Video playback negotiation over the real-time channel
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer binds UI events to application layer services
//!
//! # Example
//!
//! ```ignore
//! use flfm_viewer::application::port::DirectoryListing;
//! use flfm_viewer::application::query::{MediaListCache, MediaNavigator};
//!
//! // Infrastructure implements the port trait
//! struct HttpListing { /* ... */ }
//! impl DirectoryListing for HttpListing { /* ... */ }
//!
//! let cache = Arc::new(MediaListCache::new(Arc::new(HttpListing { /* ... */ }), session_store));
//! let navigator = MediaNavigator::builder(cache, durable_store, prefetcher)
//!     .build("/pics", "/pics/a.jpg", MediaKind::Image);
//! navigator.step_next().await?;
//! ```

pub mod port;
pub mod query;
pub mod slideshow;
pub mod video;
