// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`listing`]: Directory listing service (`/medialist`, `/mediainfo`)
//! - [`resource`]: Raw resource fetches from the serving route
//! - [`storage`]: Key-value persistence (session and durable)
//! - [`video`]: Real-time channel used to negotiate video playback
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `reqwest` or `tungstenite` types)
//! - Traits are `Send + Sync` so adapters can be shared behind `Arc`
//! - Network ports are `async` via `async_trait` so they stay object safe

pub mod listing;
pub mod resource;
pub mod storage;
pub mod video;

// Re-export main types for convenience
pub use listing::DirectoryListing;
pub use resource::ResourceFetcher;
pub use storage::PersistenceStore;
pub use video::{ChannelConnector, ChannelEvent, VideoChannel};
