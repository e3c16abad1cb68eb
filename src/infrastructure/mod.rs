// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like
//! `reqwest`, `tokio-tungstenite` and the file system.
//!
//! # Available Adapters
//!
//! - [`http`]: Listing service and resource downloads (implements [`DirectoryListing`] and [`ResourceFetcher`])
//! - [`socket`]: Socket.IO video channel (implements [`ChannelConnector`])
//! - [`socketio`]: Engine.IO/Socket.IO packet codec used by [`socket`]
//! - [`storage`]: Session and durable key-value stores (implements [`PersistenceStore`])
//!
//! [`DirectoryListing`]: crate::application::port::DirectoryListing
//! [`ResourceFetcher`]: crate::application::port::ResourceFetcher
//! [`ChannelConnector`]: crate::application::port::ChannelConnector
//! [`PersistenceStore`]: crate::application::port::PersistenceStore

pub mod http;
pub mod socket;
pub mod socketio;
pub mod storage;

// Re-export main types for convenience
pub use http::HttpClient;
pub use socket::{WsChannel, WsConnector};
pub use storage::{DurableStore, SessionStore};
