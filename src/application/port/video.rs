// SPDX-License-Identifier: MPL-2.0
//! Real-time channel port used to negotiate video playback.
//!
//! The server does not stream arbitrary files directly. The viewer asks it to
//! prepare a stream, waits for the announced URL, acknowledges and hangs up.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Event names used on the channel.
pub mod events {
    pub const PREPARE_VIDEO: &str = "prepare video";
    pub const VIDEO_READY: &str = "video ready";
    pub const RECEIVED_VIDEO: &str = "received_video";
}

/// A named event with a JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelEvent {
    pub event: String,
    /// `Null` when the event carries no argument.
    pub data: Value,
}

impl ChannelEvent {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

/// An open bidirectional channel.
#[async_trait]
pub trait VideoChannel: Send {
    /// Sends one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is closed or the write fails.
    async fn emit(&mut self, event: ChannelEvent) -> Result<()>;

    /// Waits for the next event. `Ok(None)` means the peer closed the channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    async fn next_event(&mut self) -> Result<Option<ChannelEvent>>;

    /// Closes the channel. Closing twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the close handshake fails.
    async fn close(&mut self) -> Result<()>;
}

/// Opens new channels; one channel is used per video view.
#[async_trait]
pub trait ChannelConnector: Send + Sync {
    /// Opens a channel to the server.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::VideoError::Connect`] if the server is unreachable.
    async fn connect(&self) -> Result<Box<dyn VideoChannel>>;
}
