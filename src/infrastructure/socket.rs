// SPDX-License-Identifier: MPL-2.0
//! Socket.IO adapter for the video channel.
//!
//! The connector opens the Engine.IO websocket transport, waits for the open
//! packet and joins the default namespace. Events then travel as
//! `42["name",data]` text frames (see [`super::socketio`]). Server pings are
//! answered while waiting for events.

use super::socketio::{self, Handshake, Packet};
use crate::application::port::{ChannelConnector, ChannelEvent, VideoChannel};
use crate::error::{Error, Result, VideoError};
use async_trait::async_trait;
use futures_util::sink::{Sink, SinkExt};
use futures_util::stream::{Stream, StreamExt};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::tungstenite::Error as WsError;

/// Largest accepted frame. Announcements are a few hundred bytes.
const MAX_FRAME_SIZE: usize = 64 * 1024;

/// Opens Socket.IO channels to a fixed server.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    /// `base` is the server origin or its Socket.IO URL.
    pub fn new(base: &str) -> Self {
        Self {
            url: socketio::endpoint_url(base),
        }
    }

    /// The websocket URL actually dialled.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChannelConnector for WsConnector {
    async fn connect(&self) -> Result<Box<dyn VideoChannel>> {
        let (stream, _response) = tokio_tungstenite::connect_async(self.url.as_str())
            .await
            .map_err(|e| VideoError::Connect(format!("{}: {}", self.url, e)))?;

        let mut channel = WsChannel::new(stream);
        let handshake = channel.handshake().await?;
        tracing::debug!(url = %self.url, sid = %handshake.sid, "video channel connected");
        Ok(Box::new(channel))
    }
}

/// A [`VideoChannel`] over any WebSocket message stream.
pub struct WsChannel<S> {
    inner: S,
    closed: bool,
}

impl<S> WsChannel<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            closed: false,
        }
    }
}

fn transport(err: WsError) -> Error {
    VideoError::Connect(err.to_string()).into()
}

impl<S> WsChannel<S>
where
    S: Stream<Item = std::result::Result<Message, WsError>>
        + Sink<Message, Error = WsError>
        + Unpin
        + Send,
{
    /// Completes the Engine.IO open and joins the default namespace.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::Connect`] if the server refuses the namespace or
    /// hangs up before accepting it.
    pub async fn handshake(&mut self) -> Result<Handshake> {
        let handshake = match self.next_packet().await? {
            Some(Packet::Open(handshake)) => handshake,
            Some(other) => {
                return Err(VideoError::Connect(format!("expected open packet, got {other:?}")).into())
            }
            None => return Err(VideoError::Connect("closed during handshake".to_string()).into()),
        };

        self.send(&Packet::Connect).await?;
        loop {
            match self.next_packet().await? {
                Some(Packet::Connect) => return Ok(handshake),
                Some(Packet::ConnectError(reason)) => {
                    return Err(VideoError::Connect(format!("namespace refused: {reason}")).into())
                }
                Some(_) => {}
                None => {
                    return Err(VideoError::Connect("closed during handshake".to_string()).into())
                }
            }
        }
    }

    async fn send(&mut self, packet: &Packet) -> Result<()> {
        let frame = socketio::encode(packet)?;
        self.inner.send(Message::text(frame)).await.map_err(transport)
    }

    /// Reads the next packet, answering pings on the way.
    async fn next_packet(&mut self) -> Result<Option<Packet>> {
        while let Some(message) = self.inner.next().await {
            let text = match message.map_err(transport)? {
                Message::Text(text) => text,
                Message::Close(_) => {
                    self.closed = true;
                    return Ok(None);
                }
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {
                    continue
                }
            };
            if text.len() > MAX_FRAME_SIZE {
                return Err(Error::Decode(format!(
                    "frame of {} bytes exceeds limit",
                    text.len()
                )));
            }

            match socketio::decode(text.as_str()) {
                Ok(Packet::Ping) => self.send(&Packet::Pong).await?,
                Ok(Packet::Close) => {
                    self.closed = true;
                    return Ok(None);
                }
                Ok(packet) => return Ok(Some(packet)),
                Err(err) => tracing::debug!(%err, "skipping undecodable frame"),
            }
        }
        self.closed = true;
        Ok(None)
    }
}

#[async_trait]
impl<S> VideoChannel for WsChannel<S>
where
    S: Stream<Item = std::result::Result<Message, WsError>>
        + Sink<Message, Error = WsError>
        + Unpin
        + Send,
{
    async fn emit(&mut self, event: ChannelEvent) -> Result<()> {
        if self.closed {
            return Err(VideoError::Closed.into());
        }
        self.send(&Packet::Event(event)).await
    }

    async fn next_event(&mut self) -> Result<Option<ChannelEvent>> {
        if self.closed {
            return Ok(None);
        }
        while let Some(packet) = self.next_packet().await? {
            match packet {
                Packet::Event(event) => return Ok(Some(event)),
                Packet::Disconnect => {
                    self.closed = true;
                    return Ok(None);
                }
                _ => {}
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if let Err(err) = self.send(&Packet::Disconnect).await {
            tracing::debug!(%err, "disconnect packet not sent");
        }
        match self.inner.close().await {
            Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => Ok(()),
            Err(err) => Err(transport(err)),
        }
    }
}
