// SPDX-License-Identifier: MPL-2.0
//! Socket.IO packet codec over the Engine.IO websocket transport.
//!
//! Only the subset the video exchange needs is understood: the Engine.IO
//! open/close/ping/pong/message packets and, inside messages, Socket.IO
//! connect, disconnect and event packets on the default namespace.
//!
//! | Frame | Meaning |
//! |-------|---------|
//! | `0{"sid":..}` | Engine.IO open |
//! | `2` / `3` | ping / pong |
//! | `40` | Socket.IO connect |
//! | `42["name",data]` | Socket.IO event |

use crate::application::port::ChannelEvent;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Engine.IO protocol revision spoken by Flask-SocketIO 5.
pub const ENGINE_IO_VERSION: u8 = 4;

/// Path the Socket.IO server is mounted under.
pub const SOCKET_IO_PATH: &str = "/socket.io/";

/// Session parameters sent by the server in the open packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// One decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Noop,
    /// Namespace connect request or acknowledgement.
    Connect,
    ConnectError(Value),
    Disconnect,
    Event(ChannelEvent),
    /// Acks, binary events, upgrades and other namespaces.
    Unsupported,
}

/// Builds the websocket URL of the Socket.IO endpoint at `base`.
///
/// `http` and `https` origins become `ws` and `wss`. The Socket.IO path is
/// added unless `base` already names it.
pub fn endpoint_url(base: &str) -> String {
    let base = base.trim();
    let swapped = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };

    let (path, query) = match swapped.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query)),
        None => (swapped.clone(), None),
    };
    let path = if path.trim_end_matches('/').ends_with("/socket.io") {
        format!("{}/", path.trim_end_matches('/'))
    } else {
        format!("{}{}", path.trim_end_matches('/'), SOCKET_IO_PATH)
    };

    let transport = format!("EIO={ENGINE_IO_VERSION}&transport=websocket");
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{path}?{query}&{transport}"),
        None => format!("{path}?{transport}"),
    }
}

/// Encodes a packet the client sends.
///
/// # Errors
///
/// Returns [`Error::Decode`] for packets only a server sends.
pub fn encode(packet: &Packet) -> Result<String> {
    match packet {
        Packet::Ping => Ok("2".to_string()),
        Packet::Pong => Ok("3".to_string()),
        Packet::Close => Ok("1".to_string()),
        Packet::Connect => Ok("40".to_string()),
        Packet::Disconnect => Ok("41".to_string()),
        Packet::Event(event) => {
            let mut args = vec![Value::String(event.event.clone())];
            if !event.data.is_null() {
                args.push(event.data.clone());
            }
            Ok(format!("42{}", serde_json::to_string(&args)?))
        }
        other => Err(Error::Decode(format!("cannot encode {other:?}"))),
    }
}

/// Decodes one text frame.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the frame is not a valid packet.
pub fn decode(frame: &str) -> Result<Packet> {
    let mut chars = frame.chars();
    let kind = chars
        .next()
        .ok_or_else(|| Error::Decode("empty frame".to_string()))?;
    let body = chars.as_str();

    match kind {
        '0' => Ok(Packet::Open(serde_json::from_str(body)?)),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_message(body),
        '5' => Ok(Packet::Unsupported),
        '6' => Ok(Packet::Noop),
        other => Err(Error::Decode(format!("unknown engine packet type {other:?}"))),
    }
}

fn decode_message(body: &str) -> Result<Packet> {
    let mut chars = body.chars();
    let kind = chars
        .next()
        .ok_or_else(|| Error::Decode("empty message".to_string()))?;
    let rest = chars.as_str();

    // A namespace other than "/" is written before the first comma.
    if rest.starts_with('/') {
        let namespace = rest.split_once(',').map_or(rest, |(ns, _)| ns);
        if namespace != "/" {
            return Ok(Packet::Unsupported);
        }
    }
    let rest = match rest.strip_prefix('/') {
        Some(after) => after.split_once(',').map_or("", |(_, payload)| payload),
        None => rest,
    };

    match kind {
        '0' => Ok(Packet::Connect),
        '1' => Ok(Packet::Disconnect),
        '2' => decode_event(rest.trim_start_matches(|c: char| c.is_ascii_digit())),
        '4' => Ok(Packet::ConnectError(if rest.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(rest)?
        })),
        '3' | '5' | '6' => Ok(Packet::Unsupported),
        other => Err(Error::Decode(format!("unknown socket packet type {other:?}"))),
    }
}

fn decode_event(payload: &str) -> Result<Packet> {
    let args: Vec<Value> = serde_json::from_str(payload)?;
    let mut args = args.into_iter();
    let Some(Value::String(name)) = args.next() else {
        return Err(Error::Decode("event without a name".to_string()));
    };
    let data = args.next().unwrap_or(Value::Null);
    Ok(Packet::Event(ChannelEvent::new(name, data)))
}
