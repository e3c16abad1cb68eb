// SPDX-License-Identifier: MPL-2.0
//! Video playback negotiation.
//!
//! Before a video can play, the server links it into its streaming directory
//! and announces where it can be fetched. The exchange is short: ask, wait for
//! the announcement, acknowledge, hang up. It is bounded by a timeout so a
//! silent server cannot stall the viewer.

use crate::application::port::video::events;
use crate::application::port::{ChannelConnector, ChannelEvent, VideoChannel};
use crate::domain::media::MediaInfo;
use crate::domain::viewer::VideoTimeout;
use crate::error::{Result, VideoError};
use serde::Deserialize;
use serde_json::{json, Value};

/// Query appended to the announced URL so playback starts at the beginning.
const START_QUERY: &str = "?start=0";

#[derive(Debug, Deserialize)]
struct VideoReady {
    video_url: String,
}

/// Runs the exchange on an open channel and returns the playable URL.
///
/// The channel is closed whether or not the exchange succeeds.
///
/// # Errors
///
/// - [`VideoError::Timeout`] if no announcement arrives within `timeout`
/// - [`VideoError::Closed`] if the server hangs up first
/// - [`VideoError::MalformedReady`] if the announcement has no `video_url`
/// - any error of the channel itself
pub async fn negotiate_video(
    channel: &mut dyn VideoChannel,
    info: &MediaInfo,
    shell_location: &str,
    timeout: VideoTimeout,
) -> Result<String> {
    let outcome = tokio::time::timeout(
        timeout.as_duration(),
        exchange(channel, info, shell_location),
    )
    .await
    .unwrap_or_else(|_| Err(VideoError::Timeout.into()));

    if let Err(err) = channel.close().await {
        tracing::debug!(%err, "closing video channel failed");
    }

    match &outcome {
        Ok(url) => tracing::info!(filename = %info.filename, %url, "video ready"),
        Err(err) => tracing::warn!(filename = %info.filename, %err, "video negotiation failed"),
    }
    outcome
}

/// Connects through `connector` and runs [`negotiate_video`].
///
/// # Errors
///
/// Returns the connector's error or any error of [`negotiate_video`].
pub async fn connect_and_negotiate(
    connector: &dyn ChannelConnector,
    info: &MediaInfo,
    shell_location: &str,
    timeout: VideoTimeout,
) -> Result<String> {
    let mut channel = tokio::time::timeout(timeout.as_duration(), connector.connect())
        .await
        .map_err(|_| VideoError::Timeout)??;
    negotiate_video(channel.as_mut(), info, shell_location, timeout).await
}

async fn exchange(
    channel: &mut dyn VideoChannel,
    info: &MediaInfo,
    shell_location: &str,
) -> Result<String> {
    channel
        .emit(ChannelEvent::new(
            events::PREPARE_VIDEO,
            json!({
                "data": {
                    "filename": info.filename,
                    "shell_location": shell_location,
                }
            }),
        ))
        .await?;

    loop {
        let Some(event) = channel.next_event().await? else {
            return Err(VideoError::Closed.into());
        };
        if event.event != events::VIDEO_READY {
            tracing::debug!(event = %event.event, "ignoring channel event");
            continue;
        }

        let ready = parse_ready(&event.data)?;
        channel
            .emit(ChannelEvent::new(events::RECEIVED_VIDEO, Value::Null))
            .await?;
        return Ok(format!("{}{}", ready.video_url, START_QUERY));
    }
}

/// The announcement is a JSON document sent as a string; an inline object is
/// accepted too.
fn parse_ready(data: &Value) -> Result<VideoReady> {
    let parsed = match data {
        Value::String(raw) => serde_json::from_str(raw),
        other => serde_json::from_value(other.clone()),
    };
    parsed.map_err(|e| VideoError::MalformedReady(e.to_string()).into())
}
