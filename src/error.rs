// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Crate-wide error type.
///
/// Every variant carries owned, cloneable data so that a single failed fetch
/// can be handed to every caller awaiting the same shared future.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Http(HttpError),
    Decode(String),
    Navigation(NavigationError),
    Video(VideoError),
}

/// Failures talking to the directory listing service or the serving route.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    Transport(String),

    /// The server answered with a non-success status.
    Status { url: String, status: u16 },
}

/// Navigation invariant violations.
///
/// These indicate a programming defect rather than a runtime condition:
/// loading a media list guarantees the active identifier is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The active identifier is not the `cur` of any entry.
    NotInList(String),

    /// Two adjacent entries disagree about their linkage.
    BrokenLink { index: usize },
}

/// Failures while negotiating video playback over the real-time channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    /// The channel could not be opened.
    Connect(String),

    /// No `video ready` event arrived within the allotted time.
    Timeout,

    /// The channel closed before the exchange completed.
    Closed,

    /// The `video ready` payload could not be understood.
    MalformedReady(String),

    /// The negotiation was cancelled by view teardown.
    Cancelled,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Transport(msg) => write!(f, "request failed: {}", msg),
            HttpError::Status { url, status } => {
                write!(f, "{} answered with status {}", url, status)
            }
        }
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::NotInList(id) => {
                write!(f, "current file '{}' is not in the media list", id)
            }
            NavigationError::BrokenLink { index } => {
                write!(f, "media list linkage broken after entry {}", index)
            }
        }
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Connect(msg) => write!(f, "could not open channel: {}", msg),
            VideoError::Timeout => write!(f, "timed out waiting for video"),
            VideoError::Closed => write!(f, "channel closed before video was ready"),
            VideoError::MalformedReady(msg) => write!(f, "malformed ready payload: {}", msg),
            VideoError::Cancelled => write!(f, "video negotiation cancelled"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Navigation(e) => write!(f, "Navigation Error: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Error::Http(err)
    }
}

impl From<NavigationError> for Error {
    fn from(err: NavigationError) -> Self {
        Error::Navigation(err)
    }
}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => Error::Http(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }),
            _ => Error::Http(HttpError::Transport(err.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
