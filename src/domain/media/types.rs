// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family of sibling files a viewer navigates through.
///
/// Sent to the listing service as `whatkind`; the server matches it against
/// the first half of each file's MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still images, navigated in place with prefetch.
    Image,
    /// Videos, navigated by reloading the viewer page.
    Video,
    /// Plain text files shown verbatim.
    Text,
}

impl MediaKind {
    /// Wire name used by the listing service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Text => "text",
        }
    }

    /// Derives the kind from a MIME type such as `image/jpeg`.
    #[must_use]
    pub fn from_mimetype(mimetype: &str) -> Option<Self> {
        let family = mimetype.split('/').next()?.trim();
        family.parse().ok()
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            "text" => Ok(MediaKind::Text),
            other => Err(format!("unknown media kind '{other}'")),
        }
    }
}

/// Dimensions and type of a single file, as reported by `/mediainfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub width: u32,
    pub height: u32,
    /// Bare file name, used to name the prepared stream on the server.
    pub filename: String,
    pub mimetype: String,
}
