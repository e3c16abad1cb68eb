// SPDX-License-Identifier: MPL-2.0
//! Viewer newtypes.
//!
//! This module provides type-safe wrappers for viewer timing values,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_SLIDESHOW_DELAY_MS, DEFAULT_VIDEO_TIMEOUT_SECS, MAX_SLIDESHOW_DELAY_MS,
    MAX_VIDEO_TIMEOUT_SECS, MIN_SLIDESHOW_DELAY_MS, MIN_VIDEO_TIMEOUT_SECS,
};
use std::time::Duration;

// =============================================================================
// SlideshowDelay
// =============================================================================

/// Delay between slideshow advances, in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (250 ms – 10 min).
///
/// # Example
///
/// ```
/// use flfm_viewer::domain::viewer::SlideshowDelay;
///
/// let delay = SlideshowDelay::new(2000);
/// assert_eq!(delay.millis(), 2000);
///
/// // Values outside range are clamped
/// let too_fast = SlideshowDelay::new(1);
/// assert_eq!(too_fast.millis(), 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideshowDelay(u64);

impl SlideshowDelay {
    /// Creates a new delay, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_SLIDESHOW_DELAY_MS, MAX_SLIDESHOW_DELAY_MS))
    }

    /// Parses a stored preference.
    ///
    /// Stored values are free-form strings (a settings form writes them), so
    /// anything that is not a number yields `None` and callers use the default.
    #[must_use]
    pub fn parse(stored: &str) -> Option<Self> {
        let value: f64 = stored.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = value as u64;
        Some(Self::new(millis))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for SlideshowDelay {
    fn default() -> Self {
        Self(DEFAULT_SLIDESHOW_DELAY_MS)
    }
}

// =============================================================================
// VideoTimeout
// =============================================================================

/// Upper bound on waiting for the server to prepare a video, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoTimeout(u32);

impl VideoTimeout {
    /// Creates a new timeout, clamping to the valid range.
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self(secs.clamp(MIN_VIDEO_TIMEOUT_SECS, MAX_VIDEO_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for VideoTimeout {
    fn default() -> Self {
        Self(DEFAULT_VIDEO_TIMEOUT_SECS)
    }
}
