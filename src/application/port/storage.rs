// SPDX-License-Identifier: MPL-2.0
//! Key-value persistence port.
//!
//! Two lifetimes are used by the viewer:
//!
//! - **Session**: survives between views of one browsing session. Holds the
//!   cached media lists.
//! - **Durable**: survives restarts. Holds preferences such as the slideshow
//!   delay.
//!
//! Both are plain string stores; callers own the serialization of values.

use crate::error::Result;

/// Slot holding the slideshow delay preference, in milliseconds.
pub const SLIDESHOW_DELAY_KEY: &str = "slideshowDelay";

/// Prefix of the session slots holding media lists.
pub const MEDIA_LIST_KEY_PREFIX: &str = "MediaList";

/// Port for a string key-value store.
pub trait PersistenceStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if a durable backend fails to write.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a durable backend fails to write.
    fn remove(&self, key: &str) -> Result<()>;
}
