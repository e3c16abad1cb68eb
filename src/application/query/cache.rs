// SPDX-License-Identifier: MPL-2.0
//! Session cache of sibling media lists.
//!
//! Lists are persisted as JSON in the session store under a slot named for
//! their directory and kind. Concurrent loads of the same slot share one
//! in-flight request: the first caller installs a shared future and every
//! later caller awaits it, so a burst of clicks costs one round trip.
//!
//! Each key carries a generation bumped on invalidation. A request only
//! persists its result if the generation it started under is still current.

use crate::application::port::storage::MEDIA_LIST_KEY_PREFIX;
use crate::application::port::{DirectoryListing, PersistenceStore};
use crate::domain::media::{MediaKind, MediaList};
use crate::error::Result;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<MediaList>>>>;
type Generations = Arc<Mutex<HashMap<ListKey, u64>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Identifies one cached list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    directory: String,
    kind: MediaKind,
}

impl ListKey {
    pub fn new(directory: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            directory: directory.into(),
            kind,
        }
    }

    /// Name of the session store slot, e.g. `MediaList:image:/pics`.
    #[must_use]
    pub fn slot(&self) -> String {
        format!("{}:{}:{}", MEDIA_LIST_KEY_PREFIX, self.kind, self.directory)
    }
}

/// Loads media lists through a session store and a listing service.
pub struct MediaListCache {
    listing: Arc<dyn DirectoryListing>,
    store: Arc<dyn PersistenceStore>,
    in_flight: Mutex<HashMap<ListKey, SharedFetch>>,
    generations: Generations,
}

impl MediaListCache {
    pub fn new(listing: Arc<dyn DirectoryListing>, store: Arc<dyn PersistenceStore>) -> Self {
        Self {
            listing,
            store,
            in_flight: Mutex::new(HashMap::new()),
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The listing service behind this cache.
    pub fn listing(&self) -> &Arc<dyn DirectoryListing> {
        &self.listing
    }

    fn in_flight(&self) -> MutexGuard<'_, HashMap<ListKey, SharedFetch>> {
        lock(&self.in_flight)
    }

    /// Returns the list for `key`, fetching it if the persisted copy is
    /// missing or does not mention `current`.
    ///
    /// # Errors
    ///
    /// Returns the listing service's error. Every caller sharing the failed
    /// request receives the same error; the next call starts a new request.
    pub async fn load(&self, key: &ListKey, current: &str) -> Result<Arc<MediaList>> {
        if let Some(list) = self.persisted(key, current) {
            return Ok(list);
        }

        let fetch = {
            let mut in_flight = self.in_flight();
            in_flight
                .entry(key.clone())
                .or_insert_with(|| self.start_fetch(key.clone()))
                .clone()
        };

        let result = fetch.clone().await;

        let mut in_flight = self.in_flight();
        if in_flight.get(key).is_some_and(|f| f.ptr_eq(&fetch)) {
            in_flight.remove(key);
        }
        result
    }

    /// Reads the persisted list, discarding it if it is unreadable or stale.
    fn persisted(&self, key: &ListKey, current: &str) -> Option<Arc<MediaList>> {
        let slot = key.slot();
        let raw = self.store.get(&slot)?;

        match serde_json::from_str::<MediaList>(&raw) {
            Ok(list) if list.contains_reference(current) => return Some(Arc::new(list)),
            Ok(_) => tracing::debug!(%slot, current, "cached media list is stale"),
            Err(err) => tracing::warn!(%slot, %err, "cached media list is unreadable"),
        }

        if let Err(err) = self.store.remove(&slot) {
            tracing::warn!(%slot, %err, "failed to discard cached media list");
        }
        None
    }

    fn start_fetch(&self, key: ListKey) -> SharedFetch {
        let listing = Arc::clone(&self.listing);
        let store = Arc::clone(&self.store);
        let generations = Arc::clone(&self.generations);
        let generation = lock(&generations).get(&key).copied().unwrap_or(0);

        async move {
            tracing::debug!(directory = %key.directory, kind = %key.kind, "fetching media list");
            let list = listing.fetch_media_list(&key.directory, key.kind).await?;

            if let Err(err) = list.validate() {
                tracing::warn!(directory = %key.directory, %err, "server sent inconsistent media list");
            }

            persist(store.as_ref(), &generations, &key, generation, &list);

            Ok(Arc::new(list))
        }
        .boxed()
        .shared()
    }

    /// Drops the persisted list and forgets any request in flight for `key`.
    ///
    /// Callers already awaiting that request still receive its result, but
    /// it is no longer written back to the store.
    pub fn invalidate(&self, key: &ListKey) {
        {
            let mut generations = lock(&self.generations);
            *generations.entry(key.clone()).or_insert(0) += 1;
            if let Err(err) = self.store.remove(&key.slot()) {
                tracing::warn!(slot = %key.slot(), %err, "failed to invalidate media list");
            }
        }
        self.in_flight().remove(key);
    }

    /// Invalidates every kind of list cached for `directory`.
    pub fn invalidate_directory(&self, directory: &str) {
        for kind in [MediaKind::Image, MediaKind::Video, MediaKind::Text] {
            self.invalidate(&ListKey::new(directory, kind));
        }
    }
}

/// Writes `list` to its slot unless `key` was invalidated after `generation`.
fn persist(
    store: &dyn PersistenceStore,
    generations: &Mutex<HashMap<ListKey, u64>>,
    key: &ListKey,
    generation: u64,
    list: &MediaList,
) {
    // Held while writing so an invalidation cannot slip in between.
    let current = lock(generations);
    if current.get(key).copied().unwrap_or(0) != generation {
        tracing::debug!(slot = %key.slot(), "media list invalidated while in flight");
        return;
    }

    match serde_json::to_string(list) {
        Ok(json) => {
            if let Err(err) = store.set(&key.slot(), &json) {
                tracing::warn!(slot = %key.slot(), %err, "failed to cache media list");
            }
        }
        Err(err) => tracing::warn!(%err, "failed to serialize media list"),
    }
}

impl std::fmt::Debug for MediaListCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaListCache")
            .field("in_flight", &self.in_flight().len())
            .finish_non_exhaustive()
    }
}
