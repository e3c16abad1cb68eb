// SPDX-License-Identifier: MPL-2.0
//! Resource prefetch cache for faster navigation.
//!
//! Every navigation step requests the neighbour's bytes from the serving
//! route ahead of display. This module keeps those bytes around so the
//! presentation layer can show them without a second round trip.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used resources are evicted first
//! - **Memory-bounded**: Total cache size limited by configurable byte limit
//! - **URL-keyed**: Resources indexed by their full request URL
//! - **Async loading**: [`Prefetcher`] downloads through the [`ResourceFetcher`] port
//!
//! # Usage
//!
//! ```ignore
//! let prefetcher = Prefetcher::new(fetcher, PrefetchConfig::default());
//!
//! // Download (or reuse) the next image
//! prefetcher.prefetch(&url).await?;
//!
//! // Later, when displaying it
//! if let Some(bytes) = prefetcher.cached(&url) {
//!     // Use cached bytes
//! }
//! ```

use crate::application::port::ResourceFetcher;
use crate::error::Result;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Default prefetch cache size in bytes (32 MB).
pub const DEFAULT_PREFETCH_CACHE_BYTES: usize = 32 * 1024 * 1024;

/// Minimum prefetch cache size in bytes (4 MB).
pub const MIN_PREFETCH_CACHE_BYTES: usize = 4 * 1024 * 1024;

/// Maximum prefetch cache size in bytes (256 MB).
pub const MAX_PREFETCH_CACHE_BYTES: usize = 256 * 1024 * 1024;

/// Default maximum number of resources to cache.
pub const DEFAULT_MAX_ENTRIES: usize = 16;

/// Minimum resources to cache.
pub const MIN_MAX_ENTRIES: usize = 4;

/// Maximum resources to cache.
pub const MAX_MAX_ENTRIES: usize = 64;

/// Configuration for the prefetch cache.
#[derive(Debug, Clone, Copy)]
pub struct PrefetchConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of resources to cache.
    pub max_entries: usize,

    /// Whether prefetching is enabled.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_PREFETCH_CACHE_BYTES,
            max_entries: DEFAULT_MAX_ENTRIES,
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates a new prefetch configuration with specified limits.
    #[must_use]
    pub fn new(max_bytes: usize, max_entries: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_PREFETCH_CACHE_BYTES, MAX_PREFETCH_CACHE_BYTES),
            max_entries: max_entries.clamp(MIN_MAX_ENTRIES, MAX_MAX_ENTRIES),
            enabled: true,
        }
    }

    /// Creates a disabled prefetch configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Statistics about prefetch cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchStats {
    /// Number of resources currently in cache.
    pub entry_count: usize,

    /// Total bytes currently used by cached resources.
    pub total_bytes: usize,

    /// Number of cache hits (resource found).
    pub hits: u64,

    /// Number of cache misses (resource not found).
    pub misses: u64,

    /// Number of resources evicted due to limits.
    pub evictions: u64,

    /// Number of resources inserted.
    pub insertions: u64,
}

impl PrefetchStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache for prefetched resources.
///
/// Provides memory-bounded caching with LRU eviction policy.
pub struct ResourcePrefetchCache {
    cache: LruCache<String, Arc<Vec<u8>>>,
    config: PrefetchConfig,
    current_bytes: usize,
    stats: PrefetchStats,
}

impl ResourcePrefetchCache {
    /// Creates a new prefetch cache with the given configuration.
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            config,
            current_bytes: 0,
            stats: PrefetchStats::default(),
        }
    }

    /// Creates a new prefetch cache with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PrefetchConfig::default())
    }

    /// Returns whether prefetching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Inserts a resource into the cache.
    ///
    /// Returns `true` if the resource was inserted, `false` if caching is
    /// disabled or the resource is larger than half the byte budget.
    pub fn insert(&mut self, url: String, bytes: Arc<Vec<u8>>) -> bool {
        if !self.config.enabled {
            return false;
        }

        let size = bytes.len();
        if size > self.config.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.len());
        }

        while self.current_bytes + size > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.len());
                self.stats.evictions += 1;
            }
        }

        // `push` evicts the LRU entry when the entry count is at capacity.
        if let Some((_, evicted)) = self.cache.push(url, bytes) {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.len());
            self.stats.evictions += 1;
        }

        self.current_bytes += size;
        self.stats.insertions += 1;
        self.stats.entry_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets a resource from the cache by URL, updating LRU order.
    pub fn get(&mut self, url: &str) -> Option<Arc<Vec<u8>>> {
        if !self.config.enabled {
            return None;
        }

        if let Some(bytes) = self.cache.get(url) {
            self.stats.hits += 1;
            Some(Arc::clone(bytes))
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Checks if a resource is cached without updating LRU order.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.config.enabled && self.cache.contains(url)
    }

    /// Clears all cached resources.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.entry_count = 0;
        self.stats.total_bytes = 0;
    }

    /// Returns the current cache statistics.
    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the current memory usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl std::fmt::Debug for ResourcePrefetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourcePrefetchCache")
            .field("enabled", &self.config.enabled)
            .field("entry_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_entries", &self.config.max_entries)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Downloads resources into a shared [`ResourcePrefetchCache`].
pub struct Prefetcher {
    fetcher: Arc<dyn ResourceFetcher>,
    cache: Mutex<ResourcePrefetchCache>,
}

impl Prefetcher {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, config: PrefetchConfig) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(ResourcePrefetchCache::new(config)),
        }
    }

    fn cache(&self) -> MutexGuard<'_, ResourcePrefetchCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Ensures `url` is cached. Returns `true` if a download happened.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error; the cache is left untouched.
    pub async fn prefetch(&self, url: &str) -> Result<bool> {
        if self.cache().contains(url) {
            return Ok(false);
        }
        let bytes = self.fetcher.fetch(url).await?;
        tracing::debug!(url, bytes = bytes.len(), "prefetched resource");
        self.cache().insert(url.to_string(), Arc::new(bytes));
        Ok(true)
    }

    /// Returns cached bytes for `url`, downloading them on a miss.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error on a miss that fails to download.
    pub async fn load(&self, url: &str) -> Result<Arc<Vec<u8>>> {
        if let Some(bytes) = self.cache().get(url) {
            return Ok(bytes);
        }
        let bytes = Arc::new(self.fetcher.fetch(url).await?);
        self.cache().insert(url.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.cache().is_enabled()
    }

    /// Returns cached bytes for `url` without downloading.
    pub fn cached(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.cache().get(url)
    }

    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.cache().stats()
    }
}

impl std::fmt::Debug for Prefetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefetcher")
            .field("cache", &*self.cache())
            .finish_non_exhaustive()
    }
}
