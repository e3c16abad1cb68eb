// SPDX-License-Identifier: MPL-2.0
//! Per-view ownership of navigation, slideshow and video playback.
//!
//! A [`ViewerContext`] holds what all views of one process share: the
//! clients, the stores and the list cache. Each viewed file gets a
//! [`ViewerSession`]; tearing the session down (or dropping it) stops its
//! slideshow and cancels any video negotiation still running.

use crate::application::port::{
    ChannelConnector, DirectoryListing, PersistenceStore, ResourceFetcher,
};
use crate::application::query::{MediaListCache, MediaNavigator};
use crate::application::video::connect_and_negotiate;
use crate::config::Config;
use crate::domain::media::{MediaInfo, MediaKind};
use crate::domain::viewer::VideoTimeout;
use crate::error::{Error, Result, VideoError};
use crate::infrastructure::{DurableStore, HttpClient, SessionStore, WsConnector};
use crate::media::prefetch::{PrefetchConfig, Prefetcher, DEFAULT_MAX_ENTRIES};
use crate::routing::{self, Endpoints};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::AbortHandle;

/// Services shared by every view.
pub struct ViewerContext {
    endpoints: Endpoints,
    video_timeout: VideoTimeout,
    listing: Arc<dyn DirectoryListing>,
    cache: Arc<MediaListCache>,
    durable: Arc<dyn PersistenceStore>,
    prefetcher: Arc<Prefetcher>,
    connector: Option<Arc<dyn ChannelConnector>>,
}

impl ViewerContext {
    /// Wires the context from explicit adapters.
    pub fn new(
        config: &Config,
        listing: Arc<dyn DirectoryListing>,
        fetcher: Arc<dyn ResourceFetcher>,
        session: Arc<dyn PersistenceStore>,
        durable: Arc<dyn PersistenceStore>,
        connector: Option<Arc<dyn ChannelConnector>>,
    ) -> Self {
        let prefetch = PrefetchConfig::new(config.prefetch_cache_bytes(), DEFAULT_MAX_ENTRIES);
        Self {
            endpoints: config.endpoints(),
            video_timeout: config.video_timeout(),
            cache: Arc::new(MediaListCache::new(Arc::clone(&listing), session)),
            listing,
            durable,
            prefetcher: Arc::new(Prefetcher::new(fetcher, prefetch)),
            connector,
        }
    }

    /// Wires the context against a live server: HTTP for listings and
    /// resources, Socket.IO for video at `socket_url`, or at the server origin
    /// when no socket URL is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or no data
    /// directory is available for the durable store.
    pub fn connect(config: &Config, data_dir: Option<PathBuf>) -> Result<Self> {
        let http = Arc::new(HttpClient::new(config)?);
        let durable = Arc::new(DurableStore::open_in(data_dir)?);
        let connector = config
            .socket_url
            .as_deref()
            .or(config.server_origin.as_deref())
            .map(|url| Arc::new(WsConnector::new(url)) as Arc<dyn ChannelConnector>);

        Ok(Self::new(
            config,
            http.clone(),
            http,
            Arc::new(SessionStore::new()),
            durable,
            connector,
        ))
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[must_use]
    pub fn prefetcher(&self) -> &Arc<Prefetcher> {
        &self.prefetcher
    }

    /// Opens a view of `file`, a file of the given kind.
    #[must_use]
    pub fn mount(&self, file: &str, kind: MediaKind) -> ViewerSession {
        let directory = routing::dirname(file).to_string();
        let navigator = MediaNavigator::builder(
            Arc::clone(&self.cache),
            Arc::clone(&self.durable),
            Arc::clone(&self.prefetcher),
        )
        .endpoints(self.endpoints.clone())
        .build(directory, file, kind);

        tracing::info!(file, %kind, "viewer mounted");
        ViewerSession {
            navigator,
            listing: Arc::clone(&self.listing),
            prefetcher: Arc::clone(&self.prefetcher),
            connector: self.connector.clone(),
            video_timeout: self.video_timeout,
            video_task: Mutex::new(None),
        }
    }

    /// Opens the view addressed by a viewer URL (`...?f=<file>&mt=<mimetype>`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL lacks a file or its MIME type is
    /// not an image, video or text type.
    pub fn mount_url(&self, url: &str) -> Result<ViewerSession> {
        let vars = routing::query_vars(&routing::clean_template_url(url));
        let file = vars
            .get("f")
            .filter(|f| !f.is_empty())
            .ok_or_else(|| Error::Config(format!("viewer URL has no file: {url}")))?;
        let mimetype = vars.get("mt").map(String::as_str).unwrap_or_default();
        let kind = MediaKind::from_mimetype(mimetype)
            .ok_or_else(|| Error::Config(format!("unsupported media type: {mimetype:?}")))?;
        Ok(self.mount(file, kind))
    }

    /// Drops cached lists of `directory` after files were added to it.
    pub fn upload_finished(&self, directory: &str) {
        tracing::debug!(directory, "upload finished, invalidating media lists");
        self.cache.invalidate_directory(directory);
    }
}

impl std::fmt::Debug for ViewerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerContext")
            .field("endpoints", &self.endpoints)
            .field("video_timeout", &self.video_timeout)
            .field("cache", &self.cache)
            .field("video", &self.connector.is_some())
            .finish_non_exhaustive()
    }
}

/// One viewed file.
pub struct ViewerSession {
    navigator: MediaNavigator,
    listing: Arc<dyn DirectoryListing>,
    prefetcher: Arc<Prefetcher>,
    connector: Option<Arc<dyn ChannelConnector>>,
    video_timeout: VideoTimeout,
    video_task: Mutex<Option<AbortHandle>>,
}

impl ViewerSession {
    pub fn navigator(&self) -> &MediaNavigator {
        &self.navigator
    }

    fn video_task(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.video_task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Dimensions and type of the file being viewed.
    ///
    /// # Errors
    ///
    /// Returns the listing service's error.
    pub async fn media_info(&self) -> Result<MediaInfo> {
        let file = self.navigator.current_identifier();
        self.listing
            .fetch_media_info(self.navigator.directory(), &file)
            .await
    }

    /// Warms the prefetch cache with the file being viewed.
    ///
    /// Videos are streamed rather than downloaded, so this does nothing for
    /// them.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error.
    pub async fn prefetch_current(&self) -> Result<()> {
        if self.navigator.kind() == MediaKind::Video {
            return Ok(());
        }
        let url = self
            .navigator
            .endpoints()
            .serve(&self.navigator.current_identifier());
        self.prefetcher.prefetch(&url).await?;
        Ok(())
    }

    /// Contents of the text file being viewed.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error.
    pub async fn read_text(&self) -> Result<String> {
        let file = self.navigator.current_identifier();
        self.navigator.fetch_text(&file).await
    }

    /// Negotiates playback of the video being viewed and returns its URL.
    ///
    /// A second call cancels the first. [`ViewerSession::teardown`] cancels
    /// the negotiation, which then fails with [`VideoError::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::Connect`] when no channel is configured, the
    /// media info error, or any negotiation error.
    pub async fn play_video(&self) -> Result<String> {
        let connector = self
            .connector
            .clone()
            .ok_or_else(|| VideoError::Connect("no socket URL configured".to_string()))?;
        let info = self.media_info().await?;
        let shell_location = self.navigator.current_identifier();
        let timeout = self.video_timeout;

        let task = tokio::spawn(async move {
            connect_and_negotiate(connector.as_ref(), &info, &shell_location, timeout).await
        });
        if let Some(previous) = self.video_task().replace(task.abort_handle()) {
            previous.abort();
        }

        match task.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(VideoError::Cancelled.into()),
            Err(err) => Err(VideoError::Connect(err.to_string()).into()),
        }
    }

    /// Stops the slideshow and cancels video negotiation.
    pub fn teardown(&self) {
        self.navigator.stop_slideshow();
        if let Some(task) = self.video_task().take() {
            task.abort();
            tracing::debug!("video negotiation cancelled");
        }
    }
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ViewerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerSession")
            .field("navigator", &self.navigator)
            .field("video_timeout", &self.video_timeout)
            .finish_non_exhaustive()
    }
}
