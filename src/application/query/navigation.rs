// SPDX-License-Identifier: MPL-2.0
//! Media navigation over the cached sibling list.
//!
//! A `MediaNavigator` follows one file being viewed. It loads the list of
//! same-kind siblings through the session cache, steps along its links and
//! reports what the presentation layer must do next: warm the resource for
//! an image or text file, or redirect to the viewer page for a video.
//!
//! The navigator is a cheap handle around shared state, so a slideshow task
//! and UI handlers can drive the same instance.

use crate::application::port::storage::SLIDESHOW_DELAY_KEY;
use crate::application::port::PersistenceStore;
use crate::application::query::cache::{ListKey, MediaListCache};
use crate::application::slideshow::Slideshow;
use crate::config::Config;
use crate::domain::media::{MediaEntry, MediaKind, MediaList};
use crate::domain::viewer::SlideshowDelay;
use crate::error::Result;
use crate::media::prefetch::Prefetcher;
use crate::routing::Endpoints;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::broadcast;

/// Capacity of the event channel; slow subscribers lose the oldest events.
const EVENT_CAPACITY: usize = 16;

/// What the presentation layer does after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEffect {
    /// Show the resource at this URL; it has already been fetched into the
    /// prefetch cache when prefetching is enabled.
    Prefetch(String),
    /// Leave the page for this viewer URL.
    Redirect(String),
}

impl NavigationEffect {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Prefetch(url) | Self::Redirect(url) => url,
        }
    }
}

/// Notifications for subscribers that did not trigger the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorEvent {
    Navigated {
        identifier: String,
        effect: NavigationEffect,
    },
    SlideshowStarted {
        delay: SlideshowDelay,
    },
    SlideshowStopped,
}

/// Navigation state snapshot for rendering controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInfo {
    /// Whether a manual step forward would move.
    pub has_next: bool,
    /// Whether a manual step back would move.
    pub has_previous: bool,
    /// Position of the current file, if the list contains it.
    pub current_index: Option<usize>,
    pub total_count: usize,
    pub slideshow_running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
    /// Forward, wrapping to the head at the end of the list.
    Advance,
}

impl Step {
    fn target(self, list: &MediaList, entry: &MediaEntry) -> Option<String> {
        match self {
            Self::Next => entry.next.clone(),
            Self::Previous => entry.prev.clone(),
            Self::Advance => entry
                .next
                .clone()
                .or_else(|| list.first().map(|head| head.cur.clone())),
        }
    }
}

struct Inner {
    key: ListKey,
    directory: String,
    kind: MediaKind,
    endpoints: Endpoints,
    cache: Arc<MediaListCache>,
    durable: Arc<dyn PersistenceStore>,
    prefetcher: Arc<Prefetcher>,
    current: Mutex<String>,
    slideshow: Slideshow,
    events: broadcast::Sender<NavigatorEvent>,
}

/// Configures a [`MediaNavigator`].
pub struct NavigatorBuilder {
    cache: Arc<MediaListCache>,
    durable: Arc<dyn PersistenceStore>,
    prefetcher: Arc<Prefetcher>,
    endpoints: Option<Endpoints>,
}

impl NavigatorBuilder {
    pub fn new(
        cache: Arc<MediaListCache>,
        durable: Arc<dyn PersistenceStore>,
        prefetcher: Arc<Prefetcher>,
    ) -> Self {
        Self {
            cache,
            durable,
            prefetcher,
            endpoints: None,
        }
    }

    /// Serving and viewer URLs. Defaults to the routes of [`Config::default`].
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Builds a navigator positioned on `current` among the `kind` files of
    /// `directory`.
    pub fn build(
        self,
        directory: impl Into<String>,
        current: impl Into<String>,
        kind: MediaKind,
    ) -> MediaNavigator {
        let directory = directory.into();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        MediaNavigator {
            inner: Arc::new(Inner {
                key: ListKey::new(directory.clone(), kind),
                directory,
                kind,
                endpoints: self
                    .endpoints
                    .unwrap_or_else(|| Config::default().endpoints()),
                cache: self.cache,
                durable: self.durable,
                prefetcher: self.prefetcher,
                current: Mutex::new(current.into()),
                slideshow: Slideshow::new(),
                events,
            }),
        }
    }
}

/// Steps through sibling media and drives the slideshow.
#[derive(Clone)]
pub struct MediaNavigator {
    inner: Arc<Inner>,
}

impl MediaNavigator {
    pub fn builder(
        cache: Arc<MediaListCache>,
        durable: Arc<dyn PersistenceStore>,
        prefetcher: Arc<Prefetcher>,
    ) -> NavigatorBuilder {
        NavigatorBuilder::new(cache, durable, prefetcher)
    }

    fn current_slot(&self) -> MutexGuard<'_, String> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Identifier of the file being viewed.
    #[must_use]
    pub fn current_identifier(&self) -> String {
        self.current_slot().clone()
    }

    #[must_use]
    pub fn directory(&self) -> &str {
        &self.inner.directory
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.inner.kind
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// Loads the sibling list, from the session store when it is fresh.
    ///
    /// # Errors
    ///
    /// Returns the listing service's error when a fetch is needed and fails.
    pub async fn load_media_list(&self) -> Result<Arc<MediaList>> {
        let current = self.current_identifier();
        self.inner.cache.load(&self.inner.key, &current).await
    }

    /// Entry of the file being viewed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::NavigationError::NotInList`] when `list` does
    /// not contain it.
    pub fn current<'a>(&self, list: &'a MediaList) -> Result<&'a MediaEntry> {
        Ok(list.current(&self.current_slot())?)
    }

    /// Moves to the next sibling. Returns `Ok(None)` at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list or media info cannot be loaded, or the
    /// current file is missing from the list. The position is unchanged.
    pub async fn step_next(&self) -> Result<Option<NavigationEffect>> {
        self.step(Step::Next).await
    }

    /// Moves to the previous sibling. Returns `Ok(None)` at the head.
    ///
    /// # Errors
    ///
    /// Same as [`MediaNavigator::step_next`].
    pub async fn step_previous(&self) -> Result<Option<NavigationEffect>> {
        self.step(Step::Previous).await
    }

    /// Slideshow step: moves forward and wraps to the first entry at the end.
    ///
    /// # Errors
    ///
    /// Same as [`MediaNavigator::step_next`].
    pub async fn auto_advance(&self) -> Result<Option<NavigationEffect>> {
        self.step(Step::Advance).await
    }

    async fn step(&self, step: Step) -> Result<Option<NavigationEffect>> {
        let from = self.current_identifier();
        let list = self.inner.cache.load(&self.inner.key, &from).await?;
        let entry = list.current(&from)?;

        let Some(target) = step.target(&list, entry) else {
            tracing::debug!(current = %from, ?step, "no sibling in that direction");
            return Ok(None);
        };
        if target == from {
            return Ok(None);
        }

        let effect = self.effect_for(&target).await?;
        *self.current_slot() = target.clone();
        tracing::debug!(from = %from, to = %target, ?step, "navigated");

        if let NavigationEffect::Prefetch(url) = &effect {
            self.prefetch(url).await;
        }

        let _ = self.inner.events.send(NavigatorEvent::Navigated {
            identifier: target,
            effect: effect.clone(),
        });
        Ok(Some(effect))
    }

    async fn effect_for(&self, target: &str) -> Result<NavigationEffect> {
        let inner = &self.inner;
        match inner.kind {
            MediaKind::Image | MediaKind::Text => {
                Ok(NavigationEffect::Prefetch(inner.endpoints.serve(target)))
            }
            MediaKind::Video => {
                let info = inner
                    .cache
                    .listing()
                    .fetch_media_info(&inner.directory, target)
                    .await?;
                Ok(NavigationEffect::Redirect(
                    inner.endpoints.viewer(target, &info.mimetype),
                ))
            }
        }
    }

    async fn prefetch(&self, url: &str) {
        let prefetcher = &self.inner.prefetcher;
        if !prefetcher.is_enabled() {
            return;
        }
        if let Err(err) = prefetcher.prefetch(url).await {
            tracing::warn!(url, %err, "prefetch failed");
        }
    }

    /// Downloads a text file for display, reusing prefetched bytes.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error.
    pub async fn fetch_text(&self, identifier: &str) -> Result<String> {
        let url = self.inner.endpoints.serve(identifier);
        let bytes = self.inner.prefetcher.load(&url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Snapshot of the navigation controls' state.
    ///
    /// # Errors
    ///
    /// Returns the listing service's error when the list must be fetched.
    pub async fn navigation_info(&self) -> Result<NavigationInfo> {
        let list = self.load_media_list().await?;
        let current = self.current_identifier();
        let entry = list.current(&current).ok();

        Ok(NavigationInfo {
            has_next: entry.is_some_and(|e| e.next.is_some()),
            has_previous: entry.is_some_and(|e| e.prev.is_some()),
            current_index: list.position(&current),
            total_count: list.len(),
            slideshow_running: self.is_slideshow_running(),
        })
    }

    /// Starts auto-advancing every `delay`, replacing a running slideshow.
    ///
    /// An advance that fails stops the slideshow.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start_slideshow(&self, delay: SlideshowDelay) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.slideshow.start(delay, move || {
            let weak = weak.clone();
            async move {
                let Some(inner) = weak.upgrade() else {
                    return ControlFlow::Break(());
                };
                let navigator = MediaNavigator { inner };
                match navigator.auto_advance().await {
                    Ok(_) => ControlFlow::Continue(()),
                    Err(err) => {
                        tracing::warn!(%err, "slideshow advance failed, stopping");
                        let _ = navigator.inner.events.send(NavigatorEvent::SlideshowStopped);
                        ControlFlow::Break(())
                    }
                }
            }
        });
        let _ = self
            .inner
            .events
            .send(NavigatorEvent::SlideshowStarted { delay });
    }

    /// Starts the slideshow with the persisted delay preference.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start_slideshow_with_saved_delay(&self) -> SlideshowDelay {
        let delay = self.slideshow_delay();
        self.start_slideshow(delay);
        delay
    }

    /// Stops the slideshow. Stopping a stopped slideshow does nothing.
    pub fn stop_slideshow(&self) {
        if self.inner.slideshow.stop() {
            let _ = self.inner.events.send(NavigatorEvent::SlideshowStopped);
        }
    }

    #[must_use]
    pub fn is_slideshow_running(&self) -> bool {
        self.inner.slideshow.is_running()
    }

    /// Persisted slideshow delay, or the default when unset or unreadable.
    #[must_use]
    pub fn slideshow_delay(&self) -> SlideshowDelay {
        self.inner
            .durable
            .get(SLIDESHOW_DELAY_KEY)
            .and_then(|stored| SlideshowDelay::parse(&stored))
            .unwrap_or_default()
    }

    /// Persists the slideshow delay preference.
    ///
    /// A running slideshow keeps its delay until restarted.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable store fails to write.
    pub fn set_slideshow_delay(&self, delay: SlideshowDelay) -> Result<()> {
        self.inner
            .durable
            .set(SLIDESHOW_DELAY_KEY, &delay.millis().to_string())
    }

    /// Forgets the cached list so the next load fetches it again.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate(&self.inner.key);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigatorEvent> {
        self.inner.events.subscribe()
    }
}

impl std::fmt::Debug for MediaNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaNavigator")
            .field("directory", &self.inner.directory)
            .field("kind", &self.inner.kind)
            .field("current", &*self.current_slot())
            .field("slideshow", &self.inner.slideshow)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, NavigationError};
    use crate::infrastructure::storage::SessionStore;
    use crate::media::prefetch::PrefetchConfig;
    use crate::test_utils::{FakeListing, RecordingFetcher};
    use std::time::Duration;
    use tokio::sync::broadcast::error::TryRecvError;

    struct Fixture {
        listing: Arc<FakeListing>,
        session: Arc<SessionStore>,
        durable: Arc<SessionStore>,
        fetcher: Arc<RecordingFetcher>,
        cache: Arc<MediaListCache>,
        prefetcher: Arc<Prefetcher>,
    }

    impl Fixture {
        fn new(listing: FakeListing) -> Self {
            let listing = Arc::new(listing);
            let session = Arc::new(SessionStore::new());
            let fetcher = Arc::new(RecordingFetcher::default());
            Self {
                cache: Arc::new(MediaListCache::new(listing.clone(), session.clone())),
                prefetcher: Arc::new(Prefetcher::new(fetcher.clone(), PrefetchConfig::default())),
                listing,
                session,
                durable: Arc::new(SessionStore::new()),
                fetcher,
            }
        }

        fn images(ids: &[&str]) -> Self {
            Self::new(FakeListing::new().with_list("/pics", MediaKind::Image, ids))
        }

        fn navigator(&self, current: &str, kind: MediaKind) -> MediaNavigator {
            MediaNavigator::builder(
                Arc::clone(&self.cache),
                self.durable.clone(),
                Arc::clone(&self.prefetcher),
            )
            .endpoints(Endpoints::new("http://h/serve", "http://h/view"))
            .build("/pics", current, kind)
        }
    }

    #[tokio::test]
    async fn step_next_moves_forward_and_prefetches() {
        let fx = Fixture::images(&["a", "b", "c"]);
        let nav = fx.navigator("a", MediaKind::Image);

        let effect = nav.step_next().await.expect("step");

        assert_eq!(
            effect,
            Some(NavigationEffect::Prefetch("http://h/serve?f=b&dl=1".into()))
        );
        assert_eq!(nav.current_identifier(), "b");
        assert_eq!(fx.fetcher.urls(), vec!["http://h/serve?f=b&dl=1"]);
    }

    #[tokio::test]
    async fn manual_steps_stop_at_the_ends() {
        let fx = Fixture::images(&["a", "b", "c"]);
        let last = fx.navigator("c", MediaKind::Image);
        assert_eq!(last.step_next().await.expect("next"), None);
        assert_eq!(last.current_identifier(), "c");

        let first = fx.navigator("a", MediaKind::Image);
        assert_eq!(first.step_previous().await.expect("previous"), None);
        assert_eq!(first.current_identifier(), "a");
    }

    #[tokio::test]
    async fn auto_advance_wraps_to_head() {
        let fx = Fixture::images(&["a", "b", "c"]);
        let nav = fx.navigator("c", MediaKind::Image);

        nav.auto_advance().await.expect("advance");
        assert_eq!(nav.current_identifier(), "a");
    }

    #[tokio::test]
    async fn single_entry_list_does_not_move() {
        let fx = Fixture::images(&["a"]);
        let nav = fx.navigator("a", MediaKind::Image);
        assert_eq!(nav.auto_advance().await.expect("advance"), None);
        assert!(fx.fetcher.urls().is_empty());
    }

    #[tokio::test]
    async fn consecutive_loads_issue_one_request() {
        let fx = Fixture::images(&["a", "b"]);
        let nav = fx.navigator("a", MediaKind::Image);

        nav.load_media_list().await.expect("first");
        nav.load_media_list().await.expect("second");
        assert_eq!(fx.listing.list_calls(), 1);
    }

    #[tokio::test]
    async fn stale_cached_list_is_refetched() {
        let fx = Fixture::images(&["c", "d"]);
        fx.session
            .set(
                "MediaList:image:/pics",
                r#"[{"cur":"a","prev":null,"next":"b"},{"cur":"b","prev":"a","next":null}]"#,
            )
            .expect("seed");
        let nav = fx.navigator("c", MediaKind::Image);

        let list = nav.load_media_list().await.expect("load");

        assert_eq!(fx.listing.list_calls(), 1);
        assert_eq!(nav.current(&list).expect("current").next.as_deref(), Some("d"));
    }

    #[tokio::test]
    async fn concurrent_steps_share_one_fetch() {
        let fx = Fixture::images(&["a", "b", "c"]);
        fx.listing.close_gate();
        let nav = fx.navigator("a", MediaKind::Image);

        let release = async {
            tokio::task::yield_now().await;
            fx.listing.open_gate();
        };
        let (first, second, ()) = tokio::join!(nav.step_next(), nav.step_next(), release);

        assert_eq!(fx.listing.list_calls(), 1);
        assert_eq!(first.expect("first"), second.expect("second"));
        assert_eq!(nav.current_identifier(), "b");
    }

    #[tokio::test]
    async fn failed_load_leaves_position_untouched() {
        let fx = Fixture::images(&["a", "b"]);
        fx.listing.fail(true);
        let nav = fx.navigator("a", MediaKind::Image);

        assert!(matches!(nav.step_next().await, Err(Error::Http(_))));
        assert_eq!(nav.current_identifier(), "a");
    }

    #[tokio::test]
    async fn current_missing_from_list_is_reported() {
        let fx = Fixture::new(FakeListing::new());
        let nav = fx.navigator("ghost", MediaKind::Image);
        let list = MediaList::from_identifiers(["a"]);

        assert_eq!(
            nav.current(&list).unwrap_err(),
            Error::Navigation(NavigationError::NotInList("ghost".into()))
        );
    }

    #[tokio::test]
    async fn video_step_redirects_with_mimetype() {
        let fx = Fixture::new(
            FakeListing::new()
                .with_list("/pics", MediaKind::Video, &["/pics/a.mp4", "/pics/b.webm"])
                .with_info("/pics/b.webm", "video/webm"),
        );
        let nav = fx.navigator("/pics/a.mp4", MediaKind::Video);

        let effect = nav.step_next().await.expect("step");

        assert_eq!(
            effect,
            Some(NavigationEffect::Redirect(
                "http://h/view?f=/pics/b.webm&mt=video/webm".into()
            ))
        );
        assert_eq!(fx.listing.info_calls(), 1);
        assert!(fx.fetcher.urls().is_empty());
    }

    #[tokio::test]
    async fn video_info_failure_keeps_position() {
        let fx = Fixture::new(FakeListing::new().with_list(
            "/pics",
            MediaKind::Video,
            &["/pics/a.mp4", "/pics/b.mp4"],
        ));
        let nav = fx.navigator("/pics/a.mp4", MediaKind::Video);

        assert!(nav.step_next().await.is_err());
        assert_eq!(nav.current_identifier(), "/pics/a.mp4");
    }

    #[tokio::test]
    async fn fetch_text_reuses_prefetched_bytes() {
        let fx = Fixture::new(FakeListing::new().with_list("/pics", MediaKind::Text, &["a", "b"]));
        let nav = fx.navigator("a", MediaKind::Text);

        nav.step_next().await.expect("step");
        let text = nav.fetch_text("b").await.expect("text");

        assert_eq!(text, "http://h/serve?f=b&dl=1");
        assert_eq!(fx.fetcher.urls().len(), 1);
    }

    #[tokio::test]
    async fn navigation_info_reflects_position() {
        let fx = Fixture::images(&["a", "b", "c"]);
        let nav = fx.navigator("b", MediaKind::Image);

        let info = nav.navigation_info().await.expect("info");
        assert_eq!(
            info,
            NavigationInfo {
                has_next: true,
                has_previous: true,
                current_index: Some(1),
                total_count: 3,
                slideshow_running: false,
            }
        );
    }

    #[tokio::test]
    async fn invalidate_cache_forces_refetch() {
        let fx = Fixture::images(&["a", "b"]);
        let nav = fx.navigator("a", MediaKind::Image);

        nav.load_media_list().await.expect("load");
        nav.invalidate_cache();
        nav.load_media_list().await.expect("reload");
        assert_eq!(fx.listing.list_calls(), 2);
    }

    #[tokio::test]
    async fn slideshow_delay_preference_round_trips() {
        let fx = Fixture::images(&["a"]);
        let nav = fx.navigator("a", MediaKind::Image);
        assert_eq!(nav.slideshow_delay(), SlideshowDelay::default());

        nav.set_slideshow_delay(SlideshowDelay::new(2000)).expect("save");
        assert_eq!(fx.durable.get(SLIDESHOW_DELAY_KEY).as_deref(), Some("2000"));
        assert_eq!(nav.slideshow_delay(), SlideshowDelay::new(2000));
    }

    #[tokio::test]
    async fn unreadable_delay_preference_uses_default() {
        let fx = Fixture::images(&["a"]);
        fx.durable.set(SLIDESHOW_DELAY_KEY, "soon").expect("seed");
        let nav = fx.navigator("a", MediaKind::Image);
        assert_eq!(nav.slideshow_delay(), SlideshowDelay::default());
    }

    #[tokio::test(start_paused = true)]
    async fn slideshow_advances_and_wraps() {
        let fx = Fixture::images(&["a", "b"]);
        let nav = fx.navigator("a", MediaKind::Image);
        let mut events = nav.subscribe();

        nav.start_slideshow(SlideshowDelay::new(1000));
        assert_eq!(
            events.recv().await.expect("started"),
            NavigatorEvent::SlideshowStarted {
                delay: SlideshowDelay::new(1000)
            }
        );

        let mut visited = Vec::new();
        for _ in 0..3 {
            match events.recv().await.expect("event") {
                NavigatorEvent::Navigated { identifier, .. } => visited.push(identifier),
                other => panic!("unexpected event {other:?}"),
            }
        }
        nav.stop_slideshow();

        assert_eq!(visited, vec!["b", "a", "b"]);
        assert_eq!(fx.listing.list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_right_after_start_produces_no_advance() {
        let fx = Fixture::images(&["a", "b"]);
        let nav = fx.navigator("a", MediaKind::Image);
        let mut events = nav.subscribe();

        nav.start_slideshow(SlideshowDelay::new(1000));
        nav.stop_slideshow();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(nav.current_identifier(), "a");
        assert_eq!(fx.listing.list_calls(), 0);
        assert!(matches!(
            events.try_recv(),
            Ok(NavigatorEvent::SlideshowStarted { .. })
        ));
        assert_eq!(events.try_recv(), Ok(NavigatorEvent::SlideshowStopped));
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn saved_delay_drives_the_slideshow() {
        let fx = Fixture::images(&["a", "b"]);
        fx.durable.set(SLIDESHOW_DELAY_KEY, "3000").expect("seed");
        let nav = fx.navigator("a", MediaKind::Image);

        let delay = nav.start_slideshow_with_saved_delay();
        assert_eq!(delay, SlideshowDelay::new(3000));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(nav.current_identifier(), "a");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(nav.current_identifier(), "b");
        nav.stop_slideshow();
    }

    #[tokio::test(start_paused = true)]
    async fn failing_advance_stops_the_slideshow() {
        let fx = Fixture::images(&["a", "b"]);
        fx.listing.fail(true);
        let nav = fx.navigator("a", MediaKind::Image);
        let mut events = nav.subscribe();

        nav.start_slideshow(SlideshowDelay::new(1000));
        events.recv().await.expect("started");
        assert_eq!(
            events.recv().await.expect("stopped"),
            NavigatorEvent::SlideshowStopped
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!nav.is_slideshow_running());
        assert_eq!(fx.listing.list_calls(), 1);
    }
}
