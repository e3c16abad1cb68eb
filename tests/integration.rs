// SPDX-License-Identifier: MPL-2.0
use async_trait::async_trait;
use flfm_viewer::app::ViewerContext;
use flfm_viewer::application::port::storage::SLIDESHOW_DELAY_KEY;
use flfm_viewer::application::port::{
    ChannelConnector, ChannelEvent, DirectoryListing, PersistenceStore, ResourceFetcher,
    VideoChannel,
};
use flfm_viewer::application::query::{NavigationEffect, NavigatorEvent};
use flfm_viewer::config::{self, Config};
use flfm_viewer::domain::media::{MediaInfo, MediaKind, MediaList};
use flfm_viewer::domain::viewer::SlideshowDelay;
use flfm_viewer::error::{Error, HttpError, Result};
use flfm_viewer::infrastructure::{DurableStore, SessionStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Serves a fixed directory tree.
#[derive(Default)]
struct Server {
    lists: HashMap<(String, MediaKind), Vec<&'static str>>,
    list_calls: AtomicUsize,
    downloads: Mutex<Vec<String>>,
}

impl Server {
    fn with(mut self, directory: &str, kind: MediaKind, ids: Vec<&'static str>) -> Self {
        self.lists.insert((directory.to_string(), kind), ids);
        self
    }
}

#[async_trait]
impl DirectoryListing for Server {
    async fn fetch_media_list(&self, directory: &str, kind: MediaKind) -> Result<MediaList> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let ids = self
            .lists
            .get(&(directory.to_string(), kind))
            .cloned()
            .unwrap_or_default();
        Ok(MediaList::from_identifiers(ids))
    }

    async fn fetch_media_info(&self, _directory: &str, file: &str) -> Result<MediaInfo> {
        let mimetype = match file.rsplit('.').next() {
            Some("mp4") => "video/mp4",
            Some("webm") => "video/webm",
            _ => {
                return Err(Error::Http(HttpError::Status {
                    url: file.to_string(),
                    status: 404,
                }))
            }
        };
        Ok(MediaInfo {
            width: 1920,
            height: 1080,
            filename: file.rsplit('/').next().unwrap_or(file).to_string(),
            mimetype: mimetype.to_string(),
        })
    }
}

#[async_trait]
impl ResourceFetcher for Server {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(url.to_string());
        Ok(format!("contents of {url}").into_bytes())
    }
}

/// Answers every preparation request with a stream URL.
struct StreamingPeer;

struct PeerChannel {
    pending: Option<String>,
}

#[async_trait]
impl VideoChannel for PeerChannel {
    async fn emit(&mut self, event: ChannelEvent) -> Result<()> {
        if event.event == "prepare video" {
            let filename = event.data["data"]["filename"].as_str().unwrap_or_default();
            self.pending = Some(json!({"video_url": format!("http://nas/videos/{filename}")}).to_string());
        }
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<ChannelEvent>> {
        Ok(self
            .pending
            .take()
            .map(|payload| ChannelEvent::new("video ready", Value::String(payload))))
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ChannelConnector for StreamingPeer {
    async fn connect(&self) -> Result<Box<dyn VideoChannel>> {
        Ok(Box::new(PeerChannel { pending: None }))
    }
}

fn context(server: &Arc<Server>, durable: Arc<dyn PersistenceStore>) -> ViewerContext {
    let config = Config {
        server_origin: Some("http://nas".to_string()),
        root: Some("/flfm/".to_string()),
        ..Config::default()
    };
    ViewerContext::new(
        &config,
        server.clone(),
        server.clone(),
        Arc::new(SessionStore::new()),
        durable,
        Some(Arc::new(StreamingPeer)),
    )
}

#[tokio::test]
async fn browsing_a_directory_from_a_viewer_url() {
    let server = Arc::new(Server::default().with(
        "/photos",
        MediaKind::Image,
        vec!["/photos/a.jpg", "/photos/b.jpg", "/photos/c.jpg"],
    ));
    let ctx = context(&server, Arc::new(SessionStore::new()));

    let session = ctx
        .mount_url("http://nas/flfm/view?f=/photos/b.jpg&mt=image/jpeg")
        .expect("mount");
    let nav = session.navigator();

    let next = nav.step_next().await.expect("next");
    assert_eq!(
        next,
        Some(NavigationEffect::Prefetch(
            "http://nas/flfm/serve?f=/photos/c.jpg&dl=1".to_string()
        ))
    );
    assert_eq!(nav.step_next().await.expect("at end"), None);

    nav.step_previous().await.expect("back");
    nav.step_previous().await.expect("back again");
    assert_eq!(nav.current_identifier(), "/photos/a.jpg");

    assert_eq!(server.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sessions_share_the_list_cache_until_upload() {
    let server = Arc::new(Server::default().with(
        "/photos",
        MediaKind::Image,
        vec!["/photos/a.jpg", "/photos/b.jpg"],
    ));
    let ctx = context(&server, Arc::new(SessionStore::new()));

    let first = ctx.mount("/photos/a.jpg", MediaKind::Image);
    first.navigator().step_next().await.expect("step");
    drop(first);

    let second = ctx.mount("/photos/b.jpg", MediaKind::Image);
    second.navigator().step_previous().await.expect("step");
    assert_eq!(server.list_calls.load(Ordering::SeqCst), 1);

    ctx.upload_finished("/photos");
    second.navigator().step_next().await.expect("step after upload");
    assert_eq!(server.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn video_navigation_redirects_and_plays() {
    let server = Arc::new(Server::default().with(
        "/movies",
        MediaKind::Video,
        vec!["/movies/one.mp4", "/movies/two.webm"],
    ));
    let ctx = context(&server, Arc::new(SessionStore::new()));

    let session = ctx.mount("/movies/one.mp4", MediaKind::Video);
    let url = session.play_video().await.expect("play");
    assert_eq!(url, "http://nas/videos/one.mp4?start=0");

    let effect = session.navigator().step_next().await.expect("next video");
    assert_eq!(
        effect,
        Some(NavigationEffect::Redirect(
            "http://nas/flfm/view?f=/movies/two.webm&mt=video/webm".to_string()
        ))
    );
    assert!(server.downloads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn text_files_are_read_through_the_serve_route() {
    let server = Arc::new(Server::default().with(
        "/notes",
        MediaKind::Text,
        vec!["/notes/a.txt", "/notes/b.txt"],
    ));
    let ctx = context(&server, Arc::new(SessionStore::new()));

    let session = ctx.mount("/notes/a.txt", MediaKind::Text);
    session.navigator().step_next().await.expect("next");
    let text = session.read_text().await.expect("read");

    assert_eq!(text, "contents of http://nas/flfm/serve?f=/notes/b.txt&dl=1");
    assert_eq!(server.downloads.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slideshow_delay_survives_restart() {
    let dir = tempdir().expect("temp dir");
    let server = Arc::new(Server::default().with(
        "/photos",
        MediaKind::Image,
        vec!["/photos/a.jpg", "/photos/b.jpg"],
    ));

    {
        let durable = Arc::new(DurableStore::open_in(Some(dir.path().to_path_buf())).expect("open"));
        let ctx = context(&server, durable);
        let session = ctx.mount("/photos/a.jpg", MediaKind::Image);
        session
            .navigator()
            .set_slideshow_delay(SlideshowDelay::new(1500))
            .expect("save delay");
    }

    let durable = Arc::new(DurableStore::open_in(Some(dir.path().to_path_buf())).expect("reopen"));
    assert_eq!(durable.get(SLIDESHOW_DELAY_KEY).as_deref(), Some("1500"));

    let ctx = context(&server, durable);
    let session = ctx.mount("/photos/a.jpg", MediaKind::Image);
    let mut events = session.navigator().subscribe();
    assert_eq!(
        session.navigator().start_slideshow_with_saved_delay(),
        SlideshowDelay::new(1500)
    );

    let mut visited = Vec::new();
    while visited.len() < 3 {
        if let NavigatorEvent::Navigated { identifier, .. } = events.recv().await.expect("event") {
            visited.push(identifier);
        }
    }
    session.teardown();

    assert_eq!(visited, vec!["/photos/b.jpg", "/photos/a.jpg", "/photos/b.jpg"]);
    assert!(!session.navigator().is_slideshow_running());
}

#[test]
fn config_round_trip_through_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");
    let config = Config {
        server_origin: Some("http://nas:5000".to_string()),
        socket_url: Some("ws://nas:5000/socket".to_string()),
        video_timeout_secs: Some(10),
        ..Config::default()
    };

    config::save_to_path(&config, &path).expect("save");
    let loaded = config::load_from_path(&path).expect("load");

    assert_eq!(loaded, config);
    assert_eq!(
        loaded.endpoints().serve("/a.jpg"),
        "http://nas:5000/serve?f=/a.jpg&dl=1"
    );
}
