// SPDX-License-Identifier: MPL-2.0
//! Test doubles for the application ports.
//!
//! The fakes count their calls so tests can assert how many network round
//! trips an operation cost, and the listing fake can hold responses back
//! behind a gate to exercise requests that are still in flight.

use crate::application::port::{
    ChannelConnector, ChannelEvent, DirectoryListing, ResourceFetcher, VideoChannel,
};
use crate::domain::media::{MediaInfo, MediaKind, MediaList};
use crate::error::{Error, HttpError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// In-memory listing service.
pub struct FakeListing {
    lists: Mutex<HashMap<(String, MediaKind), MediaList>>,
    infos: Mutex<HashMap<String, MediaInfo>>,
    list_calls: AtomicUsize,
    info_calls: AtomicUsize,
    fail: AtomicBool,
    gate: watch::Sender<bool>,
}

impl FakeListing {
    pub fn new() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            lists: Mutex::new(HashMap::new()),
            infos: Mutex::new(HashMap::new()),
            list_calls: AtomicUsize::new(0),
            info_calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            gate,
        }
    }

    pub fn with_list(self, directory: &str, kind: MediaKind, ids: &[&str]) -> Self {
        self.set_list(directory, kind, ids);
        self
    }

    pub fn set_list(&self, directory: &str, kind: MediaKind, ids: &[&str]) {
        self.lists.lock().unwrap().insert(
            (directory.to_string(), kind),
            MediaList::from_identifiers(ids.iter().copied()),
        );
    }

    pub fn with_info(self, file: &str, mimetype: &str) -> Self {
        let filename = file.rsplit('/').next().unwrap_or(file).to_string();
        self.infos.lock().unwrap().insert(
            file.to_string(),
            MediaInfo {
                width: 640,
                height: 480,
                filename,
                mimetype: mimetype.to_string(),
            },
        );
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Holds list responses until [`FakeListing::open_gate`] is called.
    pub fn close_gate(&self) {
        self.gate.send_replace(false);
    }

    pub fn open_gate(&self) {
        self.gate.send_replace(true);
    }

    fn failure(&self) -> Option<Error> {
        self.fail
            .load(Ordering::SeqCst)
            .then(|| Error::Http(HttpError::Transport("connection refused".into())))
    }
}

#[async_trait]
impl DirectoryListing for FakeListing {
    async fn fetch_media_list(&self, directory: &str, kind: MediaKind) -> Result<MediaList> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.subscribe();
        let released = gate.wait_for(|open| *open).await.is_ok();
        if !released {
            return Err(Error::Http(HttpError::Transport("listing dropped".into())));
        }
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self
            .lists
            .lock()
            .unwrap()
            .get(&(directory.to_string(), kind))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_media_info(&self, _directory: &str, file: &str) -> Result<MediaInfo> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.infos
            .lock()
            .unwrap()
            .get(file)
            .cloned()
            .ok_or_else(|| {
                Error::Http(HttpError::Status {
                    url: format!("/mediainfo?file={file}"),
                    status: 404,
                })
            })
    }
}

/// Records every fetched URL and echoes it back as the body.
#[derive(Default)]
pub struct RecordingFetcher {
    urls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(url.as_bytes().to_vec())
    }
}

/// Channel replaying scripted server events and recording what was emitted.
pub struct ScriptedChannel {
    incoming: VecDeque<ChannelEvent>,
    emitted: Arc<Mutex<Vec<ChannelEvent>>>,
    closed: Arc<AtomicBool>,
    hang: bool,
}

#[async_trait]
impl VideoChannel for ScriptedChannel {
    async fn emit(&mut self, event: ChannelEvent) -> Result<()> {
        self.emitted.lock().unwrap().push(event);
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<ChannelEvent>> {
        match self.incoming.pop_front() {
            Some(event) => Ok(Some(event)),
            None if self.hang => std::future::pending().await,
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out [`ScriptedChannel`]s that all share one script and one log.
#[derive(Clone)]
pub struct ScriptedConnector {
    script: Vec<ChannelEvent>,
    /// Never answer once the script runs out, instead of closing.
    pub hang: bool,
    pub emitted: Arc<Mutex<Vec<ChannelEvent>>>,
    pub closed: Arc<AtomicBool>,
}

impl ScriptedConnector {
    pub fn new(script: Vec<ChannelEvent>) -> Self {
        Self {
            script,
            hang: false,
            emitted: Arc::default(),
            closed: Arc::default(),
        }
    }

    pub fn emitted_names(&self) -> Vec<String> {
        self.emitted
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event.clone())
            .collect()
    }

    pub fn open(&self) -> ScriptedChannel {
        ScriptedChannel {
            incoming: self.script.iter().cloned().collect(),
            emitted: Arc::clone(&self.emitted),
            closed: Arc::clone(&self.closed),
            hang: self.hang,
        }
    }
}

#[async_trait]
impl ChannelConnector for ScriptedConnector {
    async fn connect(&self) -> Result<Box<dyn VideoChannel>> {
        Ok(Box::new(self.open()))
    }
}
