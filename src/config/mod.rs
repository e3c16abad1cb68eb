// SPDX-License-Identifier: MPL-2.0
//! This module handles the client configuration, including loading and saving
//! it to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use flfm_viewer::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Point the client at a server
//! config.server_origin = Some("http://nas.local:5000".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.server_origin, config.server_origin);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::viewer::VideoTimeout;
use crate::error::Result;
use crate::routing::{make_url, Endpoints};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scheme and host of the file manager, e.g. `http://nas.local:5000`.
    #[serde(default)]
    pub server_origin: Option<String>,
    /// Path prefix the file manager is mounted under.
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub serve_route: Option<String>,
    #[serde(default)]
    pub viewer_route: Option<String>,
    /// Socket.IO server used for video negotiation; defaults to the origin.
    #[serde(default)]
    pub socket_url: Option<String>,
    #[serde(default)]
    pub video_timeout_secs: Option<u32>,
    #[serde(default)]
    pub prefetch_cache_mb: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_origin: None,
            root: Some(DEFAULT_ROOT.to_string()),
            serve_route: Some(DEFAULT_SERVE_ROUTE.to_string()),
            viewer_route: Some(DEFAULT_VIEWER_ROUTE.to_string()),
            socket_url: None,
            video_timeout_secs: Some(DEFAULT_VIDEO_TIMEOUT_SECS),
            prefetch_cache_mb: Some(DEFAULT_PREFETCH_CACHE_MB),
        }
    }
}

impl Config {
    pub fn root(&self) -> &str {
        self.root.as_deref().unwrap_or(DEFAULT_ROOT)
    }

    pub fn serve_route(&self) -> &str {
        self.serve_route.as_deref().unwrap_or(DEFAULT_SERVE_ROUTE)
    }

    pub fn viewer_route(&self) -> &str {
        self.viewer_route.as_deref().unwrap_or(DEFAULT_VIEWER_ROUTE)
    }

    pub fn video_timeout(&self) -> VideoTimeout {
        self.video_timeout_secs
            .map(VideoTimeout::new)
            .unwrap_or_default()
    }

    pub fn prefetch_cache_bytes(&self) -> usize {
        let mb = self
            .prefetch_cache_mb
            .unwrap_or(DEFAULT_PREFETCH_CACHE_MB)
            .clamp(MIN_PREFETCH_CACHE_MB, MAX_PREFETCH_CACHE_MB);
        mb as usize * 1024 * 1024
    }

    /// Absolute URL of a route under the configured root.
    pub fn endpoint(&self, route: &str) -> String {
        make_url(self.server_origin.as_deref(), self.root(), route)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(
            self.endpoint(self.serve_route()),
            self.endpoint(self.viewer_route()),
        )
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
