// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the listing service and the serving route.

use crate::application::port::{DirectoryListing, ResourceFetcher};
use crate::config::{Config, MEDIA_INFO_ROUTE, MEDIA_LIST_ROUTE};
use crate::domain::media::{MediaEntry, MediaInfo, MediaKind, MediaList};
use crate::error::{Error, HttpError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Bound on any single request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("flfm-viewer/", env!("CARGO_PKG_VERSION"));

/// `reqwest` client bound to one server's listing endpoints.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    media_list_url: String,
    media_info_url: String,
}

impl HttpClient {
    /// Builds a client for the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Wraps an existing client.
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            media_list_url: config.endpoint(MEDIA_LIST_ROUTE),
            media_info_url: config.endpoint(MEDIA_INFO_ROUTE),
        }
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.client.post(url).form(form).send().await?;
        let response = check_status(url, response)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Http(HttpError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }))
    }
}

#[async_trait]
impl DirectoryListing for HttpClient {
    async fn fetch_media_list(&self, directory: &str, kind: MediaKind) -> Result<MediaList> {
        let entries: Vec<MediaEntry> = self
            .post_form(
                &self.media_list_url,
                &[("directory", directory), ("whatkind", kind.as_str())],
            )
            .await?;
        tracing::debug!(directory, %kind, count = entries.len(), "media list received");
        Ok(MediaList::new(entries))
    }

    async fn fetch_media_info(&self, directory: &str, file: &str) -> Result<MediaInfo> {
        self.post_form(
            &self.media_info_url,
            &[("directory", directory), ("file", file)],
        )
        .await
    }
}

#[async_trait]
impl ResourceFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let response = check_status(url, response)?;
        Ok(response.bytes().await?.to_vec())
    }
}
