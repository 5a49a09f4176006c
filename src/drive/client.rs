use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::metrics::{LookupMetrics, RequestKind};
use super::node::{DriveFile, FileList, RemoteNode};
use super::query::{Field, SearchQuery, field_list};
use super::LookupService;
use crate::error::LookupError;

/// Drive v3 REST endpoint
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Configuration for creating a Drive client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Drive API, without the trailing `/files`
    pub api_base: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Upper bound on result pages followed for a single search
    pub max_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            max_pages: 1,
        }
    }
}

/// HTTP client for the Drive `files` resource
pub struct DriveClient {
    http: Client,
    files_url: Url,
    max_pages: usize,
    metrics: Arc<LookupMetrics>,
}

impl DriveClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = config.api_base.trim_end_matches('/');
        let files_url = Url::parse(&format!("{base}/files"))
            .context(format!("Invalid Drive API base URL: {}", config.api_base))?;
        if files_url.cannot_be_a_base() {
            bail!("Drive API base URL cannot hold a path: {}", config.api_base);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(DriveClient {
            http,
            files_url,
            max_pages: config.max_pages.max(1),
            metrics: LookupMetrics::new(),
        })
    }

    /// Shared handle to this client's request metrics
    pub fn metrics(&self) -> Arc<LookupMetrics> {
        Arc::clone(&self.metrics)
    }

    fn file_url(&self, id: &str) -> Url {
        let mut url = self.files_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    /// Issue a GET and decode the body.
    /// Returns `Ok(None)` only for a 404 on a point lookup.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &str,
        kind: RequestKind,
    ) -> Result<Option<T>, LookupError> {
        let started = Instant::now();
        let resp = match self.http.get(url).bearer_auth(token).send().await {
            Ok(resp) => resp,
            Err(e) => {
                self.metrics.record_request(kind, None, started.elapsed());
                return Err(e.into());
            }
        };

        let status = resp.status();
        self.metrics
            .record_request(kind, Some(status.as_u16()), started.elapsed());

        match status {
            StatusCode::OK => Ok(Some(resp.json::<T>().await?)),
            StatusCode::UNAUTHORIZED => {
                warn!("Drive API rejected the access token");
                Err(LookupError::Unauthorized)
            }
            StatusCode::NOT_FOUND if kind == RequestKind::Get => Ok(None),
            _ => {
                let body = resp.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "unexpected Drive API status");
                Err(LookupError::Service {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl LookupService for DriveClient {
    async fn search(
        &self,
        token: &str,
        query: &SearchQuery,
        fields: &[Field],
    ) -> Result<Vec<RemoteNode>, LookupError> {
        let requested = fields;
        let q = query.to_string();
        let fields = format!("nextPageToken, files({})", field_list(fields));

        let mut nodes = Vec::new();
        let mut page_token: Option<String> = None;
        for page in 0..self.max_pages {
            let mut url = self.files_url.clone();
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair("q", &q);
                pairs.append_pair("fields", &fields);
                if let Some(cursor) = &page_token {
                    pairs.append_pair("pageToken", cursor);
                }
            }

            let list: FileList = self
                .get_json(url, token, RequestKind::Search)
                .await?
                .unwrap_or_default();
            debug!(page, files = list.files.len(), "search page received");
            nodes.extend(
                list.files
                    .into_iter()
                    .filter_map(|file| file.with_requested(requested).into_node()),
            );

            match list.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(nodes)
    }

    async fn get_by_id(
        &self,
        token: &str,
        id: &str,
        fields: &[Field],
    ) -> Result<Option<RemoteNode>, LookupError> {
        let mut url = self.file_url(id);
        url.query_pairs_mut()
            .append_pair("fields", &field_list(fields));

        let file: Option<DriveFile> = self.get_json(url, token, RequestKind::Get).await?;
        Ok(file.and_then(|file| {
            let mut file = file.with_requested(fields);
            file.id.get_or_insert_with(|| id.to_string());
            file.into_node()
        }))
    }
}
