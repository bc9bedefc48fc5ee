use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::ports::{LogSink, RawImage, RemoteError, RemoteRepository};
use crate::domain::value_objects::{LogBody, LogLevel};

const USER_AGENT: &str = concat!("gallery-client/", env!("CARGO_PKG_VERSION"));

/// Remote repository backed by the gallery HTTP API.
///
/// Every request is written to the console sink: one `Info` entry per
/// completed response, one `Error` entry per failure. A body that arrives
/// but cannot be decoded counts as a failure too.
pub struct HttpRepository {
    client: Client,
    base: String,
    log: Arc<dyn LogSink>,
}

impl HttpRepository {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        log: Arc<dyn LogSink>,
    ) -> Result<Self, RemoteError> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|e| RemoteError::InvalidUrl(format!("{base}: {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self { client, base, log })
    }

    /// `{base}/{route}`, with `path` percent-encoded into the query
    pub fn endpoint(&self, route: &str, path: Option<&str>) -> Result<Url, RemoteError> {
        let raw = format!("{}/{}", self.base, route);
        let mut url = Url::parse(&raw).map_err(|e| RemoteError::InvalidUrl(format!("{raw}: {e}")))?;
        if let Some(path) = path {
            url.query_pairs_mut().append_pair("path", path);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<(Bytes, Option<String>), RemoteError> {
        let started = Instant::now();
        let header = format!("GET {url}");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Err(self.failed(&header, RemoteError::Transport(e.to_string()))),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(self.failed(
                &header,
                RemoteError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                },
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.failed(&header, RemoteError::Transport(e.to_string())))?;

        self.log.record(
            LogLevel::Info,
            &header,
            LogBody::Structured(serde_json::json!({
                "status": status.as_u16(),
                "elapsed_ms": started.elapsed().as_millis() as u64,
                "bytes": bytes.len(),
            })),
        );

        Ok((bytes, content_type))
    }

    async fn get_list(&self, url: Url) -> Result<Vec<String>, RemoteError> {
        let (bytes, _) = self.get(url.clone()).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            self.failed(
                &format!("GET {url}"),
                RemoteError::Decode(format!("invalid JSON from {url}: {e}")),
            )
        })
    }

    fn failed(&self, header: &str, error: RemoteError) -> RemoteError {
        tracing::error!(%error, "{}", header);
        self.log
            .record(LogLevel::Error, header, LogBody::text(error.to_string()));
        error
    }
}

#[async_trait]
impl RemoteRepository for HttpRepository {
    async fn folder_paths(&self) -> Result<Vec<String>, RemoteError> {
        self.get_list(self.endpoint("folders", None)?).await
    }

    async fn story_paths(&self) -> Result<Vec<String>, RemoteError> {
        self.get_list(self.endpoint("stories", None)?).await
    }

    async fn image_paths(&self, folder: &str) -> Result<Vec<String>, RemoteError> {
        self.get_list(self.endpoint("folders/images", Some(folder))?)
            .await
    }

    async fn image_bytes(&self, path: &str) -> Result<RawImage, RemoteError> {
        let (bytes, content_type) = self.get(self.endpoint("images", Some(path))?).await?;
        Ok(RawImage::new(bytes, content_type))
    }

    async fn story_content(&self, path: &str) -> Result<String, RemoteError> {
        let url = self.endpoint("stories/content", Some(path))?;
        let (bytes, _) = self.get(url.clone()).await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            self.failed(
                &format!("GET {url}"),
                RemoteError::Decode(format!("story at {url} is not UTF-8: {e}")),
            )
        })
    }
}
