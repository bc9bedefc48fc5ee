use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Raw image bytes as served by the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl RawImage {
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }
}

/// Port for the remote folder/image/story repository
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// All folder paths
    async fn folder_paths(&self) -> Result<Vec<String>, RemoteError>;

    /// All story paths
    async fn story_paths(&self) -> Result<Vec<String>, RemoteError>;

    /// Image paths inside one folder
    async fn image_paths(&self, folder: &str) -> Result<Vec<String>, RemoteError>;

    /// Raw bytes of one image
    async fn image_bytes(&self, path: &str) -> Result<RawImage, RemoteError>;

    /// Story markup
    async fn story_content(&self, path: &str) -> Result<String, RemoteError>;
}
