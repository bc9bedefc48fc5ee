use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key the last selection is stored under
pub const LAST_SELECTION_KEY: &str = "lastSelection";

/// Port for persisting the last selection as an opaque string
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Stored value, `None` if nothing was saved yet
    async fn load(&self) -> Result<Option<String>, StoreError>;

    async fn save(&self, value: String) -> Result<(), StoreError>;
}
