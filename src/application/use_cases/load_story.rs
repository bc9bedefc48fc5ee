use std::sync::Arc;

use crate::application::errors::StoryError;
use crate::application::ports::{LogSink, RemoteRepository};
use crate::domain::entities::StoryContent;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{LogBody, LogLevel};

/// Use case: fetch the markup of one story
pub struct LoadStoryUseCase {
    remote: Arc<dyn RemoteRepository>,
    log: Arc<dyn LogSink>,
}

impl LoadStoryUseCase {
    pub fn new(remote: Arc<dyn RemoteRepository>, log: Arc<dyn LogSink>) -> Self {
        Self { remote, log }
    }

    pub async fn execute(&self, path: &str) -> Result<StoryContent, StoryError> {
        if path.trim().is_empty() {
            return Err(DomainError::EmptyPath.into());
        }

        let body = self.remote.story_content(path).await.map_err(|e| {
            tracing::error!(%e, "Failed to load story {}", path);
            self.log.record(
                LogLevel::Error,
                "Failed to load story",
                LogBody::Structured(serde_json::json!({
                    "path": path,
                    "error": e.to_string(),
                })),
            );
            e
        })?;

        self.log.record(
            LogLevel::Info,
            "Loaded story",
            LogBody::Structured(serde_json::json!({
                "path": path,
                "length": body.len(),
            })),
        );

        Ok(StoryContent::new(path, body))
    }
}
