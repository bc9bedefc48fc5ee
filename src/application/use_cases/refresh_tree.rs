use std::sync::Arc;
use tracing::info;

use crate::application::dto::TreeSnapshot;
use crate::application::errors::TreeError;
use crate::application::ports::{CacheInvalidation, LogSink, RemoteRepository};
use crate::domain::entities::PathTree;
use crate::domain::value_objects::{LogBody, LogLevel};

/// Use case: rebuild the folder and story trees from the remote lists.
///
/// Every refresh also fires the injected invalidations, so caches derived
/// from the previous tree are dropped.
pub struct RefreshTreeUseCase {
    remote: Arc<dyn RemoteRepository>,
    log: Arc<dyn LogSink>,
    invalidations: Vec<Arc<dyn CacheInvalidation>>,
}

impl RefreshTreeUseCase {
    pub fn new(
        remote: Arc<dyn RemoteRepository>,
        log: Arc<dyn LogSink>,
        invalidations: Vec<Arc<dyn CacheInvalidation>>,
    ) -> Self {
        Self {
            remote,
            log,
            invalidations,
        }
    }

    /// Fetch both lists and build fresh trees
    pub async fn execute(&self) -> Result<TreeSnapshot, TreeError> {
        // 1. Fetch both lists
        let (folders, stories) =
            tokio::join!(self.remote.folder_paths(), self.remote.story_paths());

        let folders = folders.map_err(|e| self.failed("folder", e))?;
        let stories = stories.map_err(|e| self.failed("story", e))?;

        // 2. Drop anything derived from the previous tree
        for cache in &self.invalidations {
            cache.invalidate_all();
            self.log
                .record(LogLevel::Debug, "Cache invalidated", LogBody::text(cache.cache_name()));
        }

        // 3. Build
        let snapshot = TreeSnapshot {
            folders: PathTree::build(&folders),
            stories: PathTree::build(&stories),
        };

        info!(
            folders = folders.len(),
            stories = stories.len(),
            "Trees rebuilt"
        );
        self.log.record(
            LogLevel::Info,
            "Trees rebuilt",
            LogBody::Structured(serde_json::json!({
                "folders": folders.len(),
                "stories": stories.len(),
            })),
        );

        Ok(snapshot)
    }

    /// Only the folder tree, leaving caches untouched
    pub async fn folders(&self) -> Result<PathTree, TreeError> {
        let paths = self
            .remote
            .folder_paths()
            .await
            .map_err(|e| self.failed("folder", e))?;
        Ok(PathTree::build(&paths))
    }

    /// Only the story tree, leaving caches untouched
    pub async fn stories(&self) -> Result<PathTree, TreeError> {
        let paths = self
            .remote
            .story_paths()
            .await
            .map_err(|e| self.failed("story", e))?;
        Ok(PathTree::build(&paths))
    }

    fn failed(&self, kind: &str, error: crate::application::ports::RemoteError) -> TreeError {
        tracing::error!(%error, "Failed to load {} list", kind);
        self.log.record(
            LogLevel::Error,
            &format!("Failed to load {} list", kind),
            LogBody::text(error.to_string()),
        );
        TreeError::Remote(error)
    }
}
