use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::application::ports::{CacheInvalidation, LogSink, RemoteRepository};
use crate::domain::entities::ImageRecord;
use crate::domain::value_objects::{LogBody, LogLevel};

type Slot = Arc<OnceCell<Arc<[ImageRecord]>>>;

/// Lazily populated map from folder path to its image list.
///
/// A folder is fetched at most once between invalidations. Concurrent
/// `ensure_loaded` calls for the same folder share a single fetch. A failed
/// fetch settles as an empty list and is not retried until `invalidate_all`.
pub struct FolderImageCache {
    remote: Arc<dyn RemoteRepository>,
    log: Arc<dyn LogSink>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl FolderImageCache {
    pub fn new(remote: Arc<dyn RemoteRepository>, log: Arc<dyn LogSink>) -> Self {
        Self {
            remote,
            log,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the folder's images, fetching them on first use
    pub async fn ensure_loaded(&self, folder: &str) -> Arc<[ImageRecord]> {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(folder.to_string()).or_default())
        };

        let images = slot.get_or_init(|| self.fetch(folder)).await;
        Arc::clone(images)
    }

    /// Images of a folder whose load has finished
    pub fn get(&self, folder: &str) -> Option<Arc<[ImageRecord]>> {
        self.slots
            .lock()
            .get(folder)
            .and_then(|slot| slot.get().cloned())
    }

    pub fn is_loaded(&self, folder: &str) -> bool {
        self.get(folder).is_some()
    }

    /// Number of folders with a finished load
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry; the next `ensure_loaded` fetches again
    pub fn invalidate_all(&self) {
        self.slots.lock().clear();
    }

    async fn fetch(&self, folder: &str) -> Arc<[ImageRecord]> {
        self.log.record(
            LogLevel::Info,
            "Loading folder images",
            LogBody::text(folder),
        );

        match self.remote.image_paths(folder).await {
            Ok(paths) => {
                let images: Arc<[ImageRecord]> =
                    paths.into_iter().map(ImageRecord::from_path).collect();
                debug!(folder, count = images.len(), "Folder images loaded");
                self.log.record(
                    LogLevel::Info,
                    "Loaded folder images",
                    LogBody::Structured(serde_json::json!({
                        "folder": folder,
                        "count": images.len(),
                    })),
                );
                images
            }
            Err(e) => {
                warn!(folder, error = %e, "Failed to load folder images");
                self.log.record(
                    LogLevel::Error,
                    "Failed to load folder images",
                    LogBody::Structured(serde_json::json!({
                        "folder": folder,
                        "error": e.to_string(),
                    })),
                );
                Arc::from(Vec::new())
            }
        }
    }
}

impl CacheInvalidation for FolderImageCache {
    fn invalidate_all(&self) {
        FolderImageCache::invalidate_all(self);
    }

    fn cache_name(&self) -> &'static str {
        "folder images"
    }
}
