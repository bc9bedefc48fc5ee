use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::application::errors::ImageError;
use crate::application::ports::{CacheInvalidation, LogSink, RemoteRepository};
use crate::domain::entities::{ImageDetails, ImageRecord};
use crate::domain::errors::DomainError;
use crate::domain::exif::{extract, AbsentReason, MetadataOutcome};
use crate::domain::value_objects::{is_jpeg_content_type, LogBody, LogLevel};

/// Use case: fetch one image and extract its metadata
///
/// Details are kept per path until the next invalidation. Fetch failures
/// are returned to the caller and never cached.
pub struct LoadImageUseCase {
    remote: Arc<dyn RemoteRepository>,
    log: Arc<dyn LogSink>,
    details: DashMap<String, ImageDetails>,
}

impl LoadImageUseCase {
    pub fn new(remote: Arc<dyn RemoteRepository>, log: Arc<dyn LogSink>) -> Self {
        Self {
            remote,
            log,
            details: DashMap::new(),
        }
    }

    pub async fn execute(&self, path: &str) -> Result<ImageDetails, ImageError> {
        // 1. Validate
        if path.trim().is_empty() {
            return Err(DomainError::EmptyPath.into());
        }

        if let Some(cached) = self.details.get(path) {
            debug!(path, "Image details served from cache");
            return Ok(cached.clone());
        }

        // 2. Fetch bytes
        let record = ImageRecord::from_path(path);
        let raw = match self.remote.image_bytes(path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(%e, "Failed to fetch image {}", path);
                self.log.record(
                    LogLevel::Error,
                    "Failed to fetch image",
                    LogBody::Structured(serde_json::json!({
                        "path": path,
                        "error": e.to_string(),
                    })),
                );
                return Err(e.into());
            }
        };

        // 3. Extract when the file is a JPEG variant by name or by type
        let looks_like_jpeg = record.format().is_jpeg()
            || raw
                .content_type
                .as_deref()
                .is_some_and(is_jpeg_content_type);
        let metadata = if looks_like_jpeg {
            extract(&raw.bytes)
        } else {
            MetadataOutcome::Absent(AbsentReason::Skipped)
        };
        self.report(path, &metadata);

        let details = ImageDetails {
            record,
            content_type: raw.content_type,
            size_bytes: raw.bytes.len() as u64,
            metadata,
        };

        // 4. Remember
        self.details.insert(path.to_string(), details.clone());
        Ok(details)
    }

    /// Details already fetched for `path`
    pub fn cached(&self, path: &str) -> Option<ImageDetails> {
        self.details.get(path).map(|entry| entry.clone())
    }

    pub fn cached_count(&self) -> usize {
        self.details.len()
    }

    fn report(&self, path: &str, metadata: &MetadataOutcome) {
        match metadata {
            MetadataOutcome::Present(fields) => self.log.record(
                LogLevel::Info,
                "Metadata extracted",
                LogBody::Structured(serde_json::json!({
                    "path": path,
                    "fields": fields,
                })),
            ),
            MetadataOutcome::Absent(reason) => {
                let level = if reason.is_format_mismatch() {
                    LogLevel::Warn
                } else {
                    LogLevel::Debug
                };
                self.log.record(
                    level,
                    "No metadata",
                    LogBody::Structured(serde_json::json!({
                        "path": path,
                        "reason": reason.to_string(),
                    })),
                );
            }
        }
    }
}

impl CacheInvalidation for LoadImageUseCase {
    fn invalidate_all(&self) {
        self.details.clear();
    }

    fn cache_name(&self) -> &'static str {
        "image details"
    }
}
