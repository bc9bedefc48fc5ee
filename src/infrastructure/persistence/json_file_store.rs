use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::application::ports::{SelectionStore, StoreError, LAST_SELECTION_KEY};

/// Selection store kept in a small JSON object file.
///
/// The file holds `{ "lastSelection": "<json>" }`. Other keys found in an
/// existing file are preserved on save. Saves write a sibling temp file
/// and rename it into place.
pub struct JsonFileSelectionStore {
    path: PathBuf,
}

impl JsonFileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(Some(map)),
            // Anything but an object carries no usable key
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl SelectionStore for JsonFileSelectionStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        let document = self.read_document().await?;
        Ok(document.and_then(|mut map| match map.remove(LAST_SELECTION_KEY) {
            Some(Value::String(raw)) => Some(raw),
            _ => None,
        }))
    }

    async fn save(&self, value: String) -> Result<(), StoreError> {
        // A corrupt file is replaced
        let mut document = self.read_document().await.ok().flatten().unwrap_or_default();
        document.insert(LAST_SELECTION_KEY.to_string(), Value::String(value));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&Value::Object(document))?;
        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), "Selection state written");
        Ok(())
    }
}
