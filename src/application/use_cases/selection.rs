use std::sync::Arc;
use tracing::warn;

use crate::application::errors::SelectionError;
use crate::application::ports::{LogSink, SelectionStore};
use crate::domain::value_objects::{LogBody, LogLevel, Selection, SelectionKind};

/// Use case: remember the last selected item and restore it at startup
pub struct SelectionUseCase {
    store: Arc<dyn SelectionStore>,
    log: Arc<dyn LogSink>,
}

impl SelectionUseCase {
    pub fn new(store: Arc<dyn SelectionStore>, log: Arc<dyn LogSink>) -> Self {
        Self { store, log }
    }

    /// Stored selection, if any.
    ///
    /// Unreadable or malformed state is logged and treated as no selection.
    pub async fn restore(&self) -> Option<Selection> {
        let raw = match self.store.load().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored selection");
                self.log
                    .record(LogLevel::Warn, "Failed to read stored selection", LogBody::text(e.to_string()));
                return None;
            }
        };

        let selection = Selection::parse(&raw);
        if selection.is_none() {
            warn!(raw = %raw, "Ignoring malformed stored selection");
            self.log
                .record(LogLevel::Warn, "Ignoring malformed stored selection", LogBody::text(raw));
        }
        selection
    }

    /// Persist `path` as the current selection
    pub async fn remember(
        &self,
        kind: SelectionKind,
        path: &str,
    ) -> Result<Selection, SelectionError> {
        let selection = Selection::new(kind, path)?;
        self.store.save(selection.to_json()).await?;

        self.log.record(
            LogLevel::Debug,
            "Selection saved",
            LogBody::text(selection.to_string()),
        );
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockSelectionStore, StoreError};
    use crate::domain::errors::DomainError;
    use crate::infrastructure::logging::MemoryLogSink;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_restore_valid_selection() {
        // Arrange
        let mut store = MockSelectionStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Some(r#"{"kind":"folder","path":"trips/2023"}"#.to_string())));
        let use_case = SelectionUseCase::new(Arc::new(store), Arc::new(MemoryLogSink::new(10)));

        // Act
        let restored = use_case.restore().await;

        // Assert
        let selection = restored.unwrap();
        assert_eq!(selection.kind(), SelectionKind::Folder);
        assert_eq!(selection.path(), "trips/2023");
    }

    #[tokio::test]
    async fn test_restore_nothing_stored() {
        let mut store = MockSelectionStore::new();
        store.expect_load().returning(|| Ok(None));
        let log = Arc::new(MemoryLogSink::new(10));
        let use_case = SelectionUseCase::new(Arc::new(store), log.clone());

        assert!(use_case.restore().await.is_none());
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_restore_malformed_logs_warning() {
        let mut store = MockSelectionStore::new();
        store
            .expect_load()
            .returning(|| Ok(Some("{broken".to_string())));
        let log = Arc::new(MemoryLogSink::new(10));
        let use_case = SelectionUseCase::new(Arc::new(store), log.clone());

        assert!(use_case.restore().await.is_none());
        let warnings = log.filter(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].header, "Ignoring malformed stored selection");
    }

    #[tokio::test]
    async fn test_restore_store_failure_is_swallowed() {
        let mut store = MockSelectionStore::new();
        store.expect_load().returning(|| {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        });
        let log = Arc::new(MemoryLogSink::new(10));
        let use_case = SelectionUseCase::new(Arc::new(store), log.clone());

        assert!(use_case.restore().await.is_none());
        assert_eq!(log.filter(LogLevel::Warn).len(), 1);
    }

    #[tokio::test]
    async fn test_remember_saves_json() {
        // Arrange
        let mut store = MockSelectionStore::new();
        store
            .expect_save()
            .with(eq(r#"{"kind":"image","path":"a/b.jpg"}"#.to_string()))
            .times(1)
            .returning(|_| Ok(()));
        let use_case = SelectionUseCase::new(Arc::new(store), Arc::new(MemoryLogSink::new(10)));

        // Act
        let selection = use_case
            .remember(SelectionKind::Image, "a/b.jpg")
            .await
            .unwrap();

        // Assert
        assert_eq!(selection.path(), "a/b.jpg");
    }

    #[tokio::test]
    async fn test_remember_rejects_empty_path() {
        let store = MockSelectionStore::new();
        let use_case = SelectionUseCase::new(Arc::new(store), Arc::new(MemoryLogSink::new(10)));

        let result = use_case.remember(SelectionKind::Story, "").await;

        assert!(matches!(result, Err(SelectionError::Domain(DomainError::EmptyPath))));
    }
}
