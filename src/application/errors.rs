//! Error types returned by the use cases.
//!
//! Only genuine I/O failures show up here. Metadata decode anomalies are
//! absorbed by the extractor and reported as `MetadataOutcome::Absent`.

use thiserror::Error;

use crate::application::ports::{RemoteError, StoreError};
use crate::domain::errors::DomainError;

/// Error type for tree refresh
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// Error type for loading a single image
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// Error type for loading story content
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// Error type for persisting the last selection
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
