use serde::Serialize;

use crate::domain::exif::{FieldMap, MetadataOutcome};
use crate::domain::value_objects::ImageFormat;

/// An image inside a remote folder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRecord {
    path: String,
    name: String,
    format: ImageFormat,
}

impl ImageRecord {
    /// Derive display name and format tag from the remote path
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let format = ImageFormat::from_file_name(&name);
        Self { path, name, format }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> &ImageFormat {
        &self.format
    }
}

/// Display record for a selected image: the listing entry, what the
/// byte fetch reported, and the extracted metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDetails {
    pub record: ImageRecord,
    pub content_type: Option<String>,
    pub size_bytes: u64,
    pub metadata: MetadataOutcome,
}

impl ImageDetails {
    pub fn fields(&self) -> Option<&FieldMap> {
        self.metadata.fields()
    }
}
