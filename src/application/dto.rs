use serde::Serialize;

use crate::domain::entities::{ImageDetails, PathTree, StoryContent};
use crate::domain::exif::MetadataOutcome;
use crate::domain::value_objects::Selection;

/// Folder and story trees produced by one refresh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub folders: PathTree,
    pub stories: PathTree,
}

/// DTO for one row of a rendered tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRowDto {
    pub depth: usize,
    pub name: String,
    pub path: String,
    pub selectable: bool,
}

impl TreeRowDto {
    /// Flatten a tree into rows in presentation order
    pub fn rows(tree: &PathTree) -> Vec<Self> {
        tree.walk_sorted()
            .into_iter()
            .map(|row| Self {
                depth: row.depth,
                name: row.node.name().to_string(),
                path: row.node.path().to_string(),
                selectable: row.node.is_selectable(),
            })
            .collect()
    }
}

/// DTO for image detail responses
#[derive(Debug, Clone, Serialize)]
pub struct ImageDetailsDto {
    pub path: String,
    pub name: String,
    pub format: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
    pub metadata: MetadataOutcome,
}

impl From<ImageDetails> for ImageDetailsDto {
    fn from(details: ImageDetails) -> Self {
        Self {
            path: details.record.path().to_string(),
            name: details.record.name().to_string(),
            format: details.record.format().to_string(),
            content_type: details.content_type,
            size_bytes: details.size_bytes,
            metadata: details.metadata,
        }
    }
}

/// DTO for story responses
#[derive(Debug, Clone, Serialize)]
pub struct StoryDto {
    pub path: String,
    pub title: String,
    pub body: String,
}

impl From<StoryContent> for StoryDto {
    fn from(story: StoryContent) -> Self {
        Self {
            path: story.path,
            title: story.title,
            body: story.body,
        }
    }
}

/// DTO for the restored selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionDto {
    pub kind: String,
    pub path: String,
}

impl From<Selection> for SelectionDto {
    fn from(selection: Selection) -> Self {
        Self {
            kind: selection.kind().to_string(),
            path: selection.path().to_string(),
        }
    }
}
