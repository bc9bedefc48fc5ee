use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// What kind of item was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Folder,
    Image,
    Story,
}

impl std::fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionKind::Folder => write!(f, "folder"),
            SelectionKind::Image => write!(f, "image"),
            SelectionKind::Story => write!(f, "story"),
        }
    }
}

/// Last selected item, restored at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    kind: SelectionKind,
    path: String,
}

impl Selection {
    pub fn new(kind: SelectionKind, path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(DomainError::EmptyPath);
        }
        Ok(Self { kind, path })
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parse stored state. Anything unusable yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let selection: Selection = serde_json::from_str(raw).ok()?;
        Self::new(selection.kind, selection.path).ok()
    }

    pub fn to_json(&self) -> String {
        // Two plain fields; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}
