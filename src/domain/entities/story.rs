use serde::Serialize;

/// Story text fetched from the remote service. The body is opaque markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryContent {
    pub path: String,
    pub title: String,
    pub body: String,
}

impl StoryContent {
    pub fn new(path: impl Into<String>, body: impl Into<String>) -> Self {
        let path = path.into();
        let title = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            path,
            title,
            body: body.into(),
        }
    }
}
