use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a console entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Entry payload: free text or a JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogBody {
    Text(String),
    Structured(serde_json::Value),
}

impl LogBody {
    pub fn text(text: impl Into<String>) -> Self {
        LogBody::Text(text.into())
    }
}

impl From<String> for LogBody {
    fn from(text: String) -> Self {
        LogBody::Text(text)
    }
}

impl From<&str> for LogBody {
    fn from(text: &str) -> Self {
        LogBody::Text(text.to_string())
    }
}

impl From<serde_json::Value> for LogBody {
    fn from(value: serde_json::Value) -> Self {
        LogBody::Structured(value)
    }
}

impl std::fmt::Display for LogBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogBody::Text(text) => write!(f, "{}", text),
            LogBody::Structured(value) => write!(f, "{}", value),
        }
    }
}

/// Timestamped console entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub header: String,
    pub body: LogBody,
}

impl LogEntry {
    pub fn now(level: LogLevel, header: impl Into<String>, body: LogBody) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            header: header.into(),
            body,
        }
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<5} {} | {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.header,
            self.body
        )
    }
}
