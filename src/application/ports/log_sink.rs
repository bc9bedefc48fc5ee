#[cfg(test)]
use mockall::automock;

use crate::domain::value_objects::{LogBody, LogLevel};

/// Port for the developer console / observability sink.
///
/// Fire and forget: implementations must not block and never fail.
#[cfg_attr(test, automock)]
pub trait LogSink: Send + Sync {
    fn record(&self, level: LogLevel, header: &str, body: LogBody);
}
