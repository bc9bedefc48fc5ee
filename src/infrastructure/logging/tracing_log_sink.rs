use tracing::{debug, error, info, warn};

use crate::application::ports::LogSink;
use crate::domain::value_objects::{LogBody, LogLevel};

/// Forwards console entries to `tracing`
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn record(&self, level: LogLevel, header: &str, body: LogBody) {
        match level {
            LogLevel::Error => error!(target: "gallery::console", %body, "{}", header),
            LogLevel::Warn => warn!(target: "gallery::console", %body, "{}", header),
            LogLevel::Info => info!(target: "gallery::console", %body, "{}", header),
            LogLevel::Debug => debug!(target: "gallery::console", %body, "{}", header),
        }
    }
}
