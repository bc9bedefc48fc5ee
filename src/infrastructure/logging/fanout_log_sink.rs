use std::sync::Arc;

use crate::application::ports::LogSink;
use crate::domain::value_objects::{LogBody, LogLevel};

/// Sends every entry to each wrapped sink
pub struct FanoutLogSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl FanoutLogSink {
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }
}

impl LogSink for FanoutLogSink {
    fn record(&self, level: LogLevel, header: &str, body: LogBody) {
        for sink in &self.sinks {
            sink.record(level, header, body.clone());
        }
    }
}
