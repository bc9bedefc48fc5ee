mod fanout_log_sink;
mod memory_log_sink;
mod tracing_log_sink;

pub use fanout_log_sink::FanoutLogSink;
pub use memory_log_sink::MemoryLogSink;
pub use tracing_log_sink::TracingLogSink;
