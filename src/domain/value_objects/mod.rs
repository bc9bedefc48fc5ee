mod image_format;
mod log_entry;
mod selection;

pub use image_format::{is_jpeg_content_type, ImageFormat};
pub use log_entry::{LogBody, LogEntry, LogLevel};
pub use selection::{Selection, SelectionKind};
