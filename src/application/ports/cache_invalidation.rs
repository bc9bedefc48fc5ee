/// Anything holding data derived from the remote tree that must be
/// dropped when the user refreshes it
pub trait CacheInvalidation: Send + Sync {
    fn invalidate_all(&self);

    /// Short label for log entries
    fn cache_name(&self) -> &'static str;
}
