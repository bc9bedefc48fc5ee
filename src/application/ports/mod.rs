mod cache_invalidation;
mod log_sink;
mod remote_repository;
mod selection_store;

pub use cache_invalidation::CacheInvalidation;
pub use log_sink::LogSink;
pub use remote_repository::{RawImage, RemoteError, RemoteRepository};
pub use selection_store::{SelectionStore, StoreError, LAST_SELECTION_KEY};

#[cfg(test)]
pub use log_sink::MockLogSink;
#[cfg(test)]
pub use remote_repository::MockRemoteRepository;
#[cfg(test)]
pub use selection_store::MockSelectionStore;
