use std::sync::Arc;

use tracing::info;

use crate::application::{
    ports::{CacheInvalidation, LogSink, RemoteRepository, SelectionStore},
    use_cases::{
        FolderImageCache, LoadImageUseCase, LoadStoryUseCase, RefreshTreeUseCase,
        SelectionUseCase,
    },
};
use crate::config::Config;
use crate::infrastructure::{
    http::HttpRepository,
    logging::{FanoutLogSink, MemoryLogSink, TracingLogSink},
    persistence::JsonFileSelectionStore,
};

type BuildResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Fully wired client: the developer console plus every use case
pub struct GalleryApp {
    pub console: Arc<MemoryLogSink>,
    pub log: Arc<dyn LogSink>,
    pub refresh_tree: RefreshTreeUseCase,
    pub folder_cache: Arc<FolderImageCache>,
    pub load_image: Arc<LoadImageUseCase>,
    pub load_story: LoadStoryUseCase,
    pub selection: SelectionUseCase,
}

/// Application builder for dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    console: Arc<MemoryLogSink>,
    log: Arc<dyn LogSink>,
    remote: Option<Arc<dyn RemoteRepository>>,
    selection_store: Option<Arc<dyn SelectionStore>>,
}

impl ApplicationBuilder {
    /// Console entries go to the in-memory console and to `tracing`
    pub fn new(config: Config) -> Self {
        let console = Arc::new(MemoryLogSink::new(config.console_capacity));
        let log: Arc<dyn LogSink> = Arc::new(FanoutLogSink::new(vec![
            console.clone() as Arc<dyn LogSink>,
            Arc::new(TracingLogSink) as Arc<dyn LogSink>,
        ]));

        Self {
            config,
            console,
            log,
            remote: None,
            selection_store: None,
        }
    }

    /// HTTP repository against the configured base URL
    pub fn with_http(mut self) -> BuildResult<Self> {
        let remote = HttpRepository::new(
            &self.config.api_base_url,
            self.config.http_timeout(),
            Arc::clone(&self.log),
        )?;
        info!(base_url = %self.config.api_base_url, "HTTP repository initialized");
        self.remote = Some(Arc::new(remote));
        Ok(self)
    }

    /// Selection store in the configured state file
    pub fn with_state_file(mut self) -> Self {
        info!(path = %self.config.state_file.display(), "Selection store initialized");
        self.selection_store = Some(Arc::new(JsonFileSelectionStore::new(
            self.config.state_file.clone(),
        )));
        self
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteRepository>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_selection_store(mut self, store: Arc<dyn SelectionStore>) -> Self {
        self.selection_store = Some(store);
        self
    }

    /// Build the application with all use cases
    pub fn build(self) -> BuildResult<GalleryApp> {
        let remote = self.remote.ok_or("Remote repository not initialized")?;
        let selection_store = self
            .selection_store
            .ok_or("Selection store not initialized")?;

        let folder_cache = Arc::new(FolderImageCache::new(
            Arc::clone(&remote),
            Arc::clone(&self.log),
        ));
        let load_image = Arc::new(LoadImageUseCase::new(
            Arc::clone(&remote),
            Arc::clone(&self.log),
        ));

        // A refresh drops everything derived from the previous tree
        let invalidations: Vec<Arc<dyn CacheInvalidation>> = vec![
            folder_cache.clone() as Arc<dyn CacheInvalidation>,
            load_image.clone() as Arc<dyn CacheInvalidation>,
        ];
        let refresh_tree =
            RefreshTreeUseCase::new(Arc::clone(&remote), Arc::clone(&self.log), invalidations);

        let load_story = LoadStoryUseCase::new(Arc::clone(&remote), Arc::clone(&self.log));
        let selection = SelectionUseCase::new(selection_store, Arc::clone(&self.log));

        info!("Application layer initialized");

        Ok(GalleryApp {
            console: self.console,
            log: self.log,
            refresh_tree,
            folder_cache,
            load_image,
            load_story,
            selection,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
