mod folder_cache;
mod load_image;
mod load_story;
mod refresh_tree;
mod selection;

pub use folder_cache::FolderImageCache;
pub use load_image::LoadImageUseCase;
pub use load_story::LoadStoryUseCase;
pub use refresh_tree::RefreshTreeUseCase;
pub use selection::SelectionUseCase;
