mod image;
mod path_tree;
mod story;

pub use image::{ImageDetails, ImageRecord};
pub use path_tree::{PathTree, PathTreeNode, TreeRow};
pub use story::StoryContent;
