pub mod entities;
pub mod errors;
pub mod exif;
pub mod value_objects;
