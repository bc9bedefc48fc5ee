//! # Gallery Client - Browser for a Remote Image Gallery
//!
//! Client core for a gallery service that serves folders of images and
//! markup stories, built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Exif decoding, path trees, image and story entities
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: HTTP repository, console sinks, selection store
//!
//! ## Key Features
//!
//! - Exif metadata extraction from JPEG bytes, with signed GPS coordinates
//! - Hierarchical folder and story trees from flat path lists
//! - On-demand folder image cache with shared in-flight loads
//! - Developer console of structured log entries
//! - Last selection restored across runs
//!
//! ## Example Usage
//!
//! ```no_run
//! use gallery_client::domain::exif::{extract, MetadataOutcome};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap_or_default();
//! if let MetadataOutcome::Present(fields) = extract(&bytes) {
//!     println!("{:?}", fields.coordinates());
//! }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use application::builder::{ApplicationBuilder, GalleryApp};
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, exif, value_objects};
