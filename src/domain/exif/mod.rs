//! Exif metadata decoding for JPEG byte streams.
//!
//! Pure and synchronous: [`extract`] walks the JPEG marker segments, finds
//! the APP1 Exif block, decodes IFD0 plus the Exif and GPS sub-directories
//! and returns a flat [`FieldMap`]. Malformed input never produces an error,
//! only [`MetadataOutcome::Absent`] or a partial map.

mod byte_reader;
mod directory;
mod extractor;
mod field_map;
mod tags;

#[cfg(test)]
pub(crate) mod test_utils;

pub use byte_reader::{ByteOrder, ByteReader};
pub use directory::{DirectoryDecoder, ValueFormat, MAX_ASCII_LEN};
pub use extractor::{
    extract, AbsentReason, MetadataOutcome, APP1_MARKER, EXIF_SIGNATURE, JPEG_SOI, ROUND_PLACES,
};
pub use field_map::{FieldMap, FieldValue};
pub use tags::{Tag, TagTable};
