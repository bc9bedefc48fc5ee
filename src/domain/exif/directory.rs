//! Decoder for one TIFF image file directory (IFD).
//!
//! Layout of a directory at `offset`:
//!
//! ```text
//! u16 entry count
//! count x 12-byte entries:
//!   u16 tag id | u16 format code | u32 component count | u32 value or pointer
//! ```
//!
//! Values wider than four bytes live at `base + pointer`, where `base` is the
//! start of the enclosing TIFF block.

use super::byte_reader::{ByteOrder, ByteReader};
use super::field_map::{FieldMap, FieldValue};
use super::tags::TagTable;

/// Bytes per component for format codes 1..=12 (index 0 is unused)
const FORMAT_SIZES: [usize; 13] = [0, 1, 1, 2, 4, 8, 1, 1, 2, 4, 8, 4, 8];

const ENTRY_SIZE: usize = 12;

/// ASCII values longer than this are truncated
pub const MAX_ASCII_LEN: usize = 100;

/// Value format code of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Byte = 1,
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
    SignedByte = 6,
    Undefined = 7,
    SignedShort = 8,
    SignedLong = 9,
    SignedRational = 10,
    Float = 11,
    Double = 12,
}

impl ValueFormat {
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => ValueFormat::Byte,
            2 => ValueFormat::Ascii,
            3 => ValueFormat::Short,
            4 => ValueFormat::Long,
            5 => ValueFormat::Rational,
            6 => ValueFormat::SignedByte,
            7 => ValueFormat::Undefined,
            8 => ValueFormat::SignedShort,
            9 => ValueFormat::SignedLong,
            10 => ValueFormat::SignedRational,
            11 => ValueFormat::Float,
            12 => ValueFormat::Double,
            _ => return None,
        })
    }

    pub fn component_size(self) -> usize {
        FORMAT_SIZES[self as usize]
    }
}

/// One raw entry, alive only while its directory is decoded
#[derive(Debug, Clone, Copy)]
struct DirectoryEntry {
    tag_id: u16,
    format: Option<ValueFormat>,
    count: u32,
    /// Absolute position of the 4-byte value/pointer field
    field_pos: usize,
    /// The 4-byte field read as an integer
    raw: u32,
}

/// Decodes directories inside one TIFF block
#[derive(Debug, Clone, Copy)]
pub struct DirectoryDecoder<'a> {
    reader: ByteReader<'a>,
    base: usize,
    order: ByteOrder,
}

impl<'a> DirectoryDecoder<'a> {
    /// `base` is the absolute position of the TIFF header in `data`
    pub fn new(data: &'a [u8], base: usize, order: ByteOrder) -> Self {
        Self {
            reader: ByteReader::new(data),
            base,
            order,
        }
    }

    /// Decode the directory at `offset` (relative to the TIFF base).
    ///
    /// Entries with unknown tags or format codes, or whose data falls outside
    /// the buffer, are skipped. An unreadable directory yields an empty map.
    pub fn decode(&self, offset: usize, table: &TagTable) -> FieldMap {
        let mut fields = FieldMap::new();

        let Some(start) = self.base.checked_add(offset) else {
            return fields;
        };
        let Some(count) = self.reader.u16_at(start, self.order) else {
            return fields;
        };

        for index in 0..usize::from(count) {
            let Some(entry) = self.read_entry(start + 2 + index * ENTRY_SIZE) else {
                // Truncated directory; keep what was decoded so far
                break;
            };

            let Some(tag) = table.lookup(entry.tag_id) else {
                continue;
            };

            if let Some(value) = self.read_value(&entry) {
                fields.insert(tag, value);
            }
        }

        fields
    }

    fn read_entry(&self, pos: usize) -> Option<DirectoryEntry> {
        Some(DirectoryEntry {
            tag_id: self.reader.u16_at(pos, self.order)?,
            format: ValueFormat::from_code(self.reader.u16_at(pos + 2, self.order)?),
            count: self.reader.u32_at(pos + 4, self.order)?,
            field_pos: pos + 8,
            raw: self.reader.u32_at(pos + 8, self.order)?,
        })
    }

    fn read_value(&self, entry: &DirectoryEntry) -> Option<FieldValue> {
        let format = entry.format?;
        let total = format
            .component_size()
            .checked_mul(usize::try_from(entry.count).ok()?)?;

        let value_pos = if total > 4 {
            self.base.checked_add(usize::try_from(entry.raw).ok()?)?
        } else {
            entry.field_pos
        };

        match (format, entry.count) {
            (ValueFormat::Ascii, count) => {
                let len = (count.saturating_sub(1) as usize).min(MAX_ASCII_LEN);
                let bytes = self.reader.bytes_at(value_pos, len)?;
                // Latin-1: one char per byte
                let text: String = bytes.iter().map(|&b| char::from(b)).collect();
                let trimmed = text.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
                Some(FieldValue::Text(trimmed.to_string()))
            }
            (ValueFormat::Rational, 1) => self
                .reader
                .rational_at(value_pos, self.order)
                .map(FieldValue::Number),
            (ValueFormat::Rational, count) if count > 1 => {
                let values = (0..count as usize)
                    .map(|i| self.reader.rational_at(value_pos + i * 8, self.order))
                    .collect::<Option<Vec<f64>>>()?;
                Some(FieldValue::Sequence(values))
            }
            (ValueFormat::Short, 1) => self
                .reader
                .u16_at(entry.field_pos, self.order)
                .map(|v| FieldValue::Number(f64::from(v))),
            (ValueFormat::Long, 1) => Some(FieldValue::Number(f64::from(entry.raw))),
            // Left undecoded; callers that know the tag's meaning use the raw value
            _ => Some(FieldValue::Number(f64::from(entry.raw))),
        }
    }
}
