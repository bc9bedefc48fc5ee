use serde::Serialize;

use super::byte_reader::{ByteOrder, ByteReader};
use super::directory::DirectoryDecoder;
use super::field_map::{FieldMap, FieldValue};
use super::tags::{Tag, TagTable};

/// Start-of-image marker every JPEG begins with
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// APP1, the segment carrying Exif data
pub const APP1_MARKER: u8 = 0xE1;

/// Start of scan: entropy-coded data follows, no more headers
const SOS_MARKER: u8 = 0xDA;
const EOI_MARKER: u8 = 0xD9;

/// ASCII signature at the start of the APP1 payload
pub const EXIF_SIGNATURE: &[u8; 4] = b"Exif";

/// "Exif" plus two NUL padding bytes
const EXIF_HEADER_LEN: usize = 6;

/// Decimal places kept for every numeric field
pub const ROUND_PLACES: i32 = 4;

/// Why no metadata was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentReason {
    /// Buffer does not start with the JPEG SOI marker
    NotJpeg,
    /// No APP1 segment before image data or end of buffer
    NoMetadataSegment,
    /// Segment chain broken (missing 0xFF prefix or bad length)
    MalformedSegment,
    /// APP1 payload is not Exif (e.g. XMP)
    BadSignature,
    /// TIFF header has neither "II" nor "MM"
    UnknownByteOrder,
    /// Everything parsed but no known field survived
    Empty,
    /// Extraction was not attempted for this format
    Skipped,
}

impl AbsentReason {
    /// Format mismatches, as opposed to files that simply carry nothing
    pub fn is_format_mismatch(self) -> bool {
        matches!(
            self,
            AbsentReason::NotJpeg | AbsentReason::BadSignature | AbsentReason::UnknownByteOrder
        )
    }
}

impl std::fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            AbsentReason::NotJpeg => "missing JPEG start-of-image marker",
            AbsentReason::NoMetadataSegment => "no APP1 segment",
            AbsentReason::MalformedSegment => "malformed segment chain",
            AbsentReason::BadSignature => "APP1 segment is not Exif",
            AbsentReason::UnknownByteOrder => "unknown TIFF byte order",
            AbsentReason::Empty => "no recognised fields",
            AbsentReason::Skipped => "not a JPEG variant",
        };
        f.write_str(text)
    }
}

/// Result of metadata extraction. Never an error: malformed input
/// resolves to `Absent` or to a partial map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetadataOutcome {
    Present(FieldMap),
    Absent(AbsentReason),
}

impl MetadataOutcome {
    pub fn is_present(&self) -> bool {
        matches!(self, MetadataOutcome::Present(_))
    }

    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            MetadataOutcome::Present(fields) => Some(fields),
            MetadataOutcome::Absent(_) => None,
        }
    }

    pub fn absent_reason(&self) -> Option<AbsentReason> {
        match self {
            MetadataOutcome::Present(_) => None,
            MetadataOutcome::Absent(reason) => Some(*reason),
        }
    }

    pub fn into_fields(self) -> Option<FieldMap> {
        match self {
            MetadataOutcome::Present(fields) => Some(fields),
            MetadataOutcome::Absent(_) => None,
        }
    }
}

/// Extract Exif metadata from a JPEG byte stream
pub fn extract(data: &[u8]) -> MetadataOutcome {
    match decode(data) {
        Ok(fields) if fields.is_empty() => MetadataOutcome::Absent(AbsentReason::Empty),
        Ok(fields) => MetadataOutcome::Present(fields),
        Err(reason) => MetadataOutcome::Absent(reason),
    }
}

fn decode(data: &[u8]) -> Result<FieldMap, AbsentReason> {
    let reader = ByteReader::new(data);

    if reader.bytes_at(0, 2) != Some(&JPEG_SOI[..]) {
        return Err(AbsentReason::NotJpeg);
    }

    let segment = find_app1(&reader)?;

    if reader.bytes_at(segment + 4, EXIF_SIGNATURE.len()) != Some(&EXIF_SIGNATURE[..]) {
        return Err(AbsentReason::BadSignature);
    }

    let tiff = segment + 4 + EXIF_HEADER_LEN;
    let order = reader
        .bytes_at(tiff, 2)
        .and_then(|marker| ByteOrder::from_marker([marker[0], marker[1]]))
        .ok_or(AbsentReason::UnknownByteOrder)?;

    let first_ifd = reader
        .u32_at(tiff + 4, order)
        .ok_or(AbsentReason::MalformedSegment)?;

    let decoder = DirectoryDecoder::new(data, tiff, order);
    let mut fields = decoder.decode(first_ifd as usize, TagTable::primary());

    // Sub-directories are only reachable from IFD0
    let exif_ifd = pointer(&fields, Tag::ExifIfdPointer);
    let gps_ifd = pointer(&fields, Tag::GpsInfoIfdPointer);

    if let Some(offset) = exif_ifd {
        fields.merge(decoder.decode(offset, TagTable::primary()));
    }
    if let Some(offset) = gps_ifd {
        fields.merge(decoder.decode(offset, TagTable::location()));
    }

    normalize_coordinates(&mut fields);
    fields.retain(|tag, _| !tag.is_directory_pointer());

    fields.round_numbers(ROUND_PLACES);
    Ok(fields)
}

/// Walk the marker segments and return the position of the first APP1
fn find_app1(reader: &ByteReader<'_>) -> Result<usize, AbsentReason> {
    let mut pos = 2;

    loop {
        let (Some(prefix), Some(marker)) = (reader.u8_at(pos), reader.u8_at(pos + 1)) else {
            return Err(AbsentReason::NoMetadataSegment);
        };
        if prefix != 0xFF {
            return Err(AbsentReason::MalformedSegment);
        }

        match marker {
            APP1_MARKER => return Ok(pos),
            SOS_MARKER | EOI_MARKER => return Err(AbsentReason::NoMetadataSegment),
            _ => {}
        }

        let length = reader
            .u16_at(pos + 2, ByteOrder::BigEndian)
            .ok_or(AbsentReason::NoMetadataSegment)?;
        if length < 2 {
            return Err(AbsentReason::MalformedSegment);
        }
        pos += 2 + usize::from(length);
    }
}

fn pointer(fields: &FieldMap, tag: Tag) -> Option<usize> {
    fields.number(tag).map(|offset| offset as usize)
}

/// Replace the GPS triples and hemisphere references with signed decimal
/// degrees. Anything incomplete drops all four fields.
fn normalize_coordinates(fields: &mut FieldMap) {
    let latitude = fields.remove(Tag::GpsLatitude);
    let latitude_ref = fields.remove(Tag::GpsLatitudeRef);
    let longitude = fields.remove(Tag::GpsLongitude);
    let longitude_ref = fields.remove(Tag::GpsLongitudeRef);

    let (Some(latitude), Some(longitude)) = (
        latitude.as_ref().and_then(decimal_degrees),
        longitude.as_ref().and_then(decimal_degrees),
    ) else {
        return;
    };
    let (Some(latitude_ref), Some(longitude_ref)) = (
        latitude_ref.as_ref().and_then(FieldValue::as_text),
        longitude_ref.as_ref().and_then(FieldValue::as_text),
    ) else {
        return;
    };

    let latitude = if latitude_ref == "N" { latitude } else { -latitude };
    let longitude = if longitude_ref == "E" { longitude } else { -longitude };

    fields.insert(Tag::GpsLatitude, FieldValue::Number(latitude));
    fields.insert(Tag::GpsLongitude, FieldValue::Number(longitude));
}

fn decimal_degrees(value: &FieldValue) -> Option<f64> {
    match value.as_sequence()? {
        [degrees, minutes, seconds] => Some(degrees + minutes / 60.0 + seconds / 3600.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exif::test_utils::{encode_tiff, jpeg_with_exif, wrap_jpeg, Entry};

    fn gps_entries(lat: &[(u32, u32)], lat_ref: &str, lon: &[(u32, u32)], lon_ref: &str) -> Vec<Entry> {
        vec![
            Entry::ascii(0x0001, lat_ref),
            Entry::rational(0x0002, lat),
            Entry::ascii(0x0003, lon_ref),
            Entry::rational(0x0004, lon),
        ]
    }

    #[test]
    fn test_missing_soi_is_not_jpeg() {
        let outcome = extract(b"\x89PNG\r\n\x1a\n");
        assert_eq!(outcome, MetadataOutcome::Absent(AbsentReason::NotJpeg));
        assert_eq!(extract(&[]), MetadataOutcome::Absent(AbsentReason::NotJpeg));
    }

    #[test]
    fn test_ascii_and_rational_fields() {
        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            let jpeg = jpeg_with_exif(
                order,
                vec![Entry::ascii(0x010F, "FUJIFILM"), Entry::rational(0x829A, &[(1, 3)])],
                None,
                None,
            );

            let fields = extract(&jpeg).into_fields().expect("metadata present");

            assert_eq!(fields.len(), 2);
            assert_eq!(fields.text(Tag::Make), Some("FUJIFILM"));
            assert_eq!(fields.number(Tag::ExposureTime), Some(0.3333));
        }
    }

    #[test]
    fn test_extended_directory_is_merged_and_pointer_removed() {
        let jpeg = jpeg_with_exif(
            ByteOrder::LittleEndian,
            vec![Entry::ascii(0x0110, "X100V")],
            Some(vec![
                Entry::ascii(0x9003, "2024:05:01 10:00:00"),
                Entry::short(0x8827, 400),
                Entry::rational(0x920A, &[(23, 1)]),
            ]),
            None,
        );

        let fields = extract(&jpeg).into_fields().unwrap();

        assert_eq!(fields.text(Tag::Model), Some("X100V"));
        assert_eq!(fields.text(Tag::DateTimeOriginal), Some("2024:05:01 10:00:00"));
        assert_eq!(fields.number(Tag::IsoSpeedRatings), Some(400.0));
        assert_eq!(fields.number(Tag::FocalLength), Some(23.0));
        assert!(!fields.contains(Tag::ExifIfdPointer));
    }

    #[test]
    fn test_gps_north_west() {
        let jpeg = jpeg_with_exif(
            ByteOrder::BigEndian,
            vec![],
            None,
            Some(gps_entries(&[(40, 1), (0, 1), (0, 1)], "N", &[(74, 1), (0, 1), (0, 1)], "W")),
        );

        let fields = extract(&jpeg).into_fields().unwrap();

        assert_eq!(fields.number(Tag::GpsLatitude), Some(40.0));
        assert_eq!(fields.number(Tag::GpsLongitude), Some(-74.0));
        assert!(!fields.contains(Tag::GpsLatitudeRef));
        assert!(!fields.contains(Tag::GpsLongitudeRef));
        assert!(!fields.contains(Tag::GpsInfoIfdPointer));
    }

    #[test]
    fn test_gps_minutes_seconds_and_south() {
        let jpeg = jpeg_with_exif(
            ByteOrder::LittleEndian,
            vec![Entry::ascii(0x010F, "Apple")],
            None,
            Some(gps_entries(
                &[(33, 1), (52, 1), (1234, 100)],
                "S",
                &[(151, 1), (12, 1), (3600, 100)],
                "E",
            )),
        );

        let (lat, lon) = extract(&jpeg).into_fields().unwrap().coordinates().unwrap();

        // 33 + 52/60 + 12.34/3600
        assert_eq!(lat, -33.8701);
        // 151 + 12/60 + 36/3600
        assert_eq!(lon, 151.21);
    }

    #[test]
    fn test_short_gps_triple_drops_coordinates() {
        let jpeg = jpeg_with_exif(
            ByteOrder::BigEndian,
            vec![Entry::ascii(0x010F, "Sony")],
            None,
            Some(gps_entries(&[(40, 1), (0, 1)], "N", &[(74, 1), (0, 1), (0, 1)], "W")),
        );

        let fields = extract(&jpeg).into_fields().unwrap();

        assert_eq!(fields.len(), 1);
        assert!(!fields.contains(Tag::GpsLatitude));
        assert!(!fields.contains(Tag::GpsLongitude));
    }

    #[test]
    fn test_missing_reference_drops_coordinates() {
        let jpeg = jpeg_with_exif(
            ByteOrder::BigEndian,
            vec![Entry::ascii(0x010F, "Sony")],
            None,
            Some(vec![
                Entry::rational(0x0002, &[(1, 1), (0, 1), (0, 1)]),
                Entry::rational(0x0004, &[(1, 1), (0, 1), (0, 1)]),
                Entry::ascii(0x0003, "E"),
            ]),
        );

        let fields = extract(&jpeg).into_fields().unwrap();
        assert_eq!(fields.coordinates(), None);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_gps_pointer_in_extended_directory_is_ignored() {
        // IFD0 (3 entries) at 8, Exif IFD (1 entry) at 50, GPS IFD at 68
        let gps_offset = 8 + (2 + 3 * 12 + 4) + (2 + 12 + 4);
        let mut tiff = encode_tiff(
            ByteOrder::LittleEndian,
            vec![Entry::ascii(0x010F, "Canon")],
            Some(vec![Entry::long(0x8825, gps_offset)]),
            Some(gps_entries(&[(40, 1), (0, 1), (0, 1)], "N", &[(74, 1), (0, 1), (0, 1)], "W")),
        );
        // Retag IFD0's own GPS pointer as an unknown field
        let entry = 8 + 2 + 2 * 12;
        tiff[entry..entry + 2].copy_from_slice(&0xC000u16.to_le_bytes());

        let fields = extract(&wrap_jpeg(&tiff)).into_fields().unwrap();

        assert_eq!(fields.text(Tag::Make), Some("Canon"));
        assert_eq!(fields.coordinates(), None);
        assert!(!fields.contains(Tag::GpsInfoIfdPointer));
    }

    #[test]
    fn test_only_pointers_means_empty() {
        let jpeg = jpeg_with_exif(ByteOrder::BigEndian, vec![], Some(vec![]), None);
        assert_eq!(extract(&jpeg), MetadataOutcome::Absent(AbsentReason::Empty));
    }

    #[test]
    fn test_jpeg_without_app1() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xD9];
        assert_eq!(extract(&jpeg), MetadataOutcome::Absent(AbsentReason::NoMetadataSegment));

        let bare = [0xFF, 0xD8];
        assert_eq!(extract(&bare), MetadataOutcome::Absent(AbsentReason::NoMetadataSegment));
    }

    #[test]
    fn test_broken_segment_chain() {
        let jpeg = [0xFF, 0xD8, 0x12, 0x34, 0x00, 0x04];
        assert_eq!(extract(&jpeg), MetadataOutcome::Absent(AbsentReason::MalformedSegment));

        let zero_length = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x00];
        assert_eq!(
            extract(&zero_length),
            MetadataOutcome::Absent(AbsentReason::MalformedSegment)
        );
    }

    #[test]
    fn test_non_exif_app1() {
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x0A];
        jpeg.extend_from_slice(b"http://ns");
        assert_eq!(extract(&jpeg), MetadataOutcome::Absent(AbsentReason::BadSignature));
    }

    #[test]
    fn test_unknown_byte_order() {
        let mut tiff = crate::domain::exif::test_utils::encode_tiff(
            ByteOrder::BigEndian,
            vec![Entry::ascii(0x010F, "Leica")],
            None,
            None,
        );
        tiff[0..2].copy_from_slice(b"XX");

        let outcome = extract(&wrap_jpeg(&tiff));

        assert_eq!(outcome, MetadataOutcome::Absent(AbsentReason::UnknownByteOrder));
        assert!(outcome.absent_reason().unwrap().is_format_mismatch());
    }

    #[test]
    fn test_truncated_tiff_header() {
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x0C];
        jpeg.extend_from_slice(b"Exif\0\0MM\0");
        assert_eq!(extract(&jpeg), MetadataOutcome::Absent(AbsentReason::MalformedSegment));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let jpeg = jpeg_with_exif(
            ByteOrder::LittleEndian,
            vec![Entry::ascii(0x010F, "Ricoh"), Entry::rational(0x011A, &[(300, 1)])],
            Some(vec![Entry::rational(0x829D, &[(56, 10)])]),
            None,
        );

        assert_eq!(extract(&jpeg), extract(&jpeg));
    }

    #[test]
    fn test_outcome_serializes_with_status() {
        let json = serde_json::to_value(MetadataOutcome::Absent(AbsentReason::NotJpeg)).unwrap();
        assert_eq!(json["status"], "absent");
        assert_eq!(json["value"], "not_jpeg");
    }
}
