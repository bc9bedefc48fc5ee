//! Synthetic TIFF/JPEG builders for decoder tests

use super::byte_reader::ByteOrder;

enum EntryValue {
    Ascii(Vec<u8>),
    Rationals(Vec<(u32, u32)>),
    Short(u16),
    Long(u32),
    Raw(Vec<u8>),
}

/// One directory entry to encode
pub struct Entry {
    tag: u16,
    format: u16,
    count: u32,
    value: EntryValue,
}

impl Entry {
    pub fn ascii(tag: u16, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        Self {
            tag,
            format: 2,
            count: bytes.len() as u32,
            value: EntryValue::Ascii(bytes),
        }
    }

    pub fn rational(tag: u16, values: &[(u32, u32)]) -> Self {
        Self {
            tag,
            format: 5,
            count: values.len() as u32,
            value: EntryValue::Rationals(values.to_vec()),
        }
    }

    pub fn short(tag: u16, value: u16) -> Self {
        Self {
            tag,
            format: 3,
            count: 1,
            value: EntryValue::Short(value),
        }
    }

    pub fn long(tag: u16, value: u32) -> Self {
        Self {
            tag,
            format: 4,
            count: 1,
            value: EntryValue::Long(value),
        }
    }

    /// Bytes are written as given, without byte-order conversion
    pub fn raw(tag: u16, format: u16, count: u32, bytes: Vec<u8>) -> Self {
        Self {
            tag,
            format,
            count,
            value: EntryValue::Raw(bytes),
        }
    }

    fn encode_value(&self, order: ByteOrder) -> Vec<u8> {
        match &self.value {
            EntryValue::Ascii(bytes) | EntryValue::Raw(bytes) => bytes.clone(),
            EntryValue::Rationals(values) => values
                .iter()
                .flat_map(|&(n, d)| {
                    let mut out = u32_bytes(n, order).to_vec();
                    out.extend_from_slice(&u32_bytes(d, order));
                    out
                })
                .collect(),
            EntryValue::Short(v) => u16_bytes(*v, order).to_vec(),
            EntryValue::Long(v) => u32_bytes(*v, order).to_vec(),
        }
    }
}

fn u16_bytes(v: u16, order: ByteOrder) -> [u8; 2] {
    match order {
        ByteOrder::BigEndian => v.to_be_bytes(),
        ByteOrder::LittleEndian => v.to_le_bytes(),
    }
}

fn u32_bytes(v: u32, order: ByteOrder) -> [u8; 4] {
    match order {
        ByteOrder::BigEndian => v.to_be_bytes(),
        ByteOrder::LittleEndian => v.to_le_bytes(),
    }
}

fn ifd_size(entries: usize) -> usize {
    2 + entries * 12 + 4
}

/// Encode a TIFF block: IFD0 at offset 8, then the optional Exif and GPS
/// directories, then a shared data area. Pointer entries for the optional
/// directories are appended to IFD0 after `primary`.
pub fn encode_tiff(
    order: ByteOrder,
    primary: Vec<Entry>,
    exif: Option<Vec<Entry>>,
    gps: Option<Vec<Entry>>,
) -> Vec<u8> {
    let ifd0_len = primary.len() + usize::from(exif.is_some()) + usize::from(gps.is_some());
    let ifd0_offset = 8;
    let exif_offset = ifd0_offset + ifd_size(ifd0_len);
    let gps_offset = exif_offset + exif.as_ref().map_or(0, |e| ifd_size(e.len()));
    let data_offset = gps_offset + gps.as_ref().map_or(0, |g| ifd_size(g.len()));

    let mut ifd0 = primary;
    if exif.is_some() {
        ifd0.push(Entry::long(0x8769, exif_offset as u32));
    }
    if gps.is_some() {
        ifd0.push(Entry::long(0x8825, gps_offset as u32));
    }

    let mut out = Vec::new();
    out.extend_from_slice(&order.marker());
    out.extend_from_slice(&u16_bytes(42, order));
    out.extend_from_slice(&u32_bytes(ifd0_offset as u32, order));

    let mut data = Vec::new();
    for entries in [Some(ifd0), exif, gps].into_iter().flatten() {
        out.extend_from_slice(&u16_bytes(entries.len() as u16, order));
        for entry in &entries {
            out.extend_from_slice(&u16_bytes(entry.tag, order));
            out.extend_from_slice(&u16_bytes(entry.format, order));
            out.extend_from_slice(&u32_bytes(entry.count, order));
            let value = entry.encode_value(order);
            if value.len() <= 4 {
                let mut field = [0u8; 4];
                field[..value.len()].copy_from_slice(&value);
                out.extend_from_slice(&field);
            } else {
                let pointer = (data_offset + data.len()) as u32;
                out.extend_from_slice(&u32_bytes(pointer, order));
                data.extend_from_slice(&value);
                if data.len() % 2 == 1 {
                    data.push(0);
                }
            }
        }
        // next-IFD offset
        out.extend_from_slice(&[0, 0, 0, 0]);
    }

    out.extend_from_slice(&data);
    out
}

/// Wrap a TIFF block in SOI, APP0, APP1 "Exif\0\0", SOS and EOI
pub fn wrap_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];

    // APP0 JFIF
    out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    out.extend_from_slice(b"JFIF\0");
    out.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);

    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);

    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x11, 0x22, 0xFF, 0xD9]);
    out
}

pub fn jpeg_with_exif(
    order: ByteOrder,
    primary: Vec<Entry>,
    exif: Option<Vec<Entry>>,
    gps: Option<Vec<Entry>>,
) -> Vec<u8> {
    wrap_jpeg(&encode_tiff(order, primary, exif, gps))
}
