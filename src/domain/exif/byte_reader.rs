/// Byte order of a TIFF-structured metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// "MM" (Motorola)
    BigEndian,
    /// "II" (Intel)
    LittleEndian,
}

impl ByteOrder {
    /// Recognise a two-byte order marker
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match &marker {
            b"MM" => Some(ByteOrder::BigEndian),
            b"II" => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }

    /// The marker bytes that select this order
    pub fn marker(self) -> [u8; 2] {
        match self {
            ByteOrder::BigEndian => *b"MM",
            ByteOrder::LittleEndian => *b"II",
        }
    }
}

/// Random-access integer and rational reader over a fixed buffer.
///
/// Every read returns `None` when the requested range falls outside the
/// buffer. Callers treat that as "this field is unreadable" and move on,
/// so a corrupt offset never takes the whole extraction down.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`
    pub fn bytes_at(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    #[inline]
    fn array_at<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.bytes_at(offset, N)?.try_into().ok()
    }

    #[inline]
    pub fn u8_at(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    #[inline]
    pub fn u16_at(&self, offset: usize, order: ByteOrder) -> Option<u16> {
        let bytes = self.array_at::<2>(offset)?;
        Some(match order {
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
        })
    }

    #[inline]
    pub fn u32_at(&self, offset: usize, order: ByteOrder) -> Option<u32> {
        let bytes = self.array_at::<4>(offset)?;
        Some(match order {
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
        })
    }

    #[inline]
    pub fn i32_at(&self, offset: usize, order: ByteOrder) -> Option<i32> {
        self.u32_at(offset, order).map(|v| v as i32)
    }

    /// Unsigned rational (u32 numerator / u32 denominator).
    /// A zero denominator yields 0.0.
    pub fn rational_at(&self, offset: usize, order: ByteOrder) -> Option<f64> {
        let numerator = self.u32_at(offset, order)?;
        let denominator = self.u32_at(offset.checked_add(4)?, order)?;
        if denominator == 0 {
            return Some(0.0);
        }
        Some(f64::from(numerator) / f64::from(denominator))
    }

    /// Signed rational (i32 numerator / i32 denominator).
    /// A zero denominator yields 0.0.
    pub fn srational_at(&self, offset: usize, order: ByteOrder) -> Option<f64> {
        let numerator = self.i32_at(offset, order)?;
        let denominator = self.i32_at(offset.checked_add(4)?, order)?;
        if denominator == 0 {
            return Some(0.0);
        }
        Some(f64::from(numerator) / f64::from(denominator))
    }
}
