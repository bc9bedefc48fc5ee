use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Known metadata fields.
///
/// Anything the decoder meets that is not listed in a [`TagTable`] is
/// discarded, so this enumeration is the complete set of keys a
/// [`super::FieldMap`] can ever hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    ImageDescription,
    Make,
    Model,
    Orientation,
    XResolution,
    YResolution,
    ResolutionUnit,
    Software,
    DateTime,
    Artist,
    Copyright,
    ExposureTime,
    FNumber,
    ExposureProgram,
    IsoSpeedRatings,
    DateTimeOriginal,
    DateTimeDigitized,
    ApertureValue,
    MaxApertureValue,
    MeteringMode,
    LightSource,
    Flash,
    FocalLength,
    PixelXDimension,
    PixelYDimension,
    ExposureMode,
    WhiteBalance,
    FocalLengthIn35mmFilm,
    SceneCaptureType,
    LensMake,
    LensModel,
    /// Pointer to the extended (Exif) directory
    ExifIfdPointer,
    /// Pointer to the location (GPS) directory
    GpsInfoIfdPointer,
    GpsLatitudeRef,
    GpsLatitude,
    GpsLongitudeRef,
    GpsLongitude,
}

impl Tag {
    /// Human-readable field name
    pub fn name(self) -> &'static str {
        match self {
            Tag::ImageDescription => "ImageDescription",
            Tag::Make => "Make",
            Tag::Model => "Model",
            Tag::Orientation => "Orientation",
            Tag::XResolution => "XResolution",
            Tag::YResolution => "YResolution",
            Tag::ResolutionUnit => "ResolutionUnit",
            Tag::Software => "Software",
            Tag::DateTime => "DateTime",
            Tag::Artist => "Artist",
            Tag::Copyright => "Copyright",
            Tag::ExposureTime => "ExposureTime",
            Tag::FNumber => "FNumber",
            Tag::ExposureProgram => "ExposureProgram",
            Tag::IsoSpeedRatings => "ISOSpeedRatings",
            Tag::DateTimeOriginal => "DateTimeOriginal",
            Tag::DateTimeDigitized => "DateTimeDigitized",
            Tag::ApertureValue => "ApertureValue",
            Tag::MaxApertureValue => "MaxApertureValue",
            Tag::MeteringMode => "MeteringMode",
            Tag::LightSource => "LightSource",
            Tag::Flash => "Flash",
            Tag::FocalLength => "FocalLength",
            Tag::PixelXDimension => "PixelXDimension",
            Tag::PixelYDimension => "PixelYDimension",
            Tag::ExposureMode => "ExposureMode",
            Tag::WhiteBalance => "WhiteBalance",
            Tag::FocalLengthIn35mmFilm => "FocalLengthIn35mmFilm",
            Tag::SceneCaptureType => "SceneCaptureType",
            Tag::LensMake => "LensMake",
            Tag::LensModel => "LensModel",
            Tag::ExifIfdPointer => "ExifIFDPointer",
            Tag::GpsInfoIfdPointer => "GPSInfoIFDPointer",
            Tag::GpsLatitudeRef => "GPSLatitudeRef",
            Tag::GpsLatitude => "GPSLatitude",
            Tag::GpsLongitudeRef => "GPSLongitudeRef",
            Tag::GpsLongitude => "GPSLongitude",
        }
    }

    /// Directory pointers are control data and never reach callers
    pub fn is_directory_pointer(self) -> bool {
        matches!(self, Tag::ExifIfdPointer | Tag::GpsInfoIfdPointer)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Read-only mapping from numeric tag id to [`Tag`]
#[derive(Debug)]
pub struct TagTable {
    tags: HashMap<u16, Tag>,
}

impl TagTable {
    fn new(entries: &[(u16, Tag)]) -> Self {
        Self {
            tags: entries.iter().copied().collect(),
        }
    }

    pub fn lookup(&self, id: u16) -> Option<Tag> {
        self.tags.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Table for IFD0 and the extended directory
    pub fn primary() -> &'static TagTable {
        &PRIMARY_TAGS
    }

    /// Table for the GPS directory
    pub fn location() -> &'static TagTable {
        &LOCATION_TAGS
    }
}

static PRIMARY_TAGS: Lazy<TagTable> = Lazy::new(|| {
    TagTable::new(&[
        (0x010E, Tag::ImageDescription),
        (0x010F, Tag::Make),
        (0x0110, Tag::Model),
        (0x0112, Tag::Orientation),
        (0x011A, Tag::XResolution),
        (0x011B, Tag::YResolution),
        (0x0128, Tag::ResolutionUnit),
        (0x0131, Tag::Software),
        (0x0132, Tag::DateTime),
        (0x013B, Tag::Artist),
        (0x8298, Tag::Copyright),
        (0x829A, Tag::ExposureTime),
        (0x829D, Tag::FNumber),
        (0x8822, Tag::ExposureProgram),
        (0x8827, Tag::IsoSpeedRatings),
        (0x9003, Tag::DateTimeOriginal),
        (0x9004, Tag::DateTimeDigitized),
        (0x9202, Tag::ApertureValue),
        (0x9205, Tag::MaxApertureValue),
        (0x9207, Tag::MeteringMode),
        (0x9208, Tag::LightSource),
        (0x9209, Tag::Flash),
        (0x920A, Tag::FocalLength),
        (0xA002, Tag::PixelXDimension),
        (0xA003, Tag::PixelYDimension),
        (0xA402, Tag::ExposureMode),
        (0xA403, Tag::WhiteBalance),
        (0xA405, Tag::FocalLengthIn35mmFilm),
        (0xA406, Tag::SceneCaptureType),
        (0xA433, Tag::LensMake),
        (0xA434, Tag::LensModel),
        (0x8769, Tag::ExifIfdPointer),
        (0x8825, Tag::GpsInfoIfdPointer),
    ])
});

static LOCATION_TAGS: Lazy<TagTable> = Lazy::new(|| {
    TagTable::new(&[
        (0x0001, Tag::GpsLatitudeRef),
        (0x0002, Tag::GpsLatitude),
        (0x0003, Tag::GpsLongitudeRef),
        (0x0004, Tag::GpsLongitude),
    ])
});
