use serde::{Deserialize, Serialize};

/// Lower-cased file extension used as a format tag ("jpg", "png", ...).
/// Empty when the file name has no extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ImageFormat(String);

impl ImageFormat {
    const JPEG_EXTENSIONS: [&'static str; 4] = ["jpg", "jpeg", "jpe", "jfif"];

    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Self(ext.to_lowercase()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JPEG variants carry Exif metadata worth extracting
    pub fn is_jpeg(&self) -> bool {
        Self::JPEG_EXTENSIONS.contains(&self.0.as_str())
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// True for `image/jpeg` and `image/jpg`, ignoring parameters and case
pub fn is_jpeg_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "image/jpeg" || mime == "image/jpg"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(ImageFormat::from_file_name("a.JPEG").as_str(), "jpeg");
        assert_eq!(ImageFormat::from_file_name("archive.tar.GZ").as_str(), "gz");
    }

    #[test]
    fn test_dotfiles_and_bare_names_have_no_format() {
        assert_eq!(ImageFormat::from_file_name(".hidden").as_str(), "");
        assert_eq!(ImageFormat::from_file_name("noext").as_str(), "");
    }

    #[test]
    fn test_jpeg_variants() {
        for name in ["a.jpg", "a.JPEG", "a.jpe", "a.jfif"] {
            assert!(ImageFormat::from_file_name(name).is_jpeg(), "{name}");
        }
        assert!(!ImageFormat::from_file_name("a.png").is_jpeg());
        assert!(!ImageFormat::from_file_name("a.heic").is_jpeg());
    }

    #[test]
    fn test_jpeg_content_type() {
        assert!(is_jpeg_content_type("image/jpeg"));
        assert!(is_jpeg_content_type("Image/JPEG; charset=binary"));
        assert!(!is_jpeg_content_type("image/png"));
        assert!(!is_jpeg_content_type(""));
    }
}
