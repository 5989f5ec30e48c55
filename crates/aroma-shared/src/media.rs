use std::fmt;

use serde::{Deserialize, Serialize};

named_enum! {
    pub enum ImageType {
        Jpeg => "JPEG",
        Png => "PNG",
        Gif => "GIF",
        Bmp => "BMP",
        Webp => "WEBP",
    }
}

/// Pixel size of an image; also the key of a thumbnail variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Text key such as `"64x64"`.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }

    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        let (width, height) = descriptor.split_once('x')?;
        Some(Self {
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A small binary media blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub image_type: Option<ImageType>,
    pub data: Vec<u8>,
    pub dimension: Option<Dimension>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_descriptor() {
        let dimension = Dimension::new(64, 32);
        assert_eq!(dimension.descriptor(), "64x32");
        assert_eq!(Dimension::from_descriptor("64x32"), Some(dimension));
        assert_eq!(Dimension::from_descriptor("64by32"), None);
        assert_eq!(Dimension::from_descriptor("x32"), None);
    }
}
