use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::AsciiError;

/// Decoded bitmap handed to the pipeline.
///
/// Width and height are always at least one pixel. The image is never
/// mutated after construction; a new load replaces it wholesale.
#[derive(Clone, Debug)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    pub fn new(image: DynamicImage) -> Result<Self, AsciiError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AsciiError::EmptySource);
        }
        Ok(Self { image })
    }

    /// Decode an image file. Animated formats contribute their first frame.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AsciiError> {
        let image = image::open(path)?;
        Self::new(image)
    }

    /// Wrap a raw, row-major RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AsciiError> {
        if width == 0 || height == 0 {
            return Err(AsciiError::EmptySource);
        }
        let buffer = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            AsciiError::InvalidConfig(format!(
                "pixel buffer does not hold {width}x{height} RGBA pixels"
            ))
        })?;
        Self::new(DynamicImage::ImageRgba8(buffer))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}
