//! Tile images loaded into memory.

use image::{GenericImageView, RgbaImage};

use crate::error::KiwiError;

/// An image that has been loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Raw bytes of the image, in RGBA order.
    pub(crate) bytes: Vec<u8>,
    /// Width and height of the image.
    pub(crate) dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decode an image from a byte slice.
    ///
    /// Attempts to guess the format of the image from the data. Non-RGBA images
    /// will be converted to RGBA.
    pub fn decode(bytes: &[u8]) -> Result<Self, KiwiError> {
        let decoded = image::load_from_memory(bytes)?;
        let dimensions = decoded.dimensions();

        Ok(Self {
            bytes: decoded.to_rgba8().into_vec(),
            dimensions,
        })
    }

    /// Wraps an RGBA buffer.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            dimensions: image.dimensions(),
            bytes: image.into_raw(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    /// RGBA bytes, row by row from the top-left corner.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// RGBA value of the pixel at the given position, if it is inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let offset = (y as usize * self.width() as usize + x as usize) * 4;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(self.bytes.get(offset..offset + 4)?);
        Some(pixel)
    }

    /// Converts the image into an `image` crate buffer.
    pub fn into_rgba_image(self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.dimensions.0, self.dimensions.1, self.bytes)
    }
}
