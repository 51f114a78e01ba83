//! The raster image the codec consumes and produces

use sika_core::colorspace::ColorSpace;

use crate::errors::CodecErrors;

/// An 8-bit raster image, either a single grey plane or interleaved BGR.
///
/// Rows are stored top to bottom with no padding; color images carry
/// three bytes per pixel in blue, green, red order.
pub struct Image {
    data:       Vec<u8>,
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl Image {
    /// Wrap a sample buffer, validating it against the dimensions.
    pub fn new(
        data: Vec<u8>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, CodecErrors> {
        let expected = width * height * colorspace.num_components();

        if data.len() != expected {
            return Err(CodecErrors::LengthMismatch(expected, data.len()));
        }

        Ok(Image {
            data,
            width,
            height,
            colorspace
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` of the image
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
