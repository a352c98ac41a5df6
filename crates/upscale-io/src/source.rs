//! Host-side image buffer.

use crate::{IoError, IoResult};
use image::ImageFormat;

/// A decoded image held in host memory.
///
/// Pixels are 8-bit RGBA with straight alpha, top-left origin, tightly
/// packed (`bytes_per_row == width * 4`). The container format of the file
/// the image came from is retained so the result of an upscale can be
/// written back in the same format. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    format: ImageFormat,
    pixels: Vec<u8>,
}

impl SourceImage {
    /// Wraps a tightly packed RGBA8 buffer.
    ///
    /// Fails if the buffer length is not `width * height * 4`.
    pub fn from_rgba8(
        width: u32,
        height: u32,
        format: ImageFormat,
        pixels: Vec<u8>,
    ) -> IoResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(IoError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Container format of the originating file.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw RGBA8 pixel data, row-major from the top-left.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_buffer() {
        let img = SourceImage::from_rgba8(2, 3, ImageFormat::Png, vec![0; 24]).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 3);
        assert_eq!(img.format(), ImageFormat::Png);
        assert_eq!(img.pixels().len(), 24);
    }

    #[test]
    fn rejects_short_buffer() {
        let err = SourceImage::from_rgba8(2, 2, ImageFormat::Png, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            IoError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
    }
}
