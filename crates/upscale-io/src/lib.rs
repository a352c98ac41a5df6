//! Image decode/encode adapter for the GPU upscaler.
//!
//! Wraps the [`image`] codec crate behind a narrow interface: [`read`]
//! decodes a file into an RGBA8 [`SourceImage`] tagged with its container
//! format, and [`write`] encodes a [`SourceImage`] back into that same
//! container. The container is derived from the file extension; files
//! without a recognized extension are rejected before any decode attempt.

pub use image::ImageFormat;

mod error;
mod source;

pub use error::{IoError, IoResult};
pub use source::SourceImage;

use std::path::Path;

use tracing::debug;

/// Reads an image file into an RGBA8 [`SourceImage`].
///
/// The container format is derived from the file extension and recorded on
/// the result so the output can be re-encoded in the same format. Pixels are
/// converted to 8-bit RGBA with straight alpha, top-left origin, tightly
/// packed rows.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<SourceImage> {
    let path = path.as_ref();

    let format = ImageFormat::from_path(path)
        .map_err(|_| IoError::UnsupportedFormat(path.display().to_string()))?;

    let decoded = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => IoError::Io(io),
        other => IoError::Decode(other.to_string()),
    })?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(width, height, ?format, "decoded image");

    SourceImage::from_rgba8(width, height, format, rgba.into_raw())
}

/// Encodes a [`SourceImage`] to `path` in the image's original container
/// format.
///
/// JPEG cannot carry an alpha channel, so the adapter drops alpha at the
/// encode boundary for that format only; every other container receives the
/// RGBA data unchanged.
pub fn write<P: AsRef<Path>>(path: P, source: &SourceImage) -> IoResult<()> {
    let path = path.as_ref();
    let format = source.format();

    let rgba = image::RgbaImage::from_raw(
        source.width(),
        source.height(),
        source.pixels().to_vec(),
    )
    .ok_or_else(|| IoError::Encode("pixel buffer does not match dimensions".into()))?;

    let dynamic = if format == ImageFormat::Jpeg {
        image::DynamicImage::ImageRgba8(rgba).to_rgb8().into()
    } else {
        image::DynamicImage::ImageRgba8(rgba)
    };

    debug!(width = source.width(), height = source.height(), ?format, path = %path.display(), "encoding image");

    dynamic.save_with_format(path, format).map_err(|e| match e {
        image::ImageError::IoError(io) => IoError::Io(io),
        other => IoError::Encode(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_rejects_unknown_extension() {
        let err = read("input.xyz123").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn read_rejects_missing_extension() {
        let err = read("noextension").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read("definitely_not_here.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
