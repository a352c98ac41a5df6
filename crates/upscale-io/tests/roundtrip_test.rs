//! Codec round-trip tests for the I/O adapter.

use upscale_io::{ImageFormat, SourceImage};

/// 2x2 test pattern: red, green, blue, half-transparent white.
fn test_pixels() -> Vec<u8> {
    vec![
        255, 0, 0, 255, //
        0, 255, 0, 255, //
        0, 0, 255, 255, //
        255, 255, 255, 128, //
    ]
}

#[test]
fn png_roundtrip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.png");

    let source = SourceImage::from_rgba8(2, 2, ImageFormat::Png, test_pixels()).unwrap();
    upscale_io::write(&path, &source).unwrap();

    let reloaded = upscale_io::read(&path).unwrap();
    assert_eq!(reloaded.width(), 2);
    assert_eq!(reloaded.height(), 2);
    assert_eq!(reloaded.format(), ImageFormat::Png);
    assert_eq!(reloaded.pixels(), source.pixels());
}

#[test]
fn jpeg_roundtrip_drops_alpha_within_tolerance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.jpg");

    // Flat gray avoids chroma subsampling artifacts at this size.
    let pixels = vec![128u8; 8 * 8 * 4];
    let source = SourceImage::from_rgba8(8, 8, ImageFormat::Jpeg, pixels).unwrap();
    upscale_io::write(&path, &source).unwrap();

    let reloaded = upscale_io::read(&path).unwrap();
    assert_eq!(reloaded.width(), 8);
    assert_eq!(reloaded.height(), 8);

    for px in reloaded.pixels().chunks_exact(4) {
        for channel in &px[..3] {
            assert!((*channel as i16 - 128).abs() <= 4, "channel {channel} drifted");
        }
        // Alpha is re-synthesized as opaque after the drop at encode time.
        assert_eq!(px[3], 255);
    }
}

#[test]
fn bmp_roundtrip_preserves_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.bmp");

    let source = SourceImage::from_rgba8(2, 2, ImageFormat::Bmp, test_pixels()).unwrap();
    upscale_io::write(&path, &source).unwrap();

    let reloaded = upscale_io::read(&path).unwrap();
    assert_eq!(reloaded.width(), 2);
    assert_eq!(reloaded.height(), 2);
    assert_eq!(reloaded.format(), ImageFormat::Bmp);
}
