//! End-to-end pipeline tests.
//!
//! These run real compute dispatches and skip (with a note) on machines
//! without any GPU adapter.

use upscale_gpu::{GpuContext, Method, Upscaler};
use upscale_io::{ImageFormat, SourceImage};

fn gpu() -> Option<Upscaler> {
    if !GpuContext::is_available() {
        eprintln!("no GPU adapter available, skipping");
        return None;
    }
    Some(Upscaler::new().unwrap())
}

/// 2x2 RGBA pattern: red, green, blue, white.
fn test_image() -> SourceImage {
    let pixels = vec![
        255, 0, 0, 255, //
        0, 255, 0, 255, //
        0, 0, 255, 255, //
        255, 255, 255, 255, //
    ];
    SourceImage::from_rgba8(2, 2, ImageFormat::Png, pixels).unwrap()
}

#[test]
fn output_dimensions_scale_by_factor() {
    let Some(upscaler) = gpu() else { return };
    let src = test_image();

    for method in [
        Method::Nearest,
        Method::Bilinear,
        Method::Bicubic,
        Method::Lanczos,
    ] {
        for scale in [1, 2, 3, 7] {
            let out = upscaler.upscale(&src, scale, method).unwrap();
            assert_eq!(out.width(), 2 * scale, "{method:?} at {scale}x");
            assert_eq!(out.height(), 2 * scale, "{method:?} at {scale}x");
            assert_eq!(out.format(), ImageFormat::Png);
        }
    }
}

#[test]
fn nearest_at_scale_one_is_identity() {
    let Some(upscaler) = gpu() else { return };
    let src = test_image();

    let out = upscaler.upscale(&src, 1, Method::Nearest).unwrap();
    assert_eq!(out.pixels(), src.pixels());
}

#[test]
fn nearest_draws_values_never_blends() {
    let Some(upscaler) = gpu() else { return };
    let src = test_image();
    let inputs: Vec<&[u8]> = src.pixels().chunks_exact(4).collect();

    let out = upscaler.upscale(&src, 3, Method::Nearest).unwrap();
    for px in out.pixels().chunks_exact(4) {
        assert!(
            inputs.contains(&px),
            "output pixel {px:?} is not a source pixel"
        );
    }
}

#[test]
fn nearest_upscale_replicates_blocks() {
    let Some(upscaler) = gpu() else { return };
    let src = test_image();

    let out = upscaler.upscale(&src, 2, Method::Nearest).unwrap();
    // Each source pixel becomes a 2x2 block of its own color.
    let px = |x: usize, y: usize| &out.pixels()[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
    assert_eq!(px(0, 0), [255, 0, 0, 255]);
    assert_eq!(px(1, 1), [255, 0, 0, 255]);
    assert_eq!(px(2, 0), [0, 255, 0, 255]);
    assert_eq!(px(3, 1), [0, 255, 0, 255]);
    assert_eq!(px(0, 2), [0, 0, 255, 255]);
    assert_eq!(px(3, 3), [255, 255, 255, 255]);
}

#[test]
fn smooth_filters_preserve_constant_images() {
    let Some(upscaler) = gpu() else { return };
    let pixels = vec![180u8; 4 * 4 * 4];
    let src = SourceImage::from_rgba8(4, 4, ImageFormat::Png, pixels).unwrap();

    for method in [Method::Bilinear, Method::Bicubic, Method::Lanczos] {
        let out = upscaler.upscale(&src, 2, method).unwrap();
        for v in out.pixels() {
            assert!(
                (*v as i16 - 180).abs() <= 1,
                "{method:?} disturbed a constant image: {v}"
            );
        }
    }
}

#[test]
fn interpolating_filters_keep_corner_colors_close() {
    let Some(upscaler) = gpu() else { return };
    let src = test_image();

    for method in [Method::Bilinear, Method::Bicubic] {
        let out = upscaler.upscale(&src, 4, method).unwrap();
        let w = out.width() as usize;
        let h = out.height() as usize;
        let px = |x: usize, y: usize| &out.pixels()[(y * w + x) * 4..(y * w + x) * 4 + 4];

        // Clamp-to-edge keeps corners dominated by the corner input pixel.
        let close = |got: &[u8], want: [u8; 4]| {
            got.iter()
                .zip(want)
                .all(|(g, w)| (*g as i16 - w as i16).abs() <= 48)
        };
        assert!(close(px(0, 0), [255, 0, 0, 255]), "{method:?} top-left");
        assert!(close(px(w - 1, 0), [0, 255, 0, 255]), "{method:?} top-right");
        assert!(
            close(px(0, h - 1), [0, 0, 255, 255]),
            "{method:?} bottom-left"
        );
        assert!(
            close(px(w - 1, h - 1), [255, 255, 255, 255]),
            "{method:?} bottom-right"
        );
    }
}

#[test]
fn unrecognized_method_matches_explicit_bicubic() {
    let Some(upscaler) = gpu() else { return };
    let src = test_image();

    let fallback = upscaler
        .upscale(&src, 2, Method::parse(Some("not-a-filter")))
        .unwrap();
    let explicit = upscaler.upscale(&src, 2, Method::Bicubic).unwrap();
    assert_eq!(fallback.pixels(), explicit.pixels());
}

#[test]
fn oversized_output_is_rejected_before_dispatch() {
    let Some(upscaler) = gpu() else { return };
    let src = test_image();

    let limit = upscaler.context().max_texture_dim();
    let err = upscaler.upscale(&src, limit, Method::Nearest).unwrap_err();
    assert!(matches!(err, upscale_gpu::GpuError::ImageTooLarge { .. }));
}
