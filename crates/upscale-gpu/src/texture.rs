//! Device texture bridge: host pixel buffers in and out of GPU memory.

use tracing::trace;
use upscale_io::{ImageFormat, SourceImage};

use crate::{GpuContext, GpuError, GpuResult};

/// GPU-resident 2D image, `Rgba8Unorm` with no sRGB reinterpretation.
///
/// Owned for the duration of a single upscale operation. The input instance
/// is readable by kernels; the output instance is a storage-write target that
/// is copied back to the host afterwards.
pub struct DeviceImage {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl DeviceImage {
    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Row stride padded to wgpu's copy alignment (256 bytes).
///
/// Texture-to-buffer copies require `bytes_per_row` to be a multiple of
/// `COPY_BYTES_PER_ROW_ALIGNMENT`; the padding is stripped after readback.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

fn check_extent(ctx: &GpuContext, width: u32, height: u32) -> GpuResult<()> {
    let limit = ctx.max_texture_dim();
    if width == 0 || height == 0 || width > limit || height > limit {
        return Err(GpuError::ImageTooLarge {
            width,
            height,
            limit,
        });
    }
    Ok(())
}

/// Uploads a host image into a device texture readable by compute kernels.
///
/// Top-left origin, tight `width * 4` stride, no gamma reinterpretation.
pub fn upload(ctx: &GpuContext, source: &SourceImage) -> GpuResult<DeviceImage> {
    let (width, height) = (source.width(), source.height());
    check_extent(ctx, width, height)?;

    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("upscale_input"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        source.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    trace!(width, height, "uploaded input texture");

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    Ok(DeviceImage {
        texture,
        view,
        width,
        height,
    })
}

/// Allocates the output texture: storage-write target, copyable to the host.
///
/// Contents are undefined until a dispatch writes them.
pub fn allocate_output(ctx: &GpuContext, width: u32, height: u32) -> GpuResult<DeviceImage> {
    check_extent(ctx, width, height)?;

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("upscale_output"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    Ok(DeviceImage {
        texture,
        view,
        width,
        height,
    })
}

/// Reads a device texture back into a host [`SourceImage`].
///
/// Rows come back padded to the copy alignment; the result is repacked to a
/// tight `width * 4` stride and tagged with the given container format.
pub fn download(
    ctx: &GpuContext,
    image: &DeviceImage,
    format: ImageFormat,
) -> GpuResult<SourceImage> {
    let (width, height) = (image.width, image.height);
    let padded_row = padded_bytes_per_row(width);
    let unpadded_row = (width * 4) as usize;
    let buffer_size = padded_row as u64 * height as u64;

    let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("upscale_staging"),
        size: buffer_size,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("upscale_readback"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &image.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    ctx.queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |r| {
        let _ = tx.send(r);
    });
    ctx.device.poll(wgpu::Maintain::Wait);

    rx.recv()
        .map_err(|_| GpuError::Readback("map channel closed".into()))?
        .map_err(|e| GpuError::Readback(format!("map failed: {e}")))?;

    let data = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity(unpadded_row * height as usize);
    for row in data.chunks_exact(padded_row as usize) {
        pixels.extend_from_slice(&row[..unpadded_row]);
    }
    drop(data);
    staging.unmap();

    trace!(width, height, "downloaded output texture");

    Ok(SourceImage::from_rgba8(width, height, format, pixels)?)
}
