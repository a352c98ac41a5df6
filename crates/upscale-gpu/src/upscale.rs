//! Upscale orchestrator.
//!
//! Walks one image through the synchronous pipeline: upload, policy
//! resolution, a single blocking compute dispatch over the destination
//! extent, and readback. There is no retry and no partial-output state; any
//! device failure is fatal to the run.

use tracing::{debug, info};
use upscale_io::SourceImage;

use crate::policy::{Method, Pipelines, ResamplingPolicy};
use crate::{GpuContext, GpuError, GpuResult, texture};

/// Workgroup tiling for one dispatch. Fixed 16x16 threads per group; the
/// grid covers at least the output extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchGrid {
    /// Workgroup count along x.
    pub x: u32,
    /// Workgroup count along y.
    pub y: u32,
}

impl DispatchGrid {
    /// Threads per workgroup on each axis. Must match the
    /// `@workgroup_size` declared by every kernel.
    pub const WORKGROUP_DIM: u32 = 16;

    /// Grid covering an output extent.
    pub fn for_output(width: u32, height: u32) -> Self {
        Self {
            x: width.div_ceil(Self::WORKGROUP_DIM),
            y: height.div_ceil(Self::WORKGROUP_DIM),
        }
    }
}

/// GPU upscaler: owns the device context and the policy registry.
pub struct Upscaler {
    ctx: GpuContext,
    pipelines: Pipelines,
}

impl Upscaler {
    /// Creates an upscaler on the default adapter.
    pub fn new() -> GpuResult<Self> {
        Self::with_context(GpuContext::new()?)
    }

    /// Creates an upscaler on an explicitly constructed context.
    pub fn with_context(ctx: GpuContext) -> GpuResult<Self> {
        let pipelines = Pipelines::new(&ctx)?;
        Ok(Self { ctx, pipelines })
    }

    /// The device context in use.
    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    /// Upscales `source` by an integer factor using the given method.
    ///
    /// `scale == 1` is a legal identity resize. The output inherits the
    /// source's container-format tag, so it can be written back in the
    /// original format.
    pub fn upscale(
        &self,
        source: &SourceImage,
        scale: u32,
        method: Method,
    ) -> GpuResult<SourceImage> {
        if scale < 1 {
            return Err(GpuError::InvalidScale(scale));
        }

        let (out_w, out_h) = self.output_extent(source.width(), source.height(), scale)?;
        info!(
            method = method.name(),
            scale,
            src_w = source.width(),
            src_h = source.height(),
            out_w,
            out_h,
            "upscaling"
        );

        let input = texture::upload(&self.ctx, source)?;
        let output = texture::allocate_output(&self.ctx, out_w, out_h)?;

        match self.pipelines.resolve(method) {
            ResamplingPolicy::Reference(lanczos) => {
                lanczos.encode(&self.ctx, &input, &output)?;
            }
            ResamplingPolicy::Kernel { pipeline, sampler } => {
                self.dispatch_kernel(pipeline, sampler.create(&self.ctx), &input, &output);
            }
        }

        texture::download(&self.ctx, &output, source.format())
    }

    fn output_extent(&self, width: u32, height: u32, scale: u32) -> GpuResult<(u32, u32)> {
        let overflow = || GpuError::DimensionOverflow {
            width,
            height,
            scale,
        };
        let out_w = width.checked_mul(scale).ok_or_else(overflow)?;
        let out_h = height.checked_mul(scale).ok_or_else(overflow)?;

        let limit = self.ctx.max_texture_dim();
        if out_w > limit || out_h > limit {
            return Err(GpuError::ImageTooLarge {
                width: out_w,
                height: out_h,
                limit,
            });
        }
        Ok((out_w, out_h))
    }

    /// Binds pipeline + input + output + sampler, dispatches one grid over
    /// the output extent, and blocks until the command buffer completes.
    fn dispatch_kernel(
        &self,
        pipeline: &wgpu::ComputePipeline,
        sampler: wgpu::Sampler,
        input: &texture::DeviceImage,
        output: &texture::DeviceImage,
    ) {
        let layout = pipeline.get_bind_group_layout(0);
        let bind_group = self
            .ctx
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("upscale_bind_group"),
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&input.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&output.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });

        let grid = DispatchGrid::for_output(output.width(), output.height());
        debug!(grid_x = grid.x, grid_y = grid.y, "dispatching compute kernel");

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("upscale_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("upscale_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(grid.x, grid.y, 1);
        }
        self.ctx.submit_and_wait(encoder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_output_extent() {
        assert_eq!(DispatchGrid::for_output(16, 16), DispatchGrid { x: 1, y: 1 });
        assert_eq!(DispatchGrid::for_output(17, 16), DispatchGrid { x: 2, y: 1 });
        assert_eq!(DispatchGrid::for_output(1, 1), DispatchGrid { x: 1, y: 1 });
        assert_eq!(
            DispatchGrid::for_output(1920, 1080),
            DispatchGrid { x: 120, y: 68 }
        );
    }

    #[test]
    fn grid_never_undershoots() {
        for w in 1..=64u32 {
            for h in 1..=64u32 {
                let grid = DispatchGrid::for_output(w, h);
                assert!(grid.x * DispatchGrid::WORKGROUP_DIM >= w);
                assert!(grid.y * DispatchGrid::WORKGROUP_DIM >= h);
                // At most one partial group per axis.
                assert!((grid.x - 1) * DispatchGrid::WORKGROUP_DIM < w);
                assert!((grid.y - 1) * DispatchGrid::WORKGROUP_DIM < h);
            }
        }
    }
}
