//! Reference Lanczos scaler.
//!
//! A pre-built, non-configurable Lanczos-3 resampler with its own fixed
//! compute pipeline. It is the quality baseline the generic kernels are
//! compared against and bypasses the generic pipeline/sampler dispatch path:
//! callers hand it the input and output textures and it performs one
//! blocking submit of its own.

use tracing::debug;

use crate::texture::DeviceImage;
use crate::upscale::DispatchGrid;
use crate::{GpuContext, GpuResult, shaders};

/// Pre-built Lanczos-3 scaler pipeline.
pub struct LanczosScale {
    pipeline: wgpu::ComputePipeline,
}

impl LanczosScale {
    /// Compiles the fixed Lanczos pipeline.
    pub fn new(ctx: &GpuContext) -> GpuResult<Self> {
        let module = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("lanczos_scale"),
                source: wgpu::ShaderSource::Wgsl(shaders::LANCZOS.into()),
            });

        let pipeline = ctx
            .device
            .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("lanczos_scale"),
                layout: None, // Auto layout
                module: &module,
                entry_point: Some("main"),
                compilation_options: Default::default(),
                cache: None,
            });

        Ok(Self { pipeline })
    }

    /// Scales `input` into `output` and blocks until the dispatch completes.
    pub fn encode(
        &self,
        ctx: &GpuContext,
        input: &DeviceImage,
        output: &DeviceImage,
    ) -> GpuResult<()> {
        let layout = self.pipeline.get_bind_group_layout(0);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lanczos_bind_group"),
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
            ],
        });

        let grid = DispatchGrid::for_output(output.width(), output.height());
        debug!(
            width = output.width(),
            height = output.height(),
            "dispatching reference lanczos scaler"
        );

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lanczos_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("lanczos_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(grid.x, grid.y, 1);
        }
        ctx.submit_and_wait(encoder);

        Ok(())
    }
}
