//! Resampling policy registry.
//!
//! Maps a requested method name to a compute pipeline + sampler
//! configuration, or to the reference Lanczos delegate. Resolution is total:
//! unrecognized or absent names silently fall back to bicubic.

use tracing::debug;

use crate::lanczos::LanczosScale;
use crate::shaders;
use crate::{GpuContext, GpuResult};

/// Requested resampling method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Nearest-neighbor (no blending across samples).
    Nearest,
    /// Bilinear (standard 2x2 blend).
    Bilinear,
    /// Bicubic approximation built from linear taps.
    #[default]
    Bicubic,
    /// Reference high-quality Lanczos scaler.
    Lanczos,
}

impl Method {
    /// Parses a method name. Total: `None` and unrecognized names resolve to
    /// [`Method::Bicubic`] without error.
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            Some("nearest") => Method::Nearest,
            Some("bilinear") => Method::Bilinear,
            Some("bicubic") => Method::Bicubic,
            Some("lanczos") => Method::Lanczos,
            _ => Method::Bicubic,
        }
    }

    /// Canonical name of the method actually applied.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Nearest => "nearest",
            Method::Bilinear => "bilinear",
            Method::Bicubic => "bicubic",
            Method::Lanczos => "lanczos",
        }
    }

    /// Sampler state for the generic kernel path, or `None` for the
    /// reference delegate, which builds no sampler at all.
    pub fn sampler_config(&self) -> Option<SamplerConfig> {
        match self {
            Method::Nearest => Some(SamplerConfig::nearest()),
            // The bicubic kernel composites linear taps; its sampler state
            // is identical to bilinear.
            Method::Bilinear | Method::Bicubic => Some(SamplerConfig::linear()),
            Method::Lanczos => None,
        }
    }
}

/// Sampler state bound alongside a generic kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Magnification filter.
    pub mag_filter: wgpu::FilterMode,
    /// Minification filter.
    pub min_filter: wgpu::FilterMode,
    /// Edge address mode, applied on both axes.
    pub address_mode: wgpu::AddressMode,
}

impl SamplerConfig {
    fn nearest() -> Self {
        Self {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            address_mode: wgpu::AddressMode::ClampToEdge,
        }
    }

    fn linear() -> Self {
        Self {
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode: wgpu::AddressMode::ClampToEdge,
        }
    }

    pub(crate) fn create(&self, ctx: &GpuContext) -> wgpu::Sampler {
        ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("upscale_sampler"),
            address_mode_u: self.address_mode,
            address_mode_v: self.address_mode,
            address_mode_w: self.address_mode,
            mag_filter: self.mag_filter,
            min_filter: self.min_filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }
}

/// Resolved resampling policy for one dispatch.
pub enum ResamplingPolicy<'a> {
    /// Generic path: compiled kernel + sampler state.
    Kernel {
        /// Compute pipeline for the selected kernel.
        pipeline: &'a wgpu::ComputePipeline,
        /// Sampler state bound with it.
        sampler: SamplerConfig,
    },
    /// Reference path: pre-built Lanczos scaler, bypassing the generic
    /// pipeline/sampler machinery entirely.
    Reference(&'a LanczosScale),
}

/// Compiled pipelines for every policy, built once per run.
pub struct Pipelines {
    nearest: wgpu::ComputePipeline,
    bilinear: wgpu::ComputePipeline,
    bicubic: wgpu::ComputePipeline,
    lanczos: LanczosScale,
}

impl Pipelines {
    /// Compiles the three generic kernels and the reference scaler.
    pub fn new(ctx: &GpuContext) -> GpuResult<Self> {
        let create_pipeline = |source: &str, label: &str| -> wgpu::ComputePipeline {
            let module = ctx
                .device
                .create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(label),
                    source: wgpu::ShaderSource::Wgsl(source.into()),
                });

            ctx.device
                .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some(label),
                    layout: None, // Auto layout
                    module: &module,
                    entry_point: Some("main"),
                    compilation_options: Default::default(),
                    cache: None,
                })
        };

        Ok(Self {
            nearest: create_pipeline(shaders::NEAREST, "nearest_kernel"),
            bilinear: create_pipeline(shaders::BILINEAR, "bilinear_kernel"),
            bicubic: create_pipeline(shaders::BICUBIC, "bicubic_kernel"),
            lanczos: LanczosScale::new(ctx)?,
        })
    }

    /// Resolves a method to its policy.
    pub fn resolve(&self, method: Method) -> ResamplingPolicy<'_> {
        debug!(method = method.name(), "resolved resampling policy");
        match method.sampler_config() {
            Some(sampler) => {
                let pipeline = match method {
                    Method::Nearest => &self.nearest,
                    Method::Bilinear => &self.bilinear,
                    _ => &self.bicubic,
                };
                ResamplingPolicy::Kernel { pipeline, sampler }
            }
            None => ResamplingPolicy::Reference(&self.lanczos),
        }
    }
}
