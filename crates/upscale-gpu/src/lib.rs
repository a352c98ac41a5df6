//! GPU compute pipeline for integer-factor image upscaling.
//!
//! The pipeline stages an RGBA8 image into device texture memory, selects a
//! resampling policy (compute kernel + sampler state, or the reference
//! Lanczos scaler), dispatches one compute workload over the destination
//! extent, and reads the result back into host memory. All GPU work is
//! synchronous: one command buffer per upscale, blocked on to completion.
//!
//! # Architecture
//!
//! ```text
//! Upscaler
//!     ├── GpuContext (device + queue, created once per run)
//!     ├── Pipelines (policy registry: kernel + sampler, or reference)
//!     │       └── LanczosScale (pre-built reference pipeline)
//!     └── texture (upload / allocate_output / download bridge)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use upscale_gpu::{Method, Upscaler};
//!
//! let upscaler = Upscaler::new()?;
//! let output = upscaler.upscale(&source, 2, Method::Bicubic)?;
//! ```

pub mod context;
pub mod lanczos;
pub mod policy;
mod shaders;
pub mod texture;
pub mod upscale;

pub use context::GpuContext;
pub use lanczos::LanczosScale;
pub use policy::{Method, Pipelines, ResamplingPolicy};
pub use texture::DeviceImage;
pub use upscale::{DispatchGrid, Upscaler};

use thiserror::Error;

/// GPU pipeline errors. Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    DeviceCreation(String),

    #[error("image too large: {width}x{height} exceeds GPU limit {limit}")]
    ImageTooLarge { width: u32, height: u32, limit: u32 },

    #[error("output dimensions overflow: {width}x{height} at scale {scale}")]
    DimensionOverflow { width: u32, height: u32, scale: u32 },

    #[error("scale factor must be at least 1, got {0}")]
    InvalidScale(u32),

    #[error("failed to read back output texture: {0}")]
    Readback(String),

    #[error("host buffer error: {0}")]
    HostBuffer(#[from] upscale_io::IoError),
}

/// Result alias for GPU operations.
pub type GpuResult<T> = Result<T, GpuError>;
