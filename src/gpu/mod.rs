//! GPU rendering using wgpu.
//!
//! Provides the rendering surface plumbing for the particle backdrop:
//! context acquisition, the particle pipeline and its shader, per-frame
//! rendering, and a headless offscreen path for frame capture.

pub mod context;
pub mod offscreen;
pub mod pipeline;
pub mod renderer;

pub use context::{GpuContext, GpuError};
pub use offscreen::OffscreenBackdrop;
pub use pipeline::{ParticlePipeline, ParticleUniforms};
pub use renderer::BackdropRenderer;
