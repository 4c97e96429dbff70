//! Carbon Backdrop
//!
//! GPU-accelerated animated particle backdrop library.
//!
//! # Features
//!
//! - Procedural particle field generation (uniform ball sampling,
//!   palette colors)
//! - GPU rendering via wgpu (Metal on macOS, Vulkan on Linux)
//! - Windowed animation loop with pointer and resize interaction via
//!   winit
//! - Headless offscreen rendering for frame capture and tests

pub mod backdrop;
pub mod field;
pub mod gpu;
pub mod scene;

// Re-export commonly used types
pub use backdrop::{Backdrop, BackdropApp, BackdropConfig, BackdropError, LoopState};
pub use field::{parse_hex_color, resolve_palette, ParticleField, DEFAULT_PALETTE};
pub use gpu::{BackdropRenderer, GpuContext, GpuError, OffscreenBackdrop};
pub use scene::{Camera, SceneTransform};
