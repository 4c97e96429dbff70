//! Backdrop lifecycle: mount, animation loop state, teardown.
//!
//! A [`Backdrop`] is one mounted instance: a presentation surface on a
//! host window, a generated particle field uploaded to the GPU, and the
//! runtime state the loop advances each frame. Configuration is fixed
//! per instance; changing it means detach and re-attach.

mod app;
mod config;

pub use app::BackdropApp;
pub use config::BackdropConfig;

use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use crate::field::{resolve_palette, ParticleField};
use crate::gpu::{BackdropRenderer, GpuContext, GpuError};

/// Errors that can occur while mounting or running a backdrop.
#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Animation loop state.
///
/// `Running` from attach until detach; there is no pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// One mounted backdrop instance on a host window.
pub struct Backdrop {
    ctx: GpuContext,
    surface: Option<wgpu::Surface<'static>>,
    surface_config: wgpu::SurfaceConfiguration,
    renderer: BackdropRenderer,
    state: LoopState,
    last_frame: Instant,
}

impl Backdrop {
    /// Mount a backdrop onto `window`.
    ///
    /// Creates the presentation surface, acquires a compatible adapter,
    /// generates the particle field, and starts the loop in the
    /// `Running` state. The window is the only borrowed resource; the
    /// surface attached to it is released on detach or drop.
    pub fn attach(window: Arc<Window>, config: &BackdropConfig) -> Result<Self, BackdropError> {
        let size = window.inner_size();

        let instance = GpuContext::create_instance();
        let surface = instance.create_surface(window)?;
        let ctx = pollster::block_on(GpuContext::with_instance(instance, Some(&surface)))?;

        let surface_caps = surface.get_capabilities(&ctx.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let present_mode = surface_caps
            .present_modes
            .iter()
            .copied()
            .find(|&mode| mode == wgpu::PresentMode::Fifo)
            .unwrap_or(surface_caps.present_modes[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctx.device, &surface_config);

        let palette = resolve_palette(&config.particle_colors);
        let field =
            ParticleField::generate(config.particle_count, &palette, &mut rand::thread_rng());
        log::info!(
            "Backdrop mounted: {} particles at {}x{}",
            field.len(),
            surface_config.width,
            surface_config.height
        );

        let renderer = BackdropRenderer::new(
            ctx.device.clone(),
            ctx.queue.clone(),
            surface_format,
            config,
            &field,
            surface_config.width,
            surface_config.height,
        );

        Ok(Self {
            ctx,
            surface: Some(surface),
            surface_config,
            renderer,
            state: LoopState::Running,
            last_frame: Instant::now(),
        })
    }

    /// Synchronize the surface and camera with a new window size.
    pub fn resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        if let Some(surface) = &self.surface {
            surface.configure(&self.ctx.device, &self.surface_config);
        }
        self.renderer.resize(width, height);
    }

    /// Record a pointer position in window pixel coordinates.
    ///
    /// Converted to normalized device coordinates (`[-1, 1]`,
    /// y-flipped) and stored for the next frame; only the latest value
    /// matters.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let width = self.surface_config.width.max(1) as f64;
        let height = self.surface_config.height.max(1) as f64;
        let ndc_x = (x / width) * 2.0 - 1.0;
        let ndc_y = -((y / height) * 2.0 - 1.0);
        self.renderer.set_pointer(ndc_x as f32, ndc_y as f32);
    }

    /// Run one animation tick: advance time, update the transform, and
    /// present a frame.
    ///
    /// Ignored after detach. Surface errors are returned for the host
    /// to handle (typically by reconfiguring on `Lost`/`Outdated`).
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.state != LoopState::Running {
            return Ok(());
        }
        let Some(surface) = &self.surface else {
            return Ok(());
        };

        let now = Instant::now();
        let delta_ms = now.duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.last_frame = now;
        self.renderer.advance(delta_ms);

        let frame = surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&view);
        frame.present();
        Ok(())
    }

    /// Unmount: stop the loop and release the surface.
    ///
    /// Safe to call more than once; later frame callbacks are ignored.
    pub fn detach(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.surface = None;
        log::info!("Backdrop detached");
    }

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The renderer, exposing runtime state accessors.
    pub fn renderer(&self) -> &BackdropRenderer {
        &self.renderer
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.detach();
    }
}
