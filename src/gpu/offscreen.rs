//! Headless offscreen rendering and frame capture.
//!
//! Renders single frames without a window, for snapshots and for tests
//! that inspect pixels directly.

use std::path::Path;

use wgpu::{Texture, TextureView};

use super::context::{GpuContext, GpuError};
use super::renderer::BackdropRenderer;
use crate::backdrop::BackdropConfig;
use crate::field::{resolve_palette, ParticleField};

/// Offscreen backdrop instance rendering into an RGBA8 texture.
pub struct OffscreenBackdrop {
    ctx: GpuContext,
    renderer: BackdropRenderer,
    render_texture: Texture,
    render_view: TextureView,
    width: u32,
    height: u32,
}

impl OffscreenBackdrop {
    /// Create an offscreen instance with a freshly generated field.
    pub async fn new(config: BackdropConfig, width: u32, height: u32) -> Result<Self, GpuError> {
        let palette = resolve_palette(&config.particle_colors);
        let field = ParticleField::generate(config.particle_count, &palette, &mut rand::thread_rng());
        Self::with_field(config, &field, width, height).await
    }

    /// Create an offscreen instance from a pre-generated field.
    ///
    /// Callers that need reproducible output generate the field from a
    /// seeded RNG and pass it in here.
    pub async fn with_field(
        config: BackdropConfig,
        field: &ParticleField,
        width: u32,
        height: u32,
    ) -> Result<Self, GpuError> {
        let ctx = GpuContext::new().await?;
        let format = wgpu::TextureFormat::Rgba8Unorm;

        let render_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("backdrop_render_target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let render_view = render_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let renderer = BackdropRenderer::new(
            ctx.device.clone(),
            ctx.queue.clone(),
            format,
            &config,
            field,
            width,
            height,
        );

        Ok(Self {
            ctx,
            renderer,
            render_texture,
            render_view,
            width,
            height,
        })
    }

    /// The renderer, for driving time and pointer state between frames.
    pub fn renderer_mut(&mut self) -> &mut BackdropRenderer {
        &mut self.renderer
    }

    /// Render one frame and read it back as tightly packed RGBA pixels.
    pub fn render_frame(&self) -> Vec<u8> {
        self.renderer.render(&self.render_view);

        let bytes_per_pixel = 4u32;
        let unpadded_row_bytes = self.width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = unpadded_row_bytes.div_ceil(align) * align;

        let readback_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("backdrop_readback_buffer"),
            size: (padded_row_bytes * self.height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("backdrop_readback_encoder"),
                });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.render_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = readback_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).unwrap();
        });
        self.ctx
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .unwrap();
        receiver.recv().unwrap().unwrap();

        let data = buffer_slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((self.width * self.height * 4) as usize);
        for row in 0..self.height {
            let start = (row * padded_row_bytes) as usize;
            let end = start + unpadded_row_bytes as usize;
            pixels.extend_from_slice(&data[start..end]);
        }
        pixels
    }

    /// Render one frame and save it as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let pixels = self.render_frame();
        image::save_buffer(
            path,
            &pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
    }

    /// Target width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}
