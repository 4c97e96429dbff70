//! Per-frame particle rendering.

use std::sync::Arc;

use glam::Vec3;
use wgpu::util::DeviceExt;
use wgpu::{Buffer, Device, Queue, TextureFormat, TextureView};

use super::pipeline::{ParticlePipeline, ParticleUniforms};
use crate::backdrop::BackdropConfig;
use crate::field::ParticleField;
use crate::scene::{Camera, SceneTransform};

/// Per-frame renderer for one mounted backdrop instance.
///
/// Owns the pipeline, the immutable instance buffers uploaded from the
/// generated field, and the mutable runtime state (elapsed time, pointer
/// offset, rotation). The field data is never rewritten; all motion is
/// shader math plus the scene transform.
pub struct BackdropRenderer {
    device: Arc<Device>,
    queue: Arc<Queue>,
    pipeline: ParticlePipeline,
    position_buffer: Buffer,
    random_buffer: Buffer,
    color_buffer: Buffer,
    particle_count: u32,
    camera: Camera,
    transform: SceneTransform,
    config: BackdropConfig,
    elapsed_ms: f64,
    pointer: [f32; 2],
    resolution: [f32; 2],
}

impl BackdropRenderer {
    /// Create a renderer from a generated field and configuration.
    ///
    /// Uploads the three instance arrays once; they stay immutable for
    /// the lifetime of the instance.
    pub fn new(
        device: Arc<Device>,
        queue: Arc<Queue>,
        format: TextureFormat,
        config: &BackdropConfig,
        field: &ParticleField,
        width: u32,
        height: u32,
    ) -> Self {
        let pipeline = ParticlePipeline::new(&device, format);

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_positions"),
            contents: bytemuck::cast_slice(field.positions()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let random_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_randoms"),
            contents: bytemuck::cast_slice(field.randoms()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_colors"),
            contents: bytemuck::cast_slice(field.colors()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let mut camera = Camera::new(config.camera_distance);
        camera.set_aspect(width, height);

        Self {
            device,
            queue,
            pipeline,
            position_buffer,
            random_buffer,
            color_buffer,
            particle_count: field.len() as u32,
            camera,
            transform: SceneTransform::default(),
            config: config.clone(),
            elapsed_ms: 0.0,
            pointer: [0.0, 0.0],
            resolution: [width.max(1) as f32, height.max(1) as f32],
        }
    }

    /// Advance the animation clock by a frame delta in milliseconds.
    ///
    /// Accumulates speed-scaled time and rewrites the scene transform:
    /// hover offset from the latest pointer state, bounded X/Y wobble,
    /// and an unbounded Z spin that never resets.
    pub fn advance(&mut self, delta_ms: f64) {
        self.elapsed_ms += delta_ms * self.config.speed as f64;
        let elapsed = self.elapsed_ms as f32;

        if self.config.move_particles_on_hover {
            self.transform.offset = Vec3::new(
                -self.pointer[0] * self.config.particle_hover_factor,
                -self.pointer[1] * self.config.particle_hover_factor,
                0.0,
            );
        } else {
            self.transform.offset = Vec3::ZERO;
        }

        if !self.config.disable_rotation {
            self.transform.rotation.x = (elapsed * 0.0002).sin() * 0.1;
            self.transform.rotation.y = (elapsed * 0.0005).cos() * 0.15;
            self.transform.rotation.z += 0.01 * self.config.speed;
        }
    }

    /// Record the latest pointer position in normalized device
    /// coordinates. Last write wins; the next frame consumes it.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = [x, y];
    }

    /// Synchronize camera aspect and sprite scaling with a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
        self.resolution = [width.max(1) as f32, height.max(1) as f32];
        log::debug!("Backdrop resized to {}x{}", width, height);
    }

    /// Render one frame to `view`.
    ///
    /// Writes the full uniform block once, then encodes a single pass
    /// that clears to transparent black and draws the instanced quads.
    /// A zero-particle field clears the target and issues no draw call.
    pub fn render(&self, view: &TextureView) {
        let uniforms = ParticleUniforms {
            model: self.transform.model().to_cols_array_2d(),
            view: self.camera.view().to_cols_array_2d(),
            proj: self.camera.projection().to_cols_array_2d(),
            resolution: self.resolution,
            time: (self.elapsed_ms * 0.001) as f32,
            spread: self.config.particle_spread,
            base_size: self.config.particle_base_size,
            size_randomness: self.config.size_randomness,
            alpha_particles: if self.config.alpha_particles { 1.0 } else { 0.0 },
            _padding: 0.0,
        };
        self.queue.write_buffer(
            &self.pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("particle_render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particle_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.particle_count > 0 {
                render_pass.set_pipeline(&self.pipeline.pipeline);
                render_pass.set_bind_group(0, &self.pipeline.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.random_buffer.slice(..));
                render_pass.set_vertex_buffer(2, self.color_buffer.slice(..));
                render_pass.draw(0..6, 0..self.particle_count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Accumulated animation time in seconds (the value the shader sees).
    pub fn elapsed_seconds(&self) -> f32 {
        (self.elapsed_ms * 0.001) as f32
    }

    /// Current rigid-body rotation angles.
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    /// Current rigid-body offset.
    pub fn offset(&self) -> Vec3 {
        self.transform.offset
    }

    /// Number of particles drawn each frame.
    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }
}
