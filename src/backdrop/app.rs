//! Windowed host application.
//!
//! Drives a [`Backdrop`] from the winit event loop: window creation on
//! resume, resize/pointer forwarding, redraw-driven animation ticks,
//! and teardown on close.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use super::{Backdrop, BackdropConfig, BackdropError};

/// Full-window backdrop application.
pub struct BackdropApp {
    config: BackdropConfig,
    window: Option<Arc<Window>>,
    backdrop: Option<Backdrop>,
}

impl BackdropApp {
    /// Create an application that mounts a backdrop with `config`.
    pub fn new(config: BackdropConfig) -> Self {
        Self {
            config,
            window: None,
            backdrop: None,
        }
    }

    /// Run the event loop until the window is closed.
    pub fn run(config: BackdropConfig) -> Result<(), BackdropError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        let mut app = Self::new(config);
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.detach();
        }
        self.backdrop = None;
    }
}

impl ApplicationHandler for BackdropApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Carbon Analyzer")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match Backdrop::attach(window.clone(), &self.config) {
            Ok(backdrop) => {
                self.backdrop = Some(backdrop);
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to mount backdrop: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.teardown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.resized(size.width, size.height);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.pointer_moved(position.x, position.y);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(backdrop)) = (&self.window, &mut self.backdrop) {
                    match backdrop.frame() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                            let size = window.inner_size();
                            backdrop.resized(size.width, size.height);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Surface out of memory, exiting");
                            self.teardown();
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("Dropped frame: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
