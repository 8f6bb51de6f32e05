use std::sync::Arc;
use std::time::Instant;

use tracing::{error, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::creature;
use crate::creature_pass::CreaturePass;
use crate::fps::FpsCounter;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::state::{AnimationState, Command};
use crate::ui::UiOverlay;

/// Configuration for the app window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Blockling".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

/// Run the blockling viewer until its window closes.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::Pending { config };
    event_loop.run_app(&mut app)?;

    if matches!(app, App::Failed) {
        anyhow::bail!("startup failed; see log for details");
    }
    Ok(())
}

enum App {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        creature_pass: CreaturePass,
        overlay: UiOverlay,
        input: Input,
        state: AnimationState,
        fps: FpsCounter,
        fps_display: f32,
        /// Commands the overlay emitted last frame, applied at the next tick.
        pending_commands: Vec<Command>,
        start_time: Instant,
    },
    Failed,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let App::Pending { config } = self {
            let window_attrs = WindowAttributes::default()
                .with_title(&config.title)
                .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(err) => {
                    error!("failed to create window: {err}");
                    *self = App::Failed;
                    event_loop.exit();
                    return;
                }
            };

            let present_mode = if config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            };
            let gpu = match GpuContext::new(window.clone(), present_mode) {
                Ok(gpu) => gpu,
                Err(err) => {
                    error!("failed to initialize GPU: {err}");
                    *self = App::Failed;
                    event_loop.exit();
                    return;
                }
            };

            let creature_pass = CreaturePass::new(&gpu);
            let overlay = UiOverlay::new(&gpu, &window);
            let now = Instant::now();

            *self = App::Running {
                window,
                gpu,
                creature_pass,
                overlay,
                input: Input::new(),
                state: AnimationState::new(),
                fps: FpsCounter::new(now),
                fps_display: 0.0,
                pending_commands: Vec::new(),
                start_time: now,
            };
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let App::Running {
            window,
            gpu,
            creature_pass,
            overlay,
            input,
            state,
            fps,
            fps_display,
            pending_commands,
            start_time,
        } = self
        else {
            return;
        };

        if overlay.on_window_event(window, &event) {
            // egui took the event. A swallowed release still has to end any
            // drag in flight, or the creature keeps orbiting afterwards.
            if let WindowEvent::MouseInput {
                state: ElementState::Released,
                button,
                ..
            } = event
            {
                input.cancel_button(button);
            }
            return;
        }

        input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let time = start_time.elapsed().as_secs_f32();

                // Tick boundary: every queued command lands before the clock
                // advances, and the oscillation gets the last word.
                let mut commands = std::mem::take(pending_commands);
                commands.extend(input.commands());
                state.apply_all(commands);
                state.tick(time);

                let parts = creature::assemble(state);

                creature_pass.ensure_depth_size(gpu);

                let output = match gpu.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.surface.configure(&gpu.device, &gpu.config);
                        window.request_redraw();
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("surface out of memory");
                        event_loop.exit();
                        return;
                    }
                    Err(err) => {
                        warn!("skipping frame: {err}");
                        window.request_redraw();
                        return;
                    }
                };
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let mut encoder =
                    gpu.device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Creature Encoder"),
                        });
                creature_pass.render(gpu, &mut encoder, &view, state.view_rotation(), &parts);
                gpu.queue.submit(std::iter::once(encoder.finish()));

                *pending_commands = overlay.render(gpu, window, &view, state, *fps_display);

                output.present();

                if let Some(published) = fps.frame(Instant::now()) {
                    *fps_display = published;
                }

                input.begin_frame();
                window.request_redraw();
            }
            _ => {}
        }
    }
}
