//! egui control panel drawn over the scene.
//!
//! [`UiOverlay`] owns the egui context, its winit bridge, and the wgpu
//! renderer. Widgets never write to [`AnimationState`] directly: each
//! interaction becomes a [`Command`] that the caller queues for the next
//! tick. Slider values are local copies refreshed from the state every
//! frame, so an angle pushed outside the slider range by flexes or the
//! oscillation is displayed untouched until the user actually drags.

use winit::event::WindowEvent;
use winit::window::Window;

use crate::gpu::GpuContext;
use crate::state::{AnimationState, Command};

/// Slider range shown for each angle, degrees. Only user edits clamp to it.
const ANGLE_RANGE: std::ops::RangeInclusive<f32> = -180.0..=180.0;

/// The egui side panel plus the plumbing to draw it over a frame.
pub struct UiOverlay {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiOverlay {
    pub fn new(gpu: &GpuContext, window: &Window) -> Self {
        let ctx = egui::Context::default();
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        Self {
            ctx,
            winit_state,
            renderer,
        }
    }

    /// Feed a window event to egui. Returns true when egui consumed it and
    /// the rest of the app should ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Draws the control panel over `target` and returns the commands the
    /// widgets produced this frame.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        window: &Window,
        target: &wgpu::TextureView,
        state: &AnimationState,
        fps: f32,
    ) -> Vec<Command> {
        let mut commands = Vec::new();

        let raw_input = self.winit_state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            draw_panel(ctx, state, fps, &mut commands);
        });
        self.winit_state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Ui Encoder"),
            });
        self.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Ui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        commands
    }
}

fn draw_panel(ctx: &egui::Context, state: &AnimationState, fps: f32, commands: &mut Vec<Command>) {
    egui::SidePanel::left("controls").show(ctx, |ui| {
        ui.heading("Blockling");
        ui.separator();

        let mut global = state.global_rotation();
        if ui
            .add(angle_slider(&mut global, "Global rotation"))
            .changed()
        {
            commands.push(Command::SetGlobalRotation(global));
        }

        let mut upper = state.upper_arm();
        if ui.add(angle_slider(&mut upper, "Upper arm")).changed() {
            commands.push(Command::SetUpperArm(upper));
        }

        let mut lower = state.lower_arm();
        if ui.add(angle_slider(&mut lower, "Lower arm")).changed() {
            commands.push(Command::SetLowerArm(lower));
        }

        ui.separator();

        ui.horizontal(|ui| {
            let label = if state.animating() { "Stop" } else { "Start" };
            if ui.button(label).clicked() {
                commands.push(Command::ToggleAnimation);
            }
            if ui.button("Reset").clicked() {
                commands.push(Command::ResetPose);
            }
        });

        ui.separator();
        ui.label(format!("FPS: {fps:.0}"));

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Drag to orbit. Shift-click flexes the arms.").small());
        ui.label(egui::RichText::new("Space toggles the animation, R resets the pose.").small());
    });
}

fn angle_slider<'a>(value: &'a mut f32, text: &str) -> egui::Slider<'a> {
    egui::Slider::new(value, ANGLE_RANGE)
        .clamping(egui::SliderClamping::Edits)
        .suffix("°")
        .text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Out-of-range angles must pass through the sliders untouched; a
    // clamping regression would emit a Set command on the first frame.
    #[test]
    fn panel_emits_nothing_without_interaction() {
        let mut state = AnimationState::new();
        state.set_upper_arm(400.0);
        state.set_global_rotation(-720.0);

        let mut commands = Vec::new();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            draw_panel(ctx, &state, 60.0, &mut commands);
        });

        assert!(commands.is_empty());
    }
}
