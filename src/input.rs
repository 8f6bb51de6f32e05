//! Keyboard and mouse tracking, and the mapping from raw input to commands.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::state::Command;

/// Degrees of view rotation per pixel of mouse drag.
pub const DRAG_DEGREES_PER_PIXEL: f32 = 0.5;

/// Tracks input state for keyboard and mouse.
///
/// Events are fed in through [`handle_event`](Self::handle_event); once per
/// frame [`commands`](Self::commands) translates the accumulated state into
/// [`Command`]s and [`begin_frame`](Self::begin_frame) resets the per-frame
/// sets.
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_buttons_released: HashSet<MouseButton>,
    mouse_position: Vec2,
    mouse_delta: Vec2,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_released: HashSet::new(),
            mouse_position: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_buttons_released.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if !self.keys_down.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_down.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&key);
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    self.mouse_buttons_down.insert(*button);
                }
                ElementState::Released => {
                    self.mouse_buttons_down.remove(button);
                    self.mouse_buttons_released.insert(*button);
                }
            },
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                self.mouse_delta += new_pos - self.mouse_position;
                self.mouse_position = new_pos;
            }
            _ => {}
        }
    }

    /// Translates this frame's input into state commands.
    ///
    /// - Dragging with any mouse button held turns cursor movement into view
    ///   rotation at [`DRAG_DEGREES_PER_PIXEL`].
    /// - Releasing the left button with shift held flexes the arms once.
    /// - Space toggles the animation, R resets the pose.
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();

        if self.any_mouse_down() && self.mouse_delta != Vec2::ZERO {
            commands.push(Command::RotateView {
                yaw: self.mouse_delta.x * DRAG_DEGREES_PER_PIXEL,
                pitch: self.mouse_delta.y * DRAG_DEGREES_PER_PIXEL,
            });
        }
        if self.mouse_released(MouseButton::Left) && self.shift_down() {
            commands.push(Command::FlexArms);
        }
        if self.key_pressed(KeyCode::Space) {
            commands.push(Command::ToggleAnimation);
        }
        if self.key_pressed(KeyCode::KeyR) {
            commands.push(Command::ResetPose);
        }

        commands
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the mouse button was released this frame.
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released.contains(&button)
    }

    /// Drop a held button without registering a release.
    ///
    /// Used when another layer consumes the release event; the drag ends but
    /// no release-driven command fires.
    pub fn cancel_button(&mut self, button: MouseButton) {
        self.mouse_buttons_down.remove(&button);
    }

    fn any_mouse_down(&self) -> bool {
        !self.mouse_buttons_down.is_empty()
    }

    fn shift_down(&self) -> bool {
        self.key_down(KeyCode::ShiftLeft) || self.key_down(KeyCode::ShiftRight)
    }
}
