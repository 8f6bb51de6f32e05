//! # Blockling
//!
//! **An articulated cube creature, rendered with wgpu and steered from an
//! egui panel.**
//!
//! Thirty scaled and translated copies of one unit cube form a small
//! quadruped: torso, head, snout, eyes, nose, and four multi-segment limbs.
//! Each part's matrix is composed parent-relative through [`Transform`],
//! assembled per frame by [`assemble`] from an [`AnimationState`], and drawn
//! in one pass under a shared view rotation.
//!
//! Interaction follows a command-queue model: sliders, mouse drags, clicks,
//! and keys all reduce to [`Command`]s that apply at the next tick boundary,
//! after which the time-based arm oscillation (when enabled) overwrites the
//! arm joints. Angles are degrees and unbounded throughout.
//!
//! The pose logic is plain data all the way down to the draw call, so the
//! hierarchy, the mirror relations between left and right limbs, and the
//! command precedence rules are all testable without a GPU.

mod app;
mod color;
mod creature;
mod creature_pass;
mod fps;
mod gpu;
mod input;
mod mesh;
mod state;
mod transform;
mod ui;

pub use app::{AppConfig, run};
pub use color::Color;
pub use creature::{PART_COUNT, Part, Side, assemble, palette};
pub use creature_pass::{CreaturePass, FrameUniforms, PartInstance};
pub use fps::FpsCounter;
pub use gpu::{GpuContext, GpuError};
pub use input::{DRAG_DEGREES_PER_PIXEL, Input};
pub use mesh::{CUBE_VERTICES, CubeMesh, Vertex};
pub use state::{AnimationState, Command};
pub use transform::Transform;
pub use ui::UiOverlay;

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
