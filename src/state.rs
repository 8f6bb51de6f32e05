//! Animation and interaction state.
//!
//! [`AnimationState`] is the single source of truth for every angle the
//! creature can take. Input sources never touch it directly: sliders, mouse
//! drags, clicks, and keys all reduce to a [`Command`] pushed onto a queue,
//! and the queue is drained exactly once per frame at the tick boundary.
//! After the queued commands apply, [`AnimationState::tick`] advances the
//! clock and, while animating, assigns the oscillation pose. That ordering
//! gives the oscillation the last word over slider writes.

use tracing::debug;

use crate::transform::Transform;

/// Degrees added to the upper arm by one flex.
const FLEX_UPPER_STEP: f32 = 30.0;
/// Degrees subtracted from the lower arm by one flex.
const FLEX_LOWER_STEP: f32 = 20.0;

/// Upper-arm swing amplitude, degrees.
const UPPER_SWING_DEG: f32 = 15.0;
/// Lower-arm swing amplitude, degrees.
const LOWER_SWING_DEG: f32 = 25.0;
/// Phase lag of the lower arm behind the upper, seconds.
const LOWER_SWING_PHASE: f32 = 1.0;

/// A single state mutation, queued by an input source and consumed at the
/// tick boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Set the whole-creature yaw, degrees.
    SetGlobalRotation(f32),
    /// Set the upper-arm joint angle, degrees.
    SetUpperArm(f32),
    /// Set the lower-arm joint angle, degrees.
    SetLowerArm(f32),
    /// Flip the oscillation on or off.
    ToggleAnimation,
    /// Accumulate mouse-drag view rotation, degrees.
    RotateView { yaw: f32, pitch: f32 },
    /// One-shot arm flex: upper +30, lower -20.
    FlexArms,
    /// Zero every angle; the animation flag and clock are untouched.
    ResetPose,
}

/// Every angle and flag driving the creature, advanced once per frame.
///
/// Angles are degrees and unbounded: nothing here wraps or clamps, so
/// repeated increments accumulate indefinitely. Fields are private and move
/// only through the named setters (or [`AnimationState::apply`], which
/// dispatches to them).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    global_rotation: f32,
    view_yaw: f32,
    view_pitch: f32,
    upper_arm: f32,
    lower_arm: f32,
    animating: bool,
    time: f32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            global_rotation: 0.0,
            view_yaw: 0.0,
            view_pitch: 0.0,
            upper_arm: 0.0,
            lower_arm: 0.0,
            animating: false,
            time: 0.0,
        }
    }

    pub fn set_global_rotation(&mut self, degrees: f32) {
        self.global_rotation = degrees;
    }

    pub fn set_upper_arm(&mut self, degrees: f32) {
        self.upper_arm = degrees;
    }

    pub fn set_lower_arm(&mut self, degrees: f32) {
        self.lower_arm = degrees;
    }

    pub fn toggle_animation(&mut self) {
        self.animating = !self.animating;
        debug!(animating = self.animating, "animation toggled");
    }

    /// Accumulate mouse-drag rotation onto the view accumulators.
    pub fn rotate_view(&mut self, yaw: f32, pitch: f32) {
        self.view_yaw += yaw;
        self.view_pitch += pitch;
    }

    /// One-shot arm flex. Applies regardless of the animation flag; while
    /// animating, the next tick's oscillation overwrites it.
    pub fn flex_arms(&mut self) {
        self.upper_arm += FLEX_UPPER_STEP;
        self.lower_arm -= FLEX_LOWER_STEP;
    }

    /// Zero every angle. The animation flag and clock keep their values, so
    /// a running oscillation takes over again on the next tick.
    pub fn reset_pose(&mut self) {
        self.global_rotation = 0.0;
        self.view_yaw = 0.0;
        self.view_pitch = 0.0;
        self.upper_arm = 0.0;
        self.lower_arm = 0.0;
    }

    /// Apply one queued command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetGlobalRotation(deg) => self.set_global_rotation(deg),
            Command::SetUpperArm(deg) => self.set_upper_arm(deg),
            Command::SetLowerArm(deg) => self.set_lower_arm(deg),
            Command::ToggleAnimation => self.toggle_animation(),
            Command::RotateView { yaw, pitch } => self.rotate_view(yaw, pitch),
            Command::FlexArms => self.flex_arms(),
            Command::ResetPose => self.reset_pose(),
        }
    }

    /// Drain a command queue in arrival order.
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Advance the clock and, while animating, assign the oscillation pose.
    ///
    /// `time` is seconds from a monotonic clock. The oscillation assigns
    /// rather than integrates, so it overwrites whatever this tick's
    /// commands left in the arm joints. Toggling off freezes the joints at
    /// their last assigned values; the clock keeps running regardless, so
    /// re-enabling resumes at the current phase instead of restarting.
    pub fn tick(&mut self, time: f32) {
        self.time = time;
        if self.animating {
            self.upper_arm = UPPER_SWING_DEG * time.sin();
            self.lower_arm = LOWER_SWING_DEG * (time + LOWER_SWING_PHASE).sin();
        }
    }

    /// The whole-creature rotation applied outside every part matrix:
    /// yaw from the slider plus the drag accumulator, then drag pitch.
    pub fn view_rotation(&self) -> Transform {
        Transform::IDENTITY
            .rotate_y(self.global_rotation + self.view_yaw)
            .rotate_x(self.view_pitch)
    }

    pub fn global_rotation(&self) -> f32 {
        self.global_rotation
    }

    pub fn view_yaw(&self) -> f32 {
        self.view_yaw
    }

    pub fn view_pitch(&self) -> f32 {
        self.view_pitch
    }

    pub fn upper_arm(&self) -> f32 {
        self.upper_arm
    }

    pub fn lower_arm(&self) -> f32 {
        self.lower_arm
    }

    pub fn animating(&self) -> bool {
        self.animating
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn setters_assign_absolute_values() {
        let mut state = AnimationState::new();
        state.apply(Command::SetUpperArm(40.0));
        state.apply(Command::SetUpperArm(10.0));
        assert_eq!(state.upper_arm(), 10.0);

        state.apply(Command::SetGlobalRotation(-75.0));
        assert_eq!(state.global_rotation(), -75.0);
    }

    #[test]
    fn toggle_flips_only_the_flag() {
        let mut state = AnimationState::new();
        state.apply(Command::SetUpperArm(12.0));
        state.apply(Command::ToggleAnimation);
        assert!(state.animating());
        assert_eq!(state.upper_arm(), 12.0);

        state.apply(Command::ToggleAnimation);
        assert!(!state.animating());
    }

    #[test]
    fn flexes_accumulate_without_bound() {
        let mut state = AnimationState::new();
        for _ in 0..3 {
            state.apply(Command::FlexArms);
        }
        assert!((state.upper_arm() - 90.0).abs() < EPS);
        assert!((state.lower_arm() + 60.0).abs() < EPS);

        // Same increments while the oscillation flag is set.
        state.apply(Command::ToggleAnimation);
        for _ in 0..13 {
            state.apply(Command::FlexArms);
        }
        assert!((state.upper_arm() - (90.0 + 13.0 * 30.0)).abs() < EPS);
    }

    #[test]
    fn drag_accumulates_past_full_turns() {
        let mut state = AnimationState::new();
        for _ in 0..20 {
            state.apply(Command::RotateView { yaw: 45.0, pitch: -30.0 });
        }
        assert!((state.view_yaw() - 900.0).abs() < EPS);
        assert!((state.view_pitch() + 600.0).abs() < EPS);
    }

    #[test]
    fn oscillation_boundary_values() {
        let mut state = AnimationState::new();
        state.apply(Command::ToggleAnimation);

        state.tick(0.0);
        assert!(state.upper_arm().abs() < EPS);
        assert!((state.lower_arm() - 25.0 * 1f32.sin()).abs() < EPS);

        state.tick(FRAC_PI_2);
        assert!((state.upper_arm() - 15.0).abs() < EPS);
        assert!((state.lower_arm() - 25.0 * (FRAC_PI_2 + 1.0).sin()).abs() < EPS);
    }

    #[test]
    fn oscillation_overwrites_slider_writes() {
        let mut state = AnimationState::new();
        state.apply(Command::ToggleAnimation);
        state.apply(Command::SetUpperArm(999.0));
        state.tick(2.0);
        assert!((state.upper_arm() - 15.0 * 2f32.sin()).abs() < EPS);
    }

    #[test]
    fn slider_writes_persist_while_stopped() {
        let mut state = AnimationState::new();
        state.apply(Command::SetUpperArm(42.0));
        state.tick(2.0);
        state.tick(3.0);
        assert_eq!(state.upper_arm(), 42.0);
    }

    #[test]
    fn toggle_off_freezes_and_reenable_resumes_phase() {
        let mut state = AnimationState::new();
        state.apply(Command::ToggleAnimation);
        state.tick(1.5);
        let frozen_upper = state.upper_arm();
        let frozen_lower = state.lower_arm();

        state.apply(Command::ToggleAnimation);
        state.tick(4.0);
        assert_eq!(state.upper_arm(), frozen_upper);
        assert_eq!(state.lower_arm(), frozen_lower);

        // The clock kept running, so re-enabling picks up the current
        // phase rather than restarting from zero.
        state.apply(Command::ToggleAnimation);
        state.tick(4.5);
        assert!((state.upper_arm() - 15.0 * 4.5f32.sin()).abs() < EPS);
    }

    #[test]
    fn reset_zeroes_angles_and_keeps_the_rest() {
        let mut state = AnimationState::new();
        state.apply(Command::SetGlobalRotation(120.0));
        state.apply(Command::RotateView { yaw: 700.0, pitch: 80.0 });
        state.apply(Command::FlexArms);
        state.apply(Command::ToggleAnimation);
        state.tick(3.0);

        state.apply(Command::ResetPose);
        assert_eq!(state.global_rotation(), 0.0);
        assert_eq!(state.view_yaw(), 0.0);
        assert_eq!(state.view_pitch(), 0.0);
        assert_eq!(state.upper_arm(), 0.0);
        assert_eq!(state.lower_arm(), 0.0);
        assert!(state.animating());
        assert_eq!(state.time(), 3.0);
    }

    #[test]
    fn commands_apply_in_arrival_order() {
        let mut state = AnimationState::new();
        state.apply_all([Command::SetUpperArm(10.0), Command::FlexArms]);
        assert!((state.upper_arm() - 40.0).abs() < EPS);

        let mut flipped = AnimationState::new();
        flipped.apply_all([Command::FlexArms, Command::SetUpperArm(10.0)]);
        assert!((flipped.upper_arm() - 10.0).abs() < EPS);
    }

    #[test]
    fn view_rotation_is_yaw_then_pitch() {
        let mut state = AnimationState::new();
        state.apply(Command::SetGlobalRotation(40.0));
        state.apply(Command::RotateView { yaw: 5.0, pitch: 20.0 });

        let expected = Mat4::from_rotation_y(45f32.to_radians())
            * Mat4::from_rotation_x(20f32.to_radians());
        let got = state.view_rotation().matrix();
        for (a, b) in got.to_cols_array().iter().zip(expected.to_cols_array().iter()) {
            assert!((a - b).abs() < EPS);
        }
    }
}
