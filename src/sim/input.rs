//! Per-frame input aggregation
//!
//! Keyboard flags and the mobile joystick/buttons are folded into one
//! `FrameInput` value that the player rule consumes each frame.

use glam::{Vec2, Vec3};

/// Dead space between the joystick knob travel and the pad edge (px)
pub const JOYSTICK_EDGE_MARGIN: f32 = 20.0;

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Run,
}

impl Control {
    /// Map a `KeyboardEvent.code` to a control
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Control::Forward),
            "ArrowDown" | "KeyS" => Some(Control::Back),
            "ArrowLeft" | "KeyA" => Some(Control::Left),
            "ArrowRight" | "KeyD" => Some(Control::Right),
            "Space" => Some(Control::Jump),
            "ShiftLeft" => Some(Control::Run),
            _ => None,
        }
    }
}

/// Held keyboard controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub run: bool,
}

impl KeyboardState {
    pub fn set(&mut self, control: Control, pressed: bool) {
        let flag = match control {
            Control::Forward => &mut self.forward,
            Control::Back => &mut self.back,
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Jump => &mut self.jump,
            Control::Run => &mut self.run,
        };
        *flag = pressed;
    }

    /// Apply a key event by code. Returns false for unmapped keys.
    pub fn set_key(&mut self, code: &str, pressed: bool) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                self.set(control, pressed);
                true
            }
            None => false,
        }
    }

    /// Raw (unnormalized) movement vector from the arrow/WASD keys
    pub fn direction(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| pos as i32 as f32 - neg as i32 as f32;
        Vec3::new(axis(self.right, self.left), 0.0, axis(self.back, self.forward))
    }
}

/// Touch controls: virtual joystick plus jump and run-toggle buttons
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MobileInput {
    /// Joystick deflection as (x, z), each in [-1, 1]
    pub joystick: Vec2,
    /// Jump button pressed since the last frame
    pub jump_requested: bool,
    /// Run toggle state
    pub run_toggle: bool,
}

impl MobileInput {
    /// Update the joystick from a drag offset (px from the pad center)
    pub fn move_joystick(&mut self, drag: Vec2, pad_radius: f32) {
        self.joystick = normalize_joystick(drag, pad_radius);
    }

    pub fn release_joystick(&mut self) {
        self.joystick = Vec2::ZERO;
    }

    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Flip run mode, returning the new state
    pub fn toggle_run(&mut self) -> bool {
        self.run_toggle = !self.run_toggle;
        self.run_toggle
    }
}

/// Convert a joystick drag into a deflection vector.
///
/// The knob travels at most `pad_radius - JOYSTICK_EDGE_MARGIN`; longer
/// drags are pinned to that circle at the same angle.
pub fn normalize_joystick(drag: Vec2, pad_radius: f32) -> Vec2 {
    let max_distance = pad_radius - JOYSTICK_EDGE_MARGIN;
    if max_distance <= 0.0 || !drag.is_finite() {
        return Vec2::ZERO;
    }
    let knob = drag.clamp_length_max(max_distance);
    knob / max_distance
}

/// Everything the player rule needs from the input devices for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub keyboard: KeyboardState,
    pub mobile: MobileInput,
}

impl FrameInput {
    /// Normalized horizontal direction (keyboard + joystick); zero when idle
    pub fn direction(&self) -> Vec3 {
        let touch = Vec3::new(self.mobile.joystick.x, 0.0, self.mobile.joystick.y);
        (self.keyboard.direction() + touch).normalize_or_zero()
    }

    pub fn run(&self) -> bool {
        self.keyboard.run || self.mobile.run_toggle
    }

    pub fn jump(&self) -> bool {
        self.keyboard.jump || self.mobile.jump_requested
    }

    /// Clear one-shot inputs after the frame consumed them
    pub fn end_frame(&mut self) {
        self.mobile.jump_requested = false;
    }
}
