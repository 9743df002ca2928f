//! Nightmare Escape - a restaurant chase/horror minigame
//!
//! Core modules:
//! - `sim`: Game state, state store and per-frame update rules
//! - `view`: HUD view model and camera follow (read-only over the state)
//! - `settings`: Player preferences persisted in LocalStorage

pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{MobileControls, Settings};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Physics substep (120 Hz)
    pub const PHYSICS_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per step to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the rules accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World gravity (units/s²)
    pub const GRAVITY: f32 = -30.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 0.5;
    pub const WALK_SPEED: f32 = 5.0;
    pub const RUN_SPEED: f32 = 8.0;
    pub const JUMP_VELOCITY: f32 = 8.0;
    /// Vertical speed below which the player counts as grounded
    pub const GROUNDED_EPSILON: f32 = 0.05;

    /// Stamina drain/regen (points per second)
    pub const STAMINA_DRAIN_RATE: f32 = 20.0;
    pub const STAMINA_REGEN_RATE: f32 = 10.0;
    pub const MAX_STAMINA: f32 = 100.0;

    /// Fear step sizes
    pub const FEAR_INCREASE: f32 = 5.0;
    pub const FEAR_DECREASE: f32 = 1.0;
    pub const MAX_FEAR: f32 = 100.0;
    /// Fear above which the HUD shows the terrified badge
    pub const TERRIFIED_THRESHOLD: f32 = 50.0;

    /// Difficulty ratchet
    pub const MIN_DIFFICULTY: f32 = 1.0;
    pub const MAX_DIFFICULTY: f32 = 5.0;
    pub const DIFFICULTY_STEP: f32 = 0.5;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 0.8;
    pub const DETECTION_RADIUS: f32 = 8.0;
    pub const CAPTURE_RADIUS: f32 = 1.5;
    pub const CHASE_BASE_SPEED: f32 = 2.0;
    pub const CHASE_SPEED_PER_DIFFICULTY: f32 = 0.5;
    pub const PATROL_SPEED: f32 = 1.0;

    /// Initial lives
    pub const START_LIVES: u32 = 3;
}

/// Distance between two points ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(b - a).length()
}

/// Project a 3D vector onto the ground plane as (x, z)
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Clamp to a range, mapping NaN to the lower bound
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
