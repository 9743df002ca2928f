//! Game state and core simulation types
//!
//! `GameState` is the single session record. Fields are only writable from
//! inside `sim`; everything else reads through accessors or a snapshot.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Where the player spawns (and where the position resets on restart)
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// The two mascots haunting the restaurant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Ronald,
    Grimace,
}

impl EnemyKind {
    /// Full name used in capture notifications
    pub fn display_name(&self) -> &'static str {
        match self {
            EnemyKind::Ronald => "Ronald McDonald",
            EnemyKind::Grimace => "Grimace",
        }
    }

    /// Short upper-case tag shown above the enemy
    pub fn tag(&self) -> &'static str {
        match self {
            EnemyKind::Ronald => "RONALD",
            EnemyKind::Grimace => "GRIMACE",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            EnemyKind::Ronald => "🤡",
            EnemyKind::Grimace => "💜",
        }
    }

    /// Body color as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            EnemyKind::Ronald => 0xff0000,
            EnemyKind::Grimace => 0x800080,
        }
    }
}

/// Things that happened during a frame, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An enemy got within capture radius
    Captured { by: EnemyKind },
    /// An enemy started chasing the player
    ChaseStarted { by: EnemyKind },
    /// An enemy lost track of the player
    ChaseEnded { by: EnemyKind },
}

/// Complete session state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(super) started: bool,
    pub(super) score: u32,
    pub(super) lives: u32,
    /// Set on capture, survives restarts
    pub(super) cursed: bool,
    /// Survives restarts
    pub(super) survival_count: u32,
    /// Chase speed multiplier, ratchets up on restart
    pub(super) difficulty: f32,
    pub(super) player_position: Vec3,
    pub(super) running: bool,
    pub(super) stamina: f32,
    pub(super) fear: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            started: false,
            score: 0,
            lives: START_LIVES,
            cursed: false,
            survival_count: 0,
            difficulty: MIN_DIFFICULTY,
            player_position: PLAYER_SPAWN,
            running: false,
            stamina: MAX_STAMINA,
            fear: 0.0,
        }
    }
}

impl GameState {
    /// Fresh session state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn cursed(&self) -> bool {
        self.cursed
    }

    pub fn survival_count(&self) -> u32 {
        self.survival_count
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn fear(&self) -> f32 {
        self.fear
    }

    /// Chase speed for the current difficulty
    pub fn chase_speed(&self) -> f32 {
        CHASE_BASE_SPEED + self.difficulty * CHASE_SPEED_PER_DIFFICULTY
    }

    /// State for the next round: initial values except the carried-over
    /// curse, survival count and bumped difficulty
    pub(super) fn next_round(&self) -> Self {
        Self {
            cursed: self.cursed,
            survival_count: self.survival_count,
            difficulty: (self.difficulty + DIFFICULTY_STEP).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
            ..Self::default()
        }
    }
}
