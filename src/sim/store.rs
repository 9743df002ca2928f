//! State store: the only place `GameState` is mutated
//!
//! Every transition accepts any input and sanitizes by clamping. Nothing
//! here can fail.

use glam::Vec3;

use super::state::GameState;
use crate::clamp_finite;
use crate::consts::*;

/// Owner of the session state
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    state: GameState,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state, for presentation
    pub fn snapshot(&self) -> GameState {
        self.state
    }

    /// Begin the session (idempotent)
    pub fn start(&mut self) {
        if !self.state.started {
            log::info!("Session started (difficulty {})", self.state.difficulty);
        }
        self.state.started = true;
    }

    /// Reset for another round, keeping the curse and survival count and
    /// raising difficulty
    pub fn restart(&mut self) {
        self.state = self.state.next_round();
        log::info!(
            "Session restarted: difficulty {}, cursed {}, survived {}",
            self.state.difficulty,
            self.state.cursed,
            self.state.survival_count
        );
    }

    pub fn update_player_position(&mut self, position: Vec3) {
        self.state.player_position = position;
    }

    pub fn increase_fear(&mut self) {
        self.state.fear = (self.state.fear + FEAR_INCREASE).min(MAX_FEAR);
    }

    pub fn decrease_fear(&mut self) {
        self.state.fear = (self.state.fear - FEAR_DECREASE).max(0.0);
    }

    /// Caught by an enemy: cursed for good, fear and stamina reset
    pub fn get_captured(&mut self) {
        self.state.cursed = true;
        self.state.fear = 0.0;
        self.state.stamina = MAX_STAMINA;
        log::info!("Player captured, curse applied");
    }

    /// Store a caller-computed stamina value, clamped to [0, 100]
    pub fn update_stamina(&mut self, value: f32) {
        self.state.stamina = clamp_finite(value, 0.0, MAX_STAMINA);
    }

    pub fn set_running(&mut self, running: bool) {
        if running != self.state.running {
            log::trace!("Running: {}", running);
        }
        self.state.running = running;
    }
}
