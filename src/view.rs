//! Presentation view model
//!
//! The HUD pulls a `HudView` from the state snapshot once per frame, after
//! all frame rules have run. Nothing here writes to the store.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Actors, EnemyKind, EnemyMode, GameState, Physics};

/// Highest vignette opacity
pub const MAX_VIGNETTE_ALPHA: f32 = 0.9;

/// Camera placement relative to the player
pub const CAMERA_OFFSET: Vec3 = Vec3::new(5.0, 3.0, 5.0);
/// Where the camera sits before the first frame
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, 10.0);
/// Follow rate (fraction of the remaining distance per second)
pub const CAMERA_FOLLOW_RATE: f32 = 2.0;

/// Status line under the bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    Running,
    Exhausted,
}

impl ActionLabel {
    pub fn text(&self) -> &'static str {
        match self {
            ActionLabel::Running => "🏃 RUNNING",
            ActionLabel::Exhausted => "😵 EXHAUSTED",
        }
    }
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub score: u32,
    pub lives: u32,
    pub survived: u32,
    pub difficulty: f32,
    /// Rounded percentages
    pub stamina_pct: u32,
    pub fear_pct: u32,
    pub cursed: bool,
    pub terrified: bool,
    pub action: Option<ActionLabel>,
    /// Red vignette opacity, grows in steps of 0.1 with fear
    pub vignette_alpha: f32,
    /// Radius (%) of the clear area in the middle of the vignette
    pub vignette_clear_pct: f32,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let stamina = state.stamina();
        let fear = state.fear();

        let action = if state.running() && stamina > 0.0 {
            Some(ActionLabel::Running)
        } else if stamina == 0.0 {
            Some(ActionLabel::Exhausted)
        } else {
            None
        };

        Self {
            score: state.score(),
            lives: state.lives(),
            survived: state.survival_count(),
            difficulty: state.difficulty(),
            stamina_pct: stamina.round() as u32,
            fear_pct: fear.round() as u32,
            cursed: state.cursed(),
            terrified: fear > TERRIFIED_THRESHOLD,
            action,
            vignette_alpha: ((fear / 10.0).floor() / 10.0).min(MAX_VIGNETTE_ALPHA),
            vignette_clear_pct: MAX_FEAR - fear,
        }
    }

    /// "Level: 1.5"
    pub fn difficulty_label(&self) -> String {
        format!("Level: {}", self.difficulty)
    }
}

/// Toast text shown when a mascot catches the player
pub fn capture_message(by: EnemyKind) -> String {
    format!(
        "{} {} caught you! You must now wear diapers forever! 👶",
        by.emoji(),
        by.display_name()
    )
}

/// Third-person camera that eases toward a point behind the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: CAMERA_START,
            look_at: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Ease toward the follow point; `smoothing = false` snaps
    pub fn follow(&mut self, player: Vec3, dt: f32, smoothing: bool) {
        let target = player + CAMERA_OFFSET;
        let t = if smoothing {
            (dt * CAMERA_FOLLOW_RATE).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.position = self.position.lerp(target, t);
        self.look_at = player;
    }
}

/// One enemy as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub position: Vec3,
    pub mode: EnemyMode,
}

/// Everything a scene renderer pulls after a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub state: GameState,
    pub camera: CameraRig,
    pub enemies: Vec<EnemyView>,
}

impl SceneSnapshot {
    pub fn capture<P: Physics>(state: &GameState, camera: &CameraRig, actors: &Actors, physics: &P) -> Self {
        let enemies = actors
            .enemies
            .iter()
            .map(|e| EnemyView {
                kind: e.kind,
                position: physics.position(e.body),
                mode: e.mode,
            })
            .collect();
        Self {
            state: *state,
            camera: *camera,
            enemies,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
