//! Game simulation module
//!
//! All gameplay logic lives here:
//! - `GameState` is only mutated through `StateStore`
//! - One update pass per rendered frame, single-threaded
//! - Physics is reached only through the `Physics` trait
//! - No rendering or platform dependencies

pub mod collision;
pub mod context;
pub mod enemy;
pub mod input;
pub mod level;
pub mod physics;
pub mod player;
pub mod state;
pub mod store;
pub mod tick;

#[cfg(test)]
pub(crate) mod testing;

pub use collision::{CollisionResult, slide, sphere_box_collision};
pub use context::{StoreError, install, is_installed, uninstall, with_store, with_store_mut};
pub use enemy::{Enemy, EnemyMode, patrol_velocity};
pub use input::{Control, FrameInput, KeyboardState, MobileInput, normalize_joystick};
pub use level::{ENEMY_SPAWNS, EnemySpawn, PropKind, StaticBox};
pub use physics::{BodyId, BodyKind, KinematicWorld, Physics};
pub use player::Player;
pub use state::{EnemyKind, GameEvent, GameState, PLAYER_SPAWN};
pub use store::StateStore;
pub use tick::{Actors, frame};
