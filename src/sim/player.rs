//! Player frame rule
//!
//! Turns input into a velocity command, handles jumping, stamina drain and
//! regen, and reports the player's position back to the store.

use glam::Vec3;

use super::input::FrameInput;
use super::physics::{BodyId, Physics};
use super::store::StateStore;
use crate::consts::*;

/// Physics handle for the player avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub body: BodyId,
}

impl Player {
    pub fn new(body: BodyId) -> Self {
        Self { body }
    }

    /// Apply one frame of player behavior
    pub fn update<P: Physics>(&self, store: &mut StateStore, physics: &mut P, input: &FrameInput, dt: f32) {
        let direction = input.direction();
        let stamina = store.state().stamina();

        let running = input.run() && stamina > 0.0;
        store.set_running(running);

        let speed = if running { RUN_SPEED } else { WALK_SPEED };
        let current = physics.velocity(self.body);
        let mut velocity = Vec3::new(direction.x * speed, current.y, direction.z * speed);

        if input.jump() && current.y.abs() < GROUNDED_EPSILON {
            velocity.y = JUMP_VELOCITY;
            log::trace!("Jump");
        }
        physics.set_velocity(self.body, velocity);

        // Time-scaled so drain/regen don't depend on frame rate
        if running {
            store.update_stamina(stamina - STAMINA_DRAIN_RATE * dt);
        } else if stamina < MAX_STAMINA {
            store.update_stamina(stamina + STAMINA_REGEN_RATE * dt);
        }

        if direction.length() > 0.0 {
            store.decrease_fear();
        }

        store.update_player_position(physics.position(self.body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::KeyboardState;
    use crate::sim::testing::MockPhysics;

    fn setup() -> (StateStore, MockPhysics, Player) {
        let mut physics = MockPhysics::default();
        let body = physics.add(Vec3::new(0.0, 1.0, 0.0));
        (StateStore::new(), physics, Player::new(body))
    }

    fn keys(keyboard: KeyboardState) -> FrameInput {
        FrameInput {
            keyboard,
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_speed_and_direction() {
        let (mut store, mut physics, player) = setup();
        let input = keys(KeyboardState {
            forward: true,
            ..Default::default()
        });
        player.update(&mut store, &mut physics, &input, 0.1);
        let v = physics.velocity(player.body);
        assert!((v - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-6);
        assert!(!store.state().running());
    }

    #[test]
    fn test_run_drains_stamina() {
        let (mut store, mut physics, player) = setup();
        let input = keys(KeyboardState {
            right: true,
            run: true,
            ..Default::default()
        });
        player.update(&mut store, &mut physics, &input, 0.5);
        assert!(store.state().running());
        assert!((physics.velocity(player.body).x - 8.0).abs() < 1e-6);
        assert!((store.state().stamina() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_exhausted_player_walks() {
        let (mut store, mut physics, player) = setup();
        store.update_stamina(0.0);
        let input = keys(KeyboardState {
            right: true,
            run: true,
            ..Default::default()
        });
        player.update(&mut store, &mut physics, &input, 0.5);
        assert!(!store.state().running());
        assert!((physics.velocity(player.body).x - 5.0).abs() < 1e-6);
        // Regenerates while not effectively running
        assert!((store.state().stamina() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_regen_caps_at_max() {
        let (mut store, mut physics, player) = setup();
        store.update_stamina(99.5);
        player.update(&mut store, &mut physics, &FrameInput::default(), 1.0);
        assert_eq!(store.state().stamina(), 100.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mut store, mut physics, player) = setup();
        let input = keys(KeyboardState {
            jump: true,
            ..Default::default()
        });
        player.update(&mut store, &mut physics, &input, 0.016);
        assert_eq!(physics.velocity(player.body).y, 8.0);

        // Airborne: keep the current vertical velocity
        physics.set_velocity(player.body, Vec3::new(0.0, 3.0, 0.0));
        player.update(&mut store, &mut physics, &input, 0.016);
        assert_eq!(physics.velocity(player.body).y, 3.0);
    }

    #[test]
    fn test_moving_calms_fear() {
        let (mut store, mut physics, player) = setup();
        store.increase_fear();
        player.update(&mut store, &mut physics, &FrameInput::default(), 0.016);
        assert_eq!(store.state().fear(), 5.0);

        let input = keys(KeyboardState {
            back: true,
            ..Default::default()
        });
        player.update(&mut store, &mut physics, &input, 0.016);
        assert_eq!(store.state().fear(), 4.0);
    }

    #[test]
    fn test_reports_position() {
        let (mut store, mut physics, player) = setup();
        physics.teleport(player.body, Vec3::new(4.0, 0.5, -2.0));
        player.update(&mut store, &mut physics, &FrameInput::default(), 0.016);
        assert_eq!(store.state().player_position(), Vec3::new(4.0, 0.5, -2.0));
    }
}
