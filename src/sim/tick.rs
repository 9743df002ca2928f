//! Per-frame update
//!
//! One pass per rendered frame: player rule, then every enemy in spawn
//! order, then the physics step. All store writes land before the
//! presentation reads the snapshot.

use super::enemy::Enemy;
use super::input::FrameInput;
use super::level::{ENEMY_SPAWNS, EnemySpawn};
use super::physics::{BodyKind, KinematicWorld, Physics};
use super::player::Player;
use super::state::{GameEvent, PLAYER_SPAWN};
use super::store::StateStore;
use crate::clamp_finite;
use crate::consts::*;

/// Everything that moves
#[derive(Debug, Clone)]
pub struct Actors {
    pub player: Player,
    pub enemies: Vec<Enemy>,
}

impl Actors {
    /// Create the player and the mascots in a world
    pub fn spawn(world: &mut KinematicWorld) -> Self {
        Self::spawn_with(world, &ENEMY_SPAWNS)
    }

    pub fn spawn_with(world: &mut KinematicWorld, spawns: &[EnemySpawn]) -> Self {
        let player = Player::new(world.add_body(BodyKind::Dynamic, PLAYER_SPAWN, PLAYER_RADIUS));
        let enemies = spawns
            .iter()
            .map(|&spawn| {
                let body = world.add_body(BodyKind::Kinematic, spawn.position, ENEMY_RADIUS);
                Enemy::new(spawn, body)
            })
            .collect();
        Self { player, enemies }
    }

    /// Put everyone back on their spawn points (new round)
    pub fn reset(&mut self, world: &mut KinematicWorld) {
        world.reset_body(self.player.body, PLAYER_SPAWN);
        for enemy in &mut self.enemies {
            world.reset_body(enemy.body, enemy.spawn);
            enemy.mode = Default::default();
        }
    }
}

/// Advance one rendered frame.
///
/// `elapsed` is seconds since the round started (drives patrol), `dt` the
/// frame delta. Does nothing before the session is started.
pub fn frame<P: Physics>(
    store: &mut StateStore,
    physics: &mut P,
    actors: &mut Actors,
    input: &FrameInput,
    elapsed: f32,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !store.state().started() {
        return events;
    }

    let dt = clamp_finite(dt, 0.0, MAX_FRAME_DT);

    actors.player.update(store, physics, input, dt);
    for enemy in &mut actors.enemies {
        enemy.update(store, physics, elapsed, &mut events);
    }
    physics.step(dt);

    events
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::sim::enemy::EnemyMode;
    use crate::sim::input::KeyboardState;
    use crate::sim::level;
    use crate::sim::state::EnemyKind;
    use crate::sim::testing::MockPhysics;

    fn mock_actors(physics: &mut MockPhysics, enemy_positions: &[Vec3]) -> Actors {
        let player = Player::new(physics.add(PLAYER_SPAWN));
        let enemies = enemy_positions
            .iter()
            .map(|&position| {
                let spawn = EnemySpawn {
                    kind: EnemyKind::Grimace,
                    position,
                };
                Enemy::new(spawn, physics.add(position))
            })
            .collect();
        Actors { player, enemies }
    }

    #[test]
    fn test_frame_idle_before_start() {
        let mut store = StateStore::new();
        let mut physics = MockPhysics::default();
        let mut actors = mock_actors(&mut physics, &[Vec3::new(0.0, 1.0, 1.0)]);
        let events = frame(&mut store, &mut physics, &mut actors, &FrameInput::default(), 0.0, 0.016);
        assert!(events.is_empty());
        assert_eq!(physics.steps, 0);
        assert!(!store.state().cursed());
    }

    #[test]
    fn test_enemies_are_independent() {
        let mut store = StateStore::new();
        store.start();
        let mut physics = MockPhysics::default();
        let mut actors = mock_actors(
            &mut physics,
            &[Vec3::new(0.0, 1.0, 7.0), Vec3::new(0.0, 1.0, -7.0), Vec3::new(20.0, 1.0, 0.0)],
        );
        let events = frame(&mut store, &mut physics, &mut actors, &FrameInput::default(), 0.0, 0.016);

        assert_eq!(store.state().fear(), 10.0);
        assert!(actors.enemies[0].is_chasing());
        assert!(actors.enemies[1].is_chasing());
        assert_eq!(actors.enemies[2].mode, EnemyMode::Patrolling);
        assert_eq!(events.len(), 2);
        assert_eq!(physics.steps, 1);
    }

    #[test]
    fn test_enemies_see_position_reported_this_frame() {
        let mut store = StateStore::new();
        store.start();
        let mut physics = MockPhysics::default();
        let mut actors = mock_actors(&mut physics, &[Vec3::new(10.0, 1.0, 0.0)]);

        // Player moved next to the enemy since the last frame
        physics.teleport(actors.player.body, Vec3::new(9.0, 1.0, 0.0));
        let events = frame(&mut store, &mut physics, &mut actors, &FrameInput::default(), 0.0, 0.016);
        assert!(events.contains(&GameEvent::Captured { by: EnemyKind::Grimace }));
        assert!(store.state().cursed());
    }

    #[test]
    fn test_full_world_run_away() {
        let mut world = KinematicWorld::new(level::restaurant());
        let mut actors = Actors::spawn(&mut world);
        let mut store = StateStore::new();
        store.start();

        // Sprint toward the back wall, away from both mascots
        let input = FrameInput {
            keyboard: KeyboardState {
                forward: true,
                run: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let dt = 1.0 / 60.0;
        for i in 0..60 {
            frame(&mut store, &mut world, &mut actors, &input, i as f32 * dt, dt);
        }

        let s = store.state();
        assert!(!s.cursed());
        assert!(s.player_position().z < -5.0);
        assert!(s.stamina() < 100.0 && s.stamina() > 75.0);
    }

    #[test]
    fn test_reset_returns_actors_to_spawn() {
        let mut world = KinematicWorld::new(level::restaurant());
        let mut actors = Actors::spawn(&mut world);
        world.set_velocity(actors.enemies[0].body, Vec3::new(3.0, 0.0, 0.0));
        world.step(0.1);
        actors.enemies[0].mode = EnemyMode::Chasing;

        actors.reset(&mut world);
        assert_eq!(world.position(actors.enemies[0].body), ENEMY_SPAWNS[0].position);
        assert_eq!(world.velocity(actors.enemies[0].body), Vec3::ZERO);
        assert_eq!(actors.enemies[0].mode, EnemyMode::Patrolling);
        assert_eq!(world.position(actors.player.body), PLAYER_SPAWN);
    }
}
