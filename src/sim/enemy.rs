//! Enemy frame rule
//!
//! Each enemy patrols on a fixed time-based wander until the player comes
//! within detection radius, then chases at a difficulty-scaled speed and
//! captures inside the capture radius.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::level::EnemySpawn;
use super::physics::{BodyId, Physics};
use super::state::{EnemyKind, GameEvent};
use super::store::StateStore;
use crate::consts::*;
use crate::planar_distance;

/// What an enemy is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyMode {
    #[default]
    Patrolling,
    Chasing,
}

/// A mascot bound to a physics body
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: BodyId,
    /// Where it spawned; offsets the patrol phase
    pub spawn: Vec3,
    pub mode: EnemyMode,
}

/// Deterministic idle wander velocity at elapsed time `t` (seconds)
pub fn patrol_velocity(t: f32, spawn: Vec3) -> Vec3 {
    Vec3::new((t + spawn.x).sin(), 0.0, (t + spawn.z).cos()) * PATROL_SPEED
}

impl Enemy {
    pub fn new(spawn: EnemySpawn, body: BodyId) -> Self {
        Self {
            kind: spawn.kind,
            body,
            spawn: spawn.position,
            mode: EnemyMode::Patrolling,
        }
    }

    pub fn is_chasing(&self) -> bool {
        self.mode == EnemyMode::Chasing
    }

    /// Apply one frame of enemy behavior, pushing any events onto `events`
    pub fn update<P: Physics>(
        &mut self,
        store: &mut StateStore,
        physics: &mut P,
        elapsed: f32,
        events: &mut Vec<GameEvent>,
    ) {
        let player = store.state().player_position();
        let position = physics.position(self.body);
        let distance = planar_distance(position, player);

        if distance < DETECTION_RADIUS {
            if self.mode != EnemyMode::Chasing {
                log::debug!("{} is chasing (distance {:.2})", self.kind.tag(), distance);
                events.push(GameEvent::ChaseStarted { by: self.kind });
            }
            self.mode = EnemyMode::Chasing;
            store.increase_fear();

            let direction = Vec3::new(player.x - position.x, 0.0, player.z - position.z).normalize_or_zero();
            physics.set_velocity(self.body, direction * store.state().chase_speed());

            if distance < CAPTURE_RADIUS {
                store.get_captured();
                log::info!("Caught by {}", self.kind.display_name());
                events.push(GameEvent::Captured { by: self.kind });
            }
        } else {
            if self.mode == EnemyMode::Chasing {
                log::debug!("{} lost the player", self.kind.tag());
                events.push(GameEvent::ChaseEnded { by: self.kind });
            }
            self.mode = EnemyMode::Patrolling;
            physics.set_velocity(self.body, patrol_velocity(elapsed, self.spawn));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::MockPhysics;

    fn setup(enemy_pos: Vec3) -> (StateStore, MockPhysics, Enemy) {
        let mut physics = MockPhysics::default();
        let body = physics.add(enemy_pos);
        let spawn = EnemySpawn {
            kind: EnemyKind::Ronald,
            position: enemy_pos,
        };
        (StateStore::new(), physics, Enemy::new(spawn, body))
    }

    #[test]
    fn test_detection_raises_fear_and_chases() {
        let (mut store, mut physics, mut enemy) = setup(Vec3::new(0.0, 1.0, 7.0));
        let mut events = Vec::new();
        enemy.update(&mut store, &mut physics, 0.0, &mut events);

        assert!(enemy.is_chasing());
        assert_eq!(store.state().fear(), 5.0);
        assert!(!store.state().cursed());
        assert_eq!(events, vec![GameEvent::ChaseStarted { by: EnemyKind::Ronald }]);

        // Heads toward the player at 2 + 1 * 0.5
        let v = physics.velocity(enemy.body);
        assert!((v - Vec3::new(0.0, 0.0, -2.5)).length() < 1e-6);
    }

    #[test]
    fn test_capture_inside_radius() {
        let (mut store, mut physics, mut enemy) = setup(Vec3::new(0.0, 1.0, 1.4));
        store.update_stamina(20.0);
        let mut events = Vec::new();
        enemy.update(&mut store, &mut physics, 0.0, &mut events);

        let s = store.state();
        assert!(s.cursed());
        assert_eq!(s.fear(), 0.0);
        assert_eq!(s.stamina(), 100.0);
        assert_eq!(
            events,
            vec![
                GameEvent::ChaseStarted { by: EnemyKind::Ronald },
                GameEvent::Captured { by: EnemyKind::Ronald },
            ]
        );
    }

    #[test]
    fn test_patrol_outside_radius() {
        let spawn = Vec3::new(10.0, 1.0, 5.0);
        let (mut store, mut physics, mut enemy) = setup(spawn);
        let mut events = Vec::new();
        enemy.update(&mut store, &mut physics, 2.0, &mut events);

        assert_eq!(enemy.mode, EnemyMode::Patrolling);
        assert!(events.is_empty());
        assert_eq!(store.state().fear(), 0.0);
        let v = physics.velocity(enemy.body);
        assert!((v.x - 12.0f32.sin()).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
        assert!((v.z - 7.0f32.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_height_is_ignored() {
        let (mut store, mut physics, mut enemy) = setup(Vec3::new(0.0, 30.0, 1.0));
        let mut events = Vec::new();
        enemy.update(&mut store, &mut physics, 0.0, &mut events);
        assert!(store.state().cursed());
    }

    #[test]
    fn test_chase_ends_when_player_escapes() {
        let (mut store, mut physics, mut enemy) = setup(Vec3::new(0.0, 1.0, 7.0));
        let mut events = Vec::new();
        enemy.update(&mut store, &mut physics, 0.0, &mut events);
        events.clear();

        store.update_player_position(Vec3::new(0.0, 1.0, -20.0));
        enemy.update(&mut store, &mut physics, 0.5, &mut events);
        assert_eq!(enemy.mode, EnemyMode::Patrolling);
        assert_eq!(events, vec![GameEvent::ChaseEnded { by: EnemyKind::Ronald }]);
    }

    #[test]
    fn test_chase_speed_follows_difficulty() {
        let (mut store, mut physics, mut enemy) = setup(Vec3::new(6.0, 1.0, 0.0));
        store.restart();
        store.restart();
        let mut events = Vec::new();
        enemy.update(&mut store, &mut physics, 0.0, &mut events);
        // difficulty 2.0 -> 3.0 units/s toward -x
        let v = physics.velocity(enemy.body);
        assert!((v - Vec3::new(-3.0, 0.0, 0.0)).length() < 1e-6);
    }
}
