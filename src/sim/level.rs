//! Restaurant layout
//!
//! Static box colliders and spawn points. Boxes are axis aligned and given
//! as center + full size, the same way the scene describes them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::EnemyKind;

/// What a static box represents (for the renderer and for debugging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropKind {
    Floor,
    Wall,
    Counter,
    Table,
    PlayStructure,
}

/// An axis-aligned static box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticBox {
    pub kind: PropKind,
    pub center: Vec3,
    /// Full extents along each axis
    pub size: Vec3,
}

impl StaticBox {
    pub const fn new(kind: PropKind, center: Vec3, size: Vec3) -> Self {
        Self { kind, center, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents()
    }

    /// Closest point on (or in) the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min(), self.max())
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min()).all() && p.cmple(self.max()).all()
    }
}

/// Enemy spawn description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub position: Vec3,
}

/// Floor is 50x50; the walls sit on its edges
pub const FLOOR_SIZE: f32 = 50.0;

pub const ENEMY_SPAWNS: [EnemySpawn; 2] = [
    EnemySpawn {
        kind: EnemyKind::Ronald,
        position: Vec3::new(10.0, 1.0, 5.0),
    },
    EnemySpawn {
        kind: EnemyKind::Grimace,
        position: Vec3::new(-8.0, 1.0, 10.0),
    },
];

/// All static colliders of the restaurant
pub fn restaurant() -> Vec<StaticBox> {
    use PropKind::*;

    let table = Vec3::new(2.0, 1.5, 2.0);
    vec![
        StaticBox::new(Floor, Vec3::new(0.0, -0.5, 0.0), Vec3::new(FLOOR_SIZE, 1.0, FLOOR_SIZE)),
        // Back, front, left, right
        StaticBox::new(Wall, Vec3::new(0.0, 5.0, -25.0), Vec3::new(50.0, 10.0, 1.0)),
        StaticBox::new(Wall, Vec3::new(0.0, 5.0, 25.0), Vec3::new(50.0, 10.0, 1.0)),
        StaticBox::new(Wall, Vec3::new(-25.0, 5.0, 0.0), Vec3::new(1.0, 10.0, 50.0)),
        StaticBox::new(Wall, Vec3::new(25.0, 5.0, 0.0), Vec3::new(1.0, 10.0, 50.0)),
        StaticBox::new(Counter, Vec3::new(0.0, 1.0, -20.0), Vec3::new(8.0, 2.0, 1.0)),
        StaticBox::new(Table, Vec3::new(-10.0, 0.75, -5.0), table),
        StaticBox::new(Table, Vec3::new(8.0, 0.75, -8.0), table),
        StaticBox::new(Table, Vec3::new(-15.0, 0.75, 10.0), table),
        StaticBox::new(Table, Vec3::new(12.0, 0.75, 15.0), table),
        StaticBox::new(Table, Vec3::new(0.0, 0.75, 5.0), table),
        StaticBox::new(PlayStructure, Vec3::new(15.0, 2.0, -10.0), Vec3::new(6.0, 4.0, 6.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_top_at_zero() {
        let level = restaurant();
        let floor = level.iter().find(|b| b.kind == PropKind::Floor).unwrap();
        assert_eq!(floor.max().y, 0.0);
    }

    #[test]
    fn test_spawns_inside_walls_and_clear_of_props() {
        let level = restaurant();
        for spawn in ENEMY_SPAWNS {
            assert!(spawn.position.x.abs() < FLOOR_SIZE / 2.0);
            assert!(spawn.position.z.abs() < FLOOR_SIZE / 2.0);
            assert!(!level.iter().any(|b| b.contains_point(spawn.position)));
        }
    }

    #[test]
    fn test_closest_point() {
        let b = StaticBox::new(PropKind::Table, Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(b.closest_point(Vec3::new(5.0, 0.5, -3.0)), Vec3::new(1.0, 0.5, -1.0));
        assert_eq!(b.closest_point(Vec3::new(0.2, 0.0, 0.0)), Vec3::new(0.2, 0.0, 0.0));
    }
}
