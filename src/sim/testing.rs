//! Test doubles for the physics collaborator

use glam::Vec3;

use super::physics::{BodyId, Physics};

/// Records velocity commands; positions only change when a test moves them
#[derive(Debug, Default)]
pub struct MockPhysics {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    pub steps: u32,
}

impl MockPhysics {
    pub fn add(&mut self, position: Vec3) -> BodyId {
        self.positions.push(position);
        self.velocities.push(Vec3::ZERO);
        BodyId(self.positions.len() as u32 - 1)
    }

    pub fn teleport(&mut self, body: BodyId, position: Vec3) {
        self.positions[body.0 as usize] = position;
    }
}

impl Physics for MockPhysics {
    fn position(&self, body: BodyId) -> Vec3 {
        self.positions[body.0 as usize]
    }

    fn velocity(&self, body: BodyId) -> Vec3 {
        self.velocities[body.0 as usize]
    }

    fn set_velocity(&mut self, body: BodyId, velocity: Vec3) {
        self.velocities[body.0 as usize] = velocity;
    }

    fn step(&mut self, _dt: f32) {
        self.steps += 1;
    }
}
