//! Physics collaborator
//!
//! The frame rules only talk to physics through the `Physics` trait:
//! velocity commands in, positions and velocities out. `KinematicWorld` is
//! a small implementation with gravity and static box colliders, enough to
//! run the game headless or in the browser without a full rigid-body engine.

use glam::Vec3;

use super::collision::{slide, sphere_box_collision};
use super::level::StaticBox;
use crate::clamp_finite;
use crate::consts::*;

/// Handle to a body in a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// How a body is integrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Affected by gravity and pushed out of colliders
    Dynamic,
    /// Moves only by its commanded velocity
    Kinematic,
}

/// Velocity commands and position queries per tracked body
pub trait Physics {
    fn position(&self, body: BodyId) -> Vec3;
    fn velocity(&self, body: BodyId) -> Vec3;
    fn set_velocity(&mut self, body: BodyId, velocity: Vec3);
    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);
}

/// A sphere body
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
}

/// Sphere bodies over a static box level
#[derive(Debug, Clone)]
pub struct KinematicWorld {
    bodies: Vec<Body>,
    colliders: Vec<StaticBox>,
    gravity: Vec3,
    accumulator: f32,
    next_id: u32,
}

impl KinematicWorld {
    pub fn new(colliders: Vec<StaticBox>) -> Self {
        Self {
            bodies: Vec::new(),
            colliders,
            gravity: Vec3::new(0.0, GRAVITY, 0.0),
            accumulator: 0.0,
            next_id: 0,
        }
    }

    /// Add a body and return its handle
    pub fn add_body(&mut self, kind: BodyKind, position: Vec3, radius: f32) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            kind,
            position,
            velocity: Vec3::ZERO,
            radius,
        });
        id
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Teleport a body and zero its velocity
    pub fn reset_body(&mut self, id: BodyId, position: Vec3) {
        if let Some(body) = self.body_mut(id) {
            body.position = position;
            body.velocity = Vec3::ZERO;
        }
    }

    pub fn colliders(&self) -> &[StaticBox] {
        &self.colliders
    }

    /// One fixed substep
    fn substep(&mut self, dt: f32) {
        for body in &mut self.bodies {
            if body.kind == BodyKind::Dynamic {
                body.velocity += self.gravity * dt;
            }
            body.position += body.velocity * dt;

            if body.kind == BodyKind::Kinematic {
                continue;
            }
            for collider in &self.colliders {
                let result = sphere_box_collision(body.position, body.radius, collider);
                if result.hit {
                    body.position += result.normal * result.penetration;
                    body.velocity = slide(body.velocity, result.normal);
                }
            }
        }
    }
}

impl Physics for KinematicWorld {
    fn position(&self, body: BodyId) -> Vec3 {
        self.body(body).map(|b| b.position).unwrap_or(Vec3::ZERO)
    }

    fn velocity(&self, body: BodyId) -> Vec3 {
        self.body(body).map(|b| b.velocity).unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(&mut self, body: BodyId, velocity: Vec3) {
        match self.body_mut(body) {
            Some(b) => b.velocity = velocity,
            None => log::warn!("Velocity command for unknown body {:?}", body),
        }
    }

    fn step(&mut self, dt: f32) {
        self.accumulator += clamp_finite(dt, 0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= PHYSICS_DT && substeps < MAX_SUBSTEPS {
            self.substep(PHYSICS_DT);
            self.accumulator -= PHYSICS_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= PHYSICS_DT {
            // Falling behind; drop the backlog rather than spiral
            log::debug!("Physics dropped {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
    }
}
