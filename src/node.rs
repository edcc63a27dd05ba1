use cgmath::prelude::*;
use cgmath::{Matrix4, Vector3};
use tracing::trace;

use super::config::Config;
use super::transform;
use super::vector;

/// One mass point of the chain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainNode {
    position: Vector3<f32>,
    prev_position: Vector3<f32>,
    // Lags one step behind the position update; only feeds damping.
    velocity: Vector3<f32>,
    orientation: Matrix4<f32>,
}

impl ChainNode {
    /// A node at rest at `position`.
    pub fn new(position: Vector3<f32>) -> Self {
        ChainNode {
            position,
            prev_position: position,
            velocity: Vector3::zero(),
            orientation: transform::translate(transform::identity(), position),
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn prev_position(&self) -> Vector3<f32> {
        self.prev_position
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    /// Translation placing the node's mesh at its position, without the view
    /// rotation.
    pub fn orientation(&self) -> Matrix4<f32> {
        self.orientation
    }

    /// Advances the node by one time step while it reaches toward `target`,
    /// the current position of the next node along the chain.
    ///
    /// `incoming` is the reaction force handed on by the node updated just
    /// before this one. Returns the reaction this node hands on in turn, the
    /// negated spring force it pulled toward `target` with.
    pub fn update(&mut self, config: &Config, target: Vector3<f32>, incoming: Vector3<f32>) -> Vector3<f32> {
        let spring = spring_force(config, target - self.position);
        let damping = -self.velocity * config.damping;
        let gravity = vector::gravity(config.mass, config.gravity);
        let force = spring + incoming + damping + gravity;

        // Verlet step: x' = 2x - x_prev + F dt^2 / m
        let next = self.position * 2. + force / config.inertia() - self.prev_position;
        self.prev_position = self.position;
        self.position = next;

        // Pull back inside the ceiling in a single correction.
        let delta = target - self.position;
        let distance = delta.magnitude();
        if distance > config.max_length {
            if let Some(dir) = vector::unit(delta) {
                self.position += delta - dir * config.max_length;
            }
        }

        self.velocity = (self.position - self.prev_position) / config.time_step;
        // Placed at the clamped position, not the raw Verlet candidate.
        self.orientation = transform::translate(transform::identity(), self.position);

        -spring
    }
}

/// Spring pull along `delta`, the offset from a node to its target.
///
/// Slack at or below the rest length, Hookean up to the ceiling, and held at
/// the ceiling's value beyond it.
pub fn spring_force(config: &Config, delta: Vector3<f32>) -> Vector3<f32> {
    let distance = delta.magnitude();
    if distance <= config.rest_length {
        return Vector3::zero();
    }

    let dir = match vector::unit(delta) {
        Some(dir) => dir,
        None => {
            trace!("coincident nodes, skipping spring");
            return Vector3::zero();
        }
    };

    let stretch = if distance > config.max_length {
        dir * config.max_length - dir * config.rest_length
    } else {
        delta - dir * config.rest_length
    };
    stretch * config.spring_constant
}
