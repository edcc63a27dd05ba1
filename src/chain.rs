use cgmath::prelude::*;
use cgmath::{Matrix4, Vector3};
use tracing::{debug, trace};

use super::config::Config;
use super::input::Controls;
use super::node::ChainNode;
use super::transform;

/// A fixed-length chain of nodes, solved in one sweep per frame.
///
/// Node 0 is the free end that receives the external force. Each node reaches
/// toward the next one, and the last node has no successor, so it is never
/// moved and acts as the anchor.
pub struct Chain {
    nodes: Vec<ChainNode>,
    model_views: Vec<Matrix4<f32>>,
}

impl Chain {
    pub fn new(positions: Vec<Vector3<f32>>) -> Self {
        let nodes: Vec<_> = positions.into_iter().map(ChainNode::new).collect();
        let model_views = nodes.iter().map(|node| node.orientation()).collect();
        debug!(nodes = nodes.len(), "created chain");
        Chain { nodes, model_views }
    }

    /// A vertical chain at rest, `config.node_count` nodes spaced by the rest
    /// length and rising from `base`.
    pub fn hanging(config: &Config, base: Vector3<f32>) -> Self {
        let positions = (0..config.node_count)
            .map(|i| base + Vector3::unit_y() * (config.rest_length * i as f32))
            .collect();
        Self::new(positions)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.nodes.iter().map(|node| node.position())
    }

    /// Per-node render transforms from the last step, including the view
    /// rotation.
    pub fn model_views(&self) -> &[Matrix4<f32>] {
        &self.model_views
    }

    /// Advances the chain by one frame.
    ///
    /// Nodes are visited from the free end toward the anchor. Each one springs
    /// toward its successor's position from before this sweep and hands its
    /// reaction force on as the successor's incoming force. The external force
    /// seeds the first node.
    pub fn step(&mut self, config: &Config, controls: Controls) {
        let mut force = controls.external_force;
        for i in 0..self.nodes.len().saturating_sub(1) {
            let target = self.nodes[i + 1].position();
            force = self.nodes[i].update(config, target, force);
        }

        for (view, node) in self.model_views.iter_mut().zip(self.nodes.iter()) {
            *view = transform::rotate_y(node.orientation(), controls.rotation_y);
        }

        trace!(tip = ?self.nodes.first().map(|n| n.position()), "stepped chain");
    }

    /// Whether every node still has a finite position. Extreme configurations
    /// can blow the integration up; nothing corrects that.
    pub fn is_finite(&self) -> bool {
        self.positions().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    /// Largest distance between neighbouring nodes.
    pub fn max_separation(&self) -> f32 {
        self.nodes.windows(2)
            .map(|pair| (pair[1].position() - pair[0].position()).magnitude())
            .fold(0., f32::max)
    }
}
