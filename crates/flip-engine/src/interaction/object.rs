use glam::Vec3;

use crate::api::types::NodeId;

/// The manipulable node plus the decoration nodes that count as part of it
/// for picking (e.g. the liquid inside a bottle).
///
/// Holds ids only; the nodes themselves live in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingObject {
    pub node: NodeId,
    pub decorations: Vec<NodeId>,
    /// Where the object settles after a drag.
    pub rest_position: Vec3,
}

impl FloatingObject {
    pub fn new(node: NodeId, rest_position: Vec3) -> Self {
        Self {
            node,
            decorations: Vec::new(),
            rest_position,
        }
    }

    pub fn with_decoration(mut self, decoration: NodeId) -> Self {
        if !self.decorations.contains(&decoration) {
            self.decorations.push(decoration);
        }
        self
    }

    /// Whether `id` is the object itself or one of its decorations.
    pub fn owns(&self, id: NodeId) -> bool {
        self.node == id || self.decorations.contains(&id)
    }
}
