use glam::{Mat4, Quat, Vec3};

use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;
use crate::core::bounds::Aabb;

/// Local transform relative to the parent node (or the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A scene node: transform, optional geometry, and its place in the tree.
///
/// Hierarchy links are owned by [`Scene`](crate::core::scene::Scene) and only
/// readable from here, so parent and child lists cannot drift apart.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Inactive nodes (and their subtrees) are neither drawn nor hit.
    pub active: bool,
    /// Whether picking rays may stop on this node.
    pub pickable: bool,
    pub transform: Transform,
    /// Multiplied down the hierarchy (0 = invisible, 1 = opaque).
    pub opacity: f32,
    pub mesh: Option<MeshComponent>,
    /// Explicit hit extent. Falls back to the mesh's bounds.
    pub bounds: Option<Aabb>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pickable: true,
            transform: Transform::default(),
            opacity: 1.0,
            mesh: None,
            bounds: None,
            parent: None,
            children: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn unpickable(mut self) -> Self {
        self.pickable = false;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Extent used for hit-testing, if the node has any.
    pub fn local_bounds(&self) -> Option<Aabb> {
        self.bounds
            .or_else(|| self.mesh.map(|mesh| mesh.shape.local_bounds()))
    }
}
