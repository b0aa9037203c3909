use glam::{Mat4, Vec3};

use crate::api::types::NodeId;
use crate::components::node::Node;
use crate::core::bounds::Ray;
use crate::error::{Result, StageError};

/// Frontmost node under a picking ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub node: NodeId,
    /// World-space point where the ray enters the node's bounds.
    pub point: Vec3,
    /// Ray parameter of the hit (world units for a unit-length ray).
    pub distance: f32,
}

/// Node arena using a flat Vec with id-based parent/child links.
/// Designed for small scenes (tens of nodes, not thousands).
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(32),
        }
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node at the root of the tree.
    pub fn spawn(&mut self, mut node: Node) -> NodeId {
        debug_assert!(!self.contains(node.id), "duplicate node id {:?}", node.id);
        node.parent = None;
        node.children.clear();
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Add a node as the last child of `parent`.
    pub fn spawn_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(StageError::MissingNode(parent));
        }
        let id = self.spawn(node);
        self.attach(parent, id);
        Ok(id)
    }

    /// Move an existing node under `parent`. Rejects cycles.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.contains(parent) {
            return Err(StageError::MissingNode(parent));
        }
        if !self.contains(child) {
            return Err(StageError::MissingNode(child));
        }
        if self.ancestors(parent).any(|id| id == child) {
            return Err(StageError::InvalidParent { parent, child });
        }
        self.detach(child);
        self.attach(parent, child);
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.get_mut(old_parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
        }
    }

    /// Remove a node and its whole subtree. Returns every removed id,
    /// the node itself first. Empty when the node is unknown.
    pub fn despawn(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.detach(id);

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(idx) = self.nodes.iter().position(|n| n.id == next) {
                let node = self.nodes.swap_remove(idx);
                stack.extend(node.children.iter().rev().copied());
                removed.push(next);
            }
        }
        removed
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Iterate over all nodes (no particular tree order).
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Walk from `id` up to its root, starting with `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self.contains(id).then_some(id),
            budget: self.nodes.len(),
        }
    }

    /// Local-to-world matrix, composed root first.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.get(id)?;
        let mut world = node.transform.matrix();
        let mut cursor = node.parent;
        while let Some(parent_id) = cursor {
            let parent = self.get(parent_id)?;
            world = parent.transform.matrix() * world;
            cursor = parent.parent;
        }
        Some(world)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// A node counts as active only when every ancestor is active too.
    pub fn is_active_in_hierarchy(&self, id: NodeId) -> bool {
        let mut seen = false;
        for ancestor in self.ancestors(id) {
            seen = true;
            if !self.get(ancestor).is_some_and(|n| n.active) {
                return false;
            }
        }
        seen
    }

    /// Opacity after multiplying down the hierarchy.
    pub fn effective_opacity(&self, id: NodeId) -> f32 {
        self.ancestors(id)
            .filter_map(|a| self.get(a))
            .map(|n| n.opacity)
            .product()
    }

    /// Frontmost active, pickable node whose bounds the ray enters.
    pub fn hit_test(&self, ray: &Ray) -> Option<HitResult> {
        let mut best: Option<HitResult> = None;

        for node in &self.nodes {
            if !node.pickable {
                continue;
            }
            let Some(bounds) = node.local_bounds() else {
                continue;
            };
            if !self.is_active_in_hierarchy(node.id) {
                continue;
            }
            let Some(world) = self.world_matrix(node.id) else {
                continue;
            };
            if world.determinant().abs() < f32::EPSILON {
                continue;
            }

            let local_ray = ray.transformed(&world.inverse());
            let Some(t) = bounds.intersect_ray(&local_ray) else {
                continue;
            };

            if best.map_or(true, |b| t < b.distance) {
                best = Some(HitResult {
                    node: node.id,
                    point: ray.at(t),
                    distance: t,
                });
            }
        }

        best
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`Scene::ancestors`].
pub struct Ancestors<'a> {
    scene: &'a Scene,
    next: Option<NodeId>,
    budget: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        self.next = self.scene.parent(current);
        Some(current)
    }
}
