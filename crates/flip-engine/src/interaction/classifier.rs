use glam::Vec2;

use crate::api::types::NodeId;
use crate::core::scene::{HitResult, Scene};
use crate::renderer::camera::Camera3D;

use super::object::FloatingObject;

/// Decides whether a pointer location targets the floating object.
///
/// Implementors only answer the ownership question for a node that was hit;
/// the provided methods do the picking.
pub trait HitClassifier {
    /// Whether a hit on `hit` counts as touching `object`.
    fn targets(&self, scene: &Scene, hit: NodeId, object: &FloatingObject) -> bool;

    /// Pick at `location` and return the hit only when it targets `object`.
    fn classify_hit(
        &self,
        scene: &Scene,
        camera: &Camera3D,
        location: Vec2,
        object: &FloatingObject,
    ) -> Option<HitResult> {
        let hit = scene.hit_test(&camera.screen_ray(location))?;
        self.targets(scene, hit.node, object).then_some(hit)
    }

    fn classify(&self, scene: &Scene, camera: &Camera3D, location: Vec2, object: &FloatingObject) -> bool {
        self.classify_hit(scene, camera, location, object).is_some()
    }
}

/// Walks from the hit node up to the root, the hit node included, and
/// matches any level owned by the object.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipChainClassifier;

impl HitClassifier for OwnershipChainClassifier {
    fn targets(&self, scene: &Scene, hit: NodeId, object: &FloatingObject) -> bool {
        scene.ancestors(hit).any(|id| object.owns(id))
    }
}

/// Matches only when the hit node itself is owned; children of the object
/// that are not registered decorations do not count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactNodeClassifier;

impl HitClassifier for ExactNodeClassifier {
    fn targets(&self, _scene: &Scene, hit: NodeId, object: &FloatingObject) -> bool {
        object.owns(hit)
    }
}
