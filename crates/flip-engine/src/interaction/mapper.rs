use glam::{Vec2, Vec3};

use crate::api::types::NodeId;
use crate::core::scene::Scene;
use crate::error::{Result, StageError};
use crate::renderer::camera::Camera3D;

/// Maps pointer locations onto a screen-parallel plane at a fixed depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// World point under `location` on the plane `z = depth`.
    pub fn project(camera: &Camera3D, location: Vec2, depth: f32) -> Result<Vec3> {
        camera
            .unproject(location, depth)
            .ok_or(StageError::Unprojectable {
                x: location.x,
                y: location.y,
            })
    }

    /// Move `node` so its X/Y follow the pointer. Z is never written.
    ///
    /// Nothing is mutated when the node is gone or the point cannot be mapped.
    pub fn drag_to(
        scene: &mut Scene,
        camera: &Camera3D,
        node: NodeId,
        location: Vec2,
        depth: f32,
    ) -> Result<Vec3> {
        if !scene.contains(node) {
            return Err(StageError::MissingNode(node));
        }
        let target = Self::project(camera, location, depth)?;
        let node = scene.get_mut(node).ok_or(StageError::MissingNode(node))?;
        node.transform.position.x = target.x;
        node.transform.position.y = target.y;
        Ok(node.transform.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;

    #[test]
    fn drag_keeps_depth_and_tracks_unprojection() {
        let mut scene = Scene::new();
        let id = scene.spawn(Node::new(NodeId(1)).with_position(Vec3::new(0.0, 0.0, 3.0)));
        let camera = Camera3D::default();

        for p in [Vec2::new(40.0, 100.0), Vec2::new(300.0, 700.0), Vec2::new(195.0, 422.0)] {
            let pos = CoordinateMapper::drag_to(&mut scene, &camera, id, p, 3.0).unwrap();
            let expected = camera.unproject(p, 3.0).unwrap();
            assert_eq!(pos.z, 3.0);
            assert!((pos.x - expected.x).abs() < 1e-5);
            assert!((pos.y - expected.y).abs() < 1e-5);
        }
    }

    #[test]
    fn missing_node_is_reported_without_side_effects() {
        let mut scene = Scene::new();
        let camera = Camera3D::default();
        let err = CoordinateMapper::drag_to(&mut scene, &camera, NodeId(9), Vec2::ZERO, 0.0).unwrap_err();
        assert!(matches!(err, StageError::MissingNode(NodeId(9))));
    }

    #[test]
    fn plane_behind_camera_is_unprojectable() {
        let camera = Camera3D::default().with_euler(Vec3::ZERO);
        let err = CoordinateMapper::project(&camera, Vec2::new(195.0, 422.0), 20.0).unwrap_err();
        assert!(matches!(err, StageError::Unprojectable { .. }));
    }
}
