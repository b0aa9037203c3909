use glam::{Vec2, Vec3};
use serde::Deserialize;

use crate::animation::sequencer::Sequencer;
use crate::api::types::{NodeId, StageEvent};
use crate::core::scene::{HitResult, Scene};
use crate::error::{Result, StageError};
use crate::interaction::config::InteractionConfig;
use crate::interaction::object::FloatingObject;
use crate::renderer::camera::Camera3D;
use crate::systems::lighting::LightState;

/// Configuration for the stage, provided by the setup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Render surface width in points.
    pub viewport_width: f32,
    /// Render surface height in points.
    pub viewport_height: f32,
    pub camera_position: Vec3,
    /// Camera pitch, yaw, roll in radians.
    pub camera_euler: Vec3,
    pub camera_fov_degrees: f32,
    /// Upper bound on a single frame step, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Maximum number of render instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of stage events per frame (default: 32).
    pub max_events: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        let camera = Camera3D::default();
        Self {
            viewport_width: camera.viewport.x,
            viewport_height: camera.viewport.y,
            camera_position: camera.position,
            camera_euler: camera.euler,
            camera_fov_degrees: camera.fov_y_degrees,
            max_frame_dt: 0.1,
            max_instances: 64,
            max_events: 32,
        }
    }
}

impl StageConfig {
    pub fn camera(&self) -> Camera3D {
        Camera3D::new(self.viewport_width, self.viewport_height)
            .with_position(self.camera_position)
            .with_euler(self.camera_euler)
            .with_fov(self.camera_fov_degrees)
    }
}

/// What a setup hands back from `init`: the object to manipulate and,
/// optionally, a surface node whose taps spawn ripples.
#[derive(Debug, Clone)]
pub struct StageBinding {
    pub object: FloatingObject,
    pub surface: Option<NodeId>,
}

/// The static scene a stage runs: camera, lights, nodes.
pub trait StageSetup {
    /// Return stage configuration. Called once before init.
    fn config(&self) -> StageConfig {
        StageConfig::default()
    }

    /// Return interaction tunables. Called once before init.
    fn interaction_config(&self) -> InteractionConfig {
        InteractionConfig::default()
    }

    /// Build the scene and name the object to manipulate.
    fn init(&mut self, ctx: &mut StageContext) -> StageBinding;

    /// Per-frame hook, run after the sequencer has advanced.
    fn update(&mut self, _ctx: &mut StageContext, _dt: f32) {}
}

/// Everything the controller and the setup mutate, passed explicitly.
pub struct StageContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub sequencer: Sequencer,
    pub lights: LightState,
    pub events: Vec<StageEvent>,
    max_events: usize,
    next_id: u32,
}

impl StageContext {
    pub fn new() -> Self {
        Self::with_config(&StageConfig::default())
    }

    pub fn with_config(config: &StageConfig) -> Self {
        Self {
            scene: Scene::new(),
            camera: config.camera(),
            sequencer: Sequencer::new(),
            lights: LightState::new(),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Remove a node and its subtree, cancelling any graphs running on them.
    pub fn despawn(&mut self, id: NodeId) -> Vec<NodeId> {
        let removed = self.scene.despawn(id);
        self.sequencer.cancel_nodes(&removed);
        removed
    }

    /// Frontmost node under a screen point.
    pub fn hit_test(&self, location: Vec2) -> Option<HitResult> {
        self.scene.hit_test(&self.camera.screen_ray(location))
    }

    pub fn unproject(&self, location: Vec2, depth: f32) -> Result<Vec3> {
        self.camera
            .unproject(location, depth)
            .ok_or(StageError::Unprojectable {
                x: location.x,
                y: location.y,
            })
    }

    /// Queue an event for the host. Events past `max_events` in one frame are dropped.
    pub fn emit_event(&mut self, event: StageEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("stage: event buffer full, dropping {:?}", event.kind());
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for StageContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::action::Action;
    use crate::api::types::StageEventKind;
    use crate::components::node::Node;

    #[test]
    fn ids_are_unique_and_start_at_one() {
        let mut ctx = StageContext::new();
        assert_eq!(ctx.next_id(), NodeId(1));
        assert_eq!(ctx.next_id(), NodeId(2));
    }

    #[test]
    fn despawn_cancels_graphs_in_the_subtree() {
        let mut ctx = StageContext::new();
        let parent = ctx.next_id();
        let child = ctx.next_id();
        ctx.scene.spawn(Node::new(parent));
        ctx.scene.spawn_child(parent, Node::new(child)).unwrap();
        ctx.sequencer.run(child, Action::wait(1.0));

        let removed = ctx.despawn(parent);
        assert_eq!(removed.len(), 2);
        assert!(ctx.sequencer.is_empty());
    }

    #[test]
    fn events_are_capped_per_frame() {
        let config = StageConfig {
            max_events: 2,
            ..Default::default()
        };
        let mut ctx = StageContext::with_config(&config);
        for _ in 0..3 {
            ctx.emit_event(StageEvent::new(StageEventKind::RippleSpawned, Vec3::ZERO));
        }
        assert_eq!(ctx.events.len(), 2);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn config_builds_matching_camera() {
        let config: StageConfig = serde_json::from_str(r#"{ "viewport_width": 800, "camera_fov_degrees": 60 }"#).unwrap();
        let camera = config.camera();
        assert_eq!(camera.viewport, Vec2::new(800.0, 844.0));
        assert_eq!(camera.fov_y_degrees, 60.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 8.0));
    }
}
