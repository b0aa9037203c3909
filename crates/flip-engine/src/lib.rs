pub mod animation;
pub mod api;
pub mod core;
pub mod components;
pub mod error;
pub mod input;
pub mod interaction;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::stage::{StageBinding, StageConfig, StageContext, StageSetup};
pub use api::types::{NodeId, StageEvent, StageEventKind};
pub use error::{Result, StageError};
pub use components::mesh::{MeshColor, MeshComponent, MeshShape};
pub use components::node::{Node, Transform};
pub use core::bounds::{Aabb, Ray};
pub use core::scene::{HitResult, Scene};
pub use core::time::FrameClock;
pub use renderer::camera::Camera3D;
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use input::gesture::{Gesture, GestureRecognizer};
pub use input::queue::{InputEvent, InputQueue, PointerEvent, PointerPhase};
pub use systems::lighting::{Fog, Light, LightKind, LightState};
pub use systems::render::build_render_buffer;
pub use animation::action::Action;
pub use animation::easing::{ease, ease_vec3, lerp, Easing};
pub use animation::sequencer::{CompletionToken, GraphOutcome, Sequencer};
pub use interaction::classifier::{ExactNodeClassifier, HitClassifier, OwnershipChainClassifier};
pub use interaction::config::InteractionConfig;
pub use interaction::controller::{InteractionController, InteractionState};
pub use interaction::mapper::CoordinateMapper;
pub use interaction::object::FloatingObject;
