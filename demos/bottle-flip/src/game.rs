use flip_engine::*;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

const REST: Vec3 = Vec3::new(0.0, 1.5, 0.0);
const BOTTLE_RADIUS: f32 = 0.8;
const BOTTLE_HEIGHT: f32 = 2.0;
const FLOOR_Y: f32 = -2.5;

/// A glass bottle with some liquid in it, hovering above a floor.
pub struct BottleFlip;

impl BottleFlip {
    pub fn new() -> Self {
        Self
    }

    fn add_lights(ctx: &mut StageContext) {
        let lights = &mut ctx.lights;
        lights.add(
            Light::directional([1.0, 1.0, 1.0], 1000.0, Vec3::new(-0.4, -0.5, 0.0))
                .with_position(Vec3::new(2.0, 4.0, 6.0))
                .with_shadows(),
        );
        lights.add(
            Light::directional([0.8, 0.9, 1.0], 300.0, Vec3::new(-0.8, 0.5, 0.0))
                .with_position(Vec3::new(-2.0, 2.0, 4.0)),
        );
        lights.add(Light::ambient([0.2, 0.3, 0.4], 100.0));
        lights.set_fog(Fog::new(5.0, 15.0, [0.1, 0.1, 0.2]));
        lights.set_background(0.05, 0.05, 0.1);
    }
}

impl StageSetup for BottleFlip {
    fn config(&self) -> StageConfig {
        StageConfig {
            max_instances: 32,
            ..Default::default()
        }
    }

    fn interaction_config(&self) -> InteractionConfig {
        InteractionConfig {
            rest_position: REST,
            ..Default::default()
        }
    }

    fn init(&mut self, ctx: &mut StageContext) -> StageBinding {
        Self::add_lights(ctx);

        let bottle = ctx.next_id();
        ctx.scene.spawn(
            Node::new(bottle)
                .with_tag("bottle")
                .with_position(REST)
                .with_mesh(
                    MeshComponent::new(
                        MeshShape::Cylinder {
                            radius: BOTTLE_RADIUS,
                            height: BOTTLE_HEIGHT,
                        },
                        MeshColor::new(0.85, 0.95, 1.0, 0.35),
                    )
                    .with_shininess(100.0),
                ),
        );

        // Liquid fills the lower half of the bottle.
        let liquid = ctx.next_id();
        let liquid_node = Node::new(liquid)
            .with_tag("liquid")
            .with_position(Vec3::new(0.0, -BOTTLE_HEIGHT * 0.25, 0.0))
            .with_mesh(MeshComponent::new(
                MeshShape::Cylinder {
                    radius: BOTTLE_RADIUS * 0.9,
                    height: BOTTLE_HEIGHT * 0.5,
                },
                MeshColor::new(0.1, 0.45, 0.9, 0.85),
            ));
        if let Err(e) = ctx.scene.spawn_child(bottle, liquid_node) {
            log::warn!("bottle-flip: liquid not attached: {e}");
        }

        let floor = ctx.next_id();
        ctx.scene.spawn(
            Node::new(floor)
                .with_tag("floor")
                .with_position(Vec3::new(0.0, FLOOR_Y, 0.0))
                .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
                .with_mesh(MeshComponent::new(
                    MeshShape::Plane {
                        width: 6.0,
                        height: 10.0,
                    },
                    MeshColor::rgb(0.12, 0.14, 0.2),
                )),
        );

        StageBinding {
            object: FloatingObject::new(bottle, REST).with_decoration(liquid),
            surface: Some(floor),
        }
    }
}
