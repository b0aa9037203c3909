use crate::core::scene::Scene;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from every visible mesh node in the scene.
/// Opaque instances come first, translucent ones after `translucent_split`.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut opaque: Vec<RenderInstance> = Vec::new();
    let mut translucent: Vec<RenderInstance> = Vec::new();

    for node in scene.iter() {
        let Some(mesh) = &node.mesh else {
            continue;
        };
        if !scene.is_active_in_hierarchy(node.id) {
            continue;
        }
        let Some(world) = scene.world_matrix(node.id) else {
            continue;
        };

        let mut color = mesh.color.to_array();
        color[3] *= scene.effective_opacity(node.id);
        if color[3] <= 0.0 {
            continue;
        }

        let [param_a, param_b] = mesh.shape.params();
        let instance = RenderInstance {
            model: world.to_cols_array_2d(),
            color,
            shape: mesh.shape.code(),
            param_a,
            param_b,
            node_id: node.id.0 as f32,
        };

        if color[3] < 1.0 {
            translucent.push(instance);
        } else {
            opaque.push(instance);
        }
    }

    let mut written = 0u32;
    for inst in opaque {
        if buffer.push(inst) {
            written += 1;
        }
    }
    buffer.set_translucent_split(written);
    for inst in translucent {
        buffer.push(inst);
    }
}
