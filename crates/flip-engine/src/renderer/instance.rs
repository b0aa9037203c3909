use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-node render data read by the host renderer.
/// Must match the host protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// RGBA with hierarchy opacity folded into alpha.
    pub color: [f32; 4],
    /// Shape kind code (see `MeshShape::code`).
    pub shape: f32,
    /// First shape parameter (radius, width, ring radius).
    pub param_a: f32,
    /// Second shape parameter (height, pipe radius).
    pub param_b: f32,
    /// Source node id, so the host can map instances back to nodes.
    pub node_id: f32,
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 4],
            shape: 0.0,
            param_a: 0.0,
            param_b: 0.0,
            node_id: 0.0,
        }
    }
}

impl RenderInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn alpha(&self) -> f32 {
        self.color[3]
    }
}

/// Render buffer containing all mesh instances for one frame.
pub struct RenderBuffer {
    /// Opaque instances first, translucent instances after `translucent_split`.
    pub instances: Vec<RenderInstance>,
    /// Index of the first translucent instance.
    pub translucent_split: u32,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            translucent_split: 0,
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.translucent_split = 0;
    }

    /// Append an instance. Returns false once the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn set_translucent_split(&mut self, split: u32) {
        self.translucent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
