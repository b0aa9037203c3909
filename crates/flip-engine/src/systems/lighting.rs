/// Scene lights, fog and background for the host's lighting pass.
///
/// Lights are persistent: they stay until explicitly removed. The host reads
/// them by pointer once per frame.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum LightKind {
    Ambient = 1,
    Directional = 2,
    Omni = 3,
}

/// A single light.
///
/// Wire format (12 floats / 48 bytes):
/// `[kind, r, g, b, intensity, dir_x, dir_y, dir_z, pos_x, pos_y, pos_z, casts_shadows]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Light {
    pub kind: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Lumens-style strength, matching the host's physically based lights.
    pub intensity: f32,
    pub direction: [f32; 3],
    pub position: [f32; 3],
    pub casts_shadows: f32,
}

impl Light {
    pub const FLOATS: usize = 12;

    fn new(kind: LightKind, color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: kind as u32 as f32,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            direction: [0.0, 0.0, -1.0],
            position: [0.0; 3],
            casts_shadows: 0.0,
        }
    }

    pub fn ambient(color: [f32; 3], intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    /// A directional light pointing down its local -Z after applying `euler`
    /// (pitch, yaw, roll in radians).
    pub fn directional(color: [f32; 3], intensity: f32, euler: Vec3) -> Self {
        let rotation = Quat::from_euler(EulerRot::YXZ, euler.y, euler.x, euler.z);
        let dir = rotation * Vec3::NEG_Z;
        let mut light = Self::new(LightKind::Directional, color, intensity);
        light.direction = dir.to_array();
        light
    }

    pub fn omni(color: [f32; 3], intensity: f32, position: Vec3) -> Self {
        Self::new(LightKind::Omni, color, intensity).with_position(position)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position.to_array();
        self
    }

    pub fn with_shadows(mut self) -> Self {
        self.casts_shadows = 1.0;
        self
    }

    pub fn kind(&self) -> Option<LightKind> {
        match self.kind as u32 {
            1 => Some(LightKind::Ambient),
            2 => Some(LightKind::Directional),
            3 => Some(LightKind::Omni),
            _ => None,
        }
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub start: f32,
    pub end: f32,
    pub color: [f32; 3],
}

impl Fog {
    pub fn new(start: f32, end: f32, color: [f32; 3]) -> Self {
        Self { start, end, color }
    }

    /// Fog contribution at `distance` from the camera, 0 (clear) to 1 (fully fogged).
    pub fn factor(&self, distance: f32) -> f32 {
        if self.end <= self.start {
            return if distance >= self.end { 1.0 } else { 0.0 };
        }
        ((distance - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Lights plus the scene's atmosphere.
///
/// With no ambient light added, `ambient_color` is black and only direct
/// lights contribute.
pub struct LightState {
    lights: Vec<Light>,
    pub fog: Option<Fog>,
    pub background: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            fog: None,
            background: [0.0; 3],
        }
    }

    pub fn add(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_fog(&mut self, fog: Fog) {
        self.fog = Some(fog);
    }

    pub fn set_background(&mut self, r: f32, g: f32, b: f32) {
        self.background = [r, g, b];
    }

    /// Summed colour of all ambient lights, each weighted by intensity / 1000.
    pub fn ambient_color(&self) -> [f32; 3] {
        self.lights
            .iter()
            .filter(|l| l.kind() == Some(LightKind::Ambient))
            .fold([0.0; 3], |acc, l| {
                let w = l.intensity / 1000.0;
                [acc[0] + l.r * w, acc[1] + l.g * w, acc[2] + l.b * w]
            })
    }

    /// Pointer to the lights data for host reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
