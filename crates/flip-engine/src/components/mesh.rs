use glam::Vec3;

use crate::core::bounds::Aabb;

/// Half thickness given to flat shapes so picking rays can hit them edge-on-ish.
const FLAT_SLACK: f32 = 1e-3;

/// Linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl MeshColor {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self::rgb(0.3, 0.7, 0.9)
    }
}

/// Geometry primitive the host renderer draws for a node.
///
/// Cylinders and capsules stand along local Y, planes face local +Z,
/// tori lie in the local XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Cylinder { radius: f32, height: f32 },
    Capsule { radius: f32, height: f32 },
    Sphere { radius: f32 },
    Plane { width: f32, height: f32 },
    Torus { ring_radius: f32, pipe_radius: f32 },
}

impl MeshShape {
    /// Wire code read by the host.
    pub fn code(&self) -> f32 {
        match self {
            MeshShape::Cylinder { .. } => 1.0,
            MeshShape::Capsule { .. } => 2.0,
            MeshShape::Sphere { .. } => 3.0,
            MeshShape::Plane { .. } => 4.0,
            MeshShape::Torus { .. } => 5.0,
        }
    }

    /// The two size parameters, in declaration order.
    pub fn params(&self) -> [f32; 2] {
        match *self {
            MeshShape::Cylinder { radius, height } | MeshShape::Capsule { radius, height } => {
                [radius, height]
            }
            MeshShape::Sphere { radius } => [radius, 0.0],
            MeshShape::Plane { width, height } => [width, height],
            MeshShape::Torus {
                ring_radius,
                pipe_radius,
            } => [ring_radius, pipe_radius],
        }
    }

    /// Local-space bounding box, centred on the node origin.
    pub fn local_bounds(&self) -> Aabb {
        let half = match *self {
            MeshShape::Cylinder { radius, height } | MeshShape::Capsule { radius, height } => {
                Vec3::new(radius, height * 0.5, radius)
            }
            MeshShape::Sphere { radius } => Vec3::splat(radius),
            MeshShape::Plane { width, height } => Vec3::new(width * 0.5, height * 0.5, FLAT_SLACK),
            MeshShape::Torus {
                ring_radius,
                pipe_radius,
            } => {
                let outer = ring_radius + pipe_radius;
                Vec3::new(outer, pipe_radius.max(FLAT_SLACK), outer)
            }
        };
        Aabb::from_half_extents(Vec3::ZERO, half)
    }
}

/// Renderable geometry attached to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: MeshColor,
    /// Phong specular exponent.
    pub shininess: f32,
    /// Self-illumination added on top of lighting (0 = none).
    pub emissive: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MeshShape::Cylinder {
                radius: 0.8,
                height: 2.0,
            },
            color: MeshColor::default(),
            shininess: 100.0,
            emissive: 0.0,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: MeshShape, color: MeshColor) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_bounds_stand_on_y() {
        let b = MeshShape::Cylinder {
            radius: 0.8,
            height: 2.0,
        }
        .local_bounds();
        assert_eq!(b.min, Vec3::new(-0.8, -1.0, -0.8));
        assert_eq!(b.max, Vec3::new(0.8, 1.0, 0.8));
    }

    #[test]
    fn plane_bounds_have_slack() {
        let b = MeshShape::Plane {
            width: 6.0,
            height: 10.0,
        }
        .local_bounds();
        assert!(b.max.z > 0.0 && b.min.z < 0.0);
        assert_eq!(b.max.x, 3.0);
    }

    #[test]
    fn torus_bounds_include_pipe() {
        let b = MeshShape::Torus {
            ring_radius: 0.5,
            pipe_radius: 0.05,
        }
        .local_bounds();
        assert!((b.max.x - 0.55).abs() < 1e-6);
        assert!((b.max.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn shape_codes_are_distinct() {
        let codes = [
            MeshShape::Cylinder { radius: 1.0, height: 1.0 }.code(),
            MeshShape::Capsule { radius: 1.0, height: 1.0 }.code(),
            MeshShape::Sphere { radius: 1.0 }.code(),
            MeshShape::Plane { width: 1.0, height: 1.0 }.code(),
            MeshShape::Torus { ring_radius: 1.0, pipe_radius: 0.1 }.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
