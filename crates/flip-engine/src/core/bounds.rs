use glam::{Mat4, Vec3};

const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line used for picking and unprojection.
///
/// `direction` is not required to be unit length: rays transformed into a
/// node's local space keep the same parameter `t` as the world-space ray,
/// so hit distances stay comparable across nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Express this ray in another coordinate space.
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }

    /// Parameter at which the ray crosses the plane `z = depth`.
    /// `None` when parallel to the plane or when the plane is behind the origin.
    pub fn intersect_z_plane(&self, depth: f32) -> Option<f32> {
        if self.direction.z.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (depth - self.origin.z) / self.direction.z;
        (t >= 0.0).then_some(t)
    }
}

/// Axis-aligned bounding box in a node's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Slab test. Returns the entry parameter (0 when the origin is inside).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let mut t0 = (lo - o) / d;
            let mut t1 = (hi - o) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_exit < 0.0 {
            return None;
        }
        Some(t_enter.max(0.0))
    }
}
