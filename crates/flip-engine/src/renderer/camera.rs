use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::core::bounds::Ray;

/// Perspective camera looking down its local -Z axis.
///
/// Screen coordinates are in viewport points with the origin at the top-left
/// corner and Y growing downwards, matching touch input.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    /// Camera position in world space.
    pub position: Vec3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll.
    pub euler: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in points.
    pub viewport: Vec2,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 8.0),
            euler: Vec3::new(-0.1, 0.0, 0.0),
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            viewport: Vec2::new(390.0, 844.0),
        }
    }
}

impl Camera3D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport: Vec2::new(viewport_width, viewport_height),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_euler(mut self, euler: Vec3) -> Self {
        self.euler = euler;
        self
    }

    pub fn with_fov(mut self, fov_y_degrees: f32) -> Self {
        self.fov_y_degrees = fov_y_degrees;
        self
    }

    /// Resize the viewport (e.g. on rotation or window resize).
    /// Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.euler.y, self.euler.x, self.euler.z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    /// Right-handed perspective projection with depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect(),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport.y,
        )
    }

    /// Project a world point to screen points. `z` carries NDC depth.
    /// `None` for points behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
            ndc.z,
        ))
    }

    /// World-space ray from the eye through a screen point (unit direction).
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let inv = self.view_projection().inverse();
        let far_point = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let direction = (far_point - self.position).normalize_or_zero();
        Ray::new(self.position, direction)
    }

    /// Inverse of [`project`](Self::project) onto the world plane `z = depth`.
    pub fn unproject(&self, screen: Vec2, depth: f32) -> Option<Vec3> {
        let ray = self.screen_ray(screen);
        let t = ray.intersect_z_plane(depth)?;
        let mut point = ray.at(t);
        point.z = depth;
        Some(point)
    }
}
