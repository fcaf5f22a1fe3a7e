use crate::constants::{CAMERA_FOVY, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Fixed perspective camera looking down -Z at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fovy: f32,
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            fovy: CAMERA_FOVY,
            aspect: 1.0,
        }
    }
}

impl Camera {
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, CAMERA_ZNEAR, CAMERA_ZFAR)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ndc_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - self.eye).normalize())
    }

    /// Where the pointer ray meets the z = 0 plane, the plane the particle
    /// fields are centered on. Falls back to the origin for grazing rays.
    pub fn pointer_world_on_plane(&self, ndc: Vec2) -> Vec2 {
        let (ro, rd) = self.ndc_ray(ndc);
        if rd.z.abs() < 1e-4 {
            return Vec2::ZERO;
        }
        let t = -ro.z / rd.z;
        if t < 0.0 {
            return Vec2::ZERO;
        }
        (ro + rd * t).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_screen_hits_origin() {
        let cam = Camera::default();
        let p = cam.pointer_world_on_plane(Vec2::ZERO);
        assert!(p.length() < 1e-4);
    }

    #[test]
    fn right_edge_maps_to_positive_x() {
        let mut cam = Camera::default();
        cam.set_viewport(1600.0, 900.0);
        let p = cam.pointer_world_on_plane(Vec2::new(1.0, 0.0));
        let half_h = CAMERA_Z * (CAMERA_FOVY * 0.5).tan();
        assert!((p.x - half_h * 1600.0 / 900.0).abs() < 1e-3);
        assert!(p.y.abs() < 1e-4);
    }
}
