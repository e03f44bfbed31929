use glam::{Mat4, Vec3};

use crate::renderer::RenderView;

/// First-person camera with position, yaw, pitch, and projection parameters.
///
/// Movement follows pointer-lock controls: forward and strafe motion stay on
/// the horizontal plane regardless of pitch; vertical motion is explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    /// Standing in front of the room, looking at the middle of the back wall.
    fn default() -> Self {
        Self::looking_at(Vec3::new(5.0, 5.0, 15.0), Vec3::new(0.0, 5.0, 0.0))
    }
}

impl FlyCamera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let dir = (target - eye).try_normalize().unwrap_or(Vec3::NEG_Z);
        Self {
            position: eye,
            yaw: dir.z.atan2(dir.x),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
            fov: 75.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.002,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Look direction projected onto the floor plane.
    pub fn forward_flat(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    pub fn right(&self) -> Vec3 {
        self.forward_flat().cross(Vec3::Y).normalize()
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward_flat() * distance;
    }

    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Mouse-look from a relative pointer motion.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn view(&self) -> RenderView {
        RenderView {
            eye: self.position,
            target: self.position + self.forward(),
            fov_degrees: self.fov.to_degrees(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera_faces_back_wall() {
        let cam = FlyCamera::default();
        assert_eq!(cam.position, Vec3::new(5.0, 5.0, 15.0));
        let expected = (Vec3::new(0.0, 5.0, 0.0) - cam.position).normalize();
        assert!(approx(cam.forward(), expected));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn move_forward_stays_level() {
        let mut cam = FlyCamera::looking_at(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0));
        cam.move_forward(1.0);
        assert!(approx(cam.position, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        let mut cam = FlyCamera::looking_at(Vec3::ZERO, Vec3::NEG_Z);
        assert!(approx(cam.right(), Vec3::X));
        cam.move_right(-0.5);
        assert!(approx(cam.position, Vec3::new(-0.5, 0.0, 0.0)));
    }

    #[test]
    fn move_up_is_world_vertical() {
        let mut cam = FlyCamera::default();
        cam.move_up(0.1);
        assert!((cam.position.y - 5.1).abs() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FlyCamera::default();
        cam.rotate(0.0, -1.0e6);
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
        cam.rotate(0.0, 1.0e6);
        assert!(cam.pitch >= -89.0_f32.to_radians() - 1e-6);
    }

    #[test]
    fn view_reports_degrees() {
        let view = FlyCamera::default().view();
        assert!((view.fov_degrees - 75.0).abs() < 1e-3);
    }
}
