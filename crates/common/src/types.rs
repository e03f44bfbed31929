use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle to a node in the scene graph.
///
/// Distinct from the user-facing primitive identifier: replacing a primitive
/// under the same identifier produces a node with a fresh `ObjectId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines and debug output.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Build a transform from a position and XYZ Euler angles in degrees.
    pub fn from_euler_degrees(position: Vec3, degrees: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                degrees.x.to_radians(),
                degrees.y.to_radians(),
                degrees.z.to_radians(),
            ),
            scale: Vec3::ONE,
        }
    }

    /// XYZ Euler angles of the rotation, in radians.
    pub fn euler_radians(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    pub fn with_uniform_scale(mut self, factor: f32) -> Self {
        self.scale = Vec3::splat(factor);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_uniqueness() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn short_id_is_eight_chars() {
        assert_eq!(ObjectId::new().short().len(), 8);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn euler_degrees_round_trip_to_radians() {
        let t = Transform::from_euler_degrees(Vec3::ZERO, Vec3::new(0.0, 45.0, 0.0));
        let e = t.euler_radians();
        assert!((e.y - std::f32::consts::FRAC_PI_4).abs() < 1e-4);
        assert!(e.x.abs() < 1e-4);
        assert!(e.z.abs() < 1e-4);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let t = Transform::from_euler_degrees(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
