//! The fixed room every scene starts with.

use glam::Vec3;
use roomspace_assets::TextureLibrary;
use roomspace_common::Transform;

use crate::scene::{Geometry, Material, NodeKind, SceneNode};

/// Interior extent of the room, used to fit imported models.
pub const ROOM_EXTENT: Vec3 = Vec3::splat(10.0);

/// Sky blue background.
pub const CLEAR_COLOR: u32 = 0x87ceeb;

const WALL_TEXTURE: &str = "wall.jpg";
const FLOOR_TEXTURE: &str = "floor.jpg";

fn panel(name: &str, texture: String, position: Vec3, rotation_deg: Vec3) -> SceneNode {
    SceneNode::new(
        name,
        NodeKind::Fixture,
        Geometry::Plane {
            width: ROOM_EXTENT.x,
            height: ROOM_EXTENT.y,
        },
        Some(Material::Texture { path: texture }),
        Transform::from_euler_degrees(position, rotation_deg),
    )
}

/// Floor plus back and left walls, textured from `textures`.
pub fn fixture_nodes(textures: &TextureLibrary) -> Vec<SceneNode> {
    vec![
        panel(
            "floor",
            textures.resolve(FLOOR_TEXTURE),
            Vec3::ZERO,
            Vec3::new(-90.0, 0.0, 0.0),
        ),
        panel(
            "wall_back",
            textures.resolve(WALL_TEXTURE),
            Vec3::new(0.0, 5.0, -5.0),
            Vec3::ZERO,
        ),
        panel(
            "wall_left",
            textures.resolve(WALL_TEXTURE),
            Vec3::new(-5.0, 5.0, 0.0),
            Vec3::new(0.0, 90.0, 0.0),
        ),
    ]
}
