//! The add-light and reset-light forms.

use glam::Vec3;
use roomspace_kernel::{DirectionalLight, Scene};
use serde::{Deserialize, Serialize};

use crate::form::coerce;

/// Intensity of every light created from the form.
pub const LIGHT_INTENSITY: f32 = 1.4;

/// Raw field values of the add-light form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightForm {
    pub pos_x: String,
    pub pos_y: String,
    pub pos_z: String,
    pub dir_x: String,
    pub dir_y: String,
    pub dir_z: String,
    #[serde(rename = "R", alias = "r")]
    pub r: String,
    #[serde(rename = "G", alias = "g")]
    pub g: String,
    #[serde(rename = "B", alias = "b")]
    pub b: String,
}

/// Normalized light description. Every component defaults to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub position: Vec3,
    pub direction: Vec3,
    /// Linear channels, nominally in `[0, 1]`.
    pub color: [f32; 3],
}

impl Default for LightSpec {
    fn default() -> Self {
        Self {
            position: Vec3::ONE,
            direction: Vec3::ONE,
            color: [1.0; 3],
        }
    }
}

fn component(raw: &str) -> f32 {
    coerce(raw, 1.0)
}

pub fn parse_light(form: &LightForm) -> LightSpec {
    LightSpec {
        position: Vec3::new(
            component(&form.pos_x),
            component(&form.pos_y),
            component(&form.pos_z),
        ),
        direction: Vec3::new(
            component(&form.dir_x),
            component(&form.dir_y),
            component(&form.dir_z),
        ),
        color: [component(&form.r), component(&form.g), component(&form.b)],
    }
}

impl LightSpec {
    /// Packed `0xRRGGBB`, each channel clamped to `[0, 1]`.
    pub fn color_hex(&self) -> u32 {
        self.color.iter().fold(0u32, |acc, c| {
            let byte = (c.clamp(0.0, 1.0) * 255.0).round() as u32;
            (acc << 8) | byte
        })
    }

    pub fn to_light(&self) -> DirectionalLight {
        DirectionalLight {
            color: self.color_hex(),
            intensity: LIGHT_INTENSITY,
            position: self.position.normalize_or_zero(),
            target: self.direction,
        }
    }
}

/// Replace whatever light the scene has with one built from `form`.
pub fn add_light(scene: &mut Scene, form: &LightForm) -> DirectionalLight {
    let light = parse_light(form).to_light();
    let replaced = scene.set_light(light).is_some();
    tracing::info!(color = %format!("#{:06x}", light.color), replaced, "light set");
    light
}

/// Remove the scene's light. Returns false if there was none.
pub fn reset_light(scene: &mut Scene) -> bool {
    let removed = scene.clear_light().is_some();
    if removed {
        tracing::info!("light removed");
    }
    removed
}
