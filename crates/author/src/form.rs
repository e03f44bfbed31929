//! Primitive form input and its normalization into a [`PrimitiveRecord`].
//!
//! Numeric fields are coerced leniently: anything that does not parse as a
//! finite number takes the field's default. Only the identifier can fail.

use glam::Vec3;
use roomspace_assets::TextureLibrary;
use roomspace_common::Transform;
use roomspace_kernel::{Geometry, Material, NodeKind, SceneNode};
use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Raw field values of the add-primitive form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimitiveForm {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: String,
    pub height: String,
    pub width: String,
    pub depth: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub rotation_x: String,
    pub rotation_y: String,
    pub rotation_z: String,
    pub attribute: String,
    pub attribute_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Box,
    Pyramid,
}

impl PrimitiveKind {
    /// `pyramid` in any case selects a pyramid; everything else is a box.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("pyramid") {
            Self::Pyramid
        } else {
            Self::Box
        }
    }
}

/// The single appearance attribute of a primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Texture file name, resolved against the texture library.
    Texture(String),
    /// Color specifier handed to the material as-is.
    Color(String),
}

impl Attribute {
    /// `texture` in any case selects a texture; everything else is a color.
    pub fn parse(kind: &str, value: &str) -> Self {
        let value = value.trim().to_string();
        if kind.trim().eq_ignore_ascii_case("texture") {
            Self::Texture(value)
        } else {
            Self::Color(value)
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Texture(v) | Self::Color(v) => v,
        }
    }

    pub fn material(&self, textures: &TextureLibrary) -> Material {
        match self {
            Self::Texture(name) => Material::Texture {
                path: textures.resolve(name),
            },
            Self::Color(spec) => Material::Color { spec: spec.clone() },
        }
    }
}

/// Canonical, normalized description of a user-created primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveRecord {
    pub id: String,
    pub kind: PrimitiveKind,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub position: Vec3,
    /// XYZ rotation in degrees.
    pub rotation: Vec3,
    pub attribute: Attribute,
}

/// The longest leading decimal number in `raw`, after leading whitespace.
///
/// `"3px"` reads as 3 and `"1e"` as 1. Hex, `Infinity` and an empty prefix
/// yield `None`.
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Leading number saturated into `f32` range, or `default`.
pub(crate) fn coerce(raw: &str, default: f32) -> f32 {
    leading_number(raw)
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32)
        .unwrap_or(default)
}

/// Coerced extent if strictly positive, or 1.
fn coerce_extent(raw: &str) -> f32 {
    let value = coerce(raw, 1.0);
    if value > 0.0 { value } else { 1.0 }
}

/// Normalize a submitted form.
///
/// Fails only when the trimmed identifier is empty. Registry-level checks
/// (capacity, duplicates) are the registry's job.
pub fn parse_primitive(form: &PrimitiveForm) -> Result<PrimitiveRecord, EditError> {
    let id = form.id.trim();
    if id.is_empty() {
        return Err(EditError::EmptyIdentifier);
    }

    let height = coerce_extent(&form.height);
    let width = coerce_extent(&form.width);
    let depth = coerce_extent(&form.depth);

    Ok(PrimitiveRecord {
        id: id.to_string(),
        kind: PrimitiveKind::parse(&form.kind),
        width,
        height,
        depth,
        position: Vec3::new(
            coerce(&form.x, 0.0),
            // Resting on the floor unless told otherwise.
            coerce(&form.y, height / 2.0),
            coerce(&form.z, 0.0),
        ),
        rotation: Vec3::new(
            coerce(&form.rotation_x, 0.0),
            coerce(&form.rotation_y, 0.0),
            coerce(&form.rotation_z, 0.0),
        ),
        attribute: Attribute::parse(&form.attribute, &form.attribute_value),
    })
}

impl PrimitiveRecord {
    pub fn geometry(&self) -> Geometry {
        match self.kind {
            PrimitiveKind::Pyramid => Geometry::Cone {
                radius: self.width,
                height: self.height,
                radial_segments: 4,
            },
            PrimitiveKind::Box => Geometry::Cuboid {
                width: self.width,
                height: self.height,
                depth: self.depth,
            },
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_euler_degrees(self.position, self.rotation)
    }

    /// Scene node for this record.
    pub fn to_node(&self, textures: &TextureLibrary) -> SceneNode {
        SceneNode::new(
            self.id.clone(),
            NodeKind::Primitive,
            self.geometry(),
            Some(self.attribute.material(textures)),
            self.transform(),
        )
    }
}
