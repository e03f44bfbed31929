use glam::Vec3;
use roomspace_assets::TextureLibrary;
use roomspace_common::{ObjectId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::room;

/// Shape of a scene node. Tessellation is left to the rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Flat rectangle in the local XY plane.
    Plane { width: f32, height: f32 },
    /// Rectangular solid centred on the node origin.
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Cone with a polygonal base. Four radial segments give a pyramid.
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Externally imported mesh, identified by its source and unscaled extent.
    Model { source: String, extent: Vec3 },
}

/// Surface appearance of a node. Exactly one source drives the material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    /// Phong material sampling a texture at the given resource path.
    Texture { path: String },
    /// Phong material with a flat color specifier (`#rrggbb`, `red`, ...).
    Color { spec: String },
}

/// Edge outline drawn around a selected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub color: String,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            color: "white".into(),
        }
    }
}

/// What a node is, for bookkeeping purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Part of the fixed room (walls, floor).
    Fixture,
    /// User-spawned primitive.
    Primitive,
    /// Imported model.
    Model,
}

/// A single object in the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub geometry: Geometry,
    pub material: Option<Material>,
    pub transform: Transform,
    pub outline: Option<Outline>,
}

impl SceneNode {
    pub fn new(
        name: impl Into<String>,
        kind: NodeKind,
        geometry: Geometry,
        material: Option<Material>,
        transform: Transform,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            geometry,
            material,
            transform,
            outline: None,
        }
    }
}

/// The one directional light the scene may carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Packed `0xRRGGBB` color.
    pub color: u32,
    pub intensity: f32,
    /// Unit-length position the light shines from.
    pub position: Vec3,
    /// Point the light is aimed at.
    pub target: Vec3,
}

/// An event record produced by every mutation to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    NodeAdded {
        id: ObjectId,
        name: String,
        kind: NodeKind,
    },
    NodeRemoved {
        id: ObjectId,
        name: String,
    },
    NodeMoved {
        id: ObjectId,
        old: Vec3,
        new: Vec3,
    },
    OutlineAdded {
        id: ObjectId,
    },
    OutlineRemoved {
        id: ObjectId,
    },
    LightSet {
        light: DirectionalLight,
    },
    LightCleared,
    ModelImported {
        id: ObjectId,
        source: String,
        scale: f32,
    },
}

/// The owned scene graph.
///
/// Holds every visible node, the optional directional light, and an
/// append-only log of mutations. Uses BTreeMap for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: BTreeMap<ObjectId, SceneNode>,
    light: Option<DirectionalLight>,
    clear_color: u32,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    /// Create an empty scene with no fixture, light or nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene containing the fixed room (floor and two walls),
    /// textured from the default texture directory.
    pub fn with_room() -> Self {
        Self::with_room_textures(&TextureLibrary::default())
    }

    /// Create a scene containing the fixed room, resolving its textures
    /// through `textures`.
    pub fn with_room_textures(textures: &TextureLibrary) -> Self {
        let mut scene = Self {
            clear_color: room::CLEAR_COLOR,
            ..Self::default()
        };
        for node in room::fixture_nodes(textures) {
            scene.add_node(node);
        }
        scene.event_log.clear();
        scene
    }

    pub fn clear_color(&self) -> u32 {
        self.clear_color
    }

    /// Number of nodes of every kind, fixtures included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn count_of(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }

    pub fn nodes(&self) -> &BTreeMap<ObjectId, SceneNode> {
        &self.nodes
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Insert a node and return its fresh id.
    pub fn add_node(&mut self, node: SceneNode) -> ObjectId {
        let id = ObjectId::new();
        self.event_log.push(SceneEvent::NodeAdded {
            id,
            name: node.name.clone(),
            kind: node.kind,
        });
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node. Fixture nodes cannot be removed.
    pub fn remove_node(&mut self, id: ObjectId) -> Option<SceneNode> {
        if self.nodes.get(&id)?.kind == NodeKind::Fixture {
            return None;
        }
        let node = self.nodes.remove(&id)?;
        self.event_log.push(SceneEvent::NodeRemoved {
            id,
            name: node.name.clone(),
        });
        Some(node)
    }

    /// Move a node by `delta`. No collision or bounds are applied.
    pub fn translate(&mut self, id: ObjectId, delta: Vec3) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        let old = node.transform.position;
        node.transform.position += delta;
        tracing::trace!(id = %id.short(), ?delta, "node moved");
        self.event_log.push(SceneEvent::NodeMoved {
            id,
            old,
            new: node.transform.position,
        });
        true
    }

    /// Attach an outline decoration. Returns false if the node is missing.
    pub fn add_outline(&mut self, id: ObjectId, outline: Outline) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.outline = Some(outline);
        self.event_log.push(SceneEvent::OutlineAdded { id });
        true
    }

    /// Detach the outline decoration, if any. Returns whether one was removed.
    pub fn remove_outline(&mut self, id: ObjectId) -> bool {
        let removed = self
            .nodes
            .get_mut(&id)
            .and_then(|node| node.outline.take())
            .is_some();
        if removed {
            self.event_log.push(SceneEvent::OutlineRemoved { id });
        }
        removed
    }

    /// Number of nodes currently carrying an outline.
    pub fn outlined_count(&self) -> usize {
        self.nodes.values().filter(|n| n.outline.is_some()).count()
    }

    /// Insert an imported model node scaled uniformly by `scale`.
    pub fn add_model(&mut self, source: impl Into<String>, extent: Vec3, scale: f32) -> ObjectId {
        let source = source.into();
        let node = SceneNode::new(
            source.clone(),
            NodeKind::Model,
            Geometry::Model {
                source: source.clone(),
                extent,
            },
            None,
            Transform::default().with_uniform_scale(scale),
        );
        let id = self.add_node(node);
        self.event_log
            .push(SceneEvent::ModelImported { id, source, scale });
        id
    }

    pub fn light(&self) -> Option<&DirectionalLight> {
        self.light.as_ref()
    }

    /// Install `light`, returning the one it replaced.
    pub fn set_light(&mut self, light: DirectionalLight) -> Option<DirectionalLight> {
        let previous = self.light.replace(light);
        self.event_log.push(SceneEvent::LightSet { light });
        previous
    }

    /// Remove the current light, if any.
    pub fn clear_light(&mut self) -> Option<DirectionalLight> {
        let previous = self.light.take();
        if previous.is_some() {
            self.event_log.push(SceneEvent::LightCleared);
        }
        previous
    }
}
