use glam::Vec3;
use roomspace_assets::TextureLibrary;
use roomspace_common::ObjectId;
use roomspace_kernel::Scene;
use std::collections::BTreeMap;

use crate::config::{DuplicatePolicy, EditorConfig};
use crate::error::EditError;
use crate::form::{PrimitiveForm, PrimitiveRecord, parse_primitive};

/// A live primitive: its record and the scene node built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub object: ObjectId,
    pub record: PrimitiveRecord,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub record: PrimitiveRecord,
    pub object: ObjectId,
    /// Node torn down because it was registered under the same identifier.
    pub replaced: Option<ObjectId>,
}

/// Maps user identifiers to live primitive nodes.
///
/// Keys are kept sorted, so [`ids`](Self::ids) doubles as the listing of
/// manipulable objects.
#[derive(Debug, Clone)]
pub struct PrimitiveRegistry {
    entries: BTreeMap<String, RegistryEntry>,
    max_primitives: usize,
    duplicate_policy: DuplicatePolicy,
}

impl Default for PrimitiveRegistry {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl PrimitiveRegistry {
    pub fn new(max_primitives: usize, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            max_primitives,
            duplicate_policy,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.max_primitives, config.duplicate_policy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_primitives
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_primitives
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    pub fn object_id(&self, id: &str) -> Option<ObjectId> {
        self.entries.get(id).map(|e| e.object)
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    /// Validate a raw form and commit it.
    ///
    /// Capacity is checked before the form is even parsed, so a full
    /// registry rejects replacements too.
    pub fn submit(
        &mut self,
        scene: &mut Scene,
        textures: &TextureLibrary,
        form: &PrimitiveForm,
    ) -> Result<Commit, EditError> {
        self.ensure_capacity()?;
        let record = parse_primitive(form)?;
        self.insert(scene, textures, record)
    }

    /// Commit an already-normalized record.
    pub fn insert(
        &mut self,
        scene: &mut Scene,
        textures: &TextureLibrary,
        record: PrimitiveRecord,
    ) -> Result<Commit, EditError> {
        self.ensure_capacity()?;

        let exists = self.entries.contains_key(&record.id);
        let replaced = match (exists, self.duplicate_policy) {
            (true, DuplicatePolicy::Reject) => {
                tracing::debug!(id = %record.id, "duplicate identifier rejected");
                return Err(EditError::DuplicateIdentifier(record.id));
            }
            (true, DuplicatePolicy::Replace) => self.entries.remove(&record.id).map(|old| {
                scene.remove_node(old.object);
                old.object
            }),
            (false, _) => None,
        };

        let object = scene.add_node(record.to_node(textures));
        self.entries.insert(
            record.id.clone(),
            RegistryEntry {
                object,
                record: record.clone(),
            },
        );

        if replaced.is_some() {
            tracing::info!(id = %record.id, kind = ?record.kind, "primitive replaced");
        } else {
            tracing::info!(
                id = %record.id,
                kind = ?record.kind,
                count = self.entries.len(),
                max = self.max_primitives,
                "primitive added"
            );
        }

        Ok(Commit {
            record,
            object,
            replaced,
        })
    }

    /// Move the primitive registered as `id` by `delta`, keeping its record
    /// and its scene node in step. Returns false for unknown identifiers.
    pub fn translate(&mut self, scene: &mut Scene, id: &str, delta: Vec3) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        if !scene.translate(entry.object, delta) {
            return false;
        }
        entry.record.position += delta;
        true
    }

    fn ensure_capacity(&self) -> Result<(), EditError> {
        if self.is_full() {
            tracing::debug!(max = self.max_primitives, "primitive limit reached");
            return Err(EditError::CapacityExceeded {
                max: self.max_primitives,
            });
        }
        Ok(())
    }
}
