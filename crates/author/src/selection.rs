use glam::Vec3;
use roomspace_common::ObjectId;
use roomspace_input::{HeldKeys, InputMapper, Nudge, NudgeMapper};
use roomspace_kernel::{Outline, Scene};

use crate::error::EditError;
use crate::registry::PrimitiveRegistry;

/// Which primitive, if any, the arrow keys currently move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected { id: String, object: ObjectId },
}

/// What one selection tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing selected.
    Idle,
    /// Confirm key held; selection cleared.
    Released,
    /// Selected node moved by this offset (zero when no key was held).
    Moved(Vec3),
}

/// Single-selection state machine: `Idle -> Selected(id) -> Idle`.
///
/// Selecting always deselects first, so at most one node ever carries the
/// selection outline.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    mapper: NudgeMapper,
    outline: Outline,
}

impl SelectionController {
    pub fn new(step: f32) -> Self {
        Self {
            mapper: NudgeMapper { step },
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SelectionState::Idle
    }

    pub fn selected_id(&self) -> Option<&str> {
        match &self.state {
            SelectionState::Selected { id, .. } => Some(id.as_str()),
            SelectionState::Idle => None,
        }
    }

    pub fn selected_object(&self) -> Option<ObjectId> {
        match &self.state {
            SelectionState::Selected { object, .. } => Some(*object),
            SelectionState::Idle => None,
        }
    }

    /// Select the primitive registered as `id`.
    ///
    /// Unknown identifiers fail and leave the current selection untouched.
    pub fn select_by_id(
        &mut self,
        id: &str,
        registry: &PrimitiveRegistry,
        scene: &mut Scene,
    ) -> Result<(), EditError> {
        let id = id.trim();
        let object = registry
            .object_id(id)
            .ok_or_else(|| EditError::UnknownIdentifier(id.to_string()))?;

        self.deselect(scene);
        scene.add_outline(object, self.outline.clone());
        self.state = SelectionState::Selected {
            id: id.to_string(),
            object,
        };
        tracing::info!(id = %id, "selected");
        Ok(())
    }

    /// Clear the selection and its outline. Returns false if already idle.
    pub fn deselect(&mut self, scene: &mut Scene) -> bool {
        let SelectionState::Selected { id, object } = std::mem::take(&mut self.state) else {
            return false;
        };
        scene.remove_outline(object);
        tracing::info!(id = %id, "deselected");
        true
    }

    /// Drop the selection without touching the scene, if it points at
    /// `object`. Used when the node has already been torn down.
    pub fn forget(&mut self, object: ObjectId) -> bool {
        if self.selected_object() != Some(object) {
            return false;
        }
        self.state = SelectionState::Idle;
        true
    }

    /// Apply one frame of held keys to the selected primitive. The move goes
    /// through the registry so its record keeps tracking the node.
    pub fn tick(
        &mut self,
        keys: &HeldKeys,
        registry: &mut PrimitiveRegistry,
        scene: &mut Scene,
    ) -> TickOutcome {
        let SelectionState::Selected { id, .. } = &self.state else {
            return TickOutcome::Idle;
        };
        match self.mapper.map(keys) {
            Nudge::Exit => {
                self.deselect(scene);
                TickOutcome::Released
            }
            Nudge::Translate(delta) => {
                if delta != Vec3::ZERO {
                    registry.translate(scene, id, delta);
                }
                TickOutcome::Moved(delta)
            }
        }
    }
}
