//! In-room authoring: the primitive registry, form validation, single-object
//! selection, the directional light slot, and the session that owns them.
//!
//! # Invariants
//! - The registry's keys are exactly the identifiers of live primitive nodes.
//! - The registry never holds more than `max_primitives` entries.
//! - At most one node is selected, and only the selected node is outlined.
//! - At most one directional light exists.
//! - Rejected submissions leave the registry and scene untouched.

pub mod config;
pub mod error;
pub mod form;
pub mod light;
pub mod registry;
pub mod selection;
pub mod session;

pub use config::{DuplicatePolicy, EditorConfig};
pub use error::EditError;
pub use form::{Attribute, PrimitiveForm, PrimitiveKind, PrimitiveRecord, parse_primitive};
pub use light::{LightForm, LightSpec, parse_light};
pub use registry::{Commit, PrimitiveRegistry, RegistryEntry};
pub use selection::{SelectionController, SelectionState, TickOutcome};
pub use session::EditorSession;
