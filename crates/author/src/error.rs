use roomspace_assets::ImportError;

/// Validation and lookup failures surfaced to the user.
///
/// None of these are fatal: the session stays usable after any of them.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("the 'ID' field is required")]
    EmptyIdentifier,
    #[error("maximum number of primitives reached ({max}/{max})")]
    CapacityExceeded { max: usize },
    #[error("a primitive with id {0:?} already exists")]
    DuplicateIdentifier(String),
    #[error("no primitive with id {0:?}")]
    UnknownIdentifier(String),
    #[error("model import failed: {0}")]
    Import(#[from] ImportError),
}
