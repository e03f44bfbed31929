//! Input: held-key state and the per-tick mappers that turn it into deltas.
//!
//! # Invariants
//! - Mappers are pure: the same held set always yields the same delta.
//! - Key events only ever mutate [`HeldKeys`]; consumers poll it once per frame.

pub mod key;
pub mod mapper;

pub use key::{HeldKeys, Key, KeyParseError};
pub use mapper::{CameraDelta, CameraMapper, InputMapper, Nudge, NudgeMapper, axis};
