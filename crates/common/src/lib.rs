//! Shared value types used across the roomspace crates.

pub mod types;

pub use types::{ObjectId, Transform};
