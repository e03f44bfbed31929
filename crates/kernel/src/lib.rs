//! Scene Kernel: the single owned scene graph the editor mutates.
//!
//! # Invariants
//! - All scene mutations flow through explicit operations on [`Scene`].
//! - Every mutation appends a [`SceneEvent`].
//! - At most one directional light exists at a time.
//! - Room fixture nodes are never removed by editing operations.

pub mod room;
pub mod scene;

pub use room::{CLEAR_COLOR, ROOM_EXTENT};
pub use scene::{
    DirectionalLight, Geometry, Material, NodeKind, Outline, Scene, SceneEvent, SceneNode,
};
