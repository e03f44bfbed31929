//! Asset boundary: where attribute values become resource paths and model
//! files become sized scene content.
//!
//! Full mesh decoding belongs to the rendering backend. This crate only
//! extracts what the editor needs to place a model: its bounds.

mod model;
mod texture;

pub use model::{ImportError, ModelBounds, fit_scale, import_obj, parse_obj_bounds};
pub use texture::TextureLibrary;
