//! Resource management
//!
//! Textures are loaded by the host through a [`TextureLoader`] and owned by
//! the [`TextureCache`] until it is dropped.

pub mod texture_resource;

pub use texture_resource::{TextureCache, TextureLoader};
