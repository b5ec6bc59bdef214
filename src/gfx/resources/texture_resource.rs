//! Texture resource management
//!
//! Keeps every texture the scene references, keyed by its asset path. Loads
//! that fail are logged and remembered as absent so renderers can skip the
//! bind instead of failing.

use std::collections::HashMap;

use crate::error::Result;
use crate::gfx::rendering::Texture;

/// Decodes and uploads a texture. Implemented by the host graphics layer.
pub trait TextureLoader {
    fn load(&mut self, path: &str) -> Result<Box<dyn Texture>>;
}

/// Owns loaded textures until the cache is dropped
#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<String, Option<Box<dyn Texture>>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path` once. Later calls for the same path are no-ops.
    ///
    /// # Returns
    /// Whether a usable texture is available for `path`
    pub fn load(&mut self, loader: &mut dyn TextureLoader, path: &str) -> bool {
        if let Some(entry) = self.entries.get(path) {
            return entry.is_some();
        }

        let entry = match loader.load(path) {
            Ok(texture) => {
                log::info!("Loaded texture: {}", path);
                Some(texture)
            }
            Err(err) => {
                log::warn!("{}; rendering without it", err);
                None
            }
        };
        let available = entry.is_some();
        self.entries.insert(path.to_string(), entry);
        available
    }

    /// Loads every path, returning how many are unavailable
    pub fn load_all<'p>(
        &mut self,
        loader: &mut dyn TextureLoader,
        paths: impl IntoIterator<Item = &'p str>,
    ) -> usize {
        paths
            .into_iter()
            .filter(|path| !self.load(loader, path))
            .count()
    }

    pub fn get(&self, path: &str) -> Option<&dyn Texture> {
        self.entries.get(path)?.as_deref()
    }

    /// Paths whose load failed
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_none())
            .map(|(path, _)| path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
