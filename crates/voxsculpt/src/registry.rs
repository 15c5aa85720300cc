//! Volume registry for managing named volumes.

use std::collections::HashMap;

use voxsculpt_core::{Result, Volume, VoxelError};

/// Registry of every named volume in voxsculpt.
#[derive(Debug, Default)]
pub struct Registry {
    volumes: HashMap<String, Volume<f32>>,
}

impl Registry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a volume under `name`.
    ///
    /// Returns an error if a volume with the same name already exists.
    pub fn register(&mut self, name: impl Into<String>, volume: Volume<f32>) -> Result<()> {
        let name = name.into();
        if self.volumes.contains_key(&name) {
            return Err(VoxelError::VolumeExists(name));
        }
        self.volumes.insert(name, volume);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Volume<f32>> {
        self.volumes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Volume<f32>> {
        self.volumes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.volumes.contains_key(name)
    }

    /// Removes a volume by name, returning it if it was registered.
    pub fn remove(&mut self, name: &str) -> Option<Volume<f32>> {
        self.volumes.remove(name)
    }

    /// Removes all volumes from the registry.
    pub fn clear(&mut self) {
        self.volumes.clear();
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.volumes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns an iterator over all `(name, volume)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Volume<f32>)> {
        self.volumes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}
