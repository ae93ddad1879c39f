/// Asset loading seam and load-once cache.
///
/// File decoding lives outside the engine: an `AssetLoader` turns paths
/// into GPU handles. `AssetCache` sits in front of it so that a path shared
/// by several scene objects is requested once.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::engine_error;
use crate::renderer::{Mesh, Texture};

const SOURCE: &str = "grove3d::AssetCache";

/// Decodes mesh and image files into GPU resources
///
/// A missing file is reported as `Error::AssetNotFound(path)`; loaders
/// never hand out placeholder handles.
pub trait AssetLoader {
    fn load_mesh(&mut self, path: &Path) -> Result<Arc<dyn Mesh>>;

    fn load_texture(&mut self, path: &Path) -> Result<Arc<dyn Texture>>;

    /// Faces in +X, -X, +Y, -Y, +Z, -Z order
    fn load_cube_map(&mut self, faces: &[PathBuf; 6]) -> Result<Arc<dyn Texture>>;
}

/// Memoizes loads by resolved path
pub struct AssetCache {
    root: PathBuf,
    meshes: FxHashMap<PathBuf, Arc<dyn Mesh>>,
    textures: FxHashMap<PathBuf, Arc<dyn Texture>>,
}

impl AssetCache {
    /// Relative paths are resolved against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            meshes: FxHashMap::default(),
            textures: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn mesh(&mut self, loader: &mut dyn AssetLoader, relative: &str) -> Result<Arc<dyn Mesh>> {
        let path = self.resolve(relative);
        if let Some(mesh) = self.meshes.get(&path) {
            return Ok(mesh.clone());
        }
        let mesh = loader.load_mesh(&path).inspect_err(|err| {
            engine_error!(SOURCE, "Failed to load mesh '{}': {}", path.display(), err);
        })?;
        self.meshes.insert(path, mesh.clone());
        Ok(mesh)
    }

    pub fn texture(&mut self, loader: &mut dyn AssetLoader, relative: &str) -> Result<Arc<dyn Texture>> {
        let path = self.resolve(relative);
        if let Some(texture) = self.textures.get(&path) {
            return Ok(texture.clone());
        }
        let texture = loader.load_texture(&path).inspect_err(|err| {
            engine_error!(SOURCE, "Failed to load texture '{}': {}", path.display(), err);
        })?;
        self.textures.insert(path, texture.clone());
        Ok(texture)
    }

    /// Cube maps are keyed by their first face
    pub fn cube_map(&mut self, loader: &mut dyn AssetLoader, faces: &[&str; 6]) -> Result<Arc<dyn Texture>> {
        let paths: [PathBuf; 6] = faces.map(|face| self.resolve(face));
        if let Some(texture) = self.textures.get(&paths[0]) {
            return Ok(texture.clone());
        }
        let texture = loader.load_cube_map(&paths).inspect_err(|err| {
            engine_error!(SOURCE, "Failed to load cube map '{}': {}", paths[0].display(), err);
        })?;
        let [key, ..] = paths;
        self.textures.insert(key, texture.clone());
        Ok(texture)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
#[path = "assets_tests.rs"]
mod tests;
