/// Mock AssetLoader for unit tests (no file I/O)
///
/// Hands out mock meshes and textures labeled with the file name and
/// records every request, so tests can check that the cache loads each
/// path once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::renderer::mock_renderer::{MockMesh, MockRenderer};
use crate::renderer::{Mesh, Renderer, Texture, TextureDesc, TextureFormat, TextureKind, TextureUsage};
use super::assets::AssetLoader;

pub struct MockAssetLoader {
    pub renderer: MockRenderer,
    /// Paths that report `AssetNotFound`
    pub missing: Vec<PathBuf>,
    /// Every path requested, in order (cube maps record their first face)
    pub requests: Vec<PathBuf>,
}

impl MockAssetLoader {
    pub fn new() -> Self {
        Self {
            renderer: MockRenderer::new(),
            missing: Vec::new(),
            requests: Vec::new(),
        }
    }

    fn check(&mut self, path: &Path) -> Result<String> {
        self.requests.push(path.to_path_buf());
        if self.missing.iter().any(|m| m == path) {
            return Err(Error::AssetNotFound(path.to_path_buf()));
        }
        Ok(path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default())
    }

    fn texture(&mut self, label: String, kind: TextureKind) -> Result<Arc<dyn Texture>> {
        self.renderer.create_texture(TextureDesc {
            label,
            width: 4,
            height: 4,
            format: TextureFormat::R8G8B8A8_SRGB,
            usage: TextureUsage::Sampled,
            kind,
        })
    }
}

impl AssetLoader for MockAssetLoader {
    fn load_mesh(&mut self, path: &Path) -> Result<Arc<dyn Mesh>> {
        let label = self.check(path)?;
        Ok(Arc::new(MockMesh::new(&label, 3)))
    }

    fn load_texture(&mut self, path: &Path) -> Result<Arc<dyn Texture>> {
        let label = self.check(path)?;
        self.texture(label, TextureKind::Texture2D)
    }

    fn load_cube_map(&mut self, faces: &[PathBuf; 6]) -> Result<Arc<dyn Texture>> {
        for face in &faces[1..] {
            if self.missing.iter().any(|m| m == face) {
                return Err(Error::AssetNotFound(face.clone()));
            }
        }
        let label = self.check(&faces[0])?;
        self.texture(label, TextureKind::CubeMap)
    }
}
