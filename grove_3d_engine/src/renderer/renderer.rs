/// Renderer trait - GPU resource factory

use std::sync::Arc;

use crate::error::Result;
use crate::renderer::{
    Texture, Framebuffer, Program, Mesh,
    TextureDesc, FramebufferDesc, ProgramDesc, BuiltinMesh,
};

/// Main renderer trait
///
/// Central factory for GPU resources. Implemented by backend-specific
/// renderers. Every returned handle owns its GPU object and releases it
/// when the last `Arc` is dropped, so replacing a handle is enough to
/// free the old resource.
pub trait Renderer: Send + Sync {
    /// Create a texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a framebuffer from existing attachment textures
    ///
    /// Creation succeeds even when the attachments are unusable; callers
    /// must check `Framebuffer::status()` before rendering.
    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Compile and link a shader program
    fn create_program(&mut self, desc: ProgramDesc) -> Result<Arc<dyn Program>>;

    /// Generate a built-in mesh
    fn create_builtin_mesh(&mut self, mesh: BuiltinMesh) -> Result<Arc<dyn Mesh>>;
}
