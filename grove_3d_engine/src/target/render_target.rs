/// Off-screen render targets.
///
/// Both types can only be built through `RenderTargetManager`, which
/// verifies framebuffer completeness first. Holding a value therefore means
/// the target is complete. Dropping it releases every attachment.

use std::sync::Arc;
use crate::renderer::{Framebuffer, Texture, TextureFormat};

/// Attachment formats of the G-buffer, in draw-buffer order
pub const GBUFFER_COLOR_FORMATS: [TextureFormat; 4] = [
    TextureFormat::R8G8B8A8_UNORM,      // color
    TextureFormat::R16G16B16A16_SFLOAT, // normal
    TextureFormat::R32G32B32A32_SFLOAT, // position
    TextureFormat::R16G16B16A16_SFLOAT, // material
];

/// Depth format of the G-buffer
pub const GBUFFER_DEPTH_FORMAT: TextureFormat = TextureFormat::D24_UNORM_S8_UINT;

/// Depth format of the shadow map
pub const SHADOW_DEPTH_FORMAT: TextureFormat = TextureFormat::D32_FLOAT;

/// Labels of the G-buffer color attachments, in draw-buffer order
pub const GBUFFER_ATTACHMENT_NAMES: [&str; 4] = ["color", "normal", "position", "material"];

/// Window-sized geometry buffer
pub struct RenderTargetSet {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) color: Arc<dyn Texture>,
    pub(crate) normal: Arc<dyn Texture>,
    pub(crate) position: Arc<dyn Texture>,
    pub(crate) material: Arc<dyn Texture>,
    pub(crate) depth: Arc<dyn Texture>,
    pub(crate) framebuffer: Arc<dyn Framebuffer>,
}

impl RenderTargetSet {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color(&self) -> &Arc<dyn Texture> {
        &self.color
    }

    pub fn normal(&self) -> &Arc<dyn Texture> {
        &self.normal
    }

    pub fn position(&self) -> &Arc<dyn Texture> {
        &self.position
    }

    pub fn material(&self) -> &Arc<dyn Texture> {
        &self.material
    }

    pub fn depth(&self) -> &Arc<dyn Texture> {
        &self.depth
    }

    pub fn framebuffer(&self) -> &Arc<dyn Framebuffer> {
        &self.framebuffer
    }

    /// Color attachments in sampler-unit order (color, normal, position, material)
    pub fn attachments(&self) -> [&Arc<dyn Texture>; 4] {
        [&self.color, &self.normal, &self.position, &self.material]
    }
}

/// Fixed-resolution, depth-only shadow map
pub struct ShadowTarget {
    pub(crate) size: u32,
    pub(crate) depth: Arc<dyn Texture>,
    pub(crate) framebuffer: Arc<dyn Framebuffer>,
}

impl ShadowTarget {
    /// Edge length in texels
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn depth(&self) -> &Arc<dyn Texture> {
        &self.depth
    }

    pub fn framebuffer(&self) -> &Arc<dyn Framebuffer> {
        &self.framebuffer
    }
}
