/// Texture trait, texture descriptor, and texture info

/// Texture format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    // Color formats
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    R16G16B16A16_SFLOAT,
    R32G32B32A32_SFLOAT,

    // Depth formats
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
}

impl TextureFormat {
    /// True for depth and depth/stencil formats
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM | TextureFormat::D32_FLOAT | TextureFormat::D24_UNORM_S8_UINT
        )
    }
}

/// Texture usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
    /// Texture is a color attachment that later passes sample
    SampledAndRenderTarget,
    /// Texture is a depth attachment
    DepthStencil,
    /// Depth attachment that later passes sample (shadow maps)
    SampledDepthStencil,
}

impl TextureUsage {
    /// True if the texture can be attached to a framebuffer
    pub fn is_attachable(&self) -> bool {
        !matches!(self, TextureUsage::Sampled)
    }
}

/// Texture dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Plain 2D image
    Texture2D,
    /// Six square faces (+X, -X, +Y, -Y, +Z, -Z)
    CubeMap,
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug label (shown in the debug overlay and backend object labels)
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage
    pub usage: TextureUsage,
    /// 2D or cube map
    pub kind: TextureKind,
}

impl TextureDesc {
    /// Window-sized (or fixed-size) attachment descriptor
    pub fn attachment(label: &str, width: u32, height: u32, format: TextureFormat) -> Self {
        let usage = if format.is_depth() {
            TextureUsage::DepthStencil
        } else {
            TextureUsage::SampledAndRenderTarget
        };
        Self {
            label: label.to_string(),
            width,
            height,
            format,
            usage,
            kind: TextureKind::Texture2D,
        }
    }
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture.
#[derive(Debug, Clone)]
pub struct TextureInfo {
    /// Debug label
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage
    pub usage: TextureUsage,
    /// 2D or cube map
    pub kind: TextureKind,
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            label: desc.label.clone(),
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
            kind: desc.kind,
        }
    }
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types.
/// The GPU object is destroyed when the last handle is dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;
}
