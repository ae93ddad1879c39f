/// Framebuffer trait - groups attachment textures into one off-screen target
///
/// Created once and reused each frame. Window-sized framebuffers are
/// recreated on resize; the shadow framebuffer never is.

use std::fmt;
use std::sync::Arc;
use crate::renderer::Texture;

/// Which attachment point of a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    /// Color attachment by index (GL_COLOR_ATTACHMENT0 + n)
    Color(u32),
    /// Depth (or depth/stencil) attachment
    Depth,
}

impl fmt::Display for AttachmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentSlot::Color(index) => write!(f, "color attachment {}", index),
            AttachmentSlot::Depth => write!(f, "depth attachment"),
        }
    }
}

/// Why a framebuffer failed its completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    /// No image attached where one is required
    MissingAttachment,
    /// The driver cannot render to this format
    UnsupportedFormat,
    /// The attachment exists but is unusable (size mismatch, bad usage)
    IncompleteAttachment,
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompleteReason::MissingAttachment => write!(f, "missing"),
            IncompleteReason::UnsupportedFormat => write!(f, "an unsupported format"),
            IncompleteReason::IncompleteAttachment => write!(f, "incomplete"),
        }
    }
}

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// Ready to render into
    Complete,
    /// The driver rejected one attachment
    Incomplete {
        attachment: AttachmentSlot,
        reason: IncompleteReason,
    },
}

/// Descriptor for creating a framebuffer
#[derive(Clone)]
pub struct FramebufferDesc {
    /// Debug label ("gbuffer", "shadow")
    pub label: String,
    /// Color attachments, attached at GL_COLOR_ATTACHMENT0 + index
    pub color_attachments: Vec<Arc<dyn Texture>>,
    /// Optional depth attachment
    pub depth_attachment: Option<Arc<dyn Texture>>,
    /// Color attachment indices that receive fragment shader outputs, in
    /// output location order. Empty for depth-only targets.
    pub draw_buffers: Vec<u32>,
}

/// Framebuffer resource trait
pub trait Framebuffer: Send + Sync {
    /// Debug label
    fn label(&self) -> &str;

    /// Get the width in pixels
    fn width(&self) -> u32;

    /// Get the height in pixels
    fn height(&self) -> u32;

    /// Completeness as reported by the driver
    fn status(&self) -> FramebufferStatus;
}
