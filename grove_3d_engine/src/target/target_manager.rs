/// Owner of the off-screen render targets.
///
/// The G-buffer follows the window size and is rebuilt on every resize;
/// the shadow map is allocated once and never touched by a resize.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error, engine_info};
use crate::renderer::{
    Framebuffer, FramebufferDesc, FramebufferStatus, Renderer, Texture, TextureDesc,
    TextureKind, TextureUsage,
};
use super::render_target::{
    RenderTargetSet, ShadowTarget, GBUFFER_ATTACHMENT_NAMES, GBUFFER_COLOR_FORMATS,
    GBUFFER_DEPTH_FORMAT, SHADOW_DEPTH_FORMAT,
};

const SOURCE: &str = "grove3d::RenderTargetManager";

/// Label of the G-buffer framebuffer
pub const GBUFFER_LABEL: &str = "gbuffer";

/// Label of the shadow framebuffer
pub const SHADOW_LABEL: &str = "shadow";

pub struct RenderTargetManager {
    gbuffer: Option<RenderTargetSet>,
    shadow: Option<ShadowTarget>,
}

impl RenderTargetManager {
    pub fn new() -> Self {
        Self {
            gbuffer: None,
            shadow: None,
        }
    }

    /// (Re)build the G-buffer at `width` x `height`
    ///
    /// The previous set is released before the new textures are allocated,
    /// so at most one set is alive at any time. On failure no set is stored.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if either dimension is zero
    /// - `IncompleteFramebuffer` naming the failing attachment
    /// - any allocation error from the renderer
    pub fn create_or_resize(
        &mut self,
        renderer: &mut dyn Renderer,
        width: u32,
        height: u32,
    ) -> Result<&RenderTargetSet> {
        if width == 0 || height == 0 {
            engine_error!(SOURCE, "Refusing to build a {}x{} G-buffer", width, height);
            return Err(Error::InvalidResource(format!(
                "G-buffer size {}x{} has a zero dimension", width, height
            )));
        }

        self.gbuffer = None;

        let [color, normal, position, material]: [Arc<dyn Texture>; 4] = GBUFFER_COLOR_FORMATS
            .iter()
            .zip(GBUFFER_ATTACHMENT_NAMES)
            .map(|(&format, name)| {
                renderer.create_texture(TextureDesc::attachment(
                    &format!("{}_{}", GBUFFER_LABEL, name),
                    width,
                    height,
                    format,
                ))
            })
            .collect::<Result<Vec<_>>>()?
            .try_into()
            .map_err(|_| Error::InvalidResource("G-buffer attachment count".to_string()))?;

        let depth = renderer.create_texture(TextureDesc::attachment(
            &format!("{}_depth", GBUFFER_LABEL),
            width,
            height,
            GBUFFER_DEPTH_FORMAT,
        ))?;

        let framebuffer = renderer.create_framebuffer(FramebufferDesc {
            label: GBUFFER_LABEL.to_string(),
            color_attachments: vec![color.clone(), normal.clone(), position.clone(), material.clone()],
            depth_attachment: Some(depth.clone()),
            draw_buffers: vec![0, 1, 2, 3],
        })?;
        check_complete(&framebuffer)?;

        engine_info!(SOURCE, "G-buffer built at {}x{}", width, height);

        Ok(self.gbuffer.insert(RenderTargetSet {
            width,
            height,
            color,
            normal,
            position,
            material,
            depth,
            framebuffer,
        }))
    }

    /// Allocate the square shadow map
    ///
    /// Calling again returns the existing target when the size matches.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if `size` is zero or differs from the existing target
    /// - `IncompleteFramebuffer` if the depth attachment is rejected
    pub fn create_shadow_target(
        &mut self,
        renderer: &mut dyn Renderer,
        size: u32,
    ) -> Result<&ShadowTarget> {
        if size == 0 {
            engine_error!(SOURCE, "Refusing to build a zero-sized shadow map");
            return Err(Error::InvalidResource("shadow map size is zero".to_string()));
        }

        if let Some(existing) = &self.shadow {
            if existing.size != size {
                engine_error!(SOURCE,
                    "Shadow map already allocated at {}, requested {}", existing.size, size);
                return Err(Error::InvalidResource(format!(
                    "shadow map is fixed at {} texels", existing.size
                )));
            }
        } else {
            let depth = renderer.create_texture(TextureDesc {
                label: format!("{}_depth", SHADOW_LABEL),
                width: size,
                height: size,
                format: SHADOW_DEPTH_FORMAT,
                usage: TextureUsage::SampledDepthStencil,
                kind: TextureKind::Texture2D,
            })?;

            let framebuffer = renderer.create_framebuffer(FramebufferDesc {
                label: SHADOW_LABEL.to_string(),
                color_attachments: Vec::new(),
                depth_attachment: Some(depth.clone()),
                draw_buffers: Vec::new(),
            })?;
            check_complete(&framebuffer)?;

            engine_info!(SOURCE, "Shadow map built at {}x{}", size, size);
            self.shadow = Some(ShadowTarget { size, depth, framebuffer });
        }

        self.shadow
            .as_ref()
            .ok_or_else(|| Error::InvalidResource("shadow map missing".to_string()))
    }

    /// Current G-buffer, if built
    pub fn gbuffer(&self) -> Option<&RenderTargetSet> {
        self.gbuffer.as_ref()
    }

    /// Shadow map, if built
    pub fn shadow(&self) -> Option<&ShadowTarget> {
        self.shadow.as_ref()
    }

    /// Every off-screen texture with a display name, for debug views
    pub fn debug_textures(&self) -> Vec<(String, &Arc<dyn Texture>)> {
        let mut out = Vec::new();
        if let Some(set) = &self.gbuffer {
            for (name, texture) in GBUFFER_ATTACHMENT_NAMES.iter().zip(set.attachments()) {
                out.push((format!("G-buffer {}", name), texture));
            }
        }
        if let Some(shadow) = &self.shadow {
            out.push(("Shadow map".to_string(), &shadow.depth));
        }
        out
    }

    /// Release every target
    pub fn release(&mut self) {
        if self.gbuffer.take().is_some() {
            engine_debug!(SOURCE, "G-buffer released");
        }
        if self.shadow.take().is_some() {
            engine_debug!(SOURCE, "Shadow map released");
        }
    }
}

impl Default for RenderTargetManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn an incomplete framebuffer into a logged, descriptive error
fn check_complete(framebuffer: &Arc<dyn Framebuffer>) -> Result<()> {
    match framebuffer.status() {
        FramebufferStatus::Complete => Ok(()),
        FramebufferStatus::Incomplete { attachment, reason } => {
            engine_error!(SOURCE,
                "Framebuffer '{}' is incomplete: {} is {}",
                framebuffer.label(), attachment, reason);
            Err(Error::IncompleteFramebuffer {
                target: framebuffer.label().to_string(),
                attachment,
                reason,
            })
        }
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
