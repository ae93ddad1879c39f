//! Render target management module
//!
//! Owns the window-sized G-buffer (four color attachments plus depth) and
//! the fixed-resolution shadow map. Targets are verified complete before
//! they are handed out.

mod render_target;
mod target_manager;

pub use render_target::{
    RenderTargetSet, ShadowTarget,
    GBUFFER_ATTACHMENT_NAMES, GBUFFER_COLOR_FORMATS, GBUFFER_DEPTH_FORMAT, SHADOW_DEPTH_FORMAT,
};
pub use target_manager::{RenderTargetManager, GBUFFER_LABEL, SHADOW_LABEL};
