/// Debug overlay seam (an ImGui panel in the windowed shell)

use std::sync::Arc;
use crate::renderer::Texture;

pub trait DebugOverlay {
    /// Show a texture preview under `title`
    fn show_texture(&mut self, title: &str, texture: &Arc<dyn Texture>);

    /// Show a line of text
    fn show_text(&mut self, _text: &str) {}
}
