/// Renderer module - all rendering-related types and traits

// Module declarations
pub mod renderer;
pub mod texture;
pub mod framebuffer;
pub mod program;
pub mod mesh;
pub mod uniforms;
pub mod command_list;

// Re-export everything from renderer.rs
pub use renderer::*;

// Re-export from other modules
pub use texture::*;
pub use framebuffer::*;
pub use program::*;
pub use mesh::*;
pub use uniforms::*;
pub use command_list::*;

// Mock renderer for tests (no GPU required)
#[cfg(test)]
pub mod mock_renderer;
