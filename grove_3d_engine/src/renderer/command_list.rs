/// CommandList trait - for recording rendering commands

use std::sync::Arc;
use bitflags::bitflags;
use crate::error::Result;
use crate::renderer::{Framebuffer, Mesh, Program, Texture, UniformBlock};

/// Command list for recording one frame of rendering commands
///
/// The backend either issues the commands immediately (OpenGL) or records
/// them for later submission. Passes are strictly sequential: every
/// `begin_pass` is closed by `end_pass` before the next one starts.
pub trait CommandList: Send + Sync {
    /// Bind a target and clear it
    fn begin_pass(&mut self, target: PassTarget<'_>, clear: ClearOp) -> Result<()>;

    /// Finish the current pass
    fn end_pass(&mut self) -> Result<()>;

    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Depth test / depth write / compare function
    fn set_depth_state(&mut self, state: DepthState) -> Result<()>;

    /// Blending
    fn set_blend_state(&mut self, state: BlendState) -> Result<()>;

    /// Make a program current
    fn use_program(&mut self, program: &Arc<dyn Program>) -> Result<()>;

    /// Upload a uniform block to the current program
    fn set_uniforms(&mut self, block: &UniformBlock<'_>) -> Result<()>;

    /// Bind a texture to a texture unit
    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Draw a mesh once
    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()>;

    /// Draw a mesh `instance_count` times
    fn draw_mesh_instanced(&mut self, mesh: &Arc<dyn Mesh>, instance_count: u32) -> Result<()>;

    /// Copy the depth buffer of `source` into the default framebuffer
    fn blit_depth_to_screen(&mut self, source: &Arc<dyn Framebuffer>) -> Result<()>;
}

/// Where a pass renders to
#[derive(Clone, Copy)]
pub enum PassTarget<'a> {
    /// The default (window) framebuffer
    Screen,
    /// An off-screen framebuffer
    Offscreen(&'a Arc<dyn Framebuffer>),
}

impl PassTarget<'_> {
    /// Label used in diagnostics ("screen" or the framebuffer label)
    pub fn label(&self) -> &str {
        match self {
            PassTarget::Screen => "screen",
            PassTarget::Offscreen(framebuffer) => framebuffer.label(),
        }
    }
}

bitflags! {
    /// Buffers cleared at the start of a pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Clear operation for `begin_pass`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearOp {
    pub flags: ClearFlags,
    pub color: [f32; 4],
    pub depth: f32,
}

impl ClearOp {
    /// Clear color and depth
    pub fn color_depth(color: [f32; 4]) -> Self {
        Self { flags: ClearFlags::COLOR | ClearFlags::DEPTH, color, depth: 1.0 }
    }

    /// Clear depth only (shadow maps)
    pub fn depth_only() -> Self {
        Self { flags: ClearFlags::DEPTH, color: [0.0; 4], depth: 1.0 }
    }
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-target viewport anchored at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Depth compare function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFunc {
    Less,
    LessEqual,
    Always,
}

/// Depth test configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthState {
    pub test: bool,
    pub write: bool,
    pub func: CompareFunc,
}

impl DepthState {
    /// Depth test and writes on, `Less`
    pub const OPAQUE: DepthState = DepthState { test: true, write: true, func: CompareFunc::Less };

    /// Skybox drawn at the far plane, `LessEqual`
    pub const SKYBOX: DepthState = DepthState { test: true, write: true, func: CompareFunc::LessEqual };

    /// No depth test, no writes (fullscreen lighting passes)
    pub const DISABLED: DepthState = DepthState { test: false, write: false, func: CompareFunc::Always };
}

/// Blending configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendState {
    /// Source replaces destination
    Disabled,
    /// dst = src + dst (light accumulation)
    Additive,
}
