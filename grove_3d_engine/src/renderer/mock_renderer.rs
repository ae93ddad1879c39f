/// Mock Renderer for unit tests (no GPU required)
///
/// Tracks live GPU handles through shared counters (decremented on drop)
/// and records every command issued to a `MockCommandList`, so tests can
/// check resource lifetimes and pass ordering without a graphics context.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Result;
use crate::engine_bail;
use crate::renderer::{
    Renderer, CommandList, Texture, Framebuffer, Program, Mesh,
    TextureDesc, TextureInfo, TextureFormat, FramebufferDesc, FramebufferStatus,
    ProgramDesc, BuiltinMesh, AttachmentSlot, IncompleteReason,
    PassTarget, ClearOp, ClearFlags, Viewport, DepthState, BlendState, UniformBlock,
};

// ============================================================================
// Live resource counters
// ============================================================================

/// Shared counters of live and created handles
#[derive(Debug, Default)]
pub struct LiveCounters {
    pub live_textures: AtomicUsize,
    pub live_framebuffers: AtomicUsize,
    pub created_textures: AtomicUsize,
    pub created_framebuffers: AtomicUsize,
}

impl LiveCounters {
    pub fn live_textures(&self) -> usize {
        self.live_textures.load(Ordering::SeqCst)
    }

    pub fn live_framebuffers(&self) -> usize {
        self.live_framebuffers.load(Ordering::SeqCst)
    }

    pub fn created_textures(&self) -> usize {
        self.created_textures.load(Ordering::SeqCst)
    }

    pub fn created_framebuffers(&self) -> usize {
        self.created_framebuffers.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

pub struct MockTexture {
    pub info: TextureInfo,
    counters: Arc<LiveCounters>,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.counters.live_textures.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

pub struct MockFramebuffer {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub status: FramebufferStatus,
    _attachments: Vec<Arc<dyn Texture>>,
    counters: Arc<LiveCounters>,
}

impl Framebuffer for MockFramebuffer {
    fn label(&self) -> &str {
        &self.label
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn status(&self) -> FramebufferStatus {
        self.status
    }
}

impl Drop for MockFramebuffer {
    fn drop(&mut self) {
        self.counters.live_framebuffers.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Program / Mesh
// ============================================================================

#[derive(Debug)]
pub struct MockProgram {
    pub label: String,
}

impl Program for MockProgram {
    fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug)]
pub struct MockMesh {
    pub label: String,
    pub index_count: u32,
}

impl MockMesh {
    pub fn new(label: &str, index_count: u32) -> Self {
        Self { label: label.to_string(), index_count }
    }
}

impl Mesh for MockMesh {
    fn label(&self) -> &str {
        &self.label
    }

    fn index_count(&self) -> u32 {
        self.index_count
    }
}

// ============================================================================
// Mock Renderer
// ============================================================================

/// Mock Renderer that tracks created resources without GPU
pub struct MockRenderer {
    /// Live/created handle counters, shared with every handle
    pub counters: Arc<LiveCounters>,
    /// Formats the "driver" refuses to render to
    pub unsupported_formats: Vec<TextureFormat>,
    /// Labels of programs created so far
    pub created_programs: Vec<String>,
    /// Make the next texture creation fail with OutOfMemory
    pub fail_next_texture: bool,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(LiveCounters::default()),
            unsupported_formats: Vec::new(),
            created_programs: Vec::new(),
            fail_next_texture: false,
        }
    }

    /// Standalone sampled texture, as an asset loader would return
    pub fn make_texture(&mut self, label: &str) -> Arc<dyn Texture> {
        self.create_texture(TextureDesc {
            label: label.to_string(),
            width: 4,
            height: 4,
            format: TextureFormat::R8G8B8A8_SRGB,
            usage: crate::renderer::TextureUsage::Sampled,
            kind: crate::renderer::TextureKind::Texture2D,
        })
        .unwrap()
    }

    /// Completeness rules of a typical GL driver
    fn check_status(&self, desc: &FramebufferDesc) -> FramebufferStatus {
        let incomplete = |attachment, reason| FramebufferStatus::Incomplete { attachment, reason };

        if desc.color_attachments.is_empty() && desc.depth_attachment.is_none() {
            return incomplete(AttachmentSlot::Color(0), IncompleteReason::MissingAttachment);
        }

        let size = desc
            .color_attachments
            .first()
            .or(desc.depth_attachment.as_ref())
            .map(|t| (t.info().width, t.info().height))
            .unwrap_or((0, 0));

        for (index, texture) in desc.color_attachments.iter().enumerate() {
            let slot = AttachmentSlot::Color(index as u32);
            let info = texture.info();
            if info.format.is_depth() || self.unsupported_formats.contains(&info.format) {
                return incomplete(slot, IncompleteReason::UnsupportedFormat);
            }
            if !info.usage.is_attachable() || (info.width, info.height) != size {
                return incomplete(slot, IncompleteReason::IncompleteAttachment);
            }
        }

        if let Some(depth) = &desc.depth_attachment {
            let info = depth.info();
            if !info.format.is_depth() || self.unsupported_formats.contains(&info.format) {
                return incomplete(AttachmentSlot::Depth, IncompleteReason::UnsupportedFormat);
            }
            if (info.width, info.height) != size {
                return incomplete(AttachmentSlot::Depth, IncompleteReason::IncompleteAttachment);
            }
        }

        for &index in &desc.draw_buffers {
            if index as usize >= desc.color_attachments.len() {
                return incomplete(AttachmentSlot::Color(index), IncompleteReason::MissingAttachment);
            }
        }

        FramebufferStatus::Complete
    }
}

impl Renderer for MockRenderer {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_next_texture {
            self.fail_next_texture = false;
            return Err(crate::error::Error::OutOfMemory);
        }
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("grove3d::mock", "texture '{}' has zero size", desc.label);
        }
        self.counters.live_textures.fetch_add(1, Ordering::SeqCst);
        self.counters.created_textures.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockTexture {
            info: TextureInfo::from(&desc),
            counters: self.counters.clone(),
        }))
    }

    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        let status = self.check_status(&desc);
        let (width, height) = desc
            .color_attachments
            .first()
            .or(desc.depth_attachment.as_ref())
            .map(|t| (t.info().width, t.info().height))
            .unwrap_or((0, 0));

        let mut attachments = desc.color_attachments.clone();
        attachments.extend(desc.depth_attachment.iter().cloned());

        self.counters.live_framebuffers.fetch_add(1, Ordering::SeqCst);
        self.counters.created_framebuffers.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockFramebuffer {
            label: desc.label,
            width,
            height,
            status,
            _attachments: attachments,
            counters: self.counters.clone(),
        }))
    }

    fn create_program(&mut self, desc: ProgramDesc) -> Result<Arc<dyn Program>> {
        self.created_programs.push(desc.label.clone());
        Ok(Arc::new(MockProgram { label: desc.label }))
    }

    fn create_builtin_mesh(&mut self, mesh: BuiltinMesh) -> Result<Arc<dyn Mesh>> {
        let label = match mesh {
            BuiltinMesh::FullscreenQuad => "fullscreen_quad",
            BuiltinMesh::SkyboxCube => "skybox_cube",
            BuiltinMesh::Sphere { .. } => "sphere",
        };
        Ok(Arc::new(MockMesh::new(label, mesh.index_count())))
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// One recorded command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    BeginPass { target: String, clear: ClearFlags },
    EndPass,
    SetViewport(Viewport),
    SetDepthState(DepthState),
    SetBlendState(BlendState),
    UseProgram(String),
    SetUniforms { name: &'static str, bytes: Vec<u8> },
    BindTexture { unit: u32, label: String },
    DrawMesh(String),
    DrawMeshInstanced { mesh: String, instances: u32 },
    BlitDepthToScreen(String),
}

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<Command>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// Targets of every `begin_pass`, in order
    pub fn pass_targets(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::BeginPass { target, .. } => Some(target.clone()),
                _ => None,
            })
            .collect()
    }

    /// Commands recorded between the n-th `begin_pass` and its `end_pass`
    pub fn pass_commands(&self, n: usize) -> Vec<Command> {
        let mut seen = 0;
        let mut inside = false;
        let mut out = Vec::new();
        for command in &self.commands {
            match command {
                Command::BeginPass { .. } => {
                    inside = seen == n;
                    seen += 1;
                }
                Command::EndPass => {
                    if inside {
                        return out;
                    }
                }
                other if inside => out.push(other.clone()),
                _ => {}
            }
        }
        out
    }

    /// Decoded bytes of every `set_uniforms` call for a block name
    pub fn uniforms_named(&self, name: &str) -> Vec<Vec<u8>> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::SetUniforms { name: n, bytes } if *n == name => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }
}

impl CommandList for MockCommandList {
    fn begin_pass(&mut self, target: PassTarget<'_>, clear: ClearOp) -> Result<()> {
        self.commands.push(Command::BeginPass {
            target: target.label().to_string(),
            clear: clear.flags,
        });
        Ok(())
    }

    fn end_pass(&mut self) -> Result<()> {
        self.commands.push(Command::EndPass);
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(Command::SetViewport(viewport));
        Ok(())
    }

    fn set_depth_state(&mut self, state: DepthState) -> Result<()> {
        self.commands.push(Command::SetDepthState(state));
        Ok(())
    }

    fn set_blend_state(&mut self, state: BlendState) -> Result<()> {
        self.commands.push(Command::SetBlendState(state));
        Ok(())
    }

    fn use_program(&mut self, program: &Arc<dyn Program>) -> Result<()> {
        self.commands.push(Command::UseProgram(program.label().to_string()));
        Ok(())
    }

    fn set_uniforms(&mut self, block: &UniformBlock<'_>) -> Result<()> {
        self.commands.push(Command::SetUniforms {
            name: block.name(),
            bytes: block.as_bytes().to_vec(),
        });
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.commands.push(Command::BindTexture {
            unit,
            label: texture.info().label.clone(),
        });
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()> {
        self.commands.push(Command::DrawMesh(mesh.label().to_string()));
        Ok(())
    }

    fn draw_mesh_instanced(&mut self, mesh: &Arc<dyn Mesh>, instance_count: u32) -> Result<()> {
        self.commands.push(Command::DrawMeshInstanced {
            mesh: mesh.label().to_string(),
            instances: instance_count,
        });
        Ok(())
    }

    fn blit_depth_to_screen(&mut self, source: &Arc<dyn Framebuffer>) -> Result<()> {
        self.commands.push(Command::BlitDepthToScreen(source.label().to_string()));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
