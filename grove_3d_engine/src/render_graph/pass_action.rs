/// Pass action trait and implementations.
///
/// Each action records one `begin_pass` .. `end_pass` block. Actions own
/// the programs and builtin meshes they draw with; per-frame data arrives
/// through `FrameInputs`.

use std::sync::Arc;
use glam::Mat4;

use crate::error::Result;
use crate::engine_bail;
use crate::renderer::{
    BlendState, ClearOp, CommandList, DepthState, Mesh, PassTarget, Program, SkyboxUniforms,
    UniformBlock, Viewport,
};
use crate::target::RenderTargetSet;
use super::render_graph::FrameInputs;

const SOURCE: &str = "grove3d::FramePipeline";

/// Texture unit of the shadow map in the directional pass
pub const SHADOW_MAP_UNIT: u32 = 4;

/// Action executed by one pass of the frame
pub trait PassAction: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &'static str;

    /// Record the pass into the command list
    fn execute(&self, cmd: &mut dyn CommandList, frame: &FrameInputs<'_>) -> Result<()>;
}

fn require_gbuffer<'a>(frame: &FrameInputs<'a>, pass: &str) -> Result<&'a RenderTargetSet> {
    match frame.targets.gbuffer() {
        Some(gbuffer) => Ok(gbuffer),
        None => engine_bail!(SOURCE, "{} pass needs the G-buffer, which is not built", pass),
    }
}

// ============================================================================
// Geometry pass
// ============================================================================

/// Fills the G-buffer with every scene object
pub struct GeometryPass {
    program: Arc<dyn Program>,
}

impl GeometryPass {
    pub fn new(program: Arc<dyn Program>) -> Self {
        Self { program }
    }
}

impl PassAction for GeometryPass {
    fn name(&self) -> &'static str {
        "geometry"
    }

    fn execute(&self, cmd: &mut dyn CommandList, frame: &FrameInputs<'_>) -> Result<()> {
        let gbuffer = require_gbuffer(frame, self.name())?;

        cmd.begin_pass(PassTarget::Offscreen(gbuffer.framebuffer()), ClearOp::color_depth([0.0; 4]))?;
        cmd.set_viewport(Viewport::from_size(gbuffer.width(), gbuffer.height()))?;
        cmd.set_depth_state(DepthState::OPAQUE)?;
        cmd.set_blend_state(BlendState::Disabled)?;
        cmd.use_program(&self.program)?;
        cmd.set_uniforms(&UniformBlock::Camera(frame.camera.uniforms(frame.time)))?;

        for object in frame.scene.objects() {
            cmd.set_uniforms(&UniformBlock::Object(object.object_uniforms(frame.time)))?;
            cmd.set_uniforms(&UniformBlock::Material(object.material.uniforms()))?;
            cmd.bind_texture(0, &object.texture)?;
            cmd.draw_mesh(&object.mesh)?;
        }

        cmd.end_pass()
    }
}

// ============================================================================
// Shadow pass
// ============================================================================

/// Renders shadow casters' depth from the directional light
pub struct ShadowPass {
    program: Arc<dyn Program>,
}

impl ShadowPass {
    pub fn new(program: Arc<dyn Program>) -> Self {
        Self { program }
    }
}

impl PassAction for ShadowPass {
    fn name(&self) -> &'static str {
        "shadow"
    }

    fn execute(&self, cmd: &mut dyn CommandList, frame: &FrameInputs<'_>) -> Result<()> {
        let Some(shadow) = frame.targets.shadow() else {
            engine_bail!(SOURCE, "shadow pass needs the shadow map, which is not built");
        };

        cmd.begin_pass(PassTarget::Offscreen(shadow.framebuffer()), ClearOp::depth_only())?;
        cmd.set_viewport(Viewport::from_size(shadow.size(), shadow.size()))?;
        cmd.set_depth_state(DepthState::OPAQUE)?;
        cmd.set_blend_state(BlendState::Disabled)?;
        cmd.use_program(&self.program)?;
        cmd.set_uniforms(&UniformBlock::Shadow(frame.sun.shadow_uniforms()))?;

        for object in frame.scene.shadow_casters() {
            cmd.set_uniforms(&UniformBlock::Object(object.object_uniforms(frame.time)))?;
            cmd.draw_mesh(&object.mesh)?;
        }

        cmd.end_pass()
    }
}

// ============================================================================
// Composite pass
// ============================================================================

/// Light spheres drawn against the blitted scene depth
pub struct LightSpheres {
    pub program: Arc<dyn Program>,
    pub mesh: Arc<dyn Mesh>,
}

/// Lights the G-buffer into the window
///
/// With `spheres` and `directional` set this is the shadowed variant:
/// blit depth, draw light spheres, then the directional and point-light
/// fullscreen passes. Without them only the point-light pass runs.
pub struct CompositePass {
    point_light: Arc<dyn Program>,
    quad: Arc<dyn Mesh>,
    directional: Option<Arc<dyn Program>>,
    spheres: Option<LightSpheres>,
}

impl CompositePass {
    /// Point-light pass only
    pub fn point_lights(point_light: Arc<dyn Program>, quad: Arc<dyn Mesh>) -> Self {
        Self {
            point_light,
            quad,
            directional: None,
            spheres: None,
        }
    }

    /// Light spheres, directional (shadowed) pass and point-light pass
    pub fn shadowed(
        point_light: Arc<dyn Program>,
        quad: Arc<dyn Mesh>,
        directional: Arc<dyn Program>,
        spheres: LightSpheres,
    ) -> Self {
        Self {
            point_light,
            quad,
            directional: Some(directional),
            spheres: Some(spheres),
        }
    }
}

impl PassAction for CompositePass {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn execute(&self, cmd: &mut dyn CommandList, frame: &FrameInputs<'_>) -> Result<()> {
        let gbuffer = require_gbuffer(frame, self.name())?;
        let (width, height) = frame.camera.size();
        let camera = UniformBlock::Camera(frame.camera.uniforms(frame.time));
        let lights = UniformBlock::PointLights(frame.lights);

        cmd.begin_pass(PassTarget::Screen, ClearOp::color_depth(frame.clear_color))?;
        cmd.set_viewport(Viewport::from_size(width, height))?;

        if let Some(spheres) = &self.spheres {
            cmd.blit_depth_to_screen(gbuffer.framebuffer())?;
            cmd.set_depth_state(DepthState::OPAQUE)?;
            cmd.set_blend_state(BlendState::Disabled)?;
            cmd.use_program(&spheres.program)?;
            cmd.set_uniforms(&camera)?;
            cmd.set_uniforms(&lights)?;
            if !frame.lights.is_empty() {
                cmd.draw_mesh_instanced(&spheres.mesh, frame.lights.len() as u32)?;
            }
        }

        cmd.set_depth_state(DepthState::DISABLED)?;
        cmd.set_blend_state(BlendState::Additive)?;
        for (unit, texture) in gbuffer.attachments().into_iter().enumerate() {
            cmd.bind_texture(unit as u32, texture)?;
        }

        if let Some(directional) = &self.directional {
            let Some(shadow) = frame.targets.shadow() else {
                engine_bail!(SOURCE, "directional pass needs the shadow map, which is not built");
            };
            cmd.use_program(directional)?;
            cmd.bind_texture(SHADOW_MAP_UNIT, shadow.depth())?;
            cmd.set_uniforms(&camera)?;
            cmd.set_uniforms(&UniformBlock::DirectionalLight(frame.sun.uniforms()))?;
            cmd.draw_mesh(&self.quad)?;
        }

        cmd.use_program(&self.point_light)?;
        cmd.set_uniforms(&camera)?;
        cmd.set_uniforms(&lights)?;
        cmd.draw_mesh(&self.quad)?;

        cmd.set_blend_state(BlendState::Disabled)?;
        cmd.set_depth_state(DepthState::OPAQUE)?;
        cmd.end_pass()
    }
}

// ============================================================================
// Raymarch pass
// ============================================================================

/// Fractal fullscreen quad followed by the skybox
pub struct RaymarchPass {
    fractal: Arc<dyn Program>,
    skybox: Arc<dyn Program>,
    quad: Arc<dyn Mesh>,
    cube: Arc<dyn Mesh>,
}

impl RaymarchPass {
    pub fn new(
        fractal: Arc<dyn Program>,
        skybox: Arc<dyn Program>,
        quad: Arc<dyn Mesh>,
        cube: Arc<dyn Mesh>,
    ) -> Self {
        Self { fractal, skybox, quad, cube }
    }
}

impl PassAction for RaymarchPass {
    fn name(&self) -> &'static str {
        "raymarch"
    }

    fn execute(&self, cmd: &mut dyn CommandList, frame: &FrameInputs<'_>) -> Result<()> {
        let Some(sky) = frame.skybox else {
            engine_bail!(SOURCE, "raymarch pass needs the skybox cube map, which is not loaded");
        };
        let (width, height) = frame.camera.size();

        cmd.begin_pass(PassTarget::Screen, ClearOp::color_depth(frame.clear_color))?;
        cmd.set_viewport(Viewport::from_size(width, height))?;
        cmd.set_depth_state(DepthState::OPAQUE)?;
        cmd.set_blend_state(BlendState::Disabled)?;

        cmd.use_program(&self.fractal)?;
        cmd.set_uniforms(&UniformBlock::Camera(frame.camera.uniforms(frame.time)))?;
        cmd.draw_mesh(&self.quad)?;

        // Skybox sits at the far plane; LessEqual lets it pass there
        cmd.set_depth_state(DepthState::SKYBOX)?;
        cmd.use_program(&self.skybox)?;
        let mvp = frame.camera.view_projection_matrix() * Mat4::from_translation(frame.camera.eye());
        cmd.set_uniforms(&UniformBlock::Skybox(SkyboxUniforms { mvp }))?;
        cmd.bind_texture(0, sky)?;
        cmd.draw_mesh(&self.cube)?;
        cmd.set_depth_state(DepthState::OPAQUE)?;

        cmd.end_pass()
    }
}
