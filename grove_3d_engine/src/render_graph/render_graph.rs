/// Frame pipeline: the fixed pass sequence of one demo variant.
///
/// The pipeline is built once from a variant: it creates the programs and
/// builtin meshes its passes need and lays the passes out in their fixed
/// order (geometry → shadow → composite). Each frame it runs every pass
/// against the current `FrameInputs`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::camera::FlyCamera;
use crate::error::Result;
use crate::engine_info;
use crate::lighting::DirectionalLight;
use crate::renderer::{
    BuiltinMesh, CommandList, GpuPointLight, Program, ProgramDesc, Renderer, Texture,
};
use crate::scene::Scene;
use crate::target::RenderTargetManager;
use super::pass_action::{
    CompositePass, GeometryPass, LightSpheres, PassAction, RaymarchPass, ShadowPass,
};

/// Which demo the pipeline renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineVariant {
    /// Fractal quad + skybox, straight to the screen
    Raymarch,
    /// Geometry pass, then point-light composite
    Deferred,
    /// Geometry, shadow, then spheres + directional + point-light composite
    DeferredShadowed,
}

impl PipelineVariant {
    pub fn uses_gbuffer(&self) -> bool {
        !matches!(self, PipelineVariant::Raymarch)
    }

    pub fn uses_shadow_map(&self) -> bool {
        matches!(self, PipelineVariant::DeferredShadowed)
    }

    pub fn uses_point_lights(&self) -> bool {
        self.uses_gbuffer()
    }

    pub fn uses_skybox(&self) -> bool {
        matches!(self, PipelineVariant::Raymarch)
    }
}

impl Default for PipelineVariant {
    fn default() -> Self {
        PipelineVariant::DeferredShadowed
    }
}

impl fmt::Display for PipelineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineVariant::Raymarch => write!(f, "raymarch"),
            PipelineVariant::Deferred => write!(f, "deferred"),
            PipelineVariant::DeferredShadowed => write!(f, "deferred_shadowed"),
        }
    }
}

/// Everything a frame reads
pub struct FrameInputs<'a> {
    pub camera: &'a FlyCamera,
    /// Scene time in seconds
    pub time: f32,
    pub scene: &'a Scene,
    pub targets: &'a RenderTargetManager,
    pub lights: &'a [GpuPointLight],
    pub sun: &'a DirectionalLight,
    /// Cube map of the raymarch variant
    pub skybox: Option<&'a Arc<dyn Texture>>,
    pub clear_color: [f32; 4],
}

/// Shader sources of every program, relative to the shader root
pub mod shaders {
    pub const GEOMETRY: (&str, &str) = ("geometry.vert", "geometry.frag");
    pub const SHADOW: (&str, &str) = ("shadow.vert", "shadow.frag");
    pub const DIRECTIONAL: (&str, &str) = ("fullscreen.vert", "directional_light.frag");
    pub const POINT_LIGHT: (&str, &str) = ("fullscreen.vert", "point_light.frag");
    pub const LIGHT_SPHERE: (&str, &str) = ("light_sphere.vert", "light_sphere.frag");
    pub const FRACTAL: (&str, &str) = ("fractal.vert", "fractal.frag");
    pub const SKYBOX: (&str, &str) = ("skybox.vert", "skybox.frag");
}

fn program(
    renderer: &mut dyn Renderer,
    shader_root: &Path,
    label: &str,
    (vertex, fragment): (&str, &str),
) -> Result<Arc<dyn Program>> {
    renderer.create_program(ProgramDesc::vertex_fragment(label, vertex, fragment).in_dir(shader_root))
}

/// The pass sequence of one variant
pub struct FramePipeline {
    variant: PipelineVariant,
    passes: Vec<Box<dyn PassAction>>,
}

impl FramePipeline {
    /// Create the programs and meshes of `variant` and order its passes
    pub fn new(
        renderer: &mut dyn Renderer,
        variant: PipelineVariant,
        shader_root: &Path,
        sphere: BuiltinMesh,
    ) -> Result<Self> {
        let mut passes: Vec<Box<dyn PassAction>> = Vec::new();

        match variant {
            PipelineVariant::Raymarch => {
                passes.push(Box::new(RaymarchPass::new(
                    program(renderer, shader_root, "fractal", shaders::FRACTAL)?,
                    program(renderer, shader_root, "skybox", shaders::SKYBOX)?,
                    renderer.create_builtin_mesh(BuiltinMesh::FullscreenQuad)?,
                    renderer.create_builtin_mesh(BuiltinMesh::SkyboxCube)?,
                )));
            }
            PipelineVariant::Deferred => {
                passes.push(Box::new(GeometryPass::new(
                    program(renderer, shader_root, "geometry", shaders::GEOMETRY)?,
                )));
                passes.push(Box::new(CompositePass::point_lights(
                    program(renderer, shader_root, "point_light", shaders::POINT_LIGHT)?,
                    renderer.create_builtin_mesh(BuiltinMesh::FullscreenQuad)?,
                )));
            }
            PipelineVariant::DeferredShadowed => {
                passes.push(Box::new(GeometryPass::new(
                    program(renderer, shader_root, "geometry", shaders::GEOMETRY)?,
                )));
                passes.push(Box::new(ShadowPass::new(
                    program(renderer, shader_root, "shadow", shaders::SHADOW)?,
                )));
                passes.push(Box::new(CompositePass::shadowed(
                    program(renderer, shader_root, "point_light", shaders::POINT_LIGHT)?,
                    renderer.create_builtin_mesh(BuiltinMesh::FullscreenQuad)?,
                    program(renderer, shader_root, "directional_light", shaders::DIRECTIONAL)?,
                    LightSpheres {
                        program: program(renderer, shader_root, "light_sphere", shaders::LIGHT_SPHERE)?,
                        mesh: renderer.create_builtin_mesh(sphere)?,
                    },
                )));
            }
        }

        engine_info!("grove3d::FramePipeline", "Pipeline '{}' ready: {}", variant,
            passes.iter().map(|p| p.name()).collect::<Vec<_>>().join(" -> "));

        Ok(Self { variant, passes })
    }

    pub fn variant(&self) -> PipelineVariant {
        self.variant
    }

    /// Pass names in execution order
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Record one frame
    pub fn execute(&self, cmd: &mut dyn CommandList, frame: &FrameInputs<'_>) -> Result<()> {
        for pass in &self.passes {
            pass.execute(cmd, frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_graph_tests.rs"]
mod tests;
