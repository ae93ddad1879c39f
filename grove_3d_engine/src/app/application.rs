/// Application: owns the demo and reacts to shell callbacks.
///
/// The windowed shell (event loop, GL context, ImGui) lives outside the
/// engine. Once per frame it calls `update` then `render`; input and
/// resize events are forwarded as they arrive.

use std::sync::Arc;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::camera::FlyCamera;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::{engine_debug, engine_info};
use crate::lighting::{DirectionalLight, PointLightField};
use crate::render_graph::{FrameInputs, FramePipeline, PipelineVariant};
use crate::renderer::{BuiltinMesh, CommandList, GpuPointLight, Renderer, Texture};
use crate::scene::{AssetCache, AssetLoader, Scene, SKYBOX_FACES};
use crate::target::RenderTargetManager;
use crate::time::{FrameClock, SceneTime, TimeSource};
use super::overlay::DebugOverlay;

const SOURCE: &str = "grove3d::Application";

/// Key that toggles freezing of light motion and scene time
pub const FREEZE_KEY: KeyCode = KeyCode::KeyF;

pub struct Application {
    config: SceneConfig,
    pipeline: FramePipeline,
    targets: RenderTargetManager,
    scene: Scene,
    skybox: Option<Arc<dyn Texture>>,
    camera: FlyCamera,
    lights: PointLightField,
    gpu_lights: Vec<GpuPointLight>,
    sun: DirectionalLight,
    scene_time: SceneTime,
    clock: Option<FrameClock>,
    renderer: Box<dyn Renderer>,
}

impl Application {
    /// Build every resource the configured variant needs
    ///
    /// # Errors
    ///
    /// Fails on the first missing asset, program failure or incomplete
    /// render target. The shell is expected to terminate.
    pub fn new(
        mut renderer: Box<dyn Renderer>,
        loader: &mut dyn AssetLoader,
        config: SceneConfig,
    ) -> Result<Self> {
        config.validate()?;
        let variant = config.pipeline;
        let (width, height) = (config.window.width, config.window.height);

        let pipeline = FramePipeline::new(
            renderer.as_mut(),
            variant,
            &config.shader_root,
            BuiltinMesh::Sphere {
                slices: config.lights.sphere_slices,
                stacks: config.lights.sphere_stacks,
            },
        )?;

        let mut targets = RenderTargetManager::new();
        if variant.uses_shadow_map() {
            targets.create_shadow_target(renderer.as_mut(), config.shadow.map_size)?;
        }
        if variant.uses_gbuffer() {
            targets.create_or_resize(renderer.as_mut(), width, height)?;
        }

        let scene = if variant.uses_gbuffer() {
            Scene::vegetation(loader, &config)?
        } else {
            Scene::new()
        };

        let skybox = if variant.uses_skybox() {
            let mut cache = AssetCache::new(config.asset_root.clone());
            Some(cache.cube_map(loader, &SKYBOX_FACES)?)
        } else {
            None
        };

        let lights = PointLightField::from_config(&config.lights);
        let gpu_lights = lights.gpu_lights();

        engine_info!(SOURCE, "Started '{}' at {}x{} with {} lights",
            variant, width, height, lights.len());

        Ok(Self {
            camera: FlyCamera::from_config(&config.camera, width, height),
            sun: DirectionalLight::from_config(&config.shadow),
            pipeline,
            targets,
            scene,
            skybox,
            lights,
            gpu_lights,
            scene_time: SceneTime::new(),
            clock: None,
            renderer,
            config,
        })
    }

    // ===== CALLBACKS =====

    /// Advance camera, lights and scene time by the time since the last call
    ///
    /// The first call only starts the clock. Returns the delta in seconds.
    pub fn update(&mut self, time: &dyn TimeSource) -> f32 {
        let dt = match &mut self.clock {
            Some(clock) => clock.tick(time),
            None => {
                self.clock = Some(FrameClock::start(time));
                0.0
            }
        };

        self.camera.update(dt);
        self.lights.advance(dt);
        self.scene_time.advance(dt);
        self.gpu_lights = self.lights.gpu_lights();
        dt
    }

    /// Record the frame
    pub fn render(&self, cmd: &mut dyn CommandList) -> Result<()> {
        let frame = FrameInputs {
            camera: &self.camera,
            time: self.scene_time.seconds(),
            scene: &self.scene,
            targets: &self.targets,
            lights: &self.gpu_lights,
            sun: &self.sun,
            skybox: self.skybox.as_ref(),
            clear_color: self.config.window.clear_color,
        };
        self.pipeline.execute(cmd, &frame)
    }

    /// Window resized; rebuilds the G-buffer before the next `render`
    ///
    /// A zero dimension (minimized window) is ignored and the current
    /// targets are kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            engine_debug!(SOURCE, "Ignoring {}x{} resize", width, height);
            return Ok(());
        }
        self.camera.resize(width, height);
        if self.pipeline.variant().uses_gbuffer() {
            self.targets.create_or_resize(self.renderer.as_mut(), width, height)?;
        }
        Ok(())
    }

    pub fn key_down(&mut self, key: KeyCode) {
        if key == FREEZE_KEY {
            self.set_frozen(!self.is_frozen());
        } else {
            self.camera.key_down(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.camera.key_up(key);
    }

    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        self.camera.mouse_move(dx, dy);
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        self.camera.mouse_down(button);
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        self.camera.mouse_up(button);
    }

    /// Preview every off-screen target
    pub fn show_debug(&self, overlay: &mut dyn DebugOverlay) {
        overlay.show_text(&format!(
            "{} | t = {:.2}s | {} lights{}",
            self.pipeline.variant(),
            self.scene_time.seconds(),
            self.lights.len(),
            if self.is_frozen() { " (frozen)" } else { "" },
        ));
        for (title, texture) in self.targets.debug_textures() {
            overlay.show_texture(&title, texture);
        }
    }

    // ===== STATE =====

    /// Freeze or resume light motion and scene time together
    pub fn set_frozen(&mut self, frozen: bool) {
        self.lights.set_frozen(frozen);
        self.scene_time.set_frozen(frozen);
        engine_debug!(SOURCE, "Animation {}", if frozen { "frozen" } else { "resumed" });
    }

    pub fn is_frozen(&self) -> bool {
        self.scene_time.is_frozen()
    }

    pub fn variant(&self) -> PipelineVariant {
        self.pipeline.variant()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn lights(&self) -> &PointLightField {
        &self.lights
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn targets(&self) -> &RenderTargetManager {
        &self.targets
    }

    /// Scene time in seconds
    pub fn scene_time(&self) -> f32 {
        self.scene_time.seconds()
    }
}

#[cfg(test)]
#[path = "application_tests.rs"]
mod tests;
