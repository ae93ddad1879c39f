//! Scene configuration
//!
//! Every tunable of the demo lives in `SceneConfig`. The defaults reproduce
//! the demo constants; a TOML file may override any subset.
//!
//! ```toml
//! pipeline = "deferred"
//!
//! [lights]
//! count = 250
//! step = { per_tick = 0.1 }
//! ```

use std::path::{Path, PathBuf};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lighting::LightStep;
use crate::render_graph::PipelineVariant;

/// Initial window parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            clear_color: [0.125, 0.25, 0.5, 1.0],
        }
    }
}

/// Fly camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub at: [f32; 3],
    pub up: [f32; 3],
    /// World units per second
    pub speed: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [5.0, 5.0, 5.0],
            at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            speed: 16.0,
            fov_degrees: 45.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

/// Point-light field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub count: usize,
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
    /// A light gets a new waypoint once closer than this
    pub waypoint_threshold: f32,
    pub step: LightStep,
    /// Strengths are drawn uniformly from `[min, max]`
    pub strength_range: [f32; 2],
    /// Fixed seed for reproducible motion; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Sphere tessellation used to visualize the lights
    pub sphere_slices: u32,
    pub sphere_stacks: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            count: 100,
            bounds_min: [-50.0, 1.0, -50.0],
            bounds_max: [50.0, 10.0, 50.0],
            waypoint_threshold: 2.0,
            step: LightStep::PerSecond(6.0),
            strength_range: [0.5, 2.0],
            seed: None,
            sphere_slices: 16,
            sphere_stacks: 8,
        }
    }
}

/// Directional light and shadow map parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Square shadow map resolution, independent of the window
    pub map_size: u32,
    /// Direction the light travels
    pub direction: [f32; 3],
    /// Eye position of the light camera
    pub eye: [f32; 3],
    /// Half-width of the orthographic box
    pub extent: f32,
    pub near: f32,
    pub far: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 2048,
            direction: [-0.5, -1.0, -0.3],
            eye: [30.0, 60.0, 18.0],
            extent: 60.0,
            near: 1.0,
            far: 200.0,
            color: [1.0, 0.95, 0.85],
            intensity: 0.6,
        }
    }
}

/// Water plane oscillation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub amplitude: f32,
    /// Radians per second
    pub frequency: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self { amplitude: 0.25, frequency: 1.0 }
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub pipeline: PipelineVariant,
    pub asset_root: PathBuf,
    pub shader_root: PathBuf,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lights: LightConfig,
    pub shadow: ShadowConfig,
    pub water: WaterConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineVariant::DeferredShadowed,
            asset_root: PathBuf::from("assets"),
            shader_root: PathBuf::from("shaders"),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            lights: LightConfig::default(),
            shadow: ShadowConfig::default(),
            water: WaterConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(contents)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let step = match self.lights.step {
            LightStep::PerTick(d) | LightStep::PerSecond(d) => d,
        };
        let numbers: [(&str, &[f32]); 15] = [
            ("lights.bounds_min", &self.lights.bounds_min),
            ("lights.bounds_max", &self.lights.bounds_max),
            ("lights.strength_range", &self.lights.strength_range),
            ("lights.waypoint_threshold", &[self.lights.waypoint_threshold]),
            ("lights.step", &[step]),
            ("shadow.direction", &self.shadow.direction),
            ("shadow.eye", &self.shadow.eye),
            ("shadow.extent/near/far", &[self.shadow.extent, self.shadow.near, self.shadow.far]),
            ("shadow.color", &self.shadow.color),
            ("shadow.intensity", &[self.shadow.intensity]),
            ("camera.eye", &self.camera.eye),
            ("camera.at", &self.camera.at),
            ("camera.up", &self.camera.up),
            ("camera.speed/fov_degrees/near/far",
                &[self.camera.speed, self.camera.fov_degrees, self.camera.near, self.camera.far]),
            ("water.amplitude/frequency", &[self.water.amplitude, self.water.frequency]),
        ];
        for (name, values) in numbers {
            if values.iter().any(|v| !v.is_finite()) {
                return Err(Error::ConfigError(format!("{} must be finite", name)));
            }
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::ConfigError("window size must be non-zero".to_string()));
        }
        if self.shadow.map_size == 0 {
            return Err(Error::ConfigError("shadow.map_size must be non-zero".to_string()));
        }
        if self.shadow.extent <= 0.0 || self.shadow.near >= self.shadow.far {
            return Err(Error::ConfigError("shadow projection box is empty".to_string()));
        }
        if Vec3::from(self.shadow.direction).length_squared() == 0.0 {
            return Err(Error::ConfigError("shadow.direction must not be zero".to_string()));
        }
        let min = Vec3::from(self.lights.bounds_min);
        let max = Vec3::from(self.lights.bounds_max);
        if min.cmpgt(max).any() {
            return Err(Error::ConfigError(
                "lights.bounds_min must not exceed lights.bounds_max".to_string(),
            ));
        }
        if self.lights.waypoint_threshold <= 0.0 {
            return Err(Error::ConfigError("lights.waypoint_threshold must be positive".to_string()));
        }
        if !self.lights.step.is_valid() {
            return Err(Error::ConfigError("lights.step must be a positive distance".to_string()));
        }
        let [low, high] = self.lights.strength_range;
        if low < 0.0 || low > high {
            return Err(Error::ConfigError("lights.strength_range must be [min, max] with 0 <= min <= max".to_string()));
        }
        if self.camera.near <= 0.0 || self.camera.near >= self.camera.far {
            return Err(Error::ConfigError("camera near/far planes are invalid".to_string()));
        }
        let look = Vec3::from(self.camera.at) - Vec3::from(self.camera.eye);
        if look.length_squared() <= f32::EPSILON {
            return Err(Error::ConfigError("camera.eye and camera.at must differ".to_string()));
        }
        // look_at needs an up vector that is not parallel to the view direction
        if look.normalize().cross(Vec3::from(self.camera.up)).length_squared() <= f32::EPSILON {
            return Err(Error::ConfigError(
                "camera.up must not be zero or parallel to the view direction".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
