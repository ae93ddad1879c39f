/// Directional "sun" light casting the shadow map.
///
/// The light camera sits at a fixed eye and looks along a fixed direction
/// through an orthographic box.

use glam::{Mat4, Vec3, Vec4};

use crate::config::ShadowConfig;
use crate::renderer::{DirectionalLightUniforms, ShadowUniforms};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit direction the light travels
    direction: Vec3,
    eye: Vec3,
    extent: f32,
    near: f32,
    far: f32,
    color: Vec3,
    intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, eye: Vec3, extent: f32, near: f32, far: f32) -> Self {
        Self {
            direction: direction.normalize_or(Vec3::NEG_Y),
            eye,
            extent,
            near,
            far,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }

    pub fn from_config(config: &ShadowConfig) -> Self {
        let mut light = Self::new(
            Vec3::from(config.direction),
            Vec3::from(config.eye),
            config.extent,
            config.near,
            config.far,
        );
        light.color = Vec3::from(config.color);
        light.intensity = config.intensity;
        light
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn view_matrix(&self) -> Mat4 {
        // Pick an up vector that is not parallel to the light direction
        let up = if self.direction.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_to_rh(self.eye, self.direction, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(
            -self.extent,
            self.extent,
            -self.extent,
            self.extent,
            self.near,
            self.far,
        )
    }

    /// Light-space transform used both to render and to sample the shadow map
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn shadow_uniforms(&self) -> ShadowUniforms {
        ShadowUniforms { light_view_proj: self.view_projection_matrix() }
    }

    pub fn uniforms(&self) -> DirectionalLightUniforms {
        DirectionalLightUniforms {
            light_view_proj: self.view_projection_matrix(),
            direction: self.direction.extend(0.0),
            color: Vec4::new(self.color.x, self.color.y, self.color.z, self.intensity),
        }
    }
}

#[cfg(test)]
#[path = "directional_light_tests.rs"]
mod tests;
