/// Phong material coefficients per object group

use glam::Vec4;
use crate::renderer::MaterialUniforms;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub specular_power: f32,
}

impl MaterialParams {
    pub const fn new(ka: f32, kd: f32, ks: f32, specular_power: f32) -> Self {
        Self { ka, kd, ks, specular_power }
    }

    /// Mostly diffuse, no highlight
    pub const MATTE: MaterialParams = MaterialParams::new(0.1, 0.9, 0.0, 1.0);

    /// Waxy leaves and stems
    pub const FOLIAGE: MaterialParams = MaterialParams::new(0.15, 0.8, 0.2, 16.0);

    pub const STONE: MaterialParams = MaterialParams::new(0.1, 0.7, 0.3, 32.0);

    /// Strong, tight highlight
    pub const WATER: MaterialParams = MaterialParams::new(0.05, 0.4, 0.9, 128.0);

    pub fn uniforms(&self) -> MaterialUniforms {
        MaterialUniforms {
            coefficients: Vec4::new(self.ka, self.kd, self.ks, self.specular_power),
        }
    }
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self::MATTE
    }
}
