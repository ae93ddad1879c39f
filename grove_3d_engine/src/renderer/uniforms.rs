/// Per-draw uniform blocks
///
/// Every block is `#[repr(C)]` + `Pod` and made only of 16-byte columns,
/// so a backend can upload `as_bytes()` into a std140 uniform buffer
/// without repacking.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Camera and frame data shared by every pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view_proj: Mat4,
    /// xyz = eye position, w = scene time in seconds
    pub eye_time: Vec4,
    pub forward: Vec4,
    pub up: Vec4,
    pub right: Vec4,
    /// x = width, y = height (pixels)
    pub screen: Vec4,
}

/// Per-object transforms
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub world: Mat4,
    pub world_inv_transpose: Mat4,
}

impl ObjectUniforms {
    pub fn from_world(world: Mat4) -> Self {
        Self {
            world,
            world_inv_transpose: world.inverse().transpose(),
        }
    }
}

/// Phong coefficients: x = ka, y = kd, z = ks, w = specular power
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub coefficients: Vec4,
}

/// Light-space transform for the shadow pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadowUniforms {
    pub light_view_proj: Mat4,
}

/// Directional light for the composite pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightUniforms {
    pub light_view_proj: Mat4,
    /// xyz = direction the light travels
    pub direction: Vec4,
    /// rgb = color, a = intensity
    pub color: Vec4,
}

/// One entry of the point-light array
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuPointLight {
    /// xyz = position, w = strength
    pub position_strength: Vec4,
    /// rgb = color
    pub color: Vec4,
}

impl GpuPointLight {
    pub fn new(position: Vec3, color: Vec3, strength: f32) -> Self {
        Self {
            position_strength: position.extend(strength),
            color: color.extend(1.0),
        }
    }
}

/// Skybox transform (view-projection with the camera translation baked in)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkyboxUniforms {
    pub mvp: Mat4,
}

/// A uniform block handed atomically to `CommandList::set_uniforms`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformBlock<'a> {
    Camera(CameraUniforms),
    Object(ObjectUniforms),
    Material(MaterialUniforms),
    Shadow(ShadowUniforms),
    DirectionalLight(DirectionalLightUniforms),
    PointLights(&'a [GpuPointLight]),
    Skybox(SkyboxUniforms),
}

impl<'a> UniformBlock<'a> {
    /// Block name as declared in the shaders
    pub fn name(&self) -> &'static str {
        match self {
            UniformBlock::Camera(_) => "Camera",
            UniformBlock::Object(_) => "Object",
            UniformBlock::Material(_) => "Material",
            UniformBlock::Shadow(_) => "Shadow",
            UniformBlock::DirectionalLight(_) => "DirectionalLight",
            UniformBlock::PointLights(_) => "PointLights",
            UniformBlock::Skybox(_) => "Skybox",
        }
    }

    /// Raw bytes to upload
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            UniformBlock::Camera(block) => bytemuck::bytes_of(block),
            UniformBlock::Object(block) => bytemuck::bytes_of(block),
            UniformBlock::Material(block) => bytemuck::bytes_of(block),
            UniformBlock::Shadow(block) => bytemuck::bytes_of(block),
            UniformBlock::DirectionalLight(block) => bytemuck::bytes_of(block),
            UniformBlock::PointLights(lights) => bytemuck::cast_slice(*lights),
            UniformBlock::Skybox(block) => bytemuck::bytes_of(block),
        }
    }
}
