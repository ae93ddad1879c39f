/// Mesh trait - immutable drawable geometry

/// Geometry the renderer generates itself (no asset file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinMesh {
    /// Two triangles covering clip space, used by lighting passes
    FullscreenQuad,
    /// Unit cube drawn from the inside, used by the skybox
    SkyboxCube,
    /// UV sphere used to visualize point lights
    Sphere { slices: u32, stacks: u32 },
}

impl BuiltinMesh {
    /// Number of indices the generated mesh draws
    pub fn index_count(&self) -> u32 {
        match self {
            BuiltinMesh::FullscreenQuad => 6,
            BuiltinMesh::SkyboxCube => 36,
            BuiltinMesh::Sphere { slices, stacks } => slices * stacks * 6,
        }
    }
}

/// Drawable mesh handle (vertex array + index buffer)
pub trait Mesh: Send + Sync {
    /// Debug label
    fn label(&self) -> &str;

    /// Number of indices drawn by one draw call
    fn index_count(&self) -> u32;
}
