/// Shader program trait and descriptor

use std::path::{Path, PathBuf};

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Descriptor for creating a linked shader program
#[derive(Debug, Clone)]
pub struct ProgramDesc {
    /// Debug label
    pub label: String,
    /// (stage, source file) pairs; the loader compiles and links them
    pub stages: Vec<(ShaderStage, PathBuf)>,
}

impl ProgramDesc {
    /// Vertex + fragment program, the common case
    pub fn vertex_fragment(label: &str, vertex: &str, fragment: &str) -> Self {
        Self {
            label: label.to_string(),
            stages: vec![
                (ShaderStage::Vertex, PathBuf::from(vertex)),
                (ShaderStage::Fragment, PathBuf::from(fragment)),
            ],
        }
    }

    /// Resolve every stage path against `root`
    pub fn in_dir(mut self, root: &Path) -> Self {
        for (_, path) in &mut self.stages {
            *path = root.join(&*path);
        }
        self
    }
}

/// Linked shader program
///
/// Uniforms are not set through the program. `CommandList::set_uniforms`
/// uploads whole `UniformBlock`s for the program bound by `use_program`.
pub trait Program: Send + Sync {
    /// Debug label
    fn label(&self) -> &str;
}
