//! Render graph module
//!
//! The per-variant pass sequence of a frame. Passes always run in the
//! same order (geometry → shadow → composite, or the single raymarch
//! pass) and each one is a closed `begin_pass` .. `end_pass` block.

mod render_graph;
mod pass_action;

pub use render_graph::{FrameInputs, FramePipeline, PipelineVariant, shaders};
pub use pass_action::{
    CompositePass, GeometryPass, LightSpheres, PassAction, RaymarchPass, ShadowPass,
    SHADOW_MAP_UNIT,
};
