//! Lights of the deferred scenes
//!
//! - `PointLightField`: moving point lights, composited additively
//! - `DirectionalLight`: fixed sun that renders the shadow map

mod point_light;
mod directional_light;

pub use point_light::{
    LightBounds, LightStep, PointLight, PointLightField,
    DEFAULT_STRENGTH_RANGE, MIN_COLOR_CHANNEL,
};
pub use directional_light::DirectionalLight;
