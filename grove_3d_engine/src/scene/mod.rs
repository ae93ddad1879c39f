//! Scene module
//!
//! Textured objects drawn by the geometry and shadow passes, the asset
//! loading seam, and the load-once cache in front of it.

mod assets;
mod material;
mod scene;

#[cfg(test)]
pub mod mock_loader;

pub use assets::{AssetCache, AssetLoader};
pub use material::MaterialParams;
pub use scene::{
    ObjectGroup, ObjectKey, ObjectTransform, Scene, SceneObject, SKYBOX_FACES,
};
