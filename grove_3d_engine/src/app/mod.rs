//! Application shell
//!
//! `Application` owns targets, scene, camera, lights and the frame
//! pipeline; `DebugOverlay` is where it previews the off-screen targets.

mod application;
mod overlay;

pub use application::{Application, FREEZE_KEY};
pub use overlay::DebugOverlay;
