//! Camera module: WASD + mouse-look fly camera.
//!
//! The camera is owned and driven by the application: input events and
//! frame deltas go in, view/projection matrices and the per-frame camera
//! uniform block come out.

mod camera;

pub use camera::{FlyCamera, MIN_POLAR, MAX_POLAR, MOUSE_SENSITIVITY, SLOW_FACTOR};
