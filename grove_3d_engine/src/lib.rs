/*!
# Grove 3D Engine

Core types for the Grove3D deferred lighting demos.

The crate is platform-agnostic: the graphics API, the window and the asset
decoders are reached through traits, and a backend (or a recording stub in
tests) provides the concrete types.

## Architecture

- **Renderer**: Factory trait for GPU resources (textures, framebuffers, programs, meshes)
- **CommandList**: Per-frame command recording (passes, state, uniform blocks, draws)
- **RenderTargetManager**: Window-sized G-buffer and fixed-size shadow map
- **PointLightField**: Point lights wandering between random waypoints
- **FlyCamera**: WASD + mouse-look camera
- **FramePipeline**: Geometry, shadow and composite passes in fixed order
- **Application**: Owns everything above and reacts to shell callbacks
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod time;
pub mod camera;
pub mod renderer;
pub mod target;
pub mod lighting;
pub mod scene;
pub mod render_graph;
pub mod app;

// Main grove3d namespace module
pub mod grove3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (logging facade)
    pub use crate::engine::Engine;

    // Renderer factory trait
    pub use crate::renderer::Renderer;

    // Application shell
    pub use crate::app::Application;

    // Configuration
    pub use crate::config::SceneConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod target {
        pub use crate::target::*;
    }

    pub mod lighting {
        pub use crate::lighting::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod render_graph {
        pub use crate::render_graph::*;
    }

    pub mod time {
        pub use crate::time::*;
    }
}

// Re-export math library at crate root
pub use glam;
