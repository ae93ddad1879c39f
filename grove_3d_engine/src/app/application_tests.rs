/// Tests for Application
///
/// Drives the application the way the windowed shell does: construction,
/// input, update with a manual clock, resize and render into a recording
/// command list.

use std::path::PathBuf;
use std::time::Duration;
use super::*;
use crate::error::Error;
use crate::lighting::LightStep;
use crate::renderer::mock_renderer::{Command, LiveCounters, MockCommandList, MockRenderer};
use crate::scene::mock_loader::MockAssetLoader;
use crate::target::{GBUFFER_LABEL, SHADOW_LABEL};
use crate::time::ManualTimeSource;

fn config(variant: PipelineVariant) -> SceneConfig {
    let mut config = SceneConfig::default();
    config.pipeline = variant;
    config.lights.count = 8;
    config.lights.seed = Some(17);
    config.shadow.map_size = 256;
    config
}

fn start(variant: PipelineVariant) -> (Application, Arc<LiveCounters>) {
    let renderer = MockRenderer::new();
    let counters = renderer.counters.clone();
    let mut loader = MockAssetLoader::new();
    let app = Application::new(Box::new(renderer), &mut loader, config(variant)).unwrap();
    (app, counters)
}

#[derive(Default)]
struct RecordingOverlay {
    textures: Vec<(String, String)>,
    text: Vec<String>,
}

impl DebugOverlay for RecordingOverlay {
    fn show_texture(&mut self, title: &str, texture: &Arc<dyn Texture>) {
        self.textures.push((title.to_string(), texture.info().label.clone()));
    }

    fn show_text(&mut self, text: &str) {
        self.text.push(text.to_string());
    }
}

// ============================================================================
// Tests: Construction
// ============================================================================

#[test]
fn test_shadowed_startup_builds_targets() {
    let (app, counters) = start(PipelineVariant::DeferredShadowed);

    let gbuffer = app.targets().gbuffer().unwrap();
    assert_eq!((gbuffer.width(), gbuffer.height()), (640, 480));
    assert_eq!(app.targets().shadow().unwrap().size(), 256);
    assert_eq!(counters.live_framebuffers(), 2);
    assert_eq!(app.lights().len(), 8);
    assert!(!app.scene().is_empty());
}

#[test]
fn test_deferred_startup_has_no_shadow_map() {
    let (app, _) = start(PipelineVariant::Deferred);
    assert!(app.targets().gbuffer().is_some());
    assert!(app.targets().shadow().is_none());
}

#[test]
fn test_raymarch_startup_loads_skybox_only() {
    let renderer = MockRenderer::new();
    let mut loader = MockAssetLoader::new();
    let app = Application::new(Box::new(renderer), &mut loader, config(PipelineVariant::Raymarch)).unwrap();

    assert!(app.targets().gbuffer().is_none());
    assert!(app.scene().is_empty());
    assert_eq!(loader.requests, vec![PathBuf::from("assets/xpos.png")]);
}

#[test]
fn test_missing_asset_fails_startup() {
    let mut loader = MockAssetLoader::new();
    loader.missing.push(PathBuf::from("assets/terrain.obj"));

    let result = Application::new(
        Box::new(MockRenderer::new()),
        &mut loader,
        config(PipelineVariant::Deferred),
    );
    assert!(matches!(result, Err(Error::AssetNotFound(_))));
}

#[test]
fn test_incomplete_gbuffer_fails_startup() {
    let mut renderer = MockRenderer::new();
    renderer.unsupported_formats.push(crate::renderer::TextureFormat::R16G16B16A16_SFLOAT);
    let mut loader = MockAssetLoader::new();

    let result = Application::new(Box::new(renderer), &mut loader, config(PipelineVariant::Deferred));
    assert!(matches!(result, Err(Error::IncompleteFramebuffer { .. })));
}

#[test]
fn test_invalid_config_fails_startup() {
    let mut bad = config(PipelineVariant::Deferred);
    bad.lights.waypoint_threshold = 0.0;
    let result = Application::new(Box::new(MockRenderer::new()), &mut MockAssetLoader::new(), bad);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_infinite_light_bounds_fail_startup_without_panic() {
    let mut bad = config(PipelineVariant::DeferredShadowed);
    bad.lights.bounds_max = [f32::INFINITY, 10.0, 50.0];
    let result = Application::new(Box::new(MockRenderer::new()), &mut MockAssetLoader::new(), bad);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

// ============================================================================
// Tests: Update
// ============================================================================

#[test]
fn test_first_update_only_starts_clock() {
    let (mut app, _) = start(PipelineVariant::DeferredShadowed);
    let time = ManualTimeSource::new();
    time.advance(Duration::from_secs(100));

    assert_eq!(app.update(&time), 0.0);
    assert_eq!(app.scene_time(), 0.0);

    time.advance(Duration::from_millis(500));
    assert!((app.update(&time) - 0.5).abs() < 1e-6);
    assert!((app.scene_time() - 0.5).abs() < 1e-6);
}

#[test]
fn test_update_moves_lights() {
    let (mut app, _) = start(PipelineVariant::DeferredShadowed);
    assert_eq!(app.config().lights.step, LightStep::PerSecond(6.0));
    let time = ManualTimeSource::new();
    app.update(&time);
    let before = app.lights().lights().to_vec();

    time.advance(Duration::from_millis(100));
    app.update(&time);
    assert_ne!(app.lights().lights(), before.as_slice());
}

#[test]
fn test_freeze_key_toggles_lights_and_time() {
    let (mut app, _) = start(PipelineVariant::DeferredShadowed);
    let time = ManualTimeSource::new();
    app.update(&time);

    app.key_down(FREEZE_KEY);
    app.key_up(FREEZE_KEY);
    assert!(app.is_frozen());

    let lights = app.lights().lights().to_vec();
    for _ in 0..10 {
        time.advance(Duration::from_millis(50));
        app.update(&time);
    }
    assert_eq!(app.lights().lights(), lights.as_slice());
    assert_eq!(app.scene_time(), 0.0);

    app.key_down(FREEZE_KEY);
    assert!(!app.is_frozen());
    time.advance(Duration::from_millis(50));
    app.update(&time);
    assert!(app.scene_time() > 0.0);
}

#[test]
fn test_camera_moves_while_frozen() {
    let (mut app, _) = start(PipelineVariant::DeferredShadowed);
    let time = ManualTimeSource::new();
    app.update(&time);
    app.set_frozen(true);

    let eye = app.camera().eye();
    app.key_down(KeyCode::KeyW);
    time.advance(Duration::from_millis(250));
    app.update(&time);
    app.key_up(KeyCode::KeyW);

    assert!((app.camera().eye() - eye).length() > 1.0);
}

#[test]
fn test_mouse_drag_rotates_camera() {
    let (mut app, _) = start(PipelineVariant::Deferred);
    let forward = app.camera().forward();

    app.mouse_down(MouseButton::Left);
    app.mouse_move(40.0, -10.0);
    app.mouse_up(MouseButton::Left);

    assert!((app.camera().forward() - forward).length() > 1e-3);
}

// ============================================================================
// Tests: Resize
// ============================================================================

#[test]
fn test_resize_rebuilds_gbuffer_only() {
    let (mut app, counters) = start(PipelineVariant::DeferredShadowed);

    for (w, h) in [(800, 600), (1024, 768), (320, 200)] {
        app.resize(w, h).unwrap();
        let gbuffer = app.targets().gbuffer().unwrap();
        assert_eq!((gbuffer.width(), gbuffer.height()), (w, h));
        assert_eq!(app.camera().size(), (w, h));
    }

    assert_eq!(app.targets().shadow().unwrap().size(), 256);
    assert_eq!(counters.live_textures(), 6);
    assert_eq!(counters.live_framebuffers(), 2);
}

#[test]
fn test_zero_resize_keeps_targets() {
    let (mut app, counters) = start(PipelineVariant::Deferred);
    let created = counters.created_textures();

    app.resize(0, 0).unwrap();
    assert_eq!(counters.created_textures(), created);
    assert_eq!(app.targets().gbuffer().unwrap().width(), 640);
}

// ============================================================================
// Tests: Render
// ============================================================================

#[test]
fn test_render_after_resize_uses_new_size() {
    let (mut app, _) = start(PipelineVariant::DeferredShadowed);
    app.resize(1280, 720).unwrap();

    let mut cmd = MockCommandList::new();
    app.render(&mut cmd).unwrap();

    assert_eq!(cmd.pass_targets(), vec![GBUFFER_LABEL, SHADOW_LABEL, "screen"]);
    let viewport = crate::renderer::Viewport::from_size(1280, 720);
    assert_eq!(cmd.pass_commands(0)[0], Command::SetViewport(viewport));
    assert_eq!(cmd.pass_commands(2)[0], Command::SetViewport(viewport));
}

#[test]
fn test_render_frames_keep_order() {
    let (mut app, _) = start(PipelineVariant::DeferredShadowed);
    let time = ManualTimeSource::new();
    let mut cmd = MockCommandList::new();

    for _ in 0..4 {
        time.advance(Duration::from_millis(16));
        app.update(&time);
        app.render(&mut cmd).unwrap();
    }

    let targets = cmd.pass_targets();
    assert_eq!(targets.len(), 12);
    for frame in targets.chunks(3) {
        assert_eq!(frame, [GBUFFER_LABEL, SHADOW_LABEL, "screen"]);
    }
}

#[test]
fn test_raymarch_render_clears_with_window_color() {
    let (app, _) = start(PipelineVariant::Raymarch);
    let mut cmd = MockCommandList::new();
    app.render(&mut cmd).unwrap();
    assert_eq!(cmd.pass_targets(), vec!["screen"]);
    assert!(cmd.commands.contains(&Command::DrawMesh("skybox_cube".to_string())));
}

// ============================================================================
// Tests: Debug overlay
// ============================================================================

#[test]
fn test_show_debug_lists_targets() {
    let (app, _) = start(PipelineVariant::DeferredShadowed);
    let mut overlay = RecordingOverlay::default();
    app.show_debug(&mut overlay);

    let titles: Vec<&str> = overlay.textures.iter().map(|(title, _)| title.as_str()).collect();
    assert_eq!(titles, vec![
        "G-buffer color", "G-buffer normal", "G-buffer position", "G-buffer material", "Shadow map",
    ]);
    assert_eq!(overlay.textures[4].1, "shadow_depth");
    assert!(overlay.text[0].contains("8 lights"));
}
