//! Integration tests for the entries Grove3D emits through `Engine::log`
//!
//! A capturing logger is installed for each test, the engine is driven on
//! the headless backend, and the captured entries are checked for source,
//! severity and location. The logger is global, so every test is serial.
//!
//! Run with: cargo test --test logging_integration_tests


use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use grove_3d_engine::grove3d::log::{LogEntry, LogSeverity, Logger};
use grove_3d_engine::grove3d::target::RenderTargetManager;
use grove_3d_engine::grove3d::{Application, Engine, Error, SceneConfig};
use serial_test::serial;
use test_utils::{HeadlessLoader, HeadlessRenderer};
use winit::keyboard::KeyCode;

/// Collects every entry that reaches the logger
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<LogEntry>>>);

impl Capture {
    /// Install a fresh capture as the global logger
    fn install() -> Self {
        let capture = Self::default();
        Engine::set_logger(capture.clone());
        capture
    }

    fn from_source(&self, source: &str) -> Vec<LogEntry> {
        self.0.lock().unwrap().iter().filter(|e| e.source == source).cloned().collect()
    }

    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl Logger for Capture {
    fn log(&self, entry: &LogEntry) {
        self.0.lock().unwrap().push(entry.clone());
    }
}

fn small_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.lights.count = 4;
    config
}

// ============================================================================
// RENDER TARGETS
// ============================================================================

#[test]
#[serial]
fn test_integration_gbuffer_entries() {
    let capture = Capture::install();
    let mut renderer = HeadlessRenderer::new();
    let mut targets = RenderTargetManager::new();

    assert!(matches!(targets.create_or_resize(&mut renderer, 0, 200), Err(Error::InvalidResource(_))));
    targets.create_or_resize(&mut renderer, 320, 200).unwrap();

    let entries = capture.from_source("grove3d::RenderTargetManager");
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert!(entries[0].message.contains("0x200"));
    assert!(entries[0].file.is_some_and(|file| file.ends_with("target_manager.rs")));
    assert!(entries[0].line.is_some());

    // Non-error entries carry no location
    assert_eq!(entries[1].severity, LogSeverity::Info);
    assert_eq!(entries[1].message, "G-buffer built at 320x200");
    assert_eq!(entries[1].file, None);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_fixed_shadow_map_entry() {
    let capture = Capture::install();
    let mut renderer = HeadlessRenderer::new();
    let mut targets = RenderTargetManager::new();

    targets.create_shadow_target(&mut renderer, 512).unwrap();
    assert!(targets.create_shadow_target(&mut renderer, 1024).is_err());

    let errors: Vec<LogEntry> = capture
        .from_source("grove3d::RenderTargetManager")
        .into_iter()
        .filter(|e| e.severity == LogSeverity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("512"));
    assert!(errors[0].message.contains("1024"));

    Engine::reset_logger();
}

// ============================================================================
// APPLICATION
// ============================================================================

#[test]
#[serial]
fn test_integration_missing_asset_is_logged() {
    let capture = Capture::install();

    let mut loader = HeadlessLoader::new();
    loader.missing.push(PathBuf::from("assets/rock.obj"));

    let result = Application::new(Box::new(HeadlessRenderer::new()), &mut loader, small_config());
    assert!(matches!(result, Err(Error::AssetNotFound(_))));

    let errors = capture.from_source("grove3d::AssetCache");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, LogSeverity::Error);
    assert!(errors[0].message.contains("rock.obj"));
    assert!(errors[0].file.is_some());

    // Startup never got far enough to announce itself
    assert!(capture.from_source("grove3d::Application").is_empty());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_startup_announces_variant() {
    let capture = Capture::install();

    let app = Application::new(
        Box::new(HeadlessRenderer::new()),
        &mut HeadlessLoader::new(),
        small_config(),
    );
    assert!(app.is_ok());

    let started = capture.from_source("grove3d::Application");
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].severity, LogSeverity::Info);
    assert_eq!(started[0].message, "Started 'deferred_shadowed' at 640x480 with 4 lights");

    let pipeline = capture.from_source("grove3d::FramePipeline");
    assert!(pipeline[0].message.contains("geometry -> shadow -> composite"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_min_severity_hides_freeze_toggle() {
    let mut app = Application::new(
        Box::new(HeadlessRenderer::new()),
        &mut HeadlessLoader::new(),
        small_config(),
    )
    .unwrap();
    let capture = Capture::install();

    Engine::set_min_severity(LogSeverity::Info);
    app.key_down(KeyCode::KeyF);
    assert_eq!(capture.len(), 0);

    Engine::set_min_severity(LogSeverity::Trace);
    app.key_down(KeyCode::KeyF);
    let toggles = capture.from_source("grove3d::Application");
    assert_eq!(toggles.len(), 1);
    assert_eq!(toggles[0].severity, LogSeverity::Debug);
    assert_eq!(toggles[0].message, "Animation resumed");

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_reset_logger_stops_capture() {
    let mut app = Application::new(
        Box::new(HeadlessRenderer::new()),
        &mut HeadlessLoader::new(),
        small_config(),
    )
    .unwrap();
    let capture = Capture::install();

    app.resize(0, 0).unwrap();
    assert_eq!(capture.len(), 1);

    Engine::reset_logger();
    app.resize(0, 0).unwrap();
    app.resize(800, 600).unwrap();
    assert_eq!(capture.len(), 1);
}
