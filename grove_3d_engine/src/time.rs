//! Frame timing
//!
//! The shell owns a `TimeSource` and passes it to `Application::update`
//! every frame; `FrameClock` turns consecutive samples into deltas.
//! `SceneTime` is the freezable accumulator that animates the scene.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Monotonic clock
pub trait TimeSource {
    /// Time elapsed since an arbitrary, fixed origin
    fn elapsed(&self) -> Duration;
}

/// Wall-clock source backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced source for tests and fixed-step replays
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now: Mutex<Duration>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, step: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += step;
        }
    }

    /// Move the clock forward by fractional seconds
    pub fn advance_secs(&self, secs: f32) {
        self.advance(Duration::from_secs_f32(secs));
    }
}

impl TimeSource for ManualTimeSource {
    fn elapsed(&self) -> Duration {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}

/// Converts time source samples into per-frame deltas
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Duration,
}

impl FrameClock {
    /// Start measuring from the source's current time
    pub fn start(source: &dyn TimeSource) -> Self {
        Self { last: source.elapsed() }
    }

    /// Seconds since the previous tick (or since `start`)
    pub fn tick(&mut self, source: &dyn TimeSource) -> f32 {
        let now = source.elapsed();
        let delta = now.saturating_sub(self.last);
        self.last = now;
        delta.as_secs_f32()
    }
}

/// Freezable scene-time accumulator
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneTime {
    seconds: f32,
    frozen: bool,
}

impl SceneTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `dt` seconds unless frozen
    pub fn advance(&mut self, dt: f32) {
        if !self.frozen && dt > 0.0 {
            self.seconds += dt;
        }
    }

    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
