/// Point lights wandering between random waypoints.
///
/// Each light walks in a straight line toward its waypoint. Once it is
/// closer than the threshold, a new waypoint is drawn uniformly inside the
/// light bounds. A step never overshoots the waypoint, so the distance to
/// the current waypoint never increases between two reassignments.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::LightConfig;
use crate::engine_debug;
use crate::renderer::GpuPointLight;

const SOURCE: &str = "grove3d::PointLightField";

/// Strength range used when none is configured
pub const DEFAULT_STRENGTH_RANGE: [f32; 2] = [0.5, 2.0];

/// Lower bound of each random color channel
pub const MIN_COLOR_CHANNEL: f32 = 0.2;

/// How far a light moves per `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightStep {
    /// Fixed distance per call, regardless of frame time
    PerTick(f32),
    /// Distance per second of frame time
    PerSecond(f32),
}

impl LightStep {
    /// Distance to travel this frame
    pub fn distance(&self, dt: f32) -> f32 {
        match *self {
            LightStep::PerTick(d) => d,
            LightStep::PerSecond(speed) => speed * dt.max(0.0),
        }
    }

    pub fn is_valid(&self) -> bool {
        match *self {
            LightStep::PerTick(d) | LightStep::PerSecond(d) => d > 0.0 && d.is_finite(),
        }
    }
}

impl Default for LightStep {
    fn default() -> Self {
        LightStep::PerSecond(6.0)
    }
}

/// Axis-aligned box the lights live in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl LightBounds {
    /// Box spanning `a` and `b` (corners in any order)
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Uniform point inside the box
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
            rng.gen_range(self.min.z..=self.max.z),
        )
    }
}

/// One moving light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub waypoint: Vec3,
    pub color: Vec3,
    pub strength: f32,
}

impl PointLight {
    pub fn distance_to_waypoint(&self) -> f32 {
        self.position.distance(self.waypoint)
    }

    pub fn to_gpu(&self) -> GpuPointLight {
        GpuPointLight::new(self.position, self.color, self.strength)
    }
}

/// The full set of moving lights
pub struct PointLightField {
    lights: Vec<PointLight>,
    bounds: LightBounds,
    step: LightStep,
    threshold: f32,
    frozen: bool,
    rng: StdRng,
}

impl PointLightField {
    /// Spawn `count` lights with random positions, waypoints and colors
    ///
    /// The same `seed` always produces the same lights and motion; `None`
    /// seeds from OS entropy.
    pub fn new(
        count: usize,
        bounds: LightBounds,
        step: LightStep,
        threshold: f32,
        seed: Option<u64>,
    ) -> Self {
        Self::spawn(count, bounds, step, threshold, seed, DEFAULT_STRENGTH_RANGE)
    }

    pub fn from_config(config: &LightConfig) -> Self {
        Self::spawn(
            config.count,
            LightBounds::new(Vec3::from(config.bounds_min), Vec3::from(config.bounds_max)),
            config.step,
            config.waypoint_threshold,
            config.seed,
            config.strength_range,
        )
    }

    fn spawn(
        count: usize,
        bounds: LightBounds,
        step: LightStep,
        threshold: f32,
        seed: Option<u64>,
        strength_range: [f32; 2],
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let [low, high] = strength_range;
        let (low, high) = (low.min(high), low.max(high));

        let lights = (0..count)
            .map(|_| PointLight {
                position: bounds.sample(&mut rng),
                waypoint: bounds.sample(&mut rng),
                color: Vec3::new(
                    rng.gen_range(MIN_COLOR_CHANNEL..=1.0),
                    rng.gen_range(MIN_COLOR_CHANNEL..=1.0),
                    rng.gen_range(MIN_COLOR_CHANNEL..=1.0),
                ),
                strength: rng.gen_range(low..=high),
            })
            .collect();

        engine_debug!(SOURCE, "Spawned {} point lights ({:?})", count, step);

        Self {
            lights,
            bounds,
            step,
            threshold,
            frozen: false,
            rng,
        }
    }

    /// Move every light one step toward its waypoint
    ///
    /// No-op while frozen. A light closer than the threshold first receives
    /// a new waypoint.
    pub fn advance(&mut self, dt: f32) {
        if self.frozen {
            return;
        }
        let travel = self.step.distance(dt);

        for light in &mut self.lights {
            if light.distance_to_waypoint() < self.threshold {
                light.waypoint = self.bounds.sample(&mut self.rng);
            }

            let offset = light.waypoint - light.position;
            let remaining = offset.length();
            if travel >= remaining {
                light.position = light.waypoint;
            } else if remaining > 0.0 {
                // Clamp absorbs rounding when the waypoint sits on a face
                let next = light.position + offset * (travel / remaining);
                light.position = next.clamp(self.bounds.min, self.bounds.max);
            }
        }
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn bounds(&self) -> LightBounds {
        self.bounds
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Packed array for the `PointLights` uniform block
    pub fn gpu_lights(&self) -> Vec<GpuPointLight> {
        self.lights.iter().map(PointLight::to_gpu).collect()
    }
}

#[cfg(test)]
#[path = "point_light_tests.rs"]
mod tests;
