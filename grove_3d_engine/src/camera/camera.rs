/// Fly camera driven by keyboard and mouse.
///
/// The look direction is kept in spherical coordinates `(u, v)` around the
/// eye: `u` is the azimuth in the XZ plane and `v` the polar angle measured
/// from +Y. `v` is clamped to `[0.1, 3.1]` so the camera never flips over
/// the pole.
///
/// Input mapping:
/// - `W` / `S` move along the look direction
/// - `A` / `D` strafe
/// - `Shift` held divides the speed by 4
/// - left mouse drag rotates the view

use glam::{Mat4, Vec3, Vec4};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::config::CameraConfig;
use crate::renderer::CameraUniforms;

/// Polar angle limits, in radians
pub const MIN_POLAR: f32 = 0.1;
pub const MAX_POLAR: f32 = 3.1;

/// Pixels of mouse motion per radian of rotation
pub const MOUSE_SENSITIVITY: f32 = 100.0;

/// Speed divisor while Shift is held
pub const SLOW_FACTOR: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct FlyCamera {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
    forward: Vec3,
    right: Vec3,
    /// Azimuth
    u: f32,
    /// Polar angle
    v: f32,
    /// Distance from eye to the look-at point
    dist: f32,
    speed: f32,
    slow: bool,
    go_forward: f32,
    go_right: f32,
    dragging: bool,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    width: u32,
    height: u32,
}

impl FlyCamera {
    /// Camera at `eye` looking at `at`, 45 degree perspective
    pub fn new(eye: Vec3, at: Vec3, up: Vec3, width: u32, height: u32) -> Self {
        let mut camera = Self {
            eye,
            at,
            up,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            u: 0.0,
            v: 0.0,
            dist: 1.0,
            speed: 16.0,
            slow: false,
            go_forward: 0.0,
            go_right: 0.0,
            dragging: false,
            fov_y: 45.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.01,
            far: 1000.0,
            width: 1,
            height: 1,
        };
        camera.set_view(eye, at, up);
        camera.resize(width, height);
        camera
    }

    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self::new(
            Vec3::from(config.eye),
            Vec3::from(config.at),
            Vec3::from(config.up),
            width,
            height,
        );
        camera.speed = config.speed;
        camera.set_projection(config.fov_degrees.to_radians(), config.near, config.far);
        camera
    }

    /// Place the camera and derive the spherical look angles
    pub fn set_view(&mut self, eye: Vec3, at: Vec3, up: Vec3) {
        self.eye = eye;
        self.at = at;
        self.up = up;

        let offset = at - eye;
        self.dist = offset.length();
        self.forward = offset.normalize_or(Vec3::NEG_Z);
        self.right = self.forward.cross(up).normalize_or(Vec3::X);

        self.u = self.forward.z.atan2(self.forward.x);
        self.v = self.forward.y.clamp(-1.0, 1.0).acos();
    }

    /// Vertical field of view (radians) and clip planes; aspect follows `resize`
    pub fn set_projection(&mut self, fov_y: f32, near: f32, far: f32) {
        self.fov_y = fov_y;
        self.near = near;
        self.far = far;
    }

    /// Rotate the look direction by angle deltas
    pub fn update_uv(&mut self, du: f32, dv: f32) {
        self.u += du;
        self.v = (self.v + dv).clamp(MIN_POLAR, MAX_POLAR);

        let direction = Vec3::new(
            self.u.cos() * self.v.sin(),
            self.v.cos(),
            self.u.sin() * self.v.sin(),
        );
        self.at = self.eye + self.dist * direction;
        self.forward = direction;
        self.right = self.forward.cross(self.up).normalize_or(Vec3::X);
    }

    /// Translate eye and look-at point by the current motion state
    pub fn update(&mut self, dt: f32) {
        let step = (self.go_forward * self.forward + self.go_right * self.right) * self.speed * dt;
        self.eye += step;
        self.at += step;
    }

    /// Track the window size for the aspect ratio
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.aspect = width as f32 / height as f32;
    }

    // ===== INPUT =====

    pub fn key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                if !self.slow {
                    self.slow = true;
                    self.speed /= SLOW_FACTOR;
                }
            }
            KeyCode::KeyW => self.go_forward = 1.0,
            KeyCode::KeyS => self.go_forward = -1.0,
            KeyCode::KeyA => self.go_right = -1.0,
            KeyCode::KeyD => self.go_right = 1.0,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        match key {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                if self.slow {
                    self.slow = false;
                    self.speed *= SLOW_FACTOR;
                }
            }
            KeyCode::KeyW | KeyCode::KeyS => self.go_forward = 0.0,
            KeyCode::KeyA | KeyCode::KeyD => self.go_right = 0.0,
            _ => {}
        }
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.dragging = true;
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.dragging = false;
        }
    }

    /// Relative pointer motion in pixels; rotates only while dragging
    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        if self.dragging {
            self.update_uv(dx / MOUSE_SENSITIVITY, dy / MOUSE_SENSITIVITY);
        }
    }

    // ===== GETTERS =====

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    /// Unit look direction
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit strafe direction
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector of the camera frame (orthogonal to forward and right)
    pub fn camera_up(&self) -> Vec3 {
        self.right.cross(self.forward).normalize_or(self.up)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_slow(&self) -> bool {
        self.slow
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.at, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Frame-wide uniform block
    pub fn uniforms(&self, time: f32) -> CameraUniforms {
        CameraUniforms {
            view_proj: self.view_projection_matrix(),
            eye_time: self.eye.extend(time),
            forward: self.forward.extend(0.0),
            up: self.camera_up().extend(0.0),
            right: self.right.extend(0.0),
            screen: Vec4::new(self.width as f32, self.height as f32, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
