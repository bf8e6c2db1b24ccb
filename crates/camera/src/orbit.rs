//! Damped orbit controls around a target point.

use glam::Vec3;

use crate::{Camera, CameraControl, CameraPose};

/// Keeps `phi` away from the poles where the view matrix degenerates.
const POLE_EPSILON: f32 = 1e-4;

/// Reference frame rate the damping factor is tuned for.
const DAMPING_REFERENCE_FPS: f32 = 60.0;

/// Tuning for [`OrbitControls`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    /// Ease rotation and zoom out over several frames.
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per reference frame.
    pub damping_factor: f32,
    /// Multiplier on drag rotation.
    pub rotate_speed: f32,
    /// Multiplier on zoom steps.
    pub zoom_speed: f32,
    /// Closest allowed distance to the target.
    pub min_distance: f32,
    /// Farthest allowed distance to the target.
    pub max_distance: f32,
    /// Smallest polar angle (from +Y) in radians.
    pub min_polar_angle: f32,
    /// Largest polar angle (from +Y) in radians.
    pub max_polar_angle: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.25,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.1,
            max_distance: 100.0,
            min_polar_angle: 0.0,
            // Never look at the model from below the ground plane.
            max_polar_angle: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Orbit camera driven by pointer drags and zoom steps.
///
/// Input only queues motion; [`CameraControl::update`] applies it, so the
/// camera moves exactly once per frame.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    camera: Camera,
    config: OrbitConfig,
    radius: f32,
    /// Azimuth around +Y, measured from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    viewport_height: f32,
}

impl OrbitControls {
    /// Take over `camera`, orbiting around its current target.
    pub fn new(camera: Camera, config: OrbitConfig) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length().max(config.min_distance);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let mut controls = Self {
            camera,
            config,
            radius,
            theta,
            phi,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            viewport_height: 720.0,
        };
        controls.clamp_and_place();
        controls
    }

    /// The controlled camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current tuning.
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Current distance to the target.
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Current polar angle in radians.
    pub fn polar_angle(&self) -> f32 {
        self.phi
    }

    /// Current azimuth in radians.
    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    /// Whether queued motion is still being eased out.
    pub fn is_settling(&self) -> bool {
        self.pending_theta.abs() > 1e-5
            || self.pending_phi.abs() > 1e-5
            || (self.pending_scale - 1.0).abs() > 1e-5
    }

    fn clamp_and_place(&mut self) {
        let min_phi = self.config.min_polar_angle.max(POLE_EPSILON);
        let max_phi = self
            .config
            .max_polar_angle
            .min(std::f32::consts::PI - POLE_EPSILON)
            .max(min_phi);
        self.phi = self.phi.clamp(min_phi, max_phi);
        self.radius = self
            .radius
            .clamp(self.config.min_distance, self.config.max_distance);

        let sin_phi_radius = self.phi.sin() * self.radius;
        let offset = Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        );
        self.camera.position = self.camera.target + offset;
    }
}

impl CameraControl for OrbitControls {
    fn update(&mut self, elapsed: f32) -> CameraPose {
        let applied = if self.config.enable_damping {
            let keep = (1.0 - self.config.damping_factor.clamp(0.0, 1.0))
                .powf(elapsed.max(0.0) * DAMPING_REFERENCE_FPS);
            1.0 - keep
        } else {
            1.0
        };

        self.theta += self.pending_theta * applied;
        self.phi += self.pending_phi * applied;
        self.pending_theta *= 1.0 - applied;
        self.pending_phi *= 1.0 - applied;

        let scale_step = self.pending_scale.powf(applied);
        self.radius *= scale_step;
        self.pending_scale /= scale_step;

        self.clamp_and_place();
        self.camera.pose()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        if height > 0 {
            self.viewport_height = height as f32;
        }
    }

    fn orbit(&mut self, dx: f32, dy: f32) {
        // A drag across the full viewport height turns the camera once around.
        let per_pixel = std::f32::consts::TAU / self.viewport_height * self.config.rotate_speed;
        self.pending_theta -= dx * per_pixel;
        self.pending_phi -= dy * per_pixel;
    }

    fn zoom(&mut self, delta: f32) {
        self.pending_scale *= 0.95f32.powf(self.config.zoom_speed * delta);
    }
}
