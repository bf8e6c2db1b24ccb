#![warn(missing_docs)]
//! Perspective camera, per-frame camera poses and camera controls.

mod orbit;

use glam::{Mat4, Vec3};

pub use orbit::{OrbitConfig, OrbitControls};

/// Perspective camera looking at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// World up direction.
    pub up: Vec3,

    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Update the aspect ratio for a new viewport size.
    ///
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Snapshot the matrices for this frame.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            position: self.position,
        }
    }
}

/// Immutable camera state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World -> view transform.
    pub view: Mat4,
    /// View -> clip transform.
    pub projection: Mat4,
    /// Eye position in world space.
    pub position: Vec3,
}

impl CameraPose {
    /// Combined world -> clip transform.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Clip -> world transform, used to unproject pointer positions.
    pub fn inverse_view_projection(&self) -> Mat4 {
        self.view_projection().inverse()
    }
}

/// Something that owns the camera and moves it between frames.
pub trait CameraControl {
    /// Advance by `elapsed` seconds and return the pose for this frame.
    fn update(&mut self, elapsed: f32) -> CameraPose;

    /// React to a viewport size change.
    fn resize(&mut self, width: u32, height: u32);

    /// Request an orbit by a pointer drag of `dx`, `dy` pixels.
    fn orbit(&mut self, _dx: f32, _dy: f32) {}

    /// Request a zoom step; positive moves closer.
    fn zoom(&mut self, _delta: f32) {}
}

/// A camera that never moves on its own.
#[derive(Debug, Clone, Default)]
pub struct FixedCamera {
    /// The wrapped camera.
    pub camera: Camera,
}

impl FixedCamera {
    /// Wrap a camera.
    pub fn new(camera: Camera) -> Self {
        Self { camera }
    }
}

impl CameraControl for FixedCamera {
    fn update(&mut self, _elapsed: f32) -> CameraPose {
        self.camera.pose()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}
