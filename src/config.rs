use anyhow::Result;
use glam::Vec3;
use partpick_camera::{Camera, OrbitConfig};
use partpick_core::Color;
use partpick_input::DEFAULT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/viewer.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Scene description loaded at startup.
    pub scene_path: PathBuf,
    /// Color painted on the selected part.
    pub highlight_color: Color,
    /// Raw input events buffered between frames.
    pub event_queue_capacity: usize,
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub controls: ControlsSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    pub enable_damping: bool,
    pub damping_factor: f32,
    /// Largest angle from straight up the camera may orbit to, in degrees.
    pub max_polar_angle_degrees: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from("models/human.json"),
            highlight_color: Color::RED,
            event_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            controls: ControlsSettings::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "partpick".to_string(),
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            fov_degrees: camera.fov.to_degrees(),
            position: camera.position.into(),
            target: camera.target.into(),
            near: camera.near,
            far: camera.far,
        }
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        let orbit = OrbitConfig::default();
        Self {
            enable_damping: orbit.enable_damping,
            damping_factor: orbit.damping_factor,
            max_polar_angle_degrees: orbit.max_polar_angle.to_degrees(),
            rotate_speed: orbit.rotate_speed,
            zoom_speed: orbit.zoom_speed,
            min_distance: orbit.min_distance,
            max_distance: orbit.max_distance,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ViewerConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ViewerConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                ViewerConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        let settings = &self.camera;
        let mut camera = Camera {
            fov: settings.fov_degrees.clamp(1.0, 179.0).to_radians(),
            near: settings.near.max(1e-4),
            far: settings.far.max(settings.near.max(1e-4) * 2.0),
            ..Camera::looking_at(Vec3::from(settings.position), Vec3::from(settings.target))
        };
        camera.set_viewport(self.window.width, self.window.height);
        camera
    }

    pub fn orbit_config(&self) -> OrbitConfig {
        let controls = &self.controls;
        let min_distance = controls.min_distance.max(1e-3);
        OrbitConfig {
            enable_damping: controls.enable_damping,
            damping_factor: controls.damping_factor.clamp(0.0, 1.0),
            rotate_speed: controls.rotate_speed,
            zoom_speed: controls.zoom_speed,
            min_distance,
            max_distance: controls.max_distance.max(min_distance),
            max_polar_angle: controls.max_polar_angle_degrees.clamp(0.0, 180.0).to_radians(),
            ..OrbitConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(stem: &str) -> PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("partpick_{stem}_{timestamp}.toml"))
    }

    #[test]
    fn defaults_match_the_stock_viewer() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.highlight_color, Color::from_hex(0xff0000));
        assert_eq!(cfg.camera.position, [0.0, 1.0, 3.0]);
        assert!((cfg.camera.fov_degrees - 75.0).abs() < 1e-3);
        assert!((cfg.controls.damping_factor - 0.25).abs() < 1e-6);
        assert!((cfg.controls.max_polar_angle_degrees - 90.0).abs() < 1e-3);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let path = temp_path("partial");
        fs::write(
            &path,
            "highlight_color = \"#00ff00\"\n[window]\nwidth = 640\n",
        )
        .expect("write config");

        let cfg = ViewerConfig::load_from_path(&path);
        assert_eq!(cfg.highlight_color, Color::from_hex(0x00ff00));
        assert_eq!(cfg.window.width, 640);
        assert_eq!(cfg.window.height, 720);
        assert_eq!(cfg.scene_path, PathBuf::from("models/human.json"));
    }

    #[test]
    fn malformed_files_fall_back_to_defaults() {
        let path = temp_path("malformed");
        fs::write(&path, "highlight_color = \"red\"").expect("write config");
        assert_eq!(ViewerConfig::load_from_path(&path), ViewerConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("roundtrip");
        let mut cfg = ViewerConfig::default();
        cfg.controls.enable_damping = false;
        cfg.event_queue_capacity = 32;
        cfg.save_to_path(&path).expect("save config");
        assert_eq!(ViewerConfig::load_from_path(&path), cfg);
    }

    #[test]
    fn camera_uses_window_aspect() {
        let cfg = ViewerConfig::default();
        let camera = cfg.camera();
        assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-5);
        assert!((cfg.orbit_config().max_polar_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
