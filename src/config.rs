//! # Configuration
//!
//! Plain configuration structs with sensible defaults for the explorer. Every
//! section implements [`Default`]; [`OrreryConfig::validate`] rejects values
//! that would put the camera, time controls or HUD into an invalid state.
//!
//! ```rust
//! use orrery::config::OrreryConfig;
//!
//! let mut config = OrreryConfig::default();
//! config.time.default_scale = 2.0;
//! config.validate().expect("valid configuration");
//! ```

use cgmath::Vector3;

use crate::error::ConfigError;

/// Output surface dimensions, used for aspect ratio and picking
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Camera start pose and navigation tuning
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub start_position: Vector3<f32>,
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub tracking_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: Vector3::new(0.0, 5.0, 15.0),
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 8.0,
            mouse_sensitivity: 0.08,
            zoom: 45.0,
            near_plane: 0.1,
            far_plane: 200.0,
            tracking_distance: 15.0,
        }
    }
}

/// Simulated-time controls
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeConfig {
    pub default_scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Factor applied by one increase/decrease step
    pub scale_step: f32,
    pub start_paused: bool,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            default_scale: 1.0,
            min_scale: 0.05,
            max_scale: 64.0,
            scale_step: 1.5,
            start_paused: false,
        }
    }
}

/// Heads-up display timing, all in wall-clock seconds
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HudConfig {
    pub fade_duration: f32,
    pub fact_interval: f32,
    /// Fade the HUD out this long after the last selection change
    pub auto_hide_after: Option<f32>,
    pub start_visible: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            fade_duration: 0.35,
            fact_interval: 8.0,
            auto_hide_after: None,
            start_visible: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AsteroidBeltConfig {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Total height of the vertical scatter band
    pub vertical_jitter: f32,
    /// Radians per simulated second
    pub angular_speed: f32,
}

impl Default for AsteroidBeltConfig {
    fn default() -> Self {
        Self {
            count: 1500,
            inner_radius: 13.5,
            outer_radius: 16.0,
            vertical_jitter: 0.1,
            angular_speed: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkyboxConfig {
    pub texture_path: String,
    pub scale: f32,
}

impl Default for SkyboxConfig {
    fn default() -> Self {
        Self {
            texture_path: "assets/textures/stars.jpg".to_string(),
            scale: 100.0,
        }
    }
}

/// Top-level configuration for an [`OrreryApp`](crate::app::OrreryApp)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrreryConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub time: TimeConfig,
    pub hud: HudConfig,
    pub asteroid_belt: AsteroidBeltConfig,
    pub skybox: SkyboxConfig,
}

impl OrreryConfig {
    /// Checks every section, returning the first rejected field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::WindowSize {
                width: window.width,
                height: window.height,
            });
        }

        let camera = &self.camera;
        for (field, value) in [
            ("movement_speed", camera.movement_speed),
            ("mouse_sensitivity", camera.mouse_sensitivity),
            ("near_plane", camera.near_plane),
            ("tracking_distance", camera.tracking_distance),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveCamera { field, value });
            }
        }
        if camera.near_plane >= camera.far_plane {
            return Err(ConfigError::ClipPlanes {
                near: camera.near_plane,
                far: camera.far_plane,
            });
        }
        if !(1.0..=45.0).contains(&camera.zoom) {
            return Err(ConfigError::Zoom(camera.zoom));
        }

        let time = &self.time;
        if time.min_scale <= 0.0 || time.min_scale > time.max_scale {
            return Err(ConfigError::TimeScaleRange {
                min: time.min_scale,
                max: time.max_scale,
            });
        }
        if !(time.min_scale..=time.max_scale).contains(&time.default_scale) {
            return Err(ConfigError::DefaultTimeScale {
                value: time.default_scale,
                min: time.min_scale,
                max: time.max_scale,
            });
        }
        if time.scale_step <= 1.0 {
            return Err(ConfigError::TimeScaleStep(time.scale_step));
        }

        let hud = &self.hud;
        if hud.fade_duration <= 0.0 {
            return Err(ConfigError::NonPositiveHud {
                field: "fade_duration",
                value: hud.fade_duration,
            });
        }
        if hud.fact_interval <= 0.0 {
            return Err(ConfigError::NonPositiveHud {
                field: "fact_interval",
                value: hud.fact_interval,
            });
        }
        if let Some(after) = hud.auto_hide_after {
            if after <= 0.0 {
                return Err(ConfigError::NonPositiveHud {
                    field: "auto_hide_after",
                    value: after,
                });
            }
        }

        let belt = &self.asteroid_belt;
        if belt.inner_radius < 0.0 || belt.inner_radius > belt.outer_radius {
            return Err(ConfigError::BeltRadii {
                inner: belt.inner_radius,
                outer: belt.outer_radius,
            });
        }

        if self.skybox.scale <= 0.0 {
            return Err(ConfigError::SkyboxScale(self.skybox.scale));
        }

        Ok(())
    }
}
