//! Error types for the Orrery core
//!
//! The simulation, camera and HUD never fail: edge cases resolve to neutral
//! values. Errors only surface from configuration validation and from the
//! external texture loader.

use thiserror::Error;

/// Convenience alias used by fallible Orrery APIs
pub type Result<T> = std::result::Result<T, OrreryError>;

#[derive(Debug, Error)]
pub enum OrreryError {
    /// A texture could not be decoded or uploaded by the external loader
    #[error("failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl OrreryError {
    pub fn texture_load(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::TextureLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// A rejected configuration field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("window size must be non-zero, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },

    #[error("camera {field} must be positive, got {value}")]
    NonPositiveCamera { field: &'static str, value: f32 },

    #[error("camera near plane ({near}) must be closer than far plane ({far})")]
    ClipPlanes { near: f32, far: f32 },

    #[error("camera zoom {0} is outside [1, 45] degrees")]
    Zoom(f32),

    #[error("time scale range [{min}, {max}] is empty or non-positive")]
    TimeScaleRange { min: f32, max: f32 },

    #[error("default time scale {value} is outside [{min}, {max}]")]
    DefaultTimeScale { value: f32, min: f32, max: f32 },

    #[error("time scale step must be greater than 1, got {0}")]
    TimeScaleStep(f32),

    #[error("hud {field} must be positive, got {value}")]
    NonPositiveHud { field: &'static str, value: f32 },

    #[error("asteroid belt radii [{inner}, {outer}] are inverted or negative")]
    BeltRadii { inner: f32, outer: f32 },

    #[error("skybox scale must be positive, got {0}")]
    SkyboxScale(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_into_orrery_error() {
        let err: OrreryError = ConfigError::Zoom(90.0).into();
        assert!(matches!(err, OrreryError::InvalidConfig(ConfigError::Zoom(_))));
        assert_eq!(
            err.to_string(),
            "invalid configuration: camera zoom 90 is outside [1, 45] degrees"
        );
    }

    #[test]
    fn test_texture_error_message_names_path() {
        let err = OrreryError::texture_load("assets/textures/mars.jpg", "file not found");
        assert_eq!(
            err.to_string(),
            "failed to load texture 'assets/textures/mars.jpg': file not found"
        );
    }
}
