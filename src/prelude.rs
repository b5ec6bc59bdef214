//! # Orrery Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```rust
//! use orrery::prelude::*;
//!
//! let mut system = SolarSystem::default();
//! system.initialize();
//! assert_eq!(system.selected_name(), "Earth");
//! ```

// Frame loop and configuration
pub use crate::app::{FrameOutcome, OrreryApp, RenderOutcome, SceneMeshes};
pub use crate::config::OrreryConfig;
pub use crate::error::{OrreryError, Result};

// Graphics seams and camera
pub use crate::gfx::camera::{CameraManager, CameraMovement, FlyCamera};
pub use crate::gfx::geometry::{generate_sphere, GeometryData, MeshVertex};
pub use crate::gfx::picking::{screen_to_ray, Ray};
pub use crate::gfx::rendering::{DrawSurface, MeshHandle, RenderContext, ShaderProgram, Texture};
pub use crate::gfx::resources::{TextureCache, TextureLoader};

// Simulation
pub use crate::simulation::{AsteroidBelt, BodyId, CelestialBody, SolarSystem, SystemCatalog};

// Input and HUD
pub use crate::input::{InputSource, KeyBindings};
pub use crate::ui::{Hud, TextRenderer};

pub use crate::performance::{FrameClock, PerformanceMetrics};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
