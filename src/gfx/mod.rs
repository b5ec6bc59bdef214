//! # Graphics Module
//!
//! Camera navigation, picking, procedural geometry and the narrow rendering
//! seams through which the core talks to the host's graphics backend.
//!
//! - **Camera System** ([`camera`]) - Free-fly and target-tracking camera
//! - **Picking** ([`picking`]) - Ray-sphere intersection for mouse selection
//! - **Geometry** ([`geometry`]) - Shared UV sphere generation
//! - **Rendering** ([`rendering`]) - Shader/texture/draw traits, skybox, shadow cache
//! - **Resources** ([`resources`]) - Texture cache

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;

pub use camera::{CameraManager, FlyCamera};
pub use rendering::RenderContext;
