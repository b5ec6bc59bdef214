// src/lib.rs
//! Orrery
//!
//! The interaction core of a real-time solar system explorer: orbiting
//! bodies, a free-fly and tracking camera, ray picking, and a fact HUD.
//! Windowing, shaders, image decoding and text rendering stay with the host,
//! which plugs in through the traits in [`gfx::rendering`], [`input`] and
//! [`ui`].

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod performance;
pub mod prelude;
pub mod simulation;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types for convenience
pub use app::OrreryApp;
pub use config::OrreryConfig;
pub use error::{OrreryError, Result};

/// Creates an explorer with the default configuration
pub fn default() -> Result<OrreryApp> {
    OrreryApp::new(OrreryConfig::default())
}
