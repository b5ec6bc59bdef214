//! # User Interface Module
//!
//! The heads-up display that names the selected planet, rotates through its
//! facts, and shows the time controls. Text itself is drawn by the host
//! through a [`TextRenderer`].
//!
//! ## Key Components
//!
//! - [`Hud`] - Visibility and timer state machine
//! - [`TextRenderer`] - Host text-drawing seam

pub mod hud;

pub use hud::{Hud, HudVisibility};

/// Draws a line of screen-space text.
///
/// `position` is the top-left corner in pixels; `color` is RGBA with the
/// HUD's current opacity already folded into alpha.
pub trait TextRenderer {
    fn draw_text(&mut self, text: &str, position: [f32; 2], scale: f32, color: [f32; 4]);
}
