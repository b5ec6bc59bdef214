// src/ui/hud.rs
//! Heads-up display state machine
//!
//! The HUD fades in when a planet is selected, rotates the planet's facts on
//! a fixed interval, and can hide itself a while after the last selection.
//! All timers run on wall-clock time so the overlay keeps working while the
//! simulation is paused.

use crate::config::HudConfig;
use crate::simulation::SolarSystem;
use crate::ui::TextRenderer;

const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 28.0;
const TITLE_SCALE: f32 = 1.0;
const BODY_SCALE: f32 = 0.6;
const TITLE_COLOR: [f32; 3] = [1.0, 0.85, 0.4];
const BODY_COLOR: [f32; 3] = [0.9, 0.9, 0.9];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudVisibility {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

#[derive(Debug, Clone)]
pub struct Hud {
    visibility: HudVisibility,
    alpha: f32,
    fade_duration: f32,
    fact_interval: f32,
    auto_hide_after: Option<f32>,
    fact_timer: f32,
    selection_timer: f32,
    last_selection: Option<usize>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new(&HudConfig::default())
    }
}

impl Hud {
    pub fn new(config: &HudConfig) -> Self {
        let (visibility, alpha) = if config.start_visible {
            (HudVisibility::Visible, 1.0)
        } else {
            (HudVisibility::Hidden, 0.0)
        };

        Self {
            visibility,
            alpha,
            fade_duration: config.fade_duration,
            fact_interval: config.fact_interval,
            auto_hide_after: config.auto_hide_after,
            fact_timer: 0.0,
            selection_timer: 0.0,
            last_selection: None,
        }
    }

    pub fn visibility(&self) -> HudVisibility {
        self.visibility
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True when heading towards or at full opacity
    pub fn is_showing(&self) -> bool {
        matches!(self.visibility, HudVisibility::FadingIn | HudVisibility::Visible)
    }

    pub fn show(&mut self) {
        if matches!(self.visibility, HudVisibility::Hidden | HudVisibility::FadingOut) {
            self.visibility = HudVisibility::FadingIn;
            self.selection_timer = 0.0;
        }
    }

    pub fn hide(&mut self) {
        if self.is_showing() {
            self.visibility = HudVisibility::FadingOut;
        }
    }

    pub fn toggle(&mut self) {
        if self.is_showing() {
            self.hide();
        } else {
            self.show();
        }
        log::debug!("HUD {:?}", self.visibility);
    }

    /// Restarts the selection and fact timers and brings the HUD up
    pub fn on_selection_changed(&mut self) {
        self.show();
        self.selection_timer = 0.0;
        self.fact_timer = 0.0;
    }

    pub fn update(&mut self, delta_time: f32, system: &mut SolarSystem) {
        let selection = system.selected_index();
        if selection != self.last_selection {
            self.last_selection = selection;
            if selection.is_some() {
                self.on_selection_changed();
            }
        }

        self.advance_fade(delta_time);

        if self.is_showing() && selection.is_some() {
            self.fact_timer += delta_time;
            if self.fact_timer >= self.fact_interval {
                self.fact_timer = 0.0;
                system.refresh_selected_fact();
            }

            self.selection_timer += delta_time;
            if let Some(limit) = self.auto_hide_after {
                if self.selection_timer >= limit {
                    self.hide();
                }
            }
        }
    }

    fn advance_fade(&mut self, delta_time: f32) {
        let step = if self.fade_duration > 0.0 {
            delta_time / self.fade_duration
        } else {
            1.0
        };

        match self.visibility {
            HudVisibility::FadingIn => {
                self.alpha = (self.alpha + step).min(1.0);
                if self.alpha >= 1.0 {
                    self.visibility = HudVisibility::Visible;
                }
            }
            HudVisibility::FadingOut => {
                self.alpha = (self.alpha - step).max(0.0);
                if self.alpha <= 0.0 {
                    self.visibility = HudVisibility::Hidden;
                }
            }
            HudVisibility::Hidden | HudVisibility::Visible => {}
        }
    }

    /// Name, current fact and time status of the selected planet
    pub fn render(&self, system: &SolarSystem, text: &mut dyn TextRenderer, viewport: (f32, f32)) {
        if self.alpha <= 0.0 {
            return;
        }
        let Some(planet) = system.selected_planet() else {
            return;
        };

        let [r, g, b] = TITLE_COLOR;
        text.draw_text(planet.name(), [MARGIN, MARGIN], TITLE_SCALE, [r, g, b, self.alpha]);

        let [r, g, b] = BODY_COLOR;
        let body = [r, g, b, self.alpha];
        let fact = planet.current_fact();
        if !fact.is_empty() {
            text.draw_text(fact, [MARGIN, MARGIN + LINE_HEIGHT], BODY_SCALE, body);
        }

        let status = if system.is_paused() {
            "PAUSED".to_string()
        } else {
            format!("Time x{:.2}", system.time_scale())
        };
        let bottom = (viewport.1 - MARGIN - LINE_HEIGHT).max(MARGIN);
        text.draw_text(&status, [MARGIN, bottom], BODY_SCALE, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeConfig;
    use crate::simulation::{PlanetSpec, SunSpec, SystemCatalog};
    use crate::test_support::RecordingText;

    fn system() -> SolarSystem {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 8);
        system.initialize_with(&SystemCatalog {
            sun: SunSpec::default(),
            planets: vec![
                PlanetSpec::new("Alpha", 1.0, 5.0, 0.1, 0.1).with_facts(&["a1", "a2"]),
                PlanetSpec::new("Beta", 1.0, 9.0, 0.1, 0.1).with_facts(&["b1", "b2"]),
            ],
            moons: Vec::new(),
        });
        system
    }

    fn hidden_hud(config: HudConfig) -> Hud {
        Hud::new(&HudConfig {
            start_visible: false,
            ..config
        })
    }

    #[test]
    fn test_selection_fades_in_linearly() {
        let mut system = system();
        let mut hud = hidden_hud(HudConfig::default());

        hud.update(0.0, &mut system);
        assert_eq!(hud.visibility(), HudVisibility::FadingIn);

        hud.update(0.175, &mut system);
        assert!((hud.alpha() - 0.5).abs() < 1e-4);

        hud.update(0.2, &mut system);
        assert_eq!(hud.visibility(), HudVisibility::Visible);
        assert_eq!(hud.alpha(), 1.0);
    }

    #[test]
    fn test_toggle_fades_out_then_back() {
        let mut system = system();
        let mut hud = Hud::default();
        hud.update(0.0, &mut system);

        hud.toggle();
        assert_eq!(hud.visibility(), HudVisibility::FadingOut);
        hud.update(1.0, &mut system);
        assert_eq!(hud.visibility(), HudVisibility::Hidden);
        assert_eq!(hud.alpha(), 0.0);

        hud.toggle();
        assert_eq!(hud.visibility(), HudVisibility::FadingIn);
    }

    #[test]
    fn test_fact_rotates_on_interval() {
        let mut system = system();
        let mut hud = Hud::default();
        hud.update(0.0, &mut system);

        let first = system.selected_fact().to_string();
        hud.update(7.9, &mut system);
        assert_eq!(system.selected_fact(), first);

        hud.update(0.2, &mut system);
        assert_ne!(system.selected_fact(), first);
    }

    #[test]
    fn test_new_selection_restarts_fact_timer() {
        let mut system = system();
        let mut hud = Hud::default();
        hud.update(0.0, &mut system);
        hud.update(7.0, &mut system);

        system.cycle_selection(1);
        hud.update(0.0, &mut system);
        let fact = system.selected_fact().to_string();
        hud.update(7.0, &mut system);
        assert_eq!(system.selected_fact(), fact);
    }

    #[test]
    fn test_auto_hide_after_idle() {
        let mut system = system();
        let mut hud = Hud::new(&HudConfig {
            auto_hide_after: Some(3.0),
            ..HudConfig::default()
        });

        hud.update(0.0, &mut system);
        hud.update(2.9, &mut system);
        assert!(hud.is_showing());

        hud.update(0.2, &mut system);
        assert_eq!(hud.visibility(), HudVisibility::FadingOut);

        system.cycle_selection(1);
        hud.update(0.0, &mut system);
        assert_eq!(hud.visibility(), HudVisibility::FadingIn);
    }

    #[test]
    fn test_render_shows_selected_planet() {
        let mut system = system();
        let mut hud = Hud::default();
        hud.update(0.0, &mut system);

        let mut text = RecordingText::default();
        hud.render(&system, &mut text, (1280.0, 720.0));

        let lines: Vec<&str> = text.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(lines, ["Alpha", system.selected_fact(), "Time x1.00"]);
        assert!(text.lines.iter().all(|l| l.color[3] == 1.0));
        assert_eq!(text.lines[2].position, [MARGIN, 720.0 - MARGIN - LINE_HEIGHT]);
    }

    #[test]
    fn test_render_reports_pause() {
        let mut system = system();
        system.set_paused(true);
        let hud = Hud::default();

        let mut text = RecordingText::default();
        hud.render(&system, &mut text, (1280.0, 720.0));
        assert_eq!(text.lines.last().map(|l| l.text.as_str()), Some("PAUSED"));
    }

    #[test]
    fn test_render_nothing_when_hidden_or_unselected() {
        let mut system = system();
        let mut text = RecordingText::default();

        hidden_hud(HudConfig::default()).render(&system, &mut text, (1280.0, 720.0));
        assert!(text.lines.is_empty());

        system.initialize_with(&SystemCatalog::empty());
        Hud::default().render(&system, &mut text, (1280.0, 720.0));
        assert!(text.lines.is_empty());
    }

    #[test]
    fn test_timers_ignore_pause() {
        let mut system = system();
        system.set_paused(true);
        let mut hud = hidden_hud(HudConfig::default());

        hud.update(0.0, &mut system);
        hud.update(1.0, &mut system);
        assert_eq!(hud.visibility(), HudVisibility::Visible);
    }
}
