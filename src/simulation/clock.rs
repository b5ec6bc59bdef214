//! Simulated time controls: pause and a bounded time-scale multiplier

use crate::config::TimeConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    is_paused: bool,
    time_scale: f32,
    min_scale: f32,
    max_scale: f32,
    scale_step: f32,
    simulated_time: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(&TimeConfig::default())
    }
}

impl SimulationClock {
    /// Builds a clock from `config`. An inverted range is swapped into order.
    pub fn new(config: &TimeConfig) -> Self {
        let min_scale = config.min_scale.min(config.max_scale);
        let max_scale = config.min_scale.max(config.max_scale);
        Self {
            is_paused: config.start_paused,
            time_scale: clamp_scale(config.default_scale, min_scale, max_scale),
            min_scale,
            max_scale,
            scale_step: config.scale_step,
            simulated_time: 0.0,
        }
    }

    /// Scaled delta for this frame; zero while paused
    pub fn advance(&mut self, delta_time: f32) -> f32 {
        let scaled = self.effective_delta(delta_time);
        self.simulated_time += scaled;
        scaled
    }

    pub fn effective_delta(&self, delta_time: f32) -> f32 {
        if self.is_paused {
            0.0
        } else {
            delta_time * self.time_scale
        }
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.is_paused != paused {
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.is_paused = paused;
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.set_paused(!self.is_paused);
        self.is_paused
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Clamped into the configured range
    pub fn set_time_scale(&mut self, scale: f32) {
        let clamped = clamp_scale(scale, self.min_scale, self.max_scale);
        if clamped != self.time_scale {
            log::info!("Time scale set to {:.2}x", clamped);
        }
        self.time_scale = clamped;
    }

    pub fn increase_time_scale(&mut self) {
        self.set_time_scale(self.time_scale * self.scale_step);
    }

    pub fn decrease_time_scale(&mut self) {
        self.set_time_scale(self.time_scale / self.scale_step);
    }

    /// Total scaled time since creation
    pub fn simulated_time(&self) -> f32 {
        self.simulated_time
    }
}

// Unlike f32::clamp this never panics on inverted or NaN bounds
fn clamp_scale(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
