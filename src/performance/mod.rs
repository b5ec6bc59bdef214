//! # Frame Timing
//!
//! Turns the host's absolute frame timestamps into per-frame delta time and
//! keeps rolling frame-time statistics.
//!
//! ## Usage
//!
//! ```rust
//! use orrery::performance::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! assert_eq!(clock.tick(10.0), 0.0); // first frame
//! let dt = clock.tick(10.016);
//! assert!((dt - 0.016).abs() < 1e-5);
//! ```

use std::collections::VecDeque;

/// Rolling frame statistics over the sample window
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Frames per second from the average frame time
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    /// Minimum frame time in the current window
    pub min_frame_time_ms: f32,
    /// Maximum frame time in the current window
    pub max_frame_time_ms: f32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
        }
    }
}

pub struct FrameClock {
    last_timestamp: Option<f64>,
    /// Ring buffer of recent frame times in seconds
    frame_times: VecDeque<f32>,
    max_samples: usize,
    current_metrics: PerformanceMetrics,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_capacity(120) // ~2 seconds at 60fps
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            last_timestamp: None,
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            current_metrics: PerformanceMetrics::default(),
            frame_count: 0,
        }
    }

    /// Records a frame at `now` seconds and returns the elapsed time.
    ///
    /// The first frame reports zero, as does a timestamp that goes backwards.
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = match self.last_timestamp {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(now);
        self.frame_count += 1;

        if self.frame_count > 1 {
            self.add_frame_time(delta);
            self.update_metrics();
        }
        delta
    }

    fn add_frame_time(&mut self, frame_time: f32) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total: f32 = self.frame_times.iter().sum();
        let avg_ms = total / self.frame_times.len() as f32 * 1000.0;

        let metrics = &mut self.current_metrics;
        metrics.frame_time_ms = avg_ms;
        metrics.fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
        metrics.min_frame_time_ms = self.frame_times.iter().copied().fold(f32::MAX, f32::min) * 1000.0;
        metrics.max_frame_time_ms = self.frame_times.iter().copied().fold(0.0, f32::max) * 1000.0;
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame times in milliseconds, oldest first
    pub fn get_frame_time_history(&self) -> Vec<f32> {
        self.frame_times.iter().map(|t| t * 1000.0).collect()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.frame_count = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
