//! Circular orbit shared by planets and moons

use cgmath::Vector3;

/// A circular orbit in the anchor's XZ plane.
///
/// The angle accumulates without wrapping; `cos`/`sin` take care of that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second of simulated time
    pub angular_speed: f32,
    pub angle: f32,
}

impl Orbit {
    pub fn new(radius: f32, angular_speed: f32) -> Self {
        Self {
            radius,
            angular_speed,
            angle: 0.0,
        }
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.angle += self.angular_speed * delta_time;
    }

    /// Position on the orbit around `anchor`, level with the anchor
    pub fn position_around(&self, anchor: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            anchor.x + self.radius * self.angle.cos(),
            anchor.y,
            anchor.z + self.radius * self.angle.sin(),
        )
    }
}
