//! Point-cloud asteroid ring between the inner and outer planets

use std::f32::consts::TAU;

use cgmath::{Matrix4, Rad, Vector3};
use rand::Rng;

use crate::config::AsteroidBeltConfig;
use crate::gfx::rendering::{uniforms, DrawSurface, MeshHandle, ShaderProgram};

pub struct AsteroidBelt {
    positions: Vec<Vector3<f32>>,
    angular_speed: f32,
    angle: f32,
}

impl AsteroidBelt {
    /// Scatters `config.count` rocks using the thread-local generator
    pub fn new(config: &AsteroidBeltConfig) -> Self {
        Self::generate(config, &mut rand::rng())
    }

    /// Rocks at a uniform angle and radius, with a small vertical jitter
    pub fn generate<R: Rng>(config: &AsteroidBeltConfig, rng: &mut R) -> Self {
        let (inner, outer) = (config.inner_radius, config.outer_radius.max(config.inner_radius));

        let positions = (0..config.count)
            .map(|_| {
                let angle: f32 = rng.random_range(0.0..TAU);
                let distance = if outer > inner {
                    rng.random_range(inner..=outer)
                } else {
                    inner
                };
                let height = (rng.random::<f32>() - 0.5) * config.vertical_jitter;

                Vector3::new(angle.cos() * distance, height, angle.sin() * distance)
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Generated asteroid belt: {} rocks between r={} and r={}",
            positions.len(),
            inner,
            outer
        );

        Self {
            positions,
            angular_speed: config.angular_speed,
            angle: 0.0,
        }
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Spins the ring by already-scaled simulated time
    pub fn update(&mut self, delta_time: f32) {
        self.angle += self.angular_speed * delta_time;
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Rad(self.angle))
    }

    /// Positions as raw bytes for a point vertex buffer
    pub fn vertex_bytes(&self) -> Vec<u8> {
        let points: Vec<[f32; 3]> = self.positions.iter().map(|&p| p.into()).collect();
        bytemuck::cast_slice(&points).to_vec()
    }

    /// Draws the uploaded point buffer with the belt's own shader
    pub fn render(&self, shader: &mut dyn ShaderProgram, surface: &mut dyn DrawSurface, mesh: MeshHandle) {
        if self.positions.is_empty() {
            return;
        }
        shader.use_program();
        shader.set_mat4(uniforms::MODEL, &self.model_matrix());
        surface.draw_points(mesh);
    }
}
