//! Star background drawn as a huge inside-out sphere around the camera

use cgmath::{Matrix4, Vector3, Zero};

use super::traits::{uniforms, RenderContext};
use crate::config::SkyboxConfig;

pub struct Skybox {
    texture_path: String,
    scale: f32,
}

impl Skybox {
    pub fn new(config: &SkyboxConfig) -> Self {
        Self {
            texture_path: config.texture_path.clone(),
            scale: config.scale,
        }
    }

    pub fn texture_path(&self) -> &str {
        &self.texture_path
    }

    /// Follows the camera, scaled up and mirrored on X so the texture faces inward
    pub fn model_matrix(&self, camera_position: Vector3<f32>) -> Matrix4<f32> {
        Matrix4::from_translation(camera_position)
            * Matrix4::from_scale(self.scale)
            * Matrix4::from_nonuniform_scale(-1.0, 1.0, 1.0)
    }

    /// Draws behind everything with depth writes off. Skipped without a texture.
    pub fn render(&self, ctx: &mut RenderContext, camera_position: Vector3<f32>) {
        if ctx.textures.get(&self.texture_path).is_none() {
            return;
        }

        ctx.surface.set_depth_write(false);
        ctx.bind_texture(&self.texture_path);
        ctx.shader
            .set_mat4(uniforms::MODEL, &self.model_matrix(camera_position));
        // Stars are unlit
        ctx.shader.set_vec3(uniforms::LIGHT_POS, Vector3::zero());
        ctx.surface.draw_triangles(ctx.sphere);
        ctx.surface.set_depth_write(true);
    }
}
