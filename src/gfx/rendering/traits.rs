//! Narrow drawing seams implemented by the host renderer
//!
//! The core never compiles shaders, uploads buffers or decodes images. It
//! talks to whatever graphics backend the host uses through these traits and
//! a fixed set of uniform names.

use cgmath::{Matrix4, Vector3};

use crate::gfx::resources::TextureCache;

/// Uniform names the core writes. Host shaders must declare them.
pub mod uniforms {
    pub const MODEL: &str = "model";
    pub const VIEW: &str = "view";
    pub const PROJECTION: &str = "projection";
    pub const LIGHT_POS: &str = "lightPos";
    pub const VIEW_POS: &str = "viewPos";
    pub const TEXTURE: &str = "texture1";
    pub const LIGHT_SPACE: &str = "lightSpaceMatrix";
}

/// A linked shader program with name-addressed uniforms
pub trait ShaderProgram {
    fn use_program(&mut self);
    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_float(&mut self, name: &str, value: f32);
}

/// A loaded GPU texture
pub trait Texture {
    fn bind(&self, unit: u32);
}

/// Issues draw calls and toggles the fixed-function state the core needs
pub trait DrawSurface {
    fn draw_triangles(&mut self, mesh: MeshHandle);
    fn draw_points(&mut self, mesh: MeshHandle);
    fn set_depth_write(&mut self, enabled: bool);
}

/// Opaque handle to a mesh uploaded by the host.
///
/// The host that created the buffers owns and releases them; the core only
/// copies the handle around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle {
    pub id: u32,
    pub vertex_count: u32,
}

impl MeshHandle {
    pub fn new(id: u32, vertex_count: u32) -> Self {
        Self { id, vertex_count }
    }
}

/// Everything a body needs to draw itself during one pass
pub struct RenderContext<'a> {
    pub shader: &'a mut dyn ShaderProgram,
    pub surface: &'a mut dyn DrawSurface,
    pub textures: &'a TextureCache,
    /// Shared unit sphere used by every body without a custom mesh
    pub sphere: MeshHandle,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        shader: &'a mut dyn ShaderProgram,
        surface: &'a mut dyn DrawSurface,
        textures: &'a TextureCache,
        sphere: MeshHandle,
    ) -> Self {
        Self {
            shader,
            surface,
            textures,
            sphere,
        }
    }

    /// Binds the texture loaded for `path` to unit 0.
    ///
    /// Returns false and binds nothing when the texture is absent.
    pub fn bind_texture(&mut self, path: &str) -> bool {
        match self.textures.get(path) {
            Some(texture) => {
                texture.bind(0);
                self.shader.set_int(uniforms::TEXTURE, 0);
                true
            }
            None => false,
        }
    }

    /// Uploads `model` and draws `mesh`, falling back to the shared sphere
    pub fn draw_model(&mut self, model: &Matrix4<f32>, mesh: Option<MeshHandle>) {
        self.shader.set_mat4(uniforms::MODEL, model);
        self.surface.draw_triangles(mesh.unwrap_or(self.sphere));
    }
}
