pub mod shadow_cache;
pub mod skybox;
pub mod traits;

pub use shadow_cache::{LightState, ShadowCache};
pub use skybox::Skybox;
pub use traits::{uniforms, DrawSurface, MeshHandle, RenderContext, ShaderProgram, Texture};
