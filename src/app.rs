//! The frame loop bundle
//!
//! [`OrreryApp`] owns every piece of explorer state and exposes the three
//! calls a host makes per frame: [`frame`](OrreryApp::frame) to sample input
//! and advance time, [`render`](OrreryApp::render) to issue the scene's draw
//! calls, and [`render_hud`](OrreryApp::render_hud) for the text overlay.

use cgmath::Matrix4;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{AsteroidBeltConfig, OrreryConfig, TimeConfig};
use crate::error::Result;
use crate::gfx::camera::CameraManager;
use crate::gfx::rendering::shadow_cache::DEFAULT_SHADOW_EXTENT;
use crate::gfx::rendering::{
    uniforms, DrawSurface, LightState, MeshHandle, RenderContext, ShaderProgram, ShadowCache,
    Skybox,
};
use crate::gfx::resources::{TextureCache, TextureLoader};
use crate::input::{apply_input, InputContext, InputSource, InputState, KeyBindings};
use crate::performance::{FrameClock, PerformanceMetrics};
use crate::simulation::{AsteroidBelt, SolarSystem};
use crate::ui::{Hud, TextRenderer};

/// Host-uploaded meshes the scene draws with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneMeshes {
    /// Shared unit sphere for bodies and the skybox
    pub sphere: MeshHandle,
    /// Point buffer built from [`AsteroidBelt::vertex_bytes`]
    pub belt: MeshHandle,
}

/// What the host needs for its shadow pass after [`OrreryApp::render`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOutcome {
    pub light_space: Matrix4<f32>,
    /// The depth map must be redrawn; otherwise last frame's map is still valid
    pub shadow_dirty: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    /// Wall-clock seconds since the previous frame
    pub delta_time: f32,
    /// Seconds the simulation advanced; zero while paused
    pub simulated_delta: f32,
    pub quit_requested: bool,
    pub selection_changed: bool,
}

pub struct OrreryApp {
    config: OrreryConfig,
    camera: CameraManager,
    system: SolarSystem,
    skybox: Skybox,
    belt: AsteroidBelt,
    hud: Hud,
    input: InputState,
    bindings: KeyBindings,
    clock: FrameClock,
    shadows: ShadowCache,
    textures: TextureCache,
    viewport: (f32, f32),
}

impl OrreryApp {
    /// Validates `config` and builds the default solar system
    pub fn new(config: OrreryConfig) -> Result<Self> {
        Self::build(config, SolarSystem::new, AsteroidBelt::new)
    }

    /// Like [`new`](Self::new) with reproducible fact draws and belt layout
    pub fn with_seed(config: OrreryConfig, seed: u64) -> Result<Self> {
        Self::build(
            config,
            |time| SolarSystem::with_seed(time, seed),
            |belt| AsteroidBelt::generate(belt, &mut StdRng::seed_from_u64(seed)),
        )
    }

    fn build(
        config: OrreryConfig,
        make_system: impl FnOnce(&TimeConfig) -> SolarSystem,
        make_belt: impl FnOnce(&AsteroidBeltConfig) -> AsteroidBelt,
    ) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Starting orrery: {}x{} viewport, time scale {:.2}x in [{}, {}], {} asteroids",
            config.window.width,
            config.window.height,
            config.time.default_scale,
            config.time.min_scale,
            config.time.max_scale,
            config.asteroid_belt.count
        );

        let mut system = make_system(&config.time);
        system.initialize();

        let camera = CameraManager::from_config(&config.camera, config.window.aspect_ratio());
        let viewport = (config.window.width as f32, config.window.height as f32);

        Ok(Self {
            camera,
            system,
            skybox: Skybox::new(&config.skybox),
            belt: make_belt(&config.asteroid_belt),
            hud: Hud::new(&config.hud),
            input: InputState::new(),
            bindings: KeyBindings::default(),
            clock: FrameClock::new(),
            shadows: ShadowCache::new(),
            textures: TextureCache::new(),
            viewport,
            config,
        })
    }

    /// Loads every body texture and the skybox, returning how many failed
    pub fn load_textures(&mut self, loader: &mut dyn TextureLoader) -> usize {
        let mut paths = self.system.texture_paths();
        paths.push(self.skybox.texture_path());

        let missing = self.textures.load_all(loader, paths);
        if missing > 0 {
            log::warn!("{} texture(s) unavailable; those bodies render untextured", missing);
        }
        missing
    }

    /// Samples input, advances simulated time and updates camera and HUD
    pub fn frame(&mut self, now_seconds: f64, source: &dyn InputSource) -> FrameOutcome {
        let delta_time = self.clock.tick(now_seconds);

        let mut ctx = InputContext {
            camera: &mut self.camera,
            system: &mut self.system,
            hud: &mut self.hud,
            viewport: self.viewport,
        };
        let input = apply_input(&mut ctx, source, &mut self.input, &self.bindings, delta_time);

        let simulated_delta = self.system.update(delta_time);
        self.belt.update(simulated_delta);

        let camera = &mut self.camera.camera;
        if camera.is_tracking() {
            camera.set_target(self.system.selected_position());
        }
        camera.update_tracking(delta_time);
        camera.update_view_proj();

        self.hud.update(delta_time, &mut self.system);

        FrameOutcome {
            delta_time,
            simulated_delta,
            quit_requested: input.quit_requested,
            selection_changed: input.selection_changed,
        }
    }

    /// Draws skybox, bodies and belt.
    ///
    /// # Returns
    /// The light-space matrix and whether the shadow map is stale
    pub fn render(
        &mut self,
        shader: &mut dyn ShaderProgram,
        surface: &mut dyn DrawSurface,
        belt_shader: &mut dyn ShaderProgram,
        meshes: SceneMeshes,
    ) -> RenderOutcome {
        let camera = &self.camera.camera;
        let projection = camera.projection_matrix();
        let view = camera.view_matrix();
        let eye = camera.position;

        let light = LightState::new(
            self.system.sun_position(),
            self.system.selected_position(),
            DEFAULT_SHADOW_EXTENT,
        );
        let shadow_dirty = self.shadows.prepare(&light, &self.system.body_transforms());
        if shadow_dirty {
            log::debug!("Shadow map needs regeneration");
        }

        shader.use_program();
        shader.set_mat4(uniforms::PROJECTION, &projection);
        shader.set_mat4(uniforms::VIEW, &view);
        shader.set_mat4(uniforms::LIGHT_SPACE, &light.view_proj_matrix);

        let mut ctx = RenderContext::new(shader, surface, &self.textures, meshes.sphere);
        self.skybox.render(&mut ctx, eye);
        self.system.render(&mut ctx, eye);

        belt_shader.use_program();
        belt_shader.set_mat4(uniforms::PROJECTION, &projection);
        belt_shader.set_mat4(uniforms::VIEW, &view);
        self.belt.render(belt_shader, surface, meshes.belt);

        RenderOutcome {
            light_space: light.view_proj_matrix,
            shadow_dirty,
        }
    }

    pub fn render_hud(&self, text: &mut dyn TextRenderer) {
        self.hud.render(&self.system, text, self.viewport);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width as f32, height as f32);
        self.camera.camera.resize_projection(width, height);
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraManager {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraManager {
        &mut self.camera
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut SolarSystem {
        &mut self.system
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn belt(&self) -> &AsteroidBelt {
        &self.belt
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn shadow_cache(&self) -> &ShadowCache {
        &self.shadows
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        self.clock.get_metrics()
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }
}
