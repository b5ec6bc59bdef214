//! # Orbit Tour
//!
//! Drives the explorer's full frame loop without a window: a scripted
//! sequence of key presses selects planets, changes the time scale, locks
//! the camera onto a planet and pauses, while a headless backend counts the
//! draw calls and prints the HUD.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=info cargo run --example orbit_tour
//! ```

use std::collections::HashSet;

use anyhow::Context;
use cgmath::{Matrix4, Vector3};
use orrery::gfx::geometry::{DEFAULT_SECTORS, DEFAULT_STACKS};
use orrery::prelude::*;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Counts what a GPU backend would be asked to do
#[derive(Default)]
struct HeadlessBackend {
    uniforms_set: usize,
    triangle_draws: usize,
    point_draws: usize,
}

impl ShaderProgram for HeadlessBackend {
    fn use_program(&mut self) {}

    fn set_mat4(&mut self, _name: &str, _value: &Matrix4<f32>) {
        self.uniforms_set += 1;
    }

    fn set_vec3(&mut self, _name: &str, _value: Vector3<f32>) {
        self.uniforms_set += 1;
    }

    fn set_int(&mut self, _name: &str, _value: i32) {
        self.uniforms_set += 1;
    }

    fn set_float(&mut self, _name: &str, _value: f32) {
        self.uniforms_set += 1;
    }
}

struct HeadlessSurface<'a>(&'a mut HeadlessBackend);

impl DrawSurface for HeadlessSurface<'_> {
    fn draw_triangles(&mut self, _mesh: MeshHandle) {
        self.0.triangle_draws += 1;
    }

    fn draw_points(&mut self, _mesh: MeshHandle) {
        self.0.point_draws += 1;
    }

    fn set_depth_write(&mut self, _enabled: bool) {}
}

struct NullTexture;

impl Texture for NullTexture {
    fn bind(&self, _unit: u32) {}
}

/// Pretends every texture except the skybox exists
struct ScriptedLoader;

impl TextureLoader for ScriptedLoader {
    fn load(&mut self, path: &str) -> orrery::Result<Box<dyn Texture>> {
        if path.ends_with("stars.jpg") {
            return Err(OrreryError::texture_load(path, "not bundled with the demo"));
        }
        Ok(Box::new(NullTexture))
    }
}

struct ConsoleText;

impl TextRenderer for ConsoleText {
    fn draw_text(&mut self, text: &str, _position: [f32; 2], _scale: f32, color: [f32; 4]) {
        println!("    [hud a={:.2}] {}", color[3], text);
    }
}

#[derive(Default)]
struct ScriptedInput {
    keys: HashSet<KeyCode>,
}

impl InputSource for ScriptedInput {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn is_mouse_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn cursor_position(&self) -> (f32, f32) {
        (640.0, 360.0)
    }

    fn scroll_delta(&self) -> f32 {
        0.0
    }
}

/// (frame, key held during that frame, what it demonstrates)
const SCRIPT: &[(u32, KeyCode, &str)] = &[
    (30, KeyCode::ArrowRight, "next planet"),
    (60, KeyCode::Equal, "faster"),
    (61, KeyCode::Equal, "held key does not repeat"),
    (90, KeyCode::Digit3, "jump to Jupiter"),
    (120, KeyCode::KeyT, "track Jupiter"),
    (200, KeyCode::Space, "pause"),
    (260, KeyCode::KeyH, "hide HUD"),
    (300, KeyCode::KeyR, "reset camera"),
];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = OrreryApp::new(OrreryConfig::default()).context("building the explorer")?;
    let missing = app.load_textures(&mut ScriptedLoader);
    println!("Loaded textures ({} missing)", missing);

    let sphere = generate_sphere(DEFAULT_SECTORS, DEFAULT_STACKS);
    let meshes = SceneMeshes {
        sphere: MeshHandle::new(1, sphere.expanded().len() as u32),
        belt: MeshHandle::new(2, app.belt().len() as u32),
    };

    let mut backend = HeadlessBackend::default();
    let mut belt_backend = HeadlessBackend::default();
    let mut input = ScriptedInput::default();
    let mut shadow_passes = 0u32;

    for frame in 0..=330u32 {
        input.keys.clear();
        let mut note = None;
        for &(at, key, label) in SCRIPT {
            if at == frame {
                input.keys.insert(key);
                note = Some(label);
            }
        }

        let outcome = app.frame(frame as f64 / 60.0, &input);
        let mut surface_backend = HeadlessBackend::default();
        let rendered = app.render(
            &mut backend,
            &mut HeadlessSurface(&mut surface_backend),
            &mut belt_backend,
            meshes,
        );
        if rendered.shadow_dirty {
            shadow_passes += 1;
        }
        backend.triangle_draws += surface_backend.triangle_draws;
        backend.point_draws += surface_backend.point_draws;

        if let Some(label) = note {
            let system = app.system();
            println!(
                "frame {:>3}: {:<26} selected={:<8} scale={:>5.2}x paused={} tracking={}",
                frame,
                label,
                system.selected_name(),
                system.time_scale(),
                system.is_paused(),
                app.camera().camera.is_tracking()
            );
            app.render_hud(&mut ConsoleText);
        }

        if outcome.quit_requested {
            break;
        }
    }

    let metrics = app.metrics();
    println!(
        "Done: {} triangle draws, {} point draws, {} uniforms, {:.1} fps average",
        backend.triangle_draws, backend.point_draws, backend.uniforms_set, metrics.fps
    );
    println!(
        "Shadow passes: {} ({:?})",
        shadow_passes,
        app.shadow_cache().get_stats()
    );

    Ok(())
}
