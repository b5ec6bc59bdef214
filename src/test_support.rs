//! Recording fakes for the host seams, shared by unit tests

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use cgmath::{Matrix4, Vector3};
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::error::{OrreryError, Result};
use crate::gfx::rendering::{DrawSurface, MeshHandle, ShaderProgram, Texture};
use crate::gfx::resources::TextureLoader;
use crate::input::InputSource;
use crate::ui::TextRenderer;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram,
    Mat4(String, Matrix4<f32>),
    Vec3(String, Vector3<f32>),
    Int(String, i32),
    Float(String, f32),
    DrawTriangles(MeshHandle),
    DrawPoints(MeshHandle),
    DepthWrite(bool),
    BindTexture { id: u32, unit: u32 },
}

/// Shared, ordered log written by every fake
#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Model matrices in upload order
    pub fn models(&self) -> Vec<Matrix4<f32>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Mat4(name, m) if name == "model" => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::DrawTriangles(_) | Call::DrawPoints(_)))
            .count()
    }
}

pub struct RecordingShader(pub CallLog);

impl ShaderProgram for RecordingShader {
    fn use_program(&mut self) {
        self.0.push(Call::UseProgram);
    }

    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        self.0.push(Call::Mat4(name.to_string(), *value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.0.push(Call::Vec3(name.to_string(), value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.0.push(Call::Int(name.to_string(), value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.0.push(Call::Float(name.to_string(), value));
    }
}

pub struct RecordingSurface(pub CallLog);

impl DrawSurface for RecordingSurface {
    fn draw_triangles(&mut self, mesh: MeshHandle) {
        self.0.push(Call::DrawTriangles(mesh));
    }

    fn draw_points(&mut self, mesh: MeshHandle) {
        self.0.push(Call::DrawPoints(mesh));
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.0.push(Call::DepthWrite(enabled));
    }
}

pub struct RecordingTexture {
    pub id: u32,
    log: CallLog,
}

impl Texture for RecordingTexture {
    fn bind(&self, unit: u32) {
        self.log.push(Call::BindTexture { id: self.id, unit });
    }
}

/// Hands out recording textures with sequential ids, failing listed paths
pub struct FakeTextureLoader {
    log: CallLog,
    failing: HashSet<String>,
    next_id: u32,
    loads: usize,
}

impl FakeTextureLoader {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failing: HashSet::new(),
            next_id: 0,
            loads: 0,
        }
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads
    }
}

impl TextureLoader for FakeTextureLoader {
    fn load(&mut self, path: &str) -> Result<Box<dyn Texture>> {
        self.loads += 1;
        if self.failing.contains(path) {
            return Err(OrreryError::texture_load(path, "file not found"));
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(Box::new(RecordingTexture {
            id,
            log: self.log.clone(),
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub position: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Default)]
pub struct RecordingText {
    pub lines: Vec<TextLine>,
}

impl TextRenderer for RecordingText {
    fn draw_text(&mut self, text: &str, position: [f32; 2], _scale: f32, color: [f32; 4]) {
        self.lines.push(TextLine {
            text: text.to_string(),
            position,
            color,
        });
    }
}

/// Input surface whose state tests set directly
#[derive(Default)]
pub struct FakeInput {
    pub keys: HashSet<KeyCode>,
    pub buttons: HashSet<MouseButton>,
    pub cursor: (f32, f32),
    pub scroll: f32,
}

impl FakeInput {
    pub fn press(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }
}

impl InputSource for FakeInput {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn cursor_position(&self) -> (f32, f32) {
        self.cursor
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll
    }
}

pub fn assert_vec3_near(actual: Vector3<f32>, expected: Vector3<f32>, epsilon: f32) {
    assert!(
        (actual.x - expected.x).abs() < epsilon
            && (actual.y - expected.y).abs() < epsilon
            && (actual.z - expected.z).abs() < epsilon,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
