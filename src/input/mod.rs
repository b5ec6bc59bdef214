//! # Input Adapter
//!
//! Maps one frame of polled input onto camera, orchestrator and HUD
//! operations. Discrete actions fire on the up-to-down edge only, so holding
//! a key triggers it once.
//!
//! ```rust
//! use orrery::input::{InputState, KeyBindings};
//!
//! let bindings = KeyBindings::default();
//! let state = InputState::new();
//! assert!(!state.was_pressed(bindings.pause));
//! ```

use std::collections::HashSet;

use winit::{event::MouseButton, keyboard::KeyCode};

use crate::gfx::camera::{CameraManager, CameraMovement};
use crate::gfx::picking::screen_to_ray;
use crate::simulation::SolarSystem;
use crate::ui::Hud;

/// Polling surface sampled once per frame
pub trait InputSource {
    fn is_key_down(&self, key: KeyCode) -> bool;
    fn is_mouse_down(&self, button: MouseButton) -> bool;
    /// Pixels from the top-left corner of the viewport
    fn cursor_position(&self) -> (f32, f32);
    /// Scroll since the previous frame; positive zooms in
    fn scroll_delta(&self) -> f32;
}

/// Previous-frame key and button states for edge detection
#[derive(Debug, Default)]
pub struct InputState {
    previous_keys: HashSet<KeyCode>,
    previous_buttons: HashSet<MouseButton>,
    pressed_keys: HashSet<KeyCode>,
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples `keys` and `buttons` and records which went down this frame
    pub fn update(&mut self, source: &dyn InputSource, keys: &[KeyCode], buttons: &[MouseButton]) {
        let keys_down: HashSet<KeyCode> = keys
            .iter()
            .copied()
            .filter(|&key| source.is_key_down(key))
            .collect();
        let buttons_down: HashSet<MouseButton> = buttons
            .iter()
            .copied()
            .filter(|&button| source.is_mouse_down(button))
            .collect();

        self.pressed_keys = keys_down.difference(&self.previous_keys).copied().collect();
        self.pressed_buttons = buttons_down
            .difference(&self.previous_buttons)
            .copied()
            .collect();

        self.previous_keys = keys_down;
        self.previous_buttons = buttons_down;
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn was_clicked(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub next_planet: KeyCode,
    pub previous_planet: KeyCode,
    /// Position in the list is the planet index it selects
    pub select_planet: Vec<KeyCode>,
    pub pause: KeyCode,
    pub faster: KeyCode,
    pub slower: KeyCode,
    pub toggle_tracking: KeyCode,
    pub toggle_hud: KeyCode,
    pub reset_camera: KeyCode,
    pub quit: KeyCode,
    pub pick: MouseButton,
    pub look: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            up: KeyCode::ShiftLeft,
            down: KeyCode::ControlLeft,
            next_planet: KeyCode::ArrowRight,
            previous_planet: KeyCode::ArrowLeft,
            select_planet: vec![
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::Digit5,
                KeyCode::Digit6,
                KeyCode::Digit7,
                KeyCode::Digit8,
                KeyCode::Digit9,
            ],
            pause: KeyCode::Space,
            faster: KeyCode::Equal,
            slower: KeyCode::Minus,
            toggle_tracking: KeyCode::KeyT,
            toggle_hud: KeyCode::KeyH,
            reset_camera: KeyCode::KeyR,
            quit: KeyCode::Escape,
            pick: MouseButton::Left,
            look: MouseButton::Right,
        }
    }
}

impl KeyBindings {
    fn movement(&self) -> [(KeyCode, CameraMovement); 6] {
        [
            (self.forward, CameraMovement::Forward),
            (self.backward, CameraMovement::Backward),
            (self.left, CameraMovement::Left),
            (self.right, CameraMovement::Right),
            (self.up, CameraMovement::Up),
            (self.down, CameraMovement::Down),
        ]
    }

    /// Keys whose press edges trigger actions
    pub fn action_keys(&self) -> Vec<KeyCode> {
        let mut keys = vec![
            self.next_planet,
            self.previous_planet,
            self.pause,
            self.faster,
            self.slower,
            self.toggle_tracking,
            self.toggle_hud,
            self.reset_camera,
            self.quit,
        ];
        keys.extend_from_slice(&self.select_planet);
        keys
    }

    pub fn action_buttons(&self) -> [MouseButton; 1] {
        [self.pick]
    }
}

/// Everything input is allowed to touch during one frame
pub struct InputContext<'a> {
    pub camera: &'a mut CameraManager,
    pub system: &'a mut SolarSystem,
    pub hud: &'a mut Hud,
    /// Viewport size in pixels
    pub viewport: (f32, f32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub quit_requested: bool,
    pub selection_changed: bool,
}

/// Applies one frame of input.
///
/// Held movement keys and mouse look act every frame; everything else acts
/// on the press edge. `delta_time` is wall-clock frame time.
pub fn apply_input(
    ctx: &mut InputContext,
    source: &dyn InputSource,
    state: &mut InputState,
    bindings: &KeyBindings,
    delta_time: f32,
) -> InputOutcome {
    state.update(source, &bindings.action_keys(), &bindings.action_buttons());

    let CameraManager {
        camera, controller, ..
    } = &mut *ctx.camera;

    let held = bindings
        .movement()
        .into_iter()
        .filter(|&(key, _)| source.is_key_down(key))
        .map(|(_, movement)| movement);
    controller.process_movement(held, delta_time, camera);
    controller.process_cursor(source.cursor_position(), source.is_mouse_down(bindings.look), camera);
    controller.process_scroll(source.scroll_delta(), camera);

    let before = ctx.system.selected_index();
    let mut selection_action = false;

    if state.was_pressed(bindings.next_planet) {
        ctx.system.cycle_selection(1);
        selection_action = true;
    }
    if state.was_pressed(bindings.previous_planet) {
        ctx.system.cycle_selection(-1);
        selection_action = true;
    }
    for (index, &key) in bindings.select_planet.iter().enumerate() {
        if state.was_pressed(key) && ctx.system.set_selected(index) {
            selection_action = true;
        }
    }
    if state.was_clicked(bindings.pick) {
        let ray = screen_to_ray(source.cursor_position(), ctx.viewport, &ctx.camera.camera);
        if let Some(index) = ctx.system.pick_planet(ray.origin, ray.direction) {
            ctx.system.set_selected(index);
            selection_action = true;
        }
    }

    if state.was_pressed(bindings.pause) {
        ctx.system.toggle_paused();
    }
    if state.was_pressed(bindings.faster) {
        ctx.system.increase_time_scale();
    }
    if state.was_pressed(bindings.slower) {
        ctx.system.decrease_time_scale();
    }
    if state.was_pressed(bindings.toggle_hud) {
        ctx.hud.toggle();
    }
    if state.was_pressed(bindings.reset_camera) {
        ctx.camera.reset();
    }
    if state.was_pressed(bindings.toggle_tracking) {
        let camera = &mut ctx.camera.camera;
        let enable = !camera.is_tracking() && ctx.system.selected_index().is_some();
        camera.set_tracking_mode(enable, ctx.system.selected_position());
    }

    if selection_action {
        ctx.hud.on_selection_changed();
        if ctx.camera.camera.is_tracking() {
            ctx.camera.camera.set_target(ctx.system.selected_position());
        }
    }

    InputOutcome {
        quit_requested: state.was_pressed(bindings.quit),
        selection_changed: ctx.system.selected_index() != before,
    }
}
