use super::fly_camera::{CameraMovement, FlyCamera};

/// Turns sampled input into camera motion.
///
/// Mouse look is relative: the controller remembers the previous cursor
/// position and feeds the offset to the camera while look is active.
pub struct CameraController {
    /// Multiplier on frame time for keyboard movement
    pub speed_multiplier: f32,
    pub zoom_speed: f32,
    pub constrain_pitch: bool,
    first_mouse: bool,
    last_cursor: (f32, f32),
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            speed_multiplier: 1.0,
            zoom_speed: 1.0,
            constrain_pitch: true,
            first_mouse: true,
            last_cursor: (0.0, 0.0),
        }
    }

    pub fn process_movement(
        &self,
        held: impl IntoIterator<Item = CameraMovement>,
        delta_time: f32,
        camera: &mut FlyCamera,
    ) {
        for movement in held {
            camera.process_keyboard(movement, delta_time * self.speed_multiplier);
        }
    }

    /// Tracks the cursor every frame, rotating the camera only while `look_active`
    pub fn process_cursor(&mut self, cursor: (f32, f32), look_active: bool, camera: &mut FlyCamera) {
        if self.first_mouse {
            self.last_cursor = cursor;
            self.first_mouse = false;
        }

        let xoffset = cursor.0 - self.last_cursor.0;
        // Screen y grows downwards
        let yoffset = self.last_cursor.1 - cursor.1;
        self.last_cursor = cursor;

        if look_active && (xoffset != 0.0 || yoffset != 0.0) {
            camera.process_mouse_movement(xoffset, yoffset, self.constrain_pitch);
        }
    }

    pub fn process_scroll(&self, delta: f32, camera: &mut FlyCamera) {
        if delta != 0.0 {
            camera.process_mouse_scroll(delta * self.zoom_speed);
        }
    }

    /// Forget the last cursor position, e.g. after the window regains focus
    pub fn reset_cursor(&mut self) {
        self.first_mouse = true;
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}
