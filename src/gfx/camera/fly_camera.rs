use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::CameraConfig;
use cgmath::*;

pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 8.0;
pub const SENSITIVITY: f32 = 0.08;
pub const ZOOM: f32 = 45.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;
pub const PITCH_LIMIT: f32 = 89.0;

/// Lower and upper fraction of the tracking distance tolerated before snapping back
const TRACKING_BAND: (f32, f32) = (0.8, 1.2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-fly camera with an optional target-tracking mode.
///
/// In free-fly mode the view follows `yaw`/`pitch`. In tracking mode the
/// camera always faces `target` and stays near `tracking_distance` from it.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
    pub world_up: Vector3<f32>,
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    tracking: bool,
    target: Vector3<f32>,
    pub tracking_distance: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>) -> Self {
        let mut camera = Self {
            position,
            front: -Vector3::unit_z(),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: Vector3::unit_y(),
            yaw: YAW,
            pitch: PITCH,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            zoom: ZOOM,
            tracking: false,
            target: Vector3::zero(),
            tracking_distance: 15.0,
            aspect: 16.0 / 9.0,
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update_camera_vectors();
        camera
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.start_position);
        camera.yaw = config.yaw;
        camera.pitch = config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera.zoom = config.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        camera.tracking_distance = config.tracking_distance;
        camera.aspect = aspect;
        camera.znear = config.near_plane;
        camera.zfar = config.far_plane;
        camera.update_camera_vectors();
        camera
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn target(&self) -> Vector3<f32> {
        self.target
    }

    /// Looks at the target while tracking, along `front` otherwise
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        if self.tracking {
            Matrix4::look_at_rh(eye, Point3::from_vec(self.target), self.world_up)
        } else {
            Matrix4::look_at_rh(eye, eye + self.front, self.up)
        }
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(Deg(self.zoom), self.aspect, self.znear, self.zfar)
    }

    /// Moves the camera by `speed * delta_time` along the mode's basis vectors.
    ///
    /// Tracking mode moves relative to the direction towards the target, on
    /// the horizontal plane, so forward/left/right orbit the focused body.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;

        let (forward, right) = if self.tracking {
            let to_target = self.target - self.position;
            let right = to_target.cross(self.world_up);
            if right.magnitude2() < 1e-8 {
                // Directly above or below the target: no horizontal basis
                (Vector3::zero(), Vector3::zero())
            } else {
                let right = right.normalize();
                (self.world_up.cross(right).normalize(), right)
            }
        } else {
            (self.front, self.right)
        };

        match direction {
            CameraMovement::Forward => self.position += forward * velocity,
            CameraMovement::Backward => self.position -= forward * velocity,
            CameraMovement::Left => self.position -= right * velocity,
            CameraMovement::Right => self.position += right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        self.yaw += xoffset * self.mouse_sensitivity;
        self.pitch += yoffset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    pub fn process_mouse_scroll(&mut self, yoffset: f32) {
        self.zoom = (self.zoom - yoffset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Switches modes. Entering tracking projects the camera onto the
    /// tracking sphere around `target`, keeping its current bearing.
    pub fn set_tracking_mode(&mut self, enabled: bool, target: Vector3<f32>) {
        self.tracking = enabled;
        self.target = target;

        if enabled {
            let offset = self.position - target;
            let direction = if offset.magnitude2() > 1e-8 {
                offset.normalize()
            } else {
                -self.front
            };
            self.position = target + direction * self.tracking_distance;
            log::debug!("Camera tracking target at {:?}", target);
        } else {
            log::debug!("Camera back in free-fly mode");
        }
    }

    /// Moves the tracked point without re-projecting the camera
    pub fn set_target(&mut self, target: Vector3<f32>) {
        self.target = target;
    }

    /// Snaps back to the nominal distance once the camera leaves the
    /// [0.8, 1.2] band around it. Inside the band nothing changes.
    pub fn update_tracking(&mut self, _delta_time: f32) {
        if !self.tracking {
            return;
        }

        let offset = self.target - self.position;
        let distance = offset.magnitude();
        if distance < 1e-4 {
            self.position = self.target - self.front * self.tracking_distance;
            return;
        }

        let (low, high) = TRACKING_BAND;
        if distance > self.tracking_distance * high || distance < self.tracking_distance * low {
            let to_target = offset / distance;
            self.position = self.target - to_target * self.tracking_distance;
        }
    }

    /// Returns to free-fly at `position` with the default orientation
    pub fn reset_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.yaw = YAW;
        self.pitch = PITCH;
        self.tracking = false;
        self.update_camera_vectors();
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }

    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (Deg(self.yaw), Deg(self.pitch));
        let front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_vec3_near;

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = FlyCamera::new(Vector3::new(0.0, 5.0, 15.0));
        assert_vec3_near(camera.front, -Vector3::unit_z(), 1e-5);
        assert_vec3_near(camera.right, Vector3::unit_x(), 1e-5);
        assert_vec3_near(camera.up, Vector3::unit_y(), 1e-5);
    }

    #[test]
    fn test_free_fly_moves_along_front() {
        let mut camera = FlyCamera::new(Vector3::zero());
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        assert_vec3_near(camera.position, Vector3::new(0.0, 0.0, -4.0), 1e-5);

        camera.process_keyboard(CameraMovement::Up, 0.25);
        assert_vec3_near(camera.position, Vector3::new(0.0, 2.0, -4.0), 1e-5);
    }

    #[test]
    fn test_pitch_is_constrained() {
        let mut camera = FlyCamera::new(Vector3::zero());
        camera.process_mouse_movement(0.0, 10_000.0, true);
        assert_eq!(camera.pitch, PITCH_LIMIT);

        camera.process_mouse_movement(0.0, -100_000.0, true);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_unconstrained_pitch_passes_limit() {
        let mut camera = FlyCamera::new(Vector3::zero());
        camera.process_mouse_movement(0.0, 1250.0, false);
        assert!((camera.pitch - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = FlyCamera::new(Vector3::zero());
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom, MIN_ZOOM);
        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_entering_tracking_projects_onto_sphere() {
        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 40.0));
        camera.tracking_distance = 10.0;
        camera.set_tracking_mode(true, Vector3::new(0.0, 0.0, 5.0));

        assert!(camera.is_tracking());
        assert_vec3_near(camera.position, Vector3::new(0.0, 0.0, 15.0), 1e-5);
    }

    #[test]
    fn test_tracking_deadband_then_snap() {
        let mut camera = FlyCamera::new(Vector3::new(10.0, 0.0, 0.0));
        camera.tracking_distance = 10.0;
        camera.set_tracking_mode(true, Vector3::zero());

        // 11 is inside [8, 12]: untouched
        camera.position = Vector3::new(11.0, 0.0, 0.0);
        camera.update_tracking(0.016);
        assert_vec3_near(camera.position, Vector3::new(11.0, 0.0, 0.0), 1e-5);

        // 13 drifts out: snap back to exactly 10 along the same bearing
        camera.position = Vector3::new(13.0, 0.0, 0.0);
        camera.update_tracking(0.016);
        assert_vec3_near(camera.position, Vector3::new(10.0, 0.0, 0.0), 1e-5);

        camera.position = Vector3::new(0.0, 0.0, 5.0);
        camera.update_tracking(0.016);
        assert_vec3_near(camera.position, Vector3::new(0.0, 0.0, 10.0), 1e-5);
    }

    #[test]
    fn test_tracking_movement_orbits_target() {
        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 10.0));
        camera.tracking_distance = 10.0;
        camera.set_tracking_mode(true, Vector3::zero());

        // Facing -Z towards the target, right is +X
        camera.process_keyboard(CameraMovement::Right, 0.25);
        assert_vec3_near(camera.position, Vector3::new(2.0, 0.0, 10.0), 1e-5);

        camera.process_keyboard(CameraMovement::Forward, 0.0);
        assert_vec3_near(camera.position, Vector3::new(2.0, 0.0, 10.0), 1e-5);
    }

    #[test]
    fn test_entering_tracking_on_target_backs_off_along_front() {
        let target = Vector3::new(4.0, 1.0, -2.0);
        let mut camera = FlyCamera::new(target);
        camera.tracking_distance = 10.0;
        camera.set_tracking_mode(true, target);

        // front is -Z, so the camera lands behind it on +Z
        assert_vec3_near(camera.position, target + Vector3::new(0.0, 0.0, 10.0), 1e-5);
    }

    #[test]
    fn test_tracking_straight_above_only_moves_vertically() {
        let mut camera = FlyCamera::new(Vector3::new(0.0, 20.0, 0.0));
        camera.tracking_distance = 10.0;
        camera.set_tracking_mode(true, Vector3::zero());
        assert_vec3_near(camera.position, Vector3::new(0.0, 10.0, 0.0), 1e-5);

        for direction in [
            CameraMovement::Forward,
            CameraMovement::Backward,
            CameraMovement::Left,
            CameraMovement::Right,
        ] {
            camera.process_keyboard(direction, 0.25);
            assert_vec3_near(camera.position, Vector3::new(0.0, 10.0, 0.0), 1e-5);
        }

        camera.process_keyboard(CameraMovement::Up, 0.25);
        assert_vec3_near(camera.position, Vector3::new(0.0, 12.0, 0.0), 1e-5);
    }

    #[test]
    fn test_tracking_view_faces_target() {
        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 20.0));
        camera.set_tracking_mode(true, Vector3::new(3.0, 0.0, 0.0));

        let target = camera.view_matrix() * Vector4::new(3.0, 0.0, 0.0, 1.0);
        assert!(target.x.abs() < 1e-4);
        assert!(target.y.abs() < 1e-4);
        assert!(target.z < 0.0);
    }

    #[test]
    fn test_reset_leaves_tracking() {
        let mut camera = FlyCamera::new(Vector3::zero());
        camera.process_mouse_movement(200.0, 50.0, true);
        camera.set_tracking_mode(true, Vector3::new(1.0, 0.0, 0.0));

        camera.reset_position(Vector3::new(0.0, 5.0, 20.0));

        assert!(!camera.is_tracking());
        assert_eq!(camera.yaw, YAW);
        assert_eq!(camera.pitch, PITCH);
        assert_vec3_near(camera.front, -Vector3::unit_z(), 1e-5);
    }

    #[test]
    fn test_uniform_tracks_eye() {
        let mut camera = FlyCamera::new(Vector3::new(1.0, 2.0, 3.0));
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position, [1.0, 2.0, 3.0, 1.0]);
    }
}
