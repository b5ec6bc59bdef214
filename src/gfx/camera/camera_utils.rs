use cgmath::{Matrix4, SquareMatrix, Vector3};

use super::{camera_controller::CameraController, fly_camera::FlyCamera};
use crate::config::CameraConfig;

pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
    /// Where [`CameraManager::reset`] puts the camera back
    pub home: Vector3<f32>,
}

impl CameraManager {
    pub fn new(camera: FlyCamera, controller: CameraController) -> Self {
        let home = camera.position;
        Self {
            camera,
            controller,
            home,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(FlyCamera::from_config(config, aspect), CameraController::new())
    }

    /// Back to the home position in free-fly mode
    pub fn reset(&mut self) {
        log::info!("Resetting camera to {:?}", self.home);
        self.camera.reset_position(self.home);
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Camera block for hosts that upload a uniform buffer instead of setting
/// `view`/`projection` through [`ShaderProgram`](crate::gfx::rendering::ShaderProgram).
///
/// Refreshed by [`FlyCamera::update_view_proj`](super::FlyCamera::update_view_proj)
/// every [`OrreryApp::frame`](crate::OrreryApp::frame); upload it with
/// `bytemuck::bytes_of`.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_tightly_packed() {
        let uniform = CameraUniform::default();
        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), 80);
    }

    #[test]
    fn test_matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let array = convert_matrix4_to_array(m);
        assert_eq!(array[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_reset_returns_home() {
        let mut manager = CameraManager::from_config(&CameraConfig::default(), 16.0 / 9.0);
        manager.camera.position = Vector3::new(40.0, 0.0, 0.0);
        manager.camera.set_tracking_mode(true, Vector3::new(8.0, 0.0, 0.0));

        manager.reset();

        assert_eq!(manager.camera.position, Vector3::new(0.0, 5.0, 15.0));
        assert!(!manager.camera.is_tracking());
    }
}
