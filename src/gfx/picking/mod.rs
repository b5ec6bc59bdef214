//! # Body Picking System
//!
//! This module provides mouse picking of celestial bodies using ray-casting
//! against their bounding spheres.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Convert mouse coordinates to a 3D ray in world space
//! 2. **Ray-Sphere Intersection**: Solve the ray/sphere quadratic analytically
//! 3. **Selection**: Return the closest positive-distance hit
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use orrery::gfx::picking::{BoundingSphere, Ray};
//!
//! let ray = Ray::new(Vector3::new(0.0, 0.0, -10.0), Vector3::new(0.0, 0.0, 1.0));
//! let sphere = BoundingSphere::new(Vector3::new(0.0, 0.0, 0.0), 1.0);
//! assert_eq!(sphere.intersect_ray(&ray), Some(9.0));
//! ```

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::camera::FlyCamera;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray, normalizing `direction`
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Sphere bounding a body, centered on its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distance along the ray to the nearest positive root, if any.
    ///
    /// A ray starting inside the sphere reports the exit point. A sphere that
    /// lies entirely behind the origin is a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        if !(a > f32::EPSILON) {
            return None;
        }
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = (-b - sqrt_d) / (2.0 * a);
        let far = (-b + sqrt_d) / (2.0 * a);

        if near > 0.0 {
            Some(near)
        } else if far > 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// Result of a picking operation
#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    /// Position of the picked sphere in the candidate sequence
    pub index: usize,
    /// Distance from ray origin to intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Closest hit among `spheres`. Equal distances keep the earlier candidate.
pub fn pick_closest(
    ray: &Ray,
    spheres: impl IntoIterator<Item = BoundingSphere>,
) -> Option<PickResult> {
    let mut closest_result: Option<PickResult> = None;

    for (index, sphere) in spheres.into_iter().enumerate() {
        if let Some(distance) = sphere.intersect_ray(ray) {
            if closest_result
                .as_ref()
                .map_or(true, |result| distance < result.distance)
            {
                closest_result = Some(PickResult {
                    index,
                    distance,
                    intersection_point: ray.point_at(distance),
                });
            }
        }
    }

    closest_result
}

/// Convert screen coordinates to a world-space ray through the camera's view
pub fn screen_to_ray(screen_pos: (f32, f32), screen_size: (f32, f32), camera: &FlyCamera) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    // Convert screen coordinates to normalized device coordinates (-1 to 1)
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

    let view_proj_matrix = camera.projection_matrix() * camera.view_matrix();
    let inv_view_proj = view_proj_matrix
        .invert()
        .unwrap_or_else(Matrix4::identity);

    let world_near = inv_view_proj * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let world_far = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let near_3d = cgmath::Point3::from_homogeneous(world_near).to_vec();
    let far_3d = cgmath::Point3::from_homogeneous(world_far).to_vec();

    Ray::new(near_3d, far_3d - near_3d)
}
