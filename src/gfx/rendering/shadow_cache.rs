//! Shadow map caching
//!
//! The sun is the only light. Its shadow map only needs regenerating when:
//! - The light-space projection changes (the focus body moved)
//! - A body transform changes (anything orbits or spins)
//! - Manual cache invalidation is requested
//!
//! While the simulation is paused nothing moves, so the cached map is reused.

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};
use std::collections::HashMap;

/// Half-width of the orthographic light frustum around the focus point
pub const DEFAULT_SHADOW_EXTENT: f32 = 25.0;

/// Tracks the state of the sun light for shadow map caching
#[derive(Debug, Clone, PartialEq)]
pub struct LightState {
    /// Light position
    pub position: Vector3<f32>,
    /// Point the light frustum is centered on
    pub focus: Vector3<f32>,
    /// Light view-projection matrix
    pub view_proj_matrix: Matrix4<f32>,
}

impl LightState {
    /// Builds an orthographic light-space matrix looking from `light` at `focus`.
    ///
    /// A focus that coincides with the light falls back to looking along +X.
    pub fn new(light: Vector3<f32>, focus: Vector3<f32>, extent: f32) -> Self {
        let offset = focus - light;
        let distance = offset.magnitude();
        let direction = if distance > 1e-4 {
            offset / distance
        } else {
            Vector3::unit_x()
        };
        let up = if direction.y.abs() > 0.99 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };

        let eye = Point3::new(light.x, light.y, light.z);
        let light_view = Matrix4::look_at_rh(eye, eye + direction, up);
        let light_proj = cgmath::ortho(
            -extent,
            extent,
            -extent,
            extent,
            0.1,
            distance + extent * 2.0,
        );

        Self {
            position: light,
            focus,
            view_proj_matrix: light_proj * light_view,
        }
    }

    /// Checks if this light state differs significantly from another
    pub fn differs_from(&self, other: &LightState) -> bool {
        matrices_differ(&self.view_proj_matrix, &other.view_proj_matrix)
    }
}

fn matrices_differ(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
    const EPSILON: f32 = 0.001;
    let a: &[f32; 16] = a.as_ref();
    let b: &[f32; 16] = b.as_ref();
    a.iter().zip(b.iter()).any(|(x, y)| (x - y).abs() > EPSILON)
}

/// Shadow map cache manager
pub struct ShadowCache {
    /// Whether the shadow map is currently valid
    is_valid: bool,
    /// Last known light state
    last_light_state: Option<LightState>,
    /// Last known body transforms, keyed by body name
    last_body_states: HashMap<String, Matrix4<f32>>,
    /// Manual invalidation flag
    force_invalidate: bool,
    regenerations: u64,
    reuses: u64,
}

impl ShadowCache {
    pub fn new() -> Self {
        Self {
            is_valid: false,
            last_light_state: None,
            last_body_states: HashMap::new(),
            force_invalidate: false,
            regenerations: 0,
            reuses: 0,
        }
    }

    /// Checks if the shadow map needs to be regenerated
    pub fn needs_update(&mut self, light: &LightState, bodies: &[(&str, Matrix4<f32>)]) -> bool {
        if self.force_invalidate {
            self.force_invalidate = false;
            self.is_valid = false;
            return true;
        }

        if !self.is_valid {
            return true;
        }

        match &self.last_light_state {
            Some(last) if !light.differs_from(last) => {}
            _ => {
                self.is_valid = false;
                return true;
            }
        }

        if bodies.len() != self.last_body_states.len() {
            self.is_valid = false;
            return true;
        }

        for (name, transform) in bodies {
            match self.last_body_states.get(*name) {
                Some(last) if !matrices_differ(transform, last) => {}
                _ => {
                    self.is_valid = false;
                    return true;
                }
            }
        }

        false
    }

    /// Marks the shadow map as valid and updates cached state
    pub fn mark_valid(&mut self, light: &LightState, bodies: &[(&str, Matrix4<f32>)]) {
        self.is_valid = true;
        self.last_light_state = Some(light.clone());
        self.last_body_states.clear();
        for (name, transform) in bodies {
            self.last_body_states.insert(name.to_string(), *transform);
        }
    }

    /// Combined check-and-commit used once per frame.
    ///
    /// # Returns
    /// Whether the host must re-render the shadow map this frame
    pub fn prepare(&mut self, light: &LightState, bodies: &[(&str, Matrix4<f32>)]) -> bool {
        let dirty = self.needs_update(light, bodies);
        if dirty {
            self.regenerations += 1;
            self.mark_valid(light, bodies);
        } else {
            self.reuses += 1;
        }
        dirty
    }

    /// Forces the cache to be invalidated on the next check
    pub fn invalidate(&mut self) {
        self.force_invalidate = true;
        self.is_valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid && !self.force_invalidate
    }

    /// Clears all cached state
    pub fn clear(&mut self) {
        self.is_valid = false;
        self.last_light_state = None;
        self.last_body_states.clear();
        self.force_invalidate = false;
    }

    /// Gets statistics about the cache
    pub fn get_stats(&self) -> ShadowCacheStats {
        ShadowCacheStats {
            is_valid: self.is_valid,
            tracked_bodies: self.last_body_states.len(),
            regenerations: self.regenerations,
            reuses: self.reuses,
        }
    }
}

/// Statistics about the shadow cache for debugging
#[derive(Debug)]
pub struct ShadowCacheStats {
    pub is_valid: bool,
    pub tracked_bodies: usize,
    pub regenerations: u64,
    pub reuses: u64,
}

impl Default for ShadowCache {
    fn default() -> Self {
        Self::new()
    }
}
