//! Celestial bodies
//!
//! Sun, planets and moons are one [`CelestialBody`] type with a closed
//! [`BodyKind`]. Bodies live in the orchestrator's arena and refer to each
//! other through [`BodyId`] handles: a planet lists its moons, a moon names
//! its parent.

use cgmath::{InnerSpace, Matrix4, Rad, Vector3, Zero};
use rand::Rng;

use super::facts::FactDeck;
use super::orbit::Orbit;
use crate::gfx::picking::{BoundingSphere, Ray};
use crate::gfx::rendering::{uniforms, MeshHandle, RenderContext};

/// Moons spin at this fraction of their orbital speed
pub const MOON_SPIN_RATIO: f32 = 0.8;

/// Stable handle into the body arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetState {
    pub orbit: Orbit,
    pub moons: Vec<BodyId>,
    pub facts: FactDeck,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoonState {
    pub parent: BodyId,
    pub orbit: Orbit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Sun,
    Planet(PlanetState),
    Moon(MoonState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    name: String,
    radius: f32,
    pub texture_path: String,
    /// Drawn instead of the shared sphere when set
    pub mesh: Option<MeshHandle>,
    position: Vector3<f32>,
    /// Euler angles in radians; only Y is animated
    rotation: Vector3<f32>,
    pub rotation_speed: f32,
    elapsed: f32,
    kind: BodyKind,
}

impl CelestialBody {
    fn with_kind(name: &str, radius: f32, texture_path: &str, rotation_speed: f32, kind: BodyKind) -> Self {
        Self {
            name: name.to_string(),
            radius,
            texture_path: texture_path.to_string(),
            mesh: None,
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            rotation_speed,
            elapsed: 0.0,
            kind,
        }
    }

    /// The sun sits at the origin and only spins
    pub fn sun(radius: f32, rotation_speed: f32, texture_path: &str) -> Self {
        Self::with_kind("Sun", radius, texture_path, rotation_speed, BodyKind::Sun)
    }

    pub fn planet(
        name: &str,
        radius: f32,
        texture_path: &str,
        orbit: Orbit,
        rotation_speed: f32,
        facts: FactDeck,
    ) -> Self {
        let mut body = Self::with_kind(
            name,
            radius,
            texture_path,
            rotation_speed,
            BodyKind::Planet(PlanetState {
                orbit,
                moons: Vec::new(),
                facts,
            }),
        );
        body.position = orbit.position_around(Vector3::zero());
        body
    }

    /// A moon placed on its orbit around `parent_position`
    pub fn moon(
        name: &str,
        radius: f32,
        texture_path: &str,
        parent: BodyId,
        parent_position: Vector3<f32>,
        orbit: Orbit,
    ) -> Self {
        let mut body = Self::with_kind(
            name,
            radius,
            texture_path,
            orbit.angular_speed * MOON_SPIN_RATIO,
            BodyKind::Moon(MoonState { parent, orbit }),
        );
        body.position = orbit.position_around(parent_position);
        body
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    pub fn is_planet(&self) -> bool {
        matches!(self.kind, BodyKind::Planet(_))
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        match &self.kind {
            BodyKind::Sun => None,
            BodyKind::Planet(planet) => Some(&planet.orbit),
            BodyKind::Moon(moon) => Some(&moon.orbit),
        }
    }

    pub fn parent(&self) -> Option<BodyId> {
        match &self.kind {
            BodyKind::Moon(moon) => Some(moon.parent),
            _ => None,
        }
    }

    /// Moons attached to a planet, in insertion order
    pub fn moons(&self) -> &[BodyId] {
        match &self.kind {
            BodyKind::Planet(planet) => &planet.moons,
            _ => &[],
        }
    }

    pub(crate) fn attach_moon(&mut self, moon: BodyId) -> bool {
        match &mut self.kind {
            BodyKind::Planet(planet) => {
                planet.moons.push(moon);
                true
            }
            _ => false,
        }
    }

    /// Advances simulated time and recomputes position and spin.
    ///
    /// `anchor` is what the body orbits: the origin for planets, the parent's
    /// position as of this tick for moons. The sun ignores it.
    pub fn update(&mut self, delta_time: f32, anchor: Vector3<f32>) {
        self.elapsed += delta_time;

        match &mut self.kind {
            BodyKind::Sun => {}
            BodyKind::Planet(PlanetState { orbit, .. }) | BodyKind::Moon(MoonState { orbit, .. }) => {
                orbit.advance(delta_time);
                self.position = orbit.position_around(anchor);
            }
        }

        self.rotation.y = self.elapsed * self.rotation_speed;
    }

    /// translate * rotate(Y) * scale(radius)
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_scale(self.radius)
    }

    /// Binds the texture when loaded and issues one draw call.
    ///
    /// The sun also publishes itself as the light position.
    pub fn render(&self, ctx: &mut RenderContext) {
        ctx.bind_texture(&self.texture_path);
        let model = self.model_matrix();
        if matches!(self.kind, BodyKind::Sun) {
            ctx.shader.set_mat4(uniforms::MODEL, &model);
            ctx.shader.set_vec3(uniforms::LIGHT_POS, self.position);
            ctx.surface.draw_triangles(self.mesh.unwrap_or(ctx.sphere));
        } else {
            ctx.draw_model(&model, self.mesh);
        }
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.radius)
    }

    /// Distance to the nearest positive hit against the bounding sphere
    pub fn intersects_ray(&self, origin: Vector3<f32>, direction: Vector3<f32>) -> Option<f32> {
        if direction.magnitude2() <= f32::EPSILON {
            return None;
        }
        self.bounding_sphere()
            .intersect_ray(&Ray::new(origin, direction))
    }

    pub fn facts(&self) -> Option<&FactDeck> {
        match &self.kind {
            BodyKind::Planet(planet) => Some(&planet.facts),
            _ => None,
        }
    }

    /// Draws a fresh fact. Bodies without facts return an empty string.
    pub fn choose_random_fact<R: Rng>(&mut self, rng: &mut R) -> &str {
        match &mut self.kind {
            BodyKind::Planet(planet) => planet.facts.choose_random(rng),
            _ => "",
        }
    }

    pub fn current_fact(&self) -> &str {
        self.facts().map(FactDeck::current).unwrap_or("")
    }
}
