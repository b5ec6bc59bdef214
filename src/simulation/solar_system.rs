//! The solar system orchestrator
//!
//! Owns every body in one arena, drives simulated time through a
//! [`SimulationClock`], and keeps the single planet selection. "Is selected"
//! is derived from the stored index, so at most one planet can ever report
//! it.

use cgmath::{Matrix4, Vector3, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::bodies::{BodyId, CelestialBody};
use super::catalog::{MoonSpec, PlanetSpec, SystemCatalog};
use super::clock::SimulationClock;
use super::facts::FactDeck;
use super::orbit::Orbit;
use crate::config::TimeConfig;
use crate::gfx::picking::{pick_closest, Ray};
use crate::gfx::rendering::{uniforms, MeshHandle, RenderContext};

pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    sun: Option<BodyId>,
    /// Insertion order is update and render order
    planets: Vec<BodyId>,
    selected: Option<usize>,
    clock: SimulationClock,
    rng: StdRng,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new(&TimeConfig::default())
    }
}

impl SolarSystem {
    /// An empty system. Call [`initialize`](Self::initialize) to populate it.
    pub fn new(time: &TimeConfig) -> Self {
        Self::with_rng(time, StdRng::from_os_rng())
    }

    /// Same as [`new`](Self::new) with reproducible fact draws
    pub fn with_seed(time: &TimeConfig, seed: u64) -> Self {
        Self::with_rng(time, StdRng::seed_from_u64(seed))
    }

    fn with_rng(time: &TimeConfig, rng: StdRng) -> Self {
        Self {
            bodies: Vec::new(),
            sun: None,
            planets: Vec::new(),
            selected: None,
            clock: SimulationClock::new(time),
            rng,
        }
    }

    /// Builds the default system and selects the first planet
    pub fn initialize(&mut self) {
        self.initialize_with(&SystemCatalog::default());
    }

    /// Rebuilds the arena from `catalog`.
    ///
    /// Bodies without a positive radius and moons whose parent planet is not
    /// in the catalog are skipped with a warning. When any planet exists,
    /// index 0 becomes selected.
    pub fn initialize_with(&mut self, catalog: &SystemCatalog) {
        log::info!("Initializing solar system...");

        self.bodies.clear();
        self.planets.clear();
        self.selected = None;

        let sun = &catalog.sun;
        self.sun = Some(self.push(CelestialBody::sun(
            sun.radius,
            sun.rotation_speed,
            &sun.texture_path,
        )));

        for planet in &catalog.planets {
            self.add_planet(planet);
        }
        for moon in &catalog.moons {
            self.add_moon(moon);
        }

        if !self.planets.is_empty() {
            self.select(0);
        }

        log::info!(
            "Solar system initialized with {} planets and {} moons",
            self.planets.len(),
            self.bodies.len() - self.planets.len() - 1
        );
    }

    fn push(&mut self, body: CelestialBody) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Appends a planet after the existing ones. `None` when its radius is not positive.
    pub fn add_planet(&mut self, spec: &PlanetSpec) -> Option<BodyId> {
        if !has_positive_radius(&spec.name, spec.radius) {
            return None;
        }
        let id = self.push(CelestialBody::planet(
            &spec.name,
            spec.radius,
            &spec.texture_path,
            Orbit::new(spec.orbit_radius, spec.orbit_speed),
            spec.rotation_speed,
            FactDeck::new(spec.facts.iter().cloned()),
        ));
        self.planets.push(id);
        Some(id)
    }

    /// Attaches a moon to the planet named by `spec.parent`
    pub fn add_moon(&mut self, spec: &MoonSpec) -> Option<BodyId> {
        if !has_positive_radius(&spec.name, spec.radius) {
            return None;
        }
        let Some(index) = self.find_planet(&spec.parent) else {
            log::warn!(
                "Skipping moon '{}': no planet named '{}'",
                spec.name,
                spec.parent
            );
            return None;
        };
        let parent = self.planets[index];
        let parent_position = self.bodies[parent.index()].position();

        let id = self.push(CelestialBody::moon(
            &spec.name,
            spec.radius,
            &spec.texture_path,
            parent,
            parent_position,
            Orbit::new(spec.orbit_radius, spec.orbit_speed),
        ));
        self.bodies[parent.index()].attach_moon(id);
        Some(id)
    }

    /// Advances every body by the scaled delta and returns that delta.
    ///
    /// Nothing moves while paused.
    pub fn update(&mut self, delta_time: f32) -> f32 {
        let scaled = self.clock.advance(delta_time);
        if self.clock.is_paused() {
            return 0.0;
        }
        self.update_bodies(scaled);
        scaled
    }

    fn update_bodies(&mut self, delta_time: f32) {
        if let Some(sun) = self.sun {
            self.bodies[sun.index()].update(delta_time, Vector3::zero());
        }

        for planet_index in 0..self.planets.len() {
            let planet = self.planets[planet_index].index();
            self.bodies[planet].update(delta_time, Vector3::zero());

            // Moons orbit where the parent is now, not where it was last tick
            let anchor = self.bodies[planet].position();
            for moon_slot in 0..self.bodies[planet].moons().len() {
                let moon = self.bodies[planet].moons()[moon_slot].index();
                self.bodies[moon].update(delta_time, anchor);
            }
        }
    }

    /// Sun first, then each planet followed by its moons
    pub fn render(&self, ctx: &mut RenderContext, camera_position: Vector3<f32>) {
        ctx.shader.set_vec3(uniforms::VIEW_POS, camera_position);

        if let Some(sun) = self.sun() {
            sun.render(ctx);
        }

        for &planet in &self.planets {
            let planet = &self.bodies[planet.index()];
            planet.render(ctx);
            for &moon in planet.moons() {
                self.bodies[moon.index()].render(ctx);
            }
        }
    }

    // Selection

    /// Moves the selection by `step` with wraparound.
    ///
    /// From no selection, a forward step lands on the first planet and a
    /// backward step on the last. With no planets the selection is cleared.
    pub fn cycle_selection(&mut self, step: i32) {
        let count = self.planets.len();
        if count == 0 {
            self.selected = None;
            return;
        }

        let next = match self.selected {
            Some(current) => (current as i64 + step as i64).rem_euclid(count as i64) as usize,
            None if step < 0 => count - 1,
            None => 0,
        };
        self.select(next);
    }

    /// Selects `index`; out of range leaves the selection untouched
    pub fn set_selected(&mut self, index: usize) -> bool {
        if index >= self.planets.len() {
            return false;
        }
        self.select(index);
        true
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        let body = &mut self.bodies[self.planets[index].index()];
        body.choose_random_fact(&mut self.rng);
        log::debug!("Selected planet {} ({})", index, body.name());
    }

    /// Index of the nearest planet hit by the ray
    pub fn pick_planet(&self, origin: Vector3<f32>, direction: Vector3<f32>) -> Option<usize> {
        let ray = Ray::new(origin, direction);
        pick_closest(
            &ray,
            self.planets
                .iter()
                .map(|id| self.bodies[id.index()].bounding_sphere()),
        )
        .map(|hit| hit.index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn selected_planet(&self) -> Option<&CelestialBody> {
        self.selected.and_then(|index| self.planet(index))
    }

    /// Origin when nothing is selected
    pub fn selected_position(&self) -> Vector3<f32> {
        self.selected_planet()
            .map(CelestialBody::position)
            .unwrap_or_else(Vector3::zero)
    }

    pub fn selected_name(&self) -> &str {
        self.selected_planet().map(CelestialBody::name).unwrap_or("")
    }

    pub fn selected_fact(&self) -> &str {
        self.selected_planet()
            .map(CelestialBody::current_fact)
            .unwrap_or("")
    }

    /// Draws a new fact for the selected planet
    pub fn refresh_selected_fact(&mut self) -> &str {
        match self.selected.and_then(|index| self.planets.get(index).copied()) {
            Some(id) => self.bodies[id.index()].choose_random_fact(&mut self.rng),
            None => "",
        }
    }

    // Lookup

    pub fn sun(&self) -> Option<&CelestialBody> {
        self.sun.map(|id| &self.bodies[id.index()])
    }

    pub fn sun_position(&self) -> Vector3<f32> {
        self.sun()
            .map(CelestialBody::position)
            .unwrap_or_else(Vector3::zero)
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    pub fn planet(&self, index: usize) -> Option<&CelestialBody> {
        self.planets.get(index).map(|id| &self.bodies[id.index()])
    }

    pub fn planets(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.planets.iter().map(|id| &self.bodies[id.index()])
    }

    pub fn find_planet(&self, name: &str) -> Option<usize> {
        self.planets()
            .position(|planet| planet.name() == name)
    }

    pub fn moons_of(&self, index: usize) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.planet(index)
            .map(CelestialBody::moons)
            .unwrap_or(&[])
            .iter()
            .map(|id| &self.bodies[id.index()])
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn find_body(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|body| body.name() == name)
            .map(BodyId)
    }

    /// Every body, sun included, in arena order
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Draws `mesh` for this body instead of the shared sphere
    pub fn set_body_mesh(&mut self, id: BodyId, mesh: Option<MeshHandle>) -> bool {
        match self.bodies.get_mut(id.index()) {
            Some(body) => {
                body.mesh = mesh;
                true
            }
            None => false,
        }
    }

    /// Name and model matrix of every body, for shadow invalidation
    pub fn body_transforms(&self) -> Vec<(&str, Matrix4<f32>)> {
        self.bodies
            .iter()
            .map(|body| (body.name(), body.model_matrix()))
            .collect()
    }

    /// Distinct texture paths in arena order
    pub fn texture_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for body in &self.bodies {
            if !paths.contains(&body.texture_path.as_str()) {
                paths.push(&body.texture_path);
            }
        }
        paths
    }

    // Time controls

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.clock.toggle_paused()
    }

    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    pub fn increase_time_scale(&mut self) {
        self.clock.increase_time_scale();
    }

    pub fn decrease_time_scale(&mut self) {
        self.clock.decrease_time_scale();
    }
}

fn has_positive_radius(name: &str, radius: f32) -> bool {
    if radius > 0.0 {
        true
    } else {
        log::warn!("Skipping body '{}': radius {} is not positive", name, radius);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::TextureCache;
    use crate::simulation::catalog::SunSpec;
    use crate::test_support::{assert_vec3_near, Call, CallLog, RecordingShader, RecordingSurface};
    use std::f32::consts::PI;

    fn system() -> SolarSystem {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 42);
        system.initialize();
        system
    }

    fn catalog_with(planets: Vec<PlanetSpec>, moons: Vec<MoonSpec>) -> SystemCatalog {
        SystemCatalog {
            sun: SunSpec::default(),
            planets,
            moons,
        }
    }

    fn planets_on_x(count: usize) -> Vec<PlanetSpec> {
        (0..count)
            .map(|i| {
                PlanetSpec::new(&format!("P{}", i), 0.5, 4.0 * (i + 1) as f32, 0.0, 0.0)
                    .with_facts(&["one", "two"])
            })
            .collect()
    }

    fn assert_single_selection(system: &SolarSystem) {
        let flagged: Vec<usize> = (0..system.planet_count())
            .filter(|&i| system.is_selected(i))
            .collect();
        match system.selected_index() {
            Some(index) => assert_eq!(flagged, vec![index]),
            None => assert!(flagged.is_empty()),
        }
    }

    #[test]
    fn test_initialize_selects_first_planet() {
        let system = system();

        assert_eq!(system.planet_count(), 4);
        assert_eq!(system.selected_index(), Some(0));
        assert_eq!(system.selected_name(), "Earth");
        assert!(!system.selected_fact().is_empty());
        assert_single_selection(&system);
        assert_eq!(system.bodies().len(), 1 + 4 + 3);
    }

    #[test]
    fn test_moons_attach_by_parent_name() {
        let system = system();
        let jupiter = system.find_planet("Jupiter").unwrap();
        let names: Vec<&str> = system.moons_of(jupiter).map(CelestialBody::name).collect();

        assert_eq!(names, ["Io", "Europa"]);
        assert_eq!(system.moons_of(system.find_planet("Mars").unwrap()).count(), 0);
        assert_eq!(system.moons_of(99).count(), 0);
    }

    #[test]
    fn test_orphan_moon_is_skipped() {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 1);
        system.initialize_with(&catalog_with(
            planets_on_x(1),
            vec![MoonSpec::new("Lost", "Nowhere", 0.1, 1.0, 1.0)],
        ));

        assert_eq!(system.bodies().len(), 2);
        assert!(system.find_body("Lost").is_none());
    }

    #[test]
    fn test_bodies_without_positive_radius_are_skipped() {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 1);
        let mut planets = planets_on_x(1);
        planets.push(PlanetSpec::new("Flat", 0.0, 9.0, 0.0, 0.0));
        planets.push(PlanetSpec::new("Inverted", -1.0, 12.0, 0.0, 0.0));
        system.initialize_with(&catalog_with(
            planets,
            vec![
                MoonSpec::new("Speck", "P0", 0.0, 1.0, 1.0),
                MoonSpec::new("Pebble", "Flat", 0.1, 1.0, 1.0),
            ],
        ));

        assert_eq!(system.planet_count(), 1);
        assert_eq!(system.bodies().len(), 2);
        assert!(system.find_planet("Flat").is_none());
        assert_eq!(system.moons_of(0).count(), 0);

        assert!(system.add_planet(&PlanetSpec::new("Ghost", -0.5, 3.0, 0.0, 0.0)).is_none());
        assert_eq!(system.planet_count(), 1);
    }

    #[test]
    fn test_empty_system_has_no_selection() {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 1);
        system.initialize_with(&SystemCatalog::empty());

        assert_eq!(system.selected_index(), None);
        system.cycle_selection(1);
        assert_eq!(system.selected_index(), None);
        assert!(!system.set_selected(0));
        assert_eq!(system.selected_fact(), "");
        assert_eq!(system.selected_name(), "");
        assert_eq!(system.selected_position(), Vector3::zero());
        assert_eq!(system.refresh_selected_fact(), "");
        assert!(system.sun().is_some());
    }

    #[test]
    fn test_cycle_round_trip_for_every_start() {
        for count in 1..=6 {
            let mut system = SolarSystem::with_seed(&TimeConfig::default(), 5);
            system.initialize_with(&catalog_with(planets_on_x(count), Vec::new()));

            for start in 0..count {
                assert!(system.set_selected(start));
                system.cycle_selection(1);
                assert_single_selection(&system);
                system.cycle_selection(-1);
                assert_eq!(system.selected_index(), Some(start));
                assert_single_selection(&system);
            }
        }
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut system = system();
        system.cycle_selection(-1);
        assert_eq!(system.selected_index(), Some(3));
        system.cycle_selection(1);
        assert_eq!(system.selected_index(), Some(0));
        system.cycle_selection(6);
        assert_eq!(system.selected_index(), Some(2));
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let mut system = system();
        system.set_selected(2);

        assert!(!system.set_selected(4));
        assert_eq!(system.selected_index(), Some(2));
        assert_single_selection(&system);
    }

    #[test]
    fn test_paused_update_changes_nothing() {
        let mut system = system();
        system.update(1.0);
        system.set_paused(true);

        let before: Vec<_> = system
            .bodies()
            .iter()
            .map(|b| (b.position(), b.rotation()))
            .collect();
        for dt in [0.0, 0.016, 1.0, 1000.0] {
            assert_eq!(system.update(dt), 0.0);
        }
        let after: Vec<_> = system
            .bodies()
            .iter()
            .map(|b| (b.position(), b.rotation()))
            .collect();

        assert_eq!(before, after);
    }

    #[test]
    fn test_time_scale_multiplies_motion() {
        let mut system = system();
        system.set_time_scale(2.0);
        assert_eq!(system.update(PI / 2.0), PI);

        // Earth: orbit radius 8, speed 0.5
        let earth = system.planet(0).unwrap();
        assert_vec3_near(earth.position(), Vector3::new(0.0, 0.0, 8.0), 1e-4);
    }

    #[test]
    fn test_time_scale_is_bounded() {
        let mut system = system();
        for _ in 0..40 {
            system.increase_time_scale();
        }
        assert!(system.time_scale() <= 64.0);
        for _ in 0..80 {
            system.decrease_time_scale();
        }
        assert!(system.time_scale() >= 0.05);
    }

    #[test]
    fn test_moon_follows_live_parent() {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 3);
        system.initialize_with(&catalog_with(
            vec![PlanetSpec::new("Fixed", 1.0, 5.0, 0.0, 0.0)],
            vec![MoonSpec::new("Moon", "Fixed", 0.2, 1.5, 3.0)],
        ));

        system.update(0.0);
        let moon = system.body(system.find_body("Moon").unwrap()).unwrap();
        assert_vec3_near(moon.position(), Vector3::new(6.5, 0.0, 0.0), 1e-6);
    }

    #[test]
    fn test_moon_anchor_is_recomputed_each_tick() {
        let mut system = system();
        for _ in 0..10 {
            system.update(0.37);
            let earth = system.planet(0).unwrap();
            let moon = system.moons_of(0).next().unwrap();
            let offset = moon.position() - earth.position();
            let distance = (offset.x * offset.x + offset.z * offset.z).sqrt();

            assert!((distance - 1.5).abs() < 1e-4);
            assert_eq!(moon.position().y, earth.position().y);
        }
    }

    #[test]
    fn test_planets_stay_in_plane() {
        let mut system = system();
        for _ in 0..20 {
            system.update(0.5);
            assert!(system.planets().all(|p| p.position().y == 0.0));
        }
    }

    #[test]
    fn test_pick_aimed_at_center() {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 9);
        system.initialize_with(&catalog_with(planets_on_x(3), Vec::new()));

        // P1 sits at (8, 0, 0) with radius 0.5
        let origin = Vector3::new(8.0, 0.0, 20.0);
        let direction = Vector3::new(0.0, 0.0, -1.0);
        assert_eq!(system.pick_planet(origin, direction), Some(1));

        let hit = system.planet(1).unwrap().intersects_ray(origin, direction).unwrap();
        assert!((hit - 19.5).abs() < 1e-4);
    }

    #[test]
    fn test_pick_prefers_nearest_and_misses_cleanly() {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 9);
        system.initialize_with(&catalog_with(planets_on_x(3), Vec::new()));

        // Along the X axis every planet is in line; P2 is nearest from +X
        let from_far_side = system.pick_planet(Vector3::new(30.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(from_far_side, Some(2));

        let above = system.pick_planet(Vector3::new(0.0, 10.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(above, None);

        let zero = system.pick_planet(Vector3::new(30.0, 0.0, 0.0), Vector3::zero());
        assert_eq!(zero, None);
    }

    #[test]
    fn test_render_order_and_view_position() {
        let system = system();
        let log = CallLog::default();
        let textures = TextureCache::new();
        let mut shader = RecordingShader(log.clone());
        let mut surface = RecordingSurface(log.clone());
        let mut ctx = RenderContext::new(&mut shader, &mut surface, &textures, MeshHandle::new(0, 36));

        let eye = Vector3::new(1.0, 2.0, 3.0);
        system.render(&mut ctx, eye);

        assert_eq!(log.calls()[0], Call::Vec3("viewPos".to_string(), eye));

        let expected: Vec<Matrix4<f32>> = ["Sun", "Earth", "Moon", "Mars", "Jupiter", "Io", "Europa", "Venus"]
            .iter()
            .map(|name| system.body(system.find_body(name).unwrap()).unwrap().model_matrix())
            .collect();
        assert_eq!(log.models(), expected);
        assert_eq!(log.draw_count(), 8);
    }

    #[test]
    fn test_refresh_fact_never_repeats_with_two_facts() {
        let mut system = SolarSystem::with_seed(&TimeConfig::default(), 13);
        system.initialize_with(&catalog_with(planets_on_x(1), Vec::new()));

        let mut previous = system.selected_fact().to_string();
        for _ in 0..100 {
            let next = system.refresh_selected_fact().to_string();
            assert_ne!(next, previous);
            assert_eq!(system.selected_fact(), next);
            previous = next;
        }
    }

    #[test]
    fn test_lookup_helpers() {
        let mut system = system();
        assert_eq!(system.find_planet("Venus"), Some(3));
        assert_eq!(system.find_planet("Pluto"), None);
        assert_eq!(system.sun_position(), Vector3::zero());

        let paths = system.texture_paths();
        assert_eq!(paths.iter().filter(|p| **p == "assets/textures/moon.jpg").count(), 1);
        assert_eq!(paths.len(), 6);

        let ring = MeshHandle::new(7, 64);
        let mars = system.find_body("Mars").unwrap();
        assert!(system.set_body_mesh(mars, Some(ring)));
        assert_eq!(system.planet(1).unwrap().mesh, Some(ring));
        assert_eq!(system.body_transforms().len(), 8);
    }
}
