// src/simulation/mod.rs
//! Simulation system
//!
//! Orbital bodies, the orchestrator that owns and drives them, the time
//! controls, and the decorative asteroid belt.

pub mod asteroid_belt;
pub mod bodies;
pub mod catalog;
pub mod clock;
pub mod facts;
pub mod orbit;
pub mod solar_system;

pub use asteroid_belt::AsteroidBelt;
pub use bodies::{BodyId, BodyKind, CelestialBody};
pub use catalog::{MoonSpec, PlanetSpec, SunSpec, SystemCatalog};
pub use clock::SimulationClock;
pub use facts::FactDeck;
pub use orbit::Orbit;
pub use solar_system::SolarSystem;
