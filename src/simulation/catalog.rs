//! Body definitions the orchestrator builds its arena from

#[derive(Debug, Clone, PartialEq)]
pub struct SunSpec {
    pub radius: f32,
    pub rotation_speed: f32,
    pub texture_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSpec {
    pub name: String,
    pub radius: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub rotation_speed: f32,
    pub texture_path: String,
    pub facts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoonSpec {
    pub name: String,
    /// Name of the planet this moon orbits
    pub parent: String,
    pub radius: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub texture_path: String,
}

/// Sun, planets in render order, and moons keyed to their parent by name
#[derive(Debug, Clone, PartialEq)]
pub struct SystemCatalog {
    pub sun: SunSpec,
    pub planets: Vec<PlanetSpec>,
    pub moons: Vec<MoonSpec>,
}

impl PlanetSpec {
    pub fn new(name: &str, radius: f32, orbit_radius: f32, orbit_speed: f32, rotation_speed: f32) -> Self {
        Self {
            name: name.to_string(),
            radius,
            orbit_radius,
            orbit_speed,
            rotation_speed,
            texture_path: format!("assets/textures/{}.jpg", name.to_lowercase()),
            facts: Vec::new(),
        }
    }

    pub fn with_facts(mut self, facts: &[&str]) -> Self {
        self.facts = facts.iter().map(|fact| fact.to_string()).collect();
        self
    }
}

impl MoonSpec {
    pub fn new(name: &str, parent: &str, radius: f32, orbit_radius: f32, orbit_speed: f32) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.to_string(),
            radius,
            orbit_radius,
            orbit_speed,
            texture_path: "assets/textures/moon.jpg".to_string(),
        }
    }
}

impl Default for SunSpec {
    fn default() -> Self {
        Self {
            radius: 2.0,
            rotation_speed: 0.2,
            texture_path: "assets/textures/sun.jpg".to_string(),
        }
    }
}

impl SystemCatalog {
    /// A system with only a sun
    pub fn empty() -> Self {
        Self {
            sun: SunSpec::default(),
            planets: Vec::new(),
            moons: Vec::new(),
        }
    }
}

impl Default for SystemCatalog {
    /// Scaled for visibility, not accuracy
    fn default() -> Self {
        let planets = vec![
            PlanetSpec::new("Earth", 0.8, 8.0, 0.5, 2.0).with_facts(&[
                "Earth is the only planet not named after a god.",
                "A day on Earth is slowly getting longer as the Moon drifts away.",
                "About 71% of Earth's surface is covered by water.",
                "Earth is the densest planet in the Solar System.",
            ]),
            PlanetSpec::new("Mars", 0.6, 12.0, 0.3, 1.8).with_facts(&[
                "Olympus Mons on Mars is nearly three times the height of Everest.",
                "Mars gets its red colour from iron oxide dust.",
                "A Martian day lasts about 24 hours and 37 minutes.",
                "Mars has two small moons, Phobos and Deimos.",
            ]),
            PlanetSpec::new("Jupiter", 1.5, 18.0, 0.2, 1.2).with_facts(&[
                "Jupiter is more than twice as massive as all other planets combined.",
                "The Great Red Spot is a storm larger than Earth.",
                "Jupiter has the shortest day of any planet, under 10 hours.",
                "Io is the most volcanically active body in the Solar System.",
            ]),
            PlanetSpec::new("Venus", 0.7, 5.0, 0.7, 1.5).with_facts(&[
                "Venus is the hottest planet despite Mercury being closer to the Sun.",
                "Venus spins backwards compared to most planets.",
                "A day on Venus is longer than its year.",
            ]),
        ];

        let moons = vec![
            MoonSpec::new("Moon", "Earth", 0.2, 1.5, 3.0),
            MoonSpec::new("Io", "Jupiter", 0.15, 2.0, 4.0),
            MoonSpec::new("Europa", "Jupiter", 0.12, 2.5, 3.0),
        ];

        Self {
            sun: SunSpec::default(),
            planets,
            moons,
        }
    }
}
