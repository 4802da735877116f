// Preset Catalog - Named initial configurations
// Read-only library consulted by `SimulationEngine::load_preset`

use serde::Serialize;

use crate::config::PhysicsConfig;
use crate::physics_engine::{Body, SystemState, Vector3};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetBody {
    pub mass: f64,
    pub position: Vector3,
    pub velocity: Vector3,
    pub color: &'static str,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub bodies: &'static [PresetBody],
}

impl PresetConfig {
    /// Fresh bodies with sequential ids from 0 and zeroed acceleration
    pub fn instantiate(&self) -> Vec<Body> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, b)| Body {
                id: index as u32,
                name: format!("Body {}", index + 1),
                mass: b.mass,
                position: b.position,
                velocity: b.velocity,
                acceleration: Vector3::zero(),
                color: b.color.to_string(),
                radius: b.radius,
            })
            .collect()
    }
}

pub const DEFAULT_PRESET: &str = "default";

const fn pb(mass: f64, position: [f64; 3], velocity: [f64; 3], color: &'static str, radius: f64) -> PresetBody {
    PresetBody {
        mass,
        position: Vector3::new(position[0], position[1], position[2]),
        velocity: Vector3::new(velocity[0], velocity[1], velocity[2]),
        color,
        radius,
    }
}

// =============================================================================
// CATALOG
// =============================================================================

pub static PRESETS: &[(&str, PresetConfig)] = &[
    ("default", PresetConfig {
        name: "Default",
        description: "Three equal masses in the reference starting configuration",
        bodies: &[
            pb(1.0, [1.0, 0.0, 0.0], [0.0, 0.5, 0.0], "#FF4444", 0.1),
            pb(1.0, [-1.0, 0.0, 0.0], [0.0, -0.5, 0.0], "#4444FF", 0.1),
            pb(1.0, [0.0, 1.0, 0.0], [-0.5, 0.0, 0.0], "#44FF44", 0.1),
        ],
    }),
    // Periodic orbits
    ("figure8", PresetConfig {
        name: "Figure Eight",
        description: "Chenciner-Montgomery figure-eight periodic orbit",
        bodies: &[
            pb(1.0, [0.97000436, -0.24308753, 0.0], [0.466203685, 0.43236573, 0.0], "#FF4444", 0.1),
            pb(1.0, [-0.97000436, 0.24308753, 0.0], [0.466203685, 0.43236573, 0.0], "#4444FF", 0.1),
            pb(1.0, [0.0, 0.0, 0.0], [-0.93240737, -0.86473146, 0.0], "#44FF44", 0.1),
        ],
    }),
    ("butterfly", PresetConfig {
        name: "Butterfly",
        description: "Butterfly-shaped periodic orbit",
        bodies: &[
            pb(1.0, [0.30616, 0.12592, 0.0], [0.12592, 0.30616, 0.0], "#FF6B6B", 0.1),
            pb(1.0, [-0.30616, -0.12592, 0.0], [0.12592, 0.30616, 0.0], "#4ECDC4", 0.1),
            pb(1.0, [0.0, 0.0, 0.0], [-0.25184, -0.61232, 0.0], "#45B7D1", 0.1),
        ],
    }),
    ("broucke_a1", PresetConfig {
        name: "Broucke A1",
        description: "Member of the Broucke A1 family of periodic orbits",
        bodies: &[
            pb(1.0, [0.5, 0.0, 0.0], [0.0, 1.0, 0.0], "#FF4444", 0.1),
            pb(1.0, [-0.5, 0.0, 0.0], [0.0, -1.0, 0.0], "#4444FF", 0.1),
            pb(1.0, [0.0, 0.866, 0.0], [-0.866, 0.0, 0.0], "#44FF44", 0.1),
        ],
    }),
    ("yin_yang", PresetConfig {
        name: "Yin Yang",
        description: "Yin-yang periodic orbit",
        bodies: &[
            pb(1.0, [0.464445, 0.396060, 0.0], [-0.93240737, -0.86473146, 0.0], "#2C3E50", 0.1),
            pb(1.0, [-0.464445, -0.396060, 0.0], [-0.93240737, -0.86473146, 0.0], "#ECF0F1", 0.1),
            pb(1.0, [0.0, 0.0, 0.0], [1.86481474, 1.72946292, 0.0], "#E74C3C", 0.1),
        ],
    }),
    // Astronomical systems
    ("sunearthmoon", PresetConfig {
        name: "Sun-Earth-Moon",
        description: "Simplified sun, planet and moon hierarchy",
        bodies: &[
            pb(100.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], "#FFD700", 0.2),
            pb(1.0, [5.0, 0.0, 0.0], [0.0, 3.16, 0.0], "#4444FF", 0.1),
            pb(0.01, [5.1, 0.0, 0.0], [0.0, 3.36, 0.0], "#808080", 0.05),
        ],
    }),
    ("alpha_centauri", PresetConfig {
        name: "Alpha Centauri",
        description: "Alpha Centauri triple star system",
        bodies: &[
            pb(1.1, [0.0, 0.0, 0.0], [0.0, 0.5, 0.0], "#FFF8DC", 0.12),
            pb(0.907, [23.0, 0.0, 0.0], [0.0, -0.6, 0.0], "#FFE4B5", 0.11),
            pb(0.123, [4300.0, 0.0, 0.0], [0.0, 0.02, 0.0], "#FF6347", 0.06),
        ],
    }),
    ("binary_planet", PresetConfig {
        name: "Circumbinary Planet",
        description: "Planet orbiting a binary star",
        bodies: &[
            pb(2.0, [-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], "#FFD700", 0.15),
            pb(1.5, [1.0, 0.0, 0.0], [0.0, 1.33, 0.0], "#FFA500", 0.13),
            pb(0.01, [0.0, 4.0, 0.0], [1.2, 0.0, 0.0], "#4169E1", 0.08),
        ],
    }),
    // Lagrange points
    ("lagrange_l4", PresetConfig {
        name: "Lagrange L4",
        description: "Test mass near the L4 Lagrange point",
        bodies: &[
            pb(10.0, [-0.5, 0.0, 0.0], [0.0, -0.5, 0.0], "#FFD700", 0.2),
            pb(1.0, [0.5, 0.0, 0.0], [0.0, 5.0, 0.0], "#FFA500", 0.1),
            pb(0.001, [0.0, 0.866, 0.0], [-4.33, 2.25, 0.0], "#808080", 0.05),
        ],
    }),
    ("lagrange_l5", PresetConfig {
        name: "Lagrange L5",
        description: "Test mass near the L5 Lagrange point",
        bodies: &[
            pb(10.0, [-0.5, 0.0, 0.0], [0.0, -0.5, 0.0], "#FFD700", 0.2),
            pb(1.0, [0.5, 0.0, 0.0], [0.0, 5.0, 0.0], "#FFA500", 0.1),
            pb(0.001, [0.0, -0.866, 0.0], [4.33, 2.25, 0.0], "#808080", 0.05),
        ],
    }),
    ("trojan_asteroids", PresetConfig {
        name: "Trojan Asteroid",
        description: "Jupiter trojan asteroid",
        bodies: &[
            pb(1000.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], "#FFD700", 0.25),
            pb(1.0, [5.2, 0.0, 0.0], [0.0, 2.76, 0.0], "#D2691E", 0.12),
            pb(0.0001, [2.6, 4.5, 0.0], [-2.39, 1.38, 0.0], "#696969", 0.03),
        ],
    }),
    // Chaotic systems
    ("chaotic_scattering", PresetConfig {
        name: "Chaotic Scattering",
        description: "Unequal masses exhibiting chaotic scattering",
        bodies: &[
            pb(1.0, [1.0, 0.0, 0.0], [0.0, 0.8, 0.0], "#E74C3C", 0.1),
            pb(1.2, [-0.8, 0.6, 0.0], [-0.3, -0.4, 0.0], "#3498DB", 0.1),
            pb(0.8, [0.2, -1.1, 0.0], [0.5, 0.2, 0.0], "#2ECC71", 0.1),
        ],
    }),
    ("hyperbolic_encounter", PresetConfig {
        name: "Hyperbolic Encounter",
        description: "High-speed hyperbolic fly-by",
        bodies: &[
            pb(2.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], "#FFD700", 0.15),
            pb(1.0, [3.0, 0.0, 0.0], [0.0, 1.5, 0.0], "#FF6347", 0.1),
            pb(0.5, [-5.0, 2.0, 0.0], [2.0, -0.5, 0.0], "#4169E1", 0.08),
        ],
    }),
    ("gravitational_slingshot", PresetConfig {
        name: "Gravitational Slingshot",
        description: "Gravity assist past a massive planet",
        bodies: &[
            pb(100.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], "#FFD700", 0.2),
            pb(10.0, [3.0, 0.0, 0.0], [0.0, 3.65, 0.0], "#FF4500", 0.15),
            pb(0.001, [-8.0, 1.0, 0.0], [1.8, 0.0, 0.0], "#C0C0C0", 0.05),
        ],
    }),
    // Fully three-dimensional orbits
    ("spatial_dance", PresetConfig {
        name: "Spatial Dance",
        description: "Fully three-dimensional tangled orbits",
        bodies: &[
            pb(1.0, [1.0, 0.0, 0.5], [0.0, 0.7, 0.3], "#FF4444", 0.1),
            pb(1.0, [-0.5, 0.866, -0.5], [-0.6, -0.35, 0.4], "#4444FF", 0.1),
            pb(1.0, [-0.5, -0.866, 0.0], [0.6, -0.35, -0.7], "#44FF44", 0.1),
        ],
    }),
    ("helical_motion", PresetConfig {
        name: "Helical Motion",
        description: "Helical three-dimensional orbits",
        bodies: &[
            pb(2.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.1], "#FFD700", 0.15),
            pb(1.0, [1.5, 0.0, 0.0], [0.0, 1.2, 0.2], "#FF6347", 0.1),
            pb(1.0, [-1.5, 0.0, 0.0], [0.0, -1.2, -0.2], "#4169E1", 0.1),
        ],
    }),
    // Mass configurations
    ("mass_hierarchy", PresetConfig {
        name: "Mass Hierarchy",
        description: "Three bodies spanning four orders of magnitude in mass",
        bodies: &[
            pb(100.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], "#FFD700", 0.25),
            pb(1.0, [5.0, 0.0, 0.0], [0.0, 3.16, 0.0], "#FF4500", 0.1),
            pb(0.01, [5.2, 0.0, 0.0], [0.0, 3.5, 0.0], "#4169E1", 0.05),
        ],
    }),
    ("equal_mass_triangle", PresetConfig {
        name: "Equal-Mass Triangle",
        description: "Equal masses on an equilateral triangle",
        bodies: &[
            pb(1.0, [1.0, 0.0, 0.0], [0.0, 0.577, 0.0], "#E74C3C", 0.1),
            pb(1.0, [-0.5, 0.866, 0.0], [-0.5, -0.289, 0.0], "#3498DB", 0.1),
            pb(1.0, [-0.5, -0.866, 0.0], [0.5, -0.289, 0.0], "#2ECC71", 0.1),
        ],
    }),
    // Teaching demonstrations
    ("energy_conservation", PresetConfig {
        name: "Energy Conservation",
        description: "Stable configuration for demonstrating energy conservation",
        bodies: &[
            pb(1.0, [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], "#FF4444", 0.1),
            pb(1.0, [-0.866, -0.5, 0.0], [-0.5, 0.866, 0.0], "#4444FF", 0.1),
            pb(1.0, [0.866, -0.5, 0.0], [-0.5, -0.866, 0.0], "#44FF44", 0.1),
        ],
    }),
    ("momentum_conservation", PresetConfig {
        name: "Momentum Conservation",
        description: "Configuration for demonstrating momentum conservation",
        bodies: &[
            pb(2.0, [-1.0, 0.0, 0.0], [0.5, 0.0, 0.0], "#FF6B6B", 0.15),
            pb(1.0, [1.0, 0.0, 0.0], [-1.0, 0.5, 0.0], "#4ECDC4", 0.1),
            pb(1.0, [0.0, 1.5, 0.0], [0.0, -0.5, 0.0], "#45B7D1", 0.1),
        ],
    }),
];

pub fn find_preset(id: &str) -> Option<&'static PresetConfig> {
    PRESETS.iter().find(|(key, _)| *key == id).map(|(_, preset)| preset)
}

pub fn preset_ids() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(key, _)| *key)
}

/// The hard-coded starting configuration used on construction and reset
pub fn create_default_system(config: &PhysicsConfig) -> SystemState {
    let bodies = find_preset(DEFAULT_PRESET)
        .map(PresetConfig::instantiate)
        .unwrap_or_default();
    SystemState::new(bodies, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique_and_bodies_valid() {
        let ids: HashSet<&str> = preset_ids().collect();
        assert_eq!(ids.len(), PRESETS.len());
        assert_eq!(PRESETS.len(), 20);

        for (id, preset) in PRESETS {
            assert_eq!(preset.bodies.len(), 3, "{} should have three bodies", id);
            assert!(preset.bodies.iter().all(|b| b.mass > 0.0 && b.radius > 0.0));
        }
    }

    #[test]
    fn test_instantiate_assigns_sequential_ids() {
        let bodies = find_preset("sunearthmoon").unwrap().instantiate();
        let ids: Vec<u32> = bodies.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(bodies[2].name, "Body 3");
        assert_eq!(bodies[0].mass, 100.0);
        assert!(bodies.iter().all(|b| b.acceleration == Vector3::zero()));
    }

    #[test]
    fn test_default_system() {
        let state = create_default_system(&PhysicsConfig::default());
        assert_eq!(state.time, 0.0);
        assert_eq!(state.bodies.len(), 3);
        assert_eq!(state.bodies[2].position, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(state.bodies[2].velocity, Vector3::new(-0.5, 0.0, 0.0));
        assert!(state.energy.total < 0.0);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(find_preset("nope").is_none());
    }
}
