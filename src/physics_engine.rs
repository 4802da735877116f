// Physics Engine - Gravitational N-Body Mechanics
// Implements pairwise softened gravity, energy bookkeeping and a fixed-step RK4 integrator

use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

/// Scale of the soft repulsion applied inside the softening radius
const SOFT_REPULSION: f64 = 0.1;

// =============================================================================
// 3D VECTOR MATHEMATICS
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn copy(&self) -> Self {
        Self::new(self.x, self.y, self.z)
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector along `self`, or the zero vector when `self` has zero length
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::zero()
        }
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn scale(&self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub fn add(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub fn sub(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn distance_squared(&self, other: &Vector3) -> f64 {
        self.sub(other).length_squared()
    }

    pub fn distance(&self, other: &Vector3) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

// =============================================================================
// BODIES & SYSTEM STATE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Body {
    pub id: u32,
    pub name: String,
    pub mass: f64,
    pub position: Vector3,
    pub velocity: Vector3,
    /// Scratch output of the force model, recomputed on every evaluation
    pub acceleration: Vector3,
    pub color: String,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Energy {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

impl Energy {
    pub fn is_finite(&self) -> bool {
        self.kinetic.is_finite() && self.potential.is_finite() && self.total.is_finite()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemState {
    pub bodies: Vec<Body>,
    pub time: f64,
    pub energy: Energy,
}

impl SystemState {
    /// Fresh state at `time = 0` with energy computed from `bodies`
    pub fn new(bodies: Vec<Body>, config: &PhysicsConfig) -> Self {
        let energy = system_energy(&bodies, config);
        Self {
            bodies,
            time: 0.0,
            energy,
        }
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }
}

// =============================================================================
// GRAVITATIONAL FORCES
// =============================================================================

/// Force exerted on `a` by `b`.
///
/// Inside `min_distance` the singular inverse-square law is replaced with a
/// repulsion proportional to how deep the pair sits inside the softening
/// radius, so near-collisions stay finite instead of producing NaN.
pub fn pairwise_force(a: &Body, b: &Body, config: &PhysicsConfig) -> Vector3 {
    let r = b.position.sub(&a.position);
    let dist_squared = r.length_squared();
    let min = config.min_distance;

    if dist_squared < min * min {
        let soft_dist = dist_squared.sqrt();
        let scale = (min - soft_dist) / min;
        return r.scale(-scale * SOFT_REPULSION);
    }

    let force_magnitude = config.gravitational_constant * a.mass * b.mass / dist_squared;
    r.normalize().scale(force_magnitude)
}

/// Returns a copy of `bodies` with accelerations rebuilt from scratch.
/// Each unordered pair is evaluated once; the reaction is the exact negation.
pub fn update_accelerations(bodies: &[Body], config: &PhysicsConfig) -> Vec<Body> {
    let mut updated: Vec<Body> = bodies
        .iter()
        .map(|b| Body {
            acceleration: Vector3::zero(),
            ..b.clone()
        })
        .collect();

    let n = updated.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let force_on_i = pairwise_force(&updated[i], &updated[j], config);
            let force_on_j = force_on_i.scale(-1.0);

            let acc_i = force_on_i.scale(1.0 / updated[i].mass);
            let acc_j = force_on_j.scale(1.0 / updated[j].mass);

            updated[i].acceleration = updated[i].acceleration.add(&acc_i);
            updated[j].acceleration = updated[j].acceleration.add(&acc_j);
        }
    }

    updated
}

// =============================================================================
// ENERGY & MOMENTUM (for drift monitoring)
// =============================================================================

/// Kinetic, potential and total mechanical energy.
///
/// Pairs closer than `min_distance` are left out of the potential sum, so the
/// total is only meaningful away from close encounters.
pub fn system_energy(bodies: &[Body], config: &PhysicsConfig) -> Energy {
    let mut kinetic = 0.0;
    let mut potential = 0.0;

    for body in bodies {
        kinetic += 0.5 * body.mass * body.velocity.length_squared();
    }

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let dist = bodies[i].position.distance(&bodies[j].position);
            if dist > config.min_distance {
                potential -= config.gravitational_constant * bodies[i].mass * bodies[j].mass / dist;
            }
        }
    }

    Energy {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

/// Relative drift of `current` against `initial`; zero when the reference is ~0
pub fn energy_drift(initial: &Energy, current: &Energy) -> f64 {
    if initial.total.abs() > 1e-20 {
        (current.total - initial.total).abs() / initial.total.abs()
    } else {
        0.0
    }
}

pub fn total_momentum(bodies: &[Body]) -> Vector3 {
    bodies
        .iter()
        .fold(Vector3::zero(), |acc, b| acc.add(&b.velocity.scale(b.mass)))
}

pub fn center_of_mass(bodies: &[Body]) -> Vector3 {
    let total_mass: f64 = bodies.iter().map(|b| b.mass).sum();
    if total_mass <= 0.0 {
        return Vector3::zero();
    }
    bodies
        .iter()
        .fold(Vector3::zero(), |acc, b| acc.add(&b.position.scale(b.mass)))
        .scale(1.0 / total_mass)
}

// =============================================================================
// RK4 INTEGRATOR
// =============================================================================

/// Time derivatives of the joint (position, velocity) state of every body
struct Derivatives {
    position: Vec<Vector3>,
    velocity: Vec<Vector3>,
}

pub struct Rk4Integrator {
    pub config: PhysicsConfig,
}

impl Rk4Integrator {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Advance `bodies` by exactly one step of size `dt`.
    ///
    /// Every stage evaluates forces on its own copy of the input, so neither
    /// the caller's slice nor earlier stages are ever touched. Mass, id, name,
    /// color and radius pass through unchanged; the returned acceleration is
    /// the scratch left by the last (k4) evaluation.
    pub fn advance(&self, bodies: &[Body], dt: f64) -> Vec<Body> {
        let half_dt = dt * 0.5;

        let (k1, _) = self.derivatives(bodies);
        let (k2, _) = self.derivatives(&offset_state(bodies, &k1, half_dt));
        let (k3, _) = self.derivatives(&offset_state(bodies, &k2, half_dt));
        let (k4, evaluated) = self.derivatives(&offset_state(bodies, &k3, dt));

        let sixth_dt = dt / 6.0;
        bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                let d_position = weighted_sum(&k1.position[i], &k2.position[i], &k3.position[i], &k4.position[i]);
                let d_velocity = weighted_sum(&k1.velocity[i], &k2.velocity[i], &k3.velocity[i], &k4.velocity[i]);

                Body {
                    position: body.position.add(&d_position.scale(sixth_dt)),
                    velocity: body.velocity.add(&d_velocity.scale(sixth_dt)),
                    acceleration: evaluated[i].acceleration,
                    ..body.clone()
                }
            })
            .collect()
    }

    fn derivatives(&self, bodies: &[Body]) -> (Derivatives, Vec<Body>) {
        let evaluated = update_accelerations(bodies, &self.config);
        let derivatives = Derivatives {
            position: evaluated.iter().map(|b| b.velocity.copy()).collect(),
            velocity: evaluated.iter().map(|b| b.acceleration.copy()).collect(),
        };
        (derivatives, evaluated)
    }
}

/// One RK4 step with an explicit config; see [`Rk4Integrator::advance`]
pub fn advance(bodies: &[Body], dt: f64, config: &PhysicsConfig) -> Vec<Body> {
    Rk4Integrator::new(*config).advance(bodies, dt)
}

/// Independent copy of `bodies` displaced by `h * k`
fn offset_state(bodies: &[Body], k: &Derivatives, h: f64) -> Vec<Body> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| Body {
            position: body.position.add(&k.position[i].scale(h)),
            velocity: body.velocity.add(&k.velocity[i].scale(h)),
            ..body.clone()
        })
        .collect()
}

/// k1 + 2*k2 + 2*k3 + k4
fn weighted_sum(k1: &Vector3, k2: &Vector3, k3: &Vector3, k4: &Vector3) -> Vector3 {
    k1.add(&k2.scale(2.0)).add(&k3.scale(2.0).add(k4))
}

// =============================================================================
// TESTS
// =============================================================================
