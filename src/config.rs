// Configuration - Physical constants and run-control parameters
// Every type here deserializes with defaults so hosts can load partial JSON

use serde::{Deserialize, Serialize};

// =============================================================================
// BOUNDS & DEFAULTS
// =============================================================================

/// Normalized gravitational constant used by all presets
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 1.0;

/// Separation below which the inverse-square force is replaced by soft repulsion
pub const DEFAULT_MIN_DISTANCE: f64 = 0.1;

pub const DEFAULT_TIME_STEP: f64 = 0.01;
pub const MIN_TIME_STEP: f64 = 0.0001;
pub const MAX_TIME_STEP: f64 = 0.1;

/// Upper bound on catch-up integration steps per rendered frame
pub const DEFAULT_MAX_STEPS_PER_FRAME: usize = 10;

/// Largest wall-clock gap (seconds) a single frame may feed into the accumulator
pub const MAX_FRAME_DELTA: f64 = 0.1;

pub const DEFAULT_TARGET_FPS: u32 = 60;

pub fn clamp_time_step(dt: f64) -> f64 {
    if dt.is_nan() {
        return MIN_TIME_STEP;
    }
    dt.max(MIN_TIME_STEP).min(MAX_TIME_STEP)
}

// =============================================================================
// PHYSICS CONFIG
// =============================================================================

/// Constants threaded through the force model and the integrator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsConfig {
    pub gravitational_constant: f64,
    pub min_distance: f64,
}

impl PhysicsConfig {
    pub fn new(gravitational_constant: f64) -> Self {
        let mut cfg = Self::default();
        cfg.set_gravitational_constant(gravitational_constant);
        cfg
    }

    /// Non-positive (or non-finite) values are ignored and the prior value kept.
    /// Returns whether the value was applied.
    pub fn set_gravitational_constant(&mut self, value: f64) -> bool {
        if value.is_finite() && value > 0.0 {
            self.gravitational_constant = value;
            true
        } else {
            false
        }
    }

    /// Copy with invalid fields replaced by defaults: G must be positive and
    /// the softening radius positive, otherwise coincident bodies yield NaN.
    pub fn validated(&self) -> Self {
        let mut cfg = Self::default();
        cfg.set_gravitational_constant(self.gravitational_constant);
        if self.min_distance.is_finite() && self.min_distance > 0.0 {
            cfg.min_distance = self.min_distance;
        }
        cfg
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

// =============================================================================
// ENGINE PARAMETERS
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineParameters {
    pub time_step: f64,
    pub max_steps_per_frame: usize,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
        }
    }
}

/// Partial update accepted by `SimulationEngine::set_parameters`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterUpdate {
    pub time_step: Option<f64>,
    pub gravitational_constant: Option<f64>,
    pub max_steps_per_frame: Option<usize>,
}

impl ParameterUpdate {
    pub fn time_step(dt: f64) -> Self {
        Self {
            time_step: Some(dt),
            ..Self::default()
        }
    }

    pub fn gravitational_constant(g: f64) -> Self {
        Self {
            gravitational_constant: Some(g),
            ..Self::default()
        }
    }
}
