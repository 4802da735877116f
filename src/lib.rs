// ThreeBody - Gravitational N-Body Simulation Core
// Library entry point: physics, presets and the simulation engine

pub mod config;
pub mod physics_engine;
pub mod presets;
pub mod state_manager;

pub use config::{EngineParameters, ParameterUpdate, PhysicsConfig};
pub use physics_engine::{
    advance, center_of_mass, energy_drift, pairwise_force, system_energy, total_momentum,
    update_accelerations, Body, Energy, Rk4Integrator, SystemState, Vector3,
};
pub use presets::{create_default_system, find_preset, preset_ids, PresetBody, PresetConfig, PRESETS};
pub use state_manager::{
    shared, start_frame_loop, BodySnapshot, FrameLoop, FrameLoopHandle, SharedEngine,
    SimulationEngine, SimulationError, SnapshotParameters, StateSnapshot,
};
