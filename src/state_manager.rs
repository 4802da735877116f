// State Manager - Simulation engine, run control and snapshot handling
// Owns the live system state and drives the frame-paced accumulator loop

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::{
    clamp_time_step, EngineParameters, ParameterUpdate, PhysicsConfig, DEFAULT_TARGET_FPS,
    MAX_FRAME_DELTA,
};
use crate::physics_engine::{system_energy, Body, Energy, Rk4Integrator, SystemState, Vector3};
use crate::presets::{create_default_system, find_preset};

pub type UpdateObserver = Box<dyn FnMut(&SystemState) + Send>;
pub type ErrorObserver = Box<dyn FnMut(&SimulationError) + Send>;
pub type FrameCallback = Box<dyn FnMut(&SystemState, f64) + Send>;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    PresetNotFound(String),
    /// A step produced a non-finite position, velocity or energy
    NumericFault { time: f64, detail: String },
    InvalidSnapshot(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::PresetNotFound(id) => write!(f, "preset \"{}\" does not exist", id),
            SimulationError::NumericFault { time, detail } => {
                write!(f, "numeric fault at t = {}: {}", time, detail)
            }
            SimulationError::InvalidSnapshot(reason) => write!(f, "invalid snapshot: {}", reason),
        }
    }
}

impl std::error::Error for SimulationError {}

// =============================================================================
// SIMULATION ENGINE
// =============================================================================

pub struct SimulationEngine {
    state: SystemState,
    physics: PhysicsConfig,
    is_running: bool,
    time_step: f64,
    max_steps_per_frame: usize,
    on_update: Option<UpdateObserver>,
    on_error: Option<ErrorObserver>,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default(), EngineParameters::default())
    }

    pub fn with_config(physics: PhysicsConfig, params: EngineParameters) -> Self {
        let physics = physics.validated();
        Self {
            state: create_default_system(&physics),
            physics,
            is_running: false,
            time_step: clamp_time_step(params.time_step),
            max_steps_per_frame: params.max_steps_per_frame.max(1),
            on_update: None,
            on_error: None,
        }
    }

    /// Start from an existing state. Bodies with a non-positive mass get the
    /// import default mass, and energy is recomputed.
    pub fn with_state(mut state: SystemState) -> Self {
        let mut engine = Self::new();
        for body in state.bodies.iter_mut() {
            if !(body.mass.is_finite() && body.mass > 0.0) {
                warn!(
                    "body {} has invalid mass {}, using {}",
                    body.id, body.mass, DEFAULT_IMPORT_MASS
                );
                body.mass = DEFAULT_IMPORT_MASS;
            }
        }
        state.energy = system_energy(&state.bodies, &engine.physics);
        engine.state = state;
        engine
    }

    // -- queries ---------------------------------------------------------------

    /// Deep copy of the current state; callers cannot reach engine internals through it
    pub fn get_state(&self) -> SystemState {
        self.state.clone()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn max_steps_per_frame(&self) -> usize {
        self.max_steps_per_frame
    }

    pub fn physics_config(&self) -> PhysicsConfig {
        self.physics
    }

    // -- observers -------------------------------------------------------------

    pub fn on_update(&mut self, callback: impl FnMut(&SystemState) + Send + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    pub fn on_error(&mut self, callback: impl FnMut(&SimulationError) + Send + 'static) {
        self.on_error = Some(Box::new(callback));
    }

    // -- run control -----------------------------------------------------------

    pub fn start(&mut self) {
        self.is_running = true;
        debug!("simulation started at t = {}", self.state.time);
    }

    pub fn pause(&mut self) {
        self.is_running = false;
        debug!("simulation paused at t = {}", self.state.time);
    }

    pub fn toggle(&mut self) {
        if self.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and replace the state with the default configuration
    pub fn reset(&mut self) {
        self.state = create_default_system(&self.physics);
        self.is_running = false;
        debug!("simulation reset");
    }

    // -- commands --------------------------------------------------------------

    pub fn set_parameters(&mut self, params: ParameterUpdate) {
        if let Some(dt) = params.time_step {
            let clamped = clamp_time_step(dt);
            if clamped != dt {
                warn!("time step {} clamped to {}", dt, clamped);
            }
            self.time_step = clamped;
        }

        if let Some(g) = params.gravitational_constant {
            if !self.physics.set_gravitational_constant(g) {
                warn!("ignoring non-positive gravitational constant {}", g);
            }
        }

        if let Some(steps) = params.max_steps_per_frame {
            self.max_steps_per_frame = steps.max(1);
        }
    }

    /// Replace the whole state with a catalog preset.
    /// A miss is reported to the error observer as well as returned.
    pub fn load_preset(&mut self, preset_id: &str) -> Result<(), SimulationError> {
        let Some(preset) = find_preset(preset_id) else {
            let err = SimulationError::PresetNotFound(preset_id.to_string());
            self.report_error(&err);
            return Err(err);
        };

        self.state = SystemState::new(preset.instantiate(), &self.physics);
        debug!("loaded preset \"{}\" ({})", preset_id, preset.name);
        Ok(())
    }

    /// Set a body's mass and recompute energy immediately
    pub fn update_body_mass(&mut self, body_id: u32, mass: f64) -> bool {
        if !(mass.is_finite() && mass > 0.0) {
            warn!("rejected mass {} for body {}", mass, body_id);
            return false;
        }
        let Some(body) = self.state.body_mut(body_id) else {
            warn!("no body with id {}", body_id);
            return false;
        };

        body.mass = mass;
        self.recompute_energy();
        true
    }

    /// Overwrite a body's position. Energy is left as-is until the next step
    /// or an explicit `recompute_energy`.
    pub fn update_body_position(&mut self, body_id: u32, position: Vector3) -> bool {
        match self.state.body_mut(body_id) {
            Some(body) => {
                body.position = position;
                true
            }
            None => {
                warn!("no body with id {}", body_id);
                false
            }
        }
    }

    pub fn recompute_energy(&mut self) -> Energy {
        self.state.energy = system_energy(&self.state.bodies, &self.physics);
        self.state.energy
    }

    /// Run exactly one integration step.
    ///
    /// A non-finite result is not committed: the fault goes to the error
    /// observer (or the log) and the engine stops.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let integrator = Rk4Integrator::new(self.physics);
        let bodies = integrator.advance(&self.state.bodies, self.time_step);
        let energy = system_energy(&bodies, &self.physics);

        if let Err(err) = check_finite(&bodies, &energy, self.state.time + self.time_step) {
            self.report_error(&err);
            self.pause();
            return Err(err);
        }

        self.state.bodies = bodies;
        self.state.time += self.time_step;
        self.state.energy = energy;

        if let Some(callback) = self.on_update.as_mut() {
            callback(&self.state);
        }
        Ok(())
    }

    fn report_error(&mut self, err: &SimulationError) {
        match self.on_error.as_mut() {
            Some(callback) => callback(err),
            None => error!("simulation error: {}", err),
        }
    }

    // -- serialization ---------------------------------------------------------

    pub fn export_state(&self) -> StateSnapshot {
        StateSnapshot {
            time: Some(self.state.time),
            bodies: Some(
                self.state
                    .bodies
                    .iter()
                    .map(|b| BodySnapshot {
                        id: Some(b.id),
                        name: Some(b.name.clone()),
                        mass: Some(b.mass),
                        position: Some(b.position),
                        velocity: Some(b.velocity),
                        color: Some(b.color.clone()),
                        radius: Some(b.radius),
                    })
                    .collect(),
            ),
            energy: Some(self.state.energy),
            parameters: Some(SnapshotParameters {
                time_step: Some(self.time_step),
                gravitational_constant: Some(self.physics.gravitational_constant),
            }),
            exported_at: Some(Utc::now()),
        }
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.export_state())
    }

    /// Best-effort reconstruction: missing fields take defaults instead of
    /// failing. Only a document without a `bodies` list is rejected.
    pub fn import_state(&mut self, snapshot: StateSnapshot) -> Result<(), SimulationError> {
        let Some(entries) = snapshot.bodies else {
            let err = SimulationError::InvalidSnapshot("missing bodies".to_string());
            self.report_error(&err);
            return Err(err);
        };

        let bodies = rebuild_bodies(entries);
        let time = snapshot.time.filter(|t| t.is_finite()).unwrap_or(0.0);

        if let Some(params) = snapshot.parameters {
            self.set_parameters(ParameterUpdate {
                time_step: params.time_step,
                gravitational_constant: params.gravitational_constant,
                max_steps_per_frame: None,
            });
        }

        let energy = system_energy(&bodies, &self.physics);
        self.state = SystemState {
            bodies,
            time,
            energy,
        };
        debug!("imported {} bodies at t = {}", self.state.bodies.len(), time);
        Ok(())
    }

    pub fn import_json(&mut self, json: &str) -> Result<(), SimulationError> {
        match serde_json::from_str::<StateSnapshot>(json) {
            Ok(snapshot) => self.import_state(snapshot),
            Err(e) => {
                let err = SimulationError::InvalidSnapshot(e.to_string());
                self.report_error(&err);
                Err(err)
            }
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn check_finite(bodies: &[Body], energy: &Energy, time: f64) -> Result<(), SimulationError> {
    if let Some(body) = bodies
        .iter()
        .find(|b| !b.position.is_finite() || !b.velocity.is_finite())
    {
        return Err(SimulationError::NumericFault {
            time,
            detail: format!("body {} left the finite state space", body.id),
        });
    }
    if !energy.is_finite() {
        return Err(SimulationError::NumericFault {
            time,
            detail: "system energy is not finite".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// SERIALIZABLE SNAPSHOT
// =============================================================================

pub const DEFAULT_IMPORT_MASS: f64 = 1.0;
pub const DEFAULT_IMPORT_RADIUS: f64 = 0.1;
pub const DEFAULT_IMPORT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_IMPORT_NAME: &str = "Body";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StateSnapshot {
    pub time: Option<f64>,
    pub bodies: Option<Vec<BodySnapshot>>,
    pub energy: Option<Energy>,
    pub parameters: Option<SnapshotParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BodySnapshot {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<u32>,
    pub name: Option<String>,
    pub mass: Option<f64>,
    pub position: Option<Vector3>,
    pub velocity: Option<Vector3>,
    pub color: Option<String>,
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotParameters {
    pub time_step: Option<f64>,
    pub gravitational_constant: Option<f64>,
}

/// Ids that are not whole numbers in `u32` range read as missing
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|id| u32::try_from(id).ok()))
}

/// Missing or duplicate ids are replaced with fresh ids past the largest one in use
fn rebuild_bodies(entries: Vec<BodySnapshot>) -> Vec<Body> {
    let mut seen = HashSet::new();
    let mut next_id = entries
        .iter()
        .filter_map(|e| e.id)
        .max()
        .map_or(0, |max| max.saturating_add(1));

    entries
        .into_iter()
        .map(|entry| {
            let id = match entry.id {
                Some(id) if seen.insert(id) => id,
                _ => {
                    let id = next_id;
                    next_id = next_id.saturating_add(1);
                    seen.insert(id);
                    id
                }
            };

            Body {
                id,
                name: entry.name.unwrap_or_else(|| DEFAULT_IMPORT_NAME.to_string()),
                mass: entry
                    .mass
                    .filter(|m| m.is_finite() && *m > 0.0)
                    .unwrap_or(DEFAULT_IMPORT_MASS),
                position: entry.position.unwrap_or_default(),
                velocity: entry.velocity.unwrap_or_default(),
                acceleration: Vector3::zero(),
                color: entry.color.unwrap_or_else(|| DEFAULT_IMPORT_COLOR.to_string()),
                radius: entry
                    .radius
                    .filter(|r| r.is_finite() && *r > 0.0)
                    .unwrap_or(DEFAULT_IMPORT_RADIUS),
            }
        })
        .collect()
}

// =============================================================================
// FRAME LOOP (fixed timestep, decoupled from frame rate)
// =============================================================================

/// Accumulator that converts variable frame intervals into whole physics steps
#[derive(Debug, Clone)]
pub struct FrameLoop {
    last_frame: Option<Instant>,
    accumulator: f64,
    target_fps: u32,
}

impl FrameLoop {
    pub fn new(target_fps: u32) -> Self {
        Self {
            last_frame: None,
            accumulator: 0.0,
            target_fps: target_fps.max(1),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Measure the wall time since the previous tick and advance the engine.
    /// Returns the clamped frame delta in seconds.
    pub fn tick(&mut self, engine: &mut SimulationEngine, now: Instant) -> f64 {
        let elapsed = match self.last_frame {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        let delta = elapsed.min(MAX_FRAME_DELTA);
        self.advance(engine, delta);
        delta
    }

    /// Feed `delta` seconds into the accumulator and step while a whole time
    /// step is available, at most `max_steps_per_frame` times. Nothing
    /// accumulates while the engine is stopped. Returns the steps taken.
    pub fn advance(&mut self, engine: &mut SimulationEngine, delta: f64) -> usize {
        if !engine.is_running() {
            return 0;
        }
        self.accumulator += delta.clamp(0.0, MAX_FRAME_DELTA);

        let mut steps = 0;
        while steps < engine.max_steps_per_frame() && self.accumulator >= engine.time_step() {
            if engine.step().is_err() {
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= engine.time_step();
            steps += 1;
        }

        // Backlog beyond one frame's worth of steps is dropped
        let max_backlog = engine.time_step() * engine.max_steps_per_frame() as f64;
        self.accumulator = self.accumulator.min(max_backlog);
        steps
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FPS)
    }
}

pub type SharedEngine = Arc<Mutex<SimulationEngine>>;

pub fn shared(engine: SimulationEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

/// Keeps the background frame loop alive; dropping it stops the loop
pub struct FrameLoopHandle {
    active: Arc<RwLock<bool>>,
    thread: Option<JoinHandle<()>>,
}

impl FrameLoopHandle {
    pub fn is_active(&self) -> bool {
        *self.active.read()
    }

    /// Ask the loop to exit after its current tick and wait for it
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        *self.active.write() = false;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("frame loop thread panicked");
            }
        }
    }
}

impl Drop for FrameLoopHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Drive `engine` from a background thread at roughly `target_fps`.
///
/// The engine lock is held for a whole tick, so the steps of one frame are
/// strictly sequential and never interleave with other commands.
/// The mutex is not reentrant: `on_frame` and the engine's observers run
/// under it and must not lock the shared engine themselves.
pub fn start_frame_loop(
    engine: SharedEngine,
    mut on_frame: Option<FrameCallback>,
    target_fps: u32,
) -> FrameLoopHandle {
    let active = Arc::new(RwLock::new(true));
    let flag = active.clone();

    let thread = thread::spawn(move || {
        let mut frame_loop = FrameLoop::new(target_fps);
        let target_frame_time = frame_loop.frame_interval();

        loop {
            let start = Instant::now();

            {
                let mut sim = engine.lock();
                let delta = frame_loop.tick(&mut sim, start);
                if let Some(callback) = on_frame.as_mut() {
                    callback(&sim.state, delta);
                }
            }

            // Check if we should stop
            if !*flag.read() {
                break;
            }

            // Sleep to maintain frame rate
            let elapsed = start.elapsed();
            if elapsed < target_frame_time {
                thread::sleep(target_frame_time - elapsed);
            }
        }
        debug!("frame loop stopped");
    });

    FrameLoopHandle {
        active,
        thread: Some(thread),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_toggle_and_reset() {
        let mut engine = SimulationEngine::new();
        assert!(!engine.is_running());
        engine.toggle();
        assert!(engine.is_running());
        engine.toggle();
        assert!(!engine.is_running());

        engine.start();
        engine.step().unwrap();
        engine.reset();
        assert!(!engine.is_running());
        assert_eq!(engine.get_state().time, 0.0);
        assert_eq!(engine.get_state(), create_default_system(&PhysicsConfig::default()));
    }

    #[test]
    fn test_get_state_is_a_copy() {
        let engine = SimulationEngine::new();
        let mut snapshot = engine.get_state();
        snapshot.bodies[0].position = Vector3::new(42.0, 0.0, 0.0);
        snapshot.bodies.clear();
        assert_eq!(engine.get_state().bodies.len(), 3);
        assert_eq!(engine.get_state().bodies[0].position, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_numeric_fault_stops_without_committing() {
        let bodies = vec![Body {
            id: 0,
            name: "Runaway".to_string(),
            mass: 1.0,
            position: Vector3::new(f64::MAX, 0.0, 0.0),
            velocity: Vector3::new(f64::MAX, 0.0, 0.0),
            acceleration: Vector3::zero(),
            color: "#FFFFFF".to_string(),
            radius: 0.1,
        }];
        let mut engine = SimulationEngine::with_state(SystemState::new(bodies, &PhysicsConfig::default()));
        let errors = Arc::new(AtomicUsize::new(0));
        let counter = errors.clone();
        engine.on_error(move |err| {
            assert!(matches!(err, SimulationError::NumericFault { .. }));
            counter.fetch_add(1, Ordering::SeqCst);
        });

        engine.start();
        assert!(engine.step().is_err());
        assert!(!engine.is_running());
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(engine.get_state().time, 0.0);
        assert!(engine.get_state().bodies[0].position.is_finite());
    }

    #[test]
    fn test_frame_loop_steps_only_while_running() {
        let mut engine = SimulationEngine::new();
        let mut frame_loop = FrameLoop::default();

        assert_eq!(frame_loop.advance(&mut engine, 0.05), 0);
        assert_eq!(frame_loop.accumulator(), 0.0);

        engine.start();
        // 0.035 s at dt = 0.01: three whole steps, remainder carried
        assert_eq!(frame_loop.advance(&mut engine, 0.035), 3);
        assert!((frame_loop.accumulator() - 0.005).abs() < 1e-9);
        assert!((engine.get_state().time - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_frame_loop_caps_catch_up() {
        let mut engine = SimulationEngine::new();
        engine.set_parameters(ParameterUpdate {
            time_step: Some(0.001),
            max_steps_per_frame: Some(5),
            ..ParameterUpdate::default()
        });
        engine.start();

        let mut frame_loop = FrameLoop::default();
        // A long stall is clamped to 100 ms, and only five steps run
        assert_eq!(frame_loop.advance(&mut engine, 3.0), 5);
        assert!((engine.get_state().time - 0.005).abs() < 1e-12);
        assert!(frame_loop.accumulator() <= MAX_FRAME_DELTA);
    }

    #[test]
    fn test_frame_loop_backlog_stays_bounded() {
        let mut engine = SimulationEngine::new();
        engine.set_parameters(ParameterUpdate::time_step(0.0001));
        engine.start();

        let mut frame_loop = FrameLoop::default();
        let bound = engine.time_step() * engine.max_steps_per_frame() as f64 + 1e-12;
        for _ in 0..600 {
            assert_eq!(frame_loop.advance(&mut engine, 1.0 / 60.0), 10);
            assert!(frame_loop.accumulator() <= bound);
        }

        // A larger step afterwards must not run flat out on old backlog
        engine.set_parameters(ParameterUpdate::time_step(0.01));
        frame_loop.advance(&mut engine, 1.0 / 60.0);
        assert!(frame_loop.advance(&mut engine, 1.0 / 60.0) <= 2);
    }

    #[test]
    fn test_with_config_validates_physics() {
        let physics: PhysicsConfig =
            serde_json::from_str(r#"{"gravitationalConstant": -5.0, "minDistance": 0.0}"#).unwrap();
        let engine = SimulationEngine::with_config(physics, EngineParameters::default());
        assert_eq!(engine.physics_config(), PhysicsConfig::default());
    }

    #[test]
    fn test_with_state_repairs_non_positive_mass() {
        let mut state = create_default_system(&PhysicsConfig::default());
        state.bodies[0].mass = 0.0;
        state.bodies[1].mass = -4.0;
        state.energy = Energy::default();

        let engine = SimulationEngine::with_state(state);
        let repaired = engine.get_state();
        assert!(repaired.bodies.iter().all(|b| b.mass > 0.0));
        assert_eq!(repaired.bodies[0].mass, DEFAULT_IMPORT_MASS);
        assert_eq!(
            repaired.energy,
            system_energy(&repaired.bodies, &PhysicsConfig::default())
        );
    }

    #[test]
    fn test_frame_loop_tick_clamps_delta() {
        let mut engine = SimulationEngine::new();
        let mut frame_loop = FrameLoop::default();
        let t0 = Instant::now();

        assert_eq!(frame_loop.tick(&mut engine, t0), 0.0);
        let delta = frame_loop.tick(&mut engine, t0 + Duration::from_secs(5));
        assert_eq!(delta, MAX_FRAME_DELTA);
    }

    #[test]
    fn test_threaded_frame_loop_advances_and_stops() {
        let engine = shared(SimulationEngine::new());
        engine.lock().start();

        let frames = Arc::new(AtomicUsize::new(0));
        let counter = frames.clone();
        let handle = start_frame_loop(
            engine.clone(),
            Some(Box::new(move |_state, _dt| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
            120,
        );
        assert!(handle.is_active());
        thread::sleep(Duration::from_millis(150));
        handle.stop();

        let time_after_stop = engine.lock().get_state().time;
        assert!(frames.load(Ordering::SeqCst) > 0);
        assert!(time_after_stop > 0.0);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(engine.lock().get_state().time, time_after_stop);
    }
}
