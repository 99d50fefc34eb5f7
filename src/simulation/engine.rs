//! The stepping engine
//!
//! `NewtonianUniverse` owns the bodies and the clock and advances them in
//! fixed steps:
//!
//! 1. scan for coincident pairs and resolve them elastically,
//! 2. recompute every acceleration from the current positions,
//! 3. kick velocities, drift positions (trajectories grow by one),
//! 4. advance the clock.
//!
//! A step is atomic: detection and force evaluation happen before any body
//! is mutated, so a failed step leaves the universe exactly as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info, log, trace, Level};

use crate::error::{Error, Result};
use crate::simulation::collision::{detect_collisions, resolve_collisions, CollisionPair};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyId, NVec3, RunState};

/// Cooperative stop flag, checked before every step (never mid-step)
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Re-arm after a stop so the run can be resumed
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct NewtonianUniverse {
    parameters: Parameters,
    bodies: Vec<Body>,
    forces: AccelSet,
    steps_taken: u64, // clock = steps_taken * step
    pending_collisions: Vec<CollisionPair>,
    accels: Vec<NVec3>, // scratch buffer, one per body
    state: RunState,
    stop: StopHandle,
}

impl NewtonianUniverse {
    /// Build a universe with direct Newtonian gravity.
    /// Fails on invalid parameters or an empty body list
    pub fn new(parameters: Parameters, mut bodies: Vec<Body>) -> Result<Self> {
        parameters.validate()?;
        if bodies.is_empty() {
            return Err(Error::InvalidConfiguration(
                "a universe needs at least one body".into(),
            ));
        }

        for (i, b) in bodies.iter_mut().enumerate() {
            b.id = BodyId(i);
        }

        let forces = AccelSet::new().with(NewtonianGravity {
            G: parameters.G,
            min_separation: parameters.min_separation,
        });
        let n = bodies.len();

        Ok(Self {
            parameters,
            bodies,
            forces,
            steps_taken: 0,
            pending_collisions: Vec::new(),
            accels: vec![NVec3::zeros(); n],
            state: RunState::NotStarted,
            stop: StopHandle::default(),
        })
    }

    /// Replace the acceleration terms (e.g. to add contributors beyond gravity)
    pub fn with_forces(mut self, forces: AccelSet) -> Self {
        self.forces = forces;
        self
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn step(&self) -> f64 {
        self.parameters.step
    }

    /// Simulated time in seconds
    pub fn clock(&self) -> f64 {
        self.steps_taken as f64 * self.parameters.step
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Live view of the bodies; positions only change inside a step
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run until the clock reaches `duration` seconds.
    ///
    /// With `real_time` the loop sleeps `step` seconds of wall clock between
    /// iterations and logs the state each time; the trajectory is the same
    /// either way. Calling again after a finished or stopped run extends it
    pub fn begin(&mut self, duration: f64, real_time: bool) -> Result<()> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "duration must be finite and >= 0, got {duration}"
            )));
        }
        let target = target_steps(duration, self.parameters.step);
        self.run_until(target, real_time)
    }

    /// Advance exactly one step
    pub fn step_once(&mut self) -> Result<()> {
        self.run_until(self.steps_taken + 1, false)
    }

    /// Every body's trajectory, in body order. Only available once a run has
    /// finished or stopped
    pub fn trajectories(&self) -> Result<Vec<&[NVec3]>> {
        self.ensure_complete("trajectories")?;
        Ok(self.bodies.iter().map(|b| b.trajectory()).collect())
    }

    /// Clock value at the end of the last run
    pub fn final_clock(&self) -> Result<f64> {
        self.ensure_complete("final clock")?;
        Ok(self.clock())
    }

    /// Log `t` and every body at `level`
    pub fn log_state(&self, level: Level) {
        log!(level, "t={}", self.clock());
        for b in &self.bodies {
            log!(level, "\t{b}");
        }
    }

    fn ensure_complete(&self, what: &str) -> Result<()> {
        match self.state {
            RunState::Finished | RunState::Stopped => Ok(()),
            other => Err(Error::IllegalStateTransition(format!(
                "{what} requested while run is {other:?}; call begin first"
            ))),
        }
    }

    fn run_until(&mut self, target: u64, real_time: bool) -> Result<()> {
        if self.state == RunState::Failed {
            return Err(Error::IllegalStateTransition(
                "cannot resume a failed run".into(),
            ));
        }

        self.state = RunState::Running;
        debug!(
            "running {} bodies from t={} to step {} (dt={})",
            self.bodies.len(),
            self.clock(),
            target,
            self.parameters.step
        );

        while self.steps_taken < target {
            if self.stop.is_requested() {
                self.state = RunState::Stopped;
                info!("stop requested, halting at t={}", self.clock());
                return Ok(());
            }

            if let Err(e) = self.advance() {
                self.state = RunState::Failed;
                return Err(e);
            }

            if real_time {
                thread::sleep(Duration::from_secs_f64(self.parameters.step));
                self.log_state(Level::Info);
            }
        }

        self.state = RunState::Finished;
        debug!("run finished at t={}", self.clock());
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        let t = self.clock();
        let dt = self.parameters.step;

        // Read-only phase: nothing below mutates a body if it fails
        self.pending_collisions = detect_collisions(&self.bodies);
        if let Err(e) = self.forces.accumulate_accels(t, &self.bodies, &mut self.accels) {
            self.pending_collisions.clear();
            return Err(e);
        }

        // Resolution only touches velocities, so the accelerations above
        // (a function of positions) are still the ones for this step
        resolve_collisions(&mut self.bodies, &mut self.pending_collisions)?;
        euler_integrator(&mut self.bodies, &self.accels, dt);
        self.steps_taken += 1;

        debug!("step {} done, t={}", self.steps_taken, self.clock());
        for b in &self.bodies {
            trace!("\t{b}");
        }
        Ok(())
    }
}

/// Number of steps after which `clock >= duration`.
/// Ratios within 1e-9 of an integer are rounded so 1.0 / 0.1 runs 10 steps
fn target_steps(duration: f64, step: f64) -> u64 {
    let ratio = duration / step;
    let nearest = ratio.round();
    if (ratio - nearest).abs() < 1e-9 {
        nearest as u64
    } else {
        ratio.ceil() as u64
    }
}
