//! Core state types for the n-body simulation
//!
//! - `BodyId` stable per-universe index used in diagnostics
//! - `Body` point mass with its position history
//! - `RunState` lifecycle of a `NewtonianUniverse` run

use std::fmt;

use crate::error::{Error, Result};
pub use crate::simulation::vector::NVec3;
use crate::simulation::vector::fmt_vec;

/// Default presentation tag, matplotlib-style single letter colour
pub const DEFAULT_LABEL: &str = "r";

/// Index of a body inside its universe, assigned at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point mass.
///
/// `position` is private: the only way to move a body is [`Body::advance_to`],
/// which also appends to the trajectory, so the history length always tracks
/// the number of completed steps
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    position: NVec3, // m
    pub velocity: NVec3, // m/s
    pub acceleration: NVec3, // m/s^2, recomputed every step
    mass: f64, // kg
    pub label: String, // colour / tag, not interpreted by the core
    trajectory: Vec<NVec3>,
}

impl Body {
    /// Create a body at rest acceleration-wise; `mass` must be finite and > 0
    pub fn new(position: NVec3, velocity: NVec3, mass: f64, label: impl Into<String>) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "mass must be finite and > 0, got {mass}"
            )));
        }
        if !position.iter().all(|c| c.is_finite()) || !velocity.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidConfiguration(
                "position and velocity components must be finite".into(),
            ));
        }

        Ok(Self {
            id: BodyId::default(),
            position,
            velocity,
            acceleration: NVec3::zeros(),
            mass,
            label: label.into(),
            trajectory: vec![position],
        })
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Linear momentum m * v
    pub fn momentum(&self) -> NVec3 {
        self.mass * self.velocity
    }

    /// Move to `new_position` and record it in the trajectory
    pub fn advance_to(&mut self, new_position: NVec3) {
        self.position = new_position;
        self.trajectory.push(new_position);
    }

    /// Every recorded position, initial one first
    pub fn trajectory(&self) -> &[NVec3] {
        &self.trajectory
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Body(id={}, pos={}, vel={}, mass={}, label={})",
            self.id,
            fmt_vec(&self.position),
            fmt_vec(&self.velocity),
            format_args!("{:?}", self.mass),
            self.label
        )
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Finished,
    Stopped, // cooperative stop honoured at a step boundary
    Failed, // terminal numeric failure
}
