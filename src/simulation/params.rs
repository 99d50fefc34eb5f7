//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds what the universe reads while stepping:
//! - fixed step size,
//! - gravitational constant `G` and the separation floor used near coincidence
//!
//! Run length and wall-clock pacing are arguments to `begin`, not parameters

use crate::error::{Error, Result};

/// CODATA 2018 Newtonian constant of gravitation, m^3 kg^-1 s^-2
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

/// Default distance floor for the force model, equal to the collision tolerance
pub const DEFAULT_MIN_SEPARATION: f64 = crate::simulation::vector::EPSILON;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub step: f64, // step size (s)
    pub G: f64, // gravitational constant
    pub min_separation: f64, // distance floor in the force model (m)
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            step: 0.25,
            G: GRAVITATIONAL_CONSTANT,
            min_separation: DEFAULT_MIN_SEPARATION,
        }
    }
}

impl Parameters {
    /// Default parameters with the given step
    pub fn with_step(step: f64) -> Self {
        Self { step, ..Self::default() }
    }

    /// Same parameters with gravity switched off
    pub fn without_gravity(mut self) -> Self {
        self.G = 0.0;
        self
    }

    /// Reject anything that would make a run meaningless before it starts
    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "step must be finite and > 0, got {}",
                self.step
            )));
        }
        if !self.G.is_finite() {
            return Err(Error::InvalidConfiguration("G must be finite".into()));
        }
        if !self.min_separation.is_finite() || self.min_separation <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "min_separation must be finite and > 0, got {}",
                self.min_separation
            )));
        }
        Ok(())
    }
}
