//! Configuration types for loading and saving scenarios as YAML.
//!
//! - [`ParametersConfig`] – step size, run length and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper read from / written to YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   step: 0.25              # fixed step size (s)
//!   t_end: 10.0             # run duration (s)
//!   G: 6.6743e-11           # optional, gravitational constant
//!   min_separation: 0.001   # optional, force-model distance floor
//!   real_time: false        # optional, pace the run on the wall clock
//!
//! bodies:
//!   - x: [0.0, 0.0, 0.0]
//!     v: [1.0, 5.0, 5.0]
//!     m: 10.0
//!     label: k              # optional, defaults to "r"
//!   - x: [5.0, 0.0, 0.0]
//!     v: [-1.0, 5.0, 5.0]
//!     m: 10.0
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::simulation::engine::NewtonianUniverse;
use crate::simulation::params::{Parameters, DEFAULT_MIN_SEPARATION, GRAVITATIONAL_CONSTANT};
use crate::simulation::states::{Body, NVec3, DEFAULT_LABEL};

fn default_g() -> f64 {
    GRAVITATIONAL_CONSTANT
}

fn default_min_separation() -> f64 {
    DEFAULT_MIN_SEPARATION
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub step: f64, // time step size
    pub t_end: f64, // run duration
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_min_separation")]
    pub min_separation: f64, // force-model distance floor
    #[serde(default)]
    pub real_time: bool, // wall-clock pacing
}

impl ParametersConfig {
    /// The stepping parameters; `t_end` and `real_time` stay with the scenario
    pub fn to_parameters(&self) -> Parameters {
        Parameters {
            step: self.step,
            G: self.G,
            min_separation: self.min_separation,
        }
    }

    pub fn from_parameters(p: &Parameters, t_end: f64, real_time: bool) -> Self {
        Self {
            step: p.step,
            t_end,
            G: p.G,
            min_separation: p.min_separation,
            real_time,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position, 3 components
    pub v: Vec<f64>, // velocity, 3 components
    pub m: f64, // mass
    #[serde(default = "default_label")]
    pub label: String, // colour tag for the viewer
}

impl BodyConfig {
    pub fn to_body(&self) -> Result<Body> {
        Body::new(vec3("x", &self.x)?, vec3("v", &self.v)?, self.m, self.label.clone())
    }

    /// Current state of `b` as a body entry
    pub fn from_body(b: &Body) -> Self {
        let x = b.position();
        Self {
            x: vec![x.x, x.y, x.z],
            v: vec![b.velocity.x, b.velocity.y, b.velocity.z],
            m: b.mass(),
            label: b.label.clone(),
        }
    }
}

fn vec3(name: &str, c: &[f64]) -> Result<NVec3> {
    match c {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(Error::InvalidConfiguration(format!(
            "`{name}` must have 3 components, got {}",
            c.len()
        ))),
    }
}

/// Top-level scenario configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Snapshot the current state of `universe` as a scenario that starts
    /// where it left off and runs for `t_end` more seconds
    pub fn from_universe(universe: &NewtonianUniverse, t_end: f64) -> Self {
        Self {
            parameters: ParametersConfig::from_parameters(universe.parameters(), t_end, false),
            bodies: universe.bodies().iter().map(BodyConfig::from_body).collect(),
        }
    }
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioConfig> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}

pub fn save_scenario(path: impl AsRef<Path>, cfg: &ScenarioConfig) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_yaml::to_writer(&mut writer, cfg)?;
    writer.flush()?;
    Ok(())
}
