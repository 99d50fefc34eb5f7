//! Build a ready-to-run universe from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`: the
//! universe at t = 0 plus how long and how fast to run it. All validation
//! (step, duration, masses, vector lengths) happens here, before any step

use log::info;

use crate::configuration::config::ScenarioConfig;
use crate::error::{Error, Result};
use crate::simulation::engine::NewtonianUniverse;
use crate::simulation::states::Body;

pub struct Scenario {
    pub universe: NewtonianUniverse,
    pub t_end: f64, // run duration passed to `begin`
    pub real_time: bool, // wall-clock pacing passed to `begin`
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        let parameters = cfg.parameters.to_parameters();

        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| {
                bc.to_body().map_err(|e| match e {
                    Error::InvalidConfiguration(msg) => {
                        Error::InvalidConfiguration(format!("body {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<Body>>>()?;

        let t_end = cfg.parameters.t_end;
        if !t_end.is_finite() || t_end < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "t_end must be finite and >= 0, got {t_end}"
            )));
        }
        let real_time = cfg.parameters.real_time;
        let universe = NewtonianUniverse::new(parameters, bodies)?;

        info!(
            "built scenario: {} bodies, dt={}, t_end={}",
            universe.bodies().len(),
            universe.step(),
            t_end
        );

        Ok(Self {
            universe,
            t_end,
            real_time,
        })
    }

    /// Run the universe to `t_end`
    pub fn run(&mut self) -> Result<()> {
        self.universe.begin(self.t_end, self.real_time)
    }

    /// Current state as a scenario that runs for another `t_end`
    pub fn snapshot(&self) -> ScenarioConfig {
        ScenarioConfig::from_universe(&self.universe, self.t_end)
    }
}
