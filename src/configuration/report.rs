//! Serializable read-out of a completed run, for plotting outside the crate

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::simulation::engine::NewtonianUniverse;
use crate::simulation::states::NVec3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyReport {
    pub id: usize,
    pub label: String,
    pub mass: f64,
    pub position: [f64; 3], // final
    pub velocity: [f64; 3], // final
    pub trajectory: Vec<[f64; 3]>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunReport {
    pub t: f64, // final clock
    pub step: f64,
    pub steps: u64,
    pub bodies: Vec<BodyReport>,
}

fn row(v: &NVec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

impl RunReport {
    /// Fails with `IllegalStateTransition` unless the run has completed
    pub fn from_universe(universe: &NewtonianUniverse) -> Result<Self> {
        let t = universe.final_clock()?;
        let trajectories = universe.trajectories()?;

        let bodies = universe
            .bodies()
            .iter()
            .zip(trajectories)
            .map(|(b, traj)| BodyReport {
                id: b.id.0,
                label: b.label.clone(),
                mass: b.mass(),
                position: row(&b.position()),
                velocity: row(&b.velocity),
                trajectory: traj.iter().map(row).collect(),
            })
            .collect();

        Ok(Self {
            t,
            step: universe.step(),
            steps: universe.steps_taken(),
            bodies,
        })
    }
}

pub fn write_report(path: impl AsRef<Path>, report: &RunReport) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_yaml::to_writer(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}
