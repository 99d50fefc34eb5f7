pub mod simulation;
pub mod configuration;
#[cfg(feature = "vis")]
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use error::{Error, Result};

pub use simulation::vector::{approx_equal, feq, magnitude, NVec3, EPSILON};
pub use simulation::states::{Body, BodyId, RunState};
pub use simulation::params::{Parameters, GRAVITATIONAL_CONSTANT};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::collision::{detect_collisions, resolve_pair, elastic_velocities, CollisionPair};
pub use simulation::integrator::euler_integrator;
pub use simulation::engine::{NewtonianUniverse, StopHandle};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ParametersConfig, BodyConfig, ScenarioConfig, load_scenario, save_scenario};
pub use configuration::report::{BodyReport, RunReport, write_report};

#[cfg(feature = "vis")]
pub use visualization::trajectory_vis3d::run_3d;

pub use benchmark::benchmark::bench_step;
