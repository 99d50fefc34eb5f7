//! Error type shared by the simulation core and the configuration layer

use thiserror::Error;

/// Crate-wide result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad step size, duration, mass, separation floor or body list.
    /// Always reported before any simulation work happens
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Force evaluation produced a non-finite acceleration; the run is terminated
    #[error("numeric singularity: {0}")]
    NumericSingularity(String),

    /// Run-dependent read-out requested in the wrong state (e.g. before `begin`)
    #[error("illegal state transition: {0}")]
    IllegalStateTransition(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_kind() {
        let e = Error::InvalidConfiguration("step must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("step"));
    }
}
