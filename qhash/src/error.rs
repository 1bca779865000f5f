use qsim::SimError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QHashError {
    #[error("Input is empty and the profile rejects empty input")]
    EmptyInput,
    #[error("Invalid hash profile: {0}")]
    InvalidProfile(String),
    #[error("Block size {size} is outside {min}..={max}")]
    InvalidBlockSize { size: usize, min: usize, max: usize },
    #[error("Could not read hash profile: {0}")]
    Profile(#[from] serde_json::Error),
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimError),
}

impl QHashError {
    /// True when a caller-supplied deadline stopped the computation.
    pub fn is_aborted(&self) -> bool {
        matches!(
            self,
            QHashError::Simulation(SimError::ComputationAborted { .. })
        )
    }
}
