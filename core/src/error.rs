use crate::types::Minute;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Determinism violation: replay diverged at event {index} (minute {minute})")]
    DeterminismViolation { index: usize, minute: Minute },
}

pub type SimResult<T> = Result<T, SimError>;
