use scorevault_core::{coprocessor::CoprocessorError, error::EngineError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SystemError {
    #[error("Engine rejected the request: {0}")]
    Engine(#[from] EngineError),

    #[error("Coprocessor failure: {0}")]
    Coprocessor(#[from] CoprocessorError),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("{name} cannot act as {expected:?}")]
    WrongRole { name: String, expected: Role },
}

pub type SystemResult<T> = Result<T, SystemError>;

/// Roles played against the engine in the admissions scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Registrar,
    Teacher,
    Student,
    School,
}

/// Outcome of an application as seen by the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admitted,
    Rejected,
}

impl From<bool> for Decision {
    fn from(meets: bool) -> Self {
        if meets { Decision::Admitted } else { Decision::Rejected }
    }
}
