use crate::coprocessor::CoprocessorError;
use thiserror::Error;

/// Errors returned by engine operations.
///
/// Every error is a rejected operation: state is left exactly as it was
/// before the call.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The caller lacks the required role or grant
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Null principal or out-of-range input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The targeted student has no score record
    #[error("not found: {0}")]
    NotFound(String),

    /// The encryption collaborator failed
    #[error("coprocessor error: {0}")]
    Coprocessor(#[from] CoprocessorError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
