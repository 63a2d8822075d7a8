use super::EncryptedType;
use cosmian_crypto_core::CryptoCoreError;
use thiserror::Error;

/// Errors raised by an encryption collaborator.
#[derive(Error, Debug)]
pub enum CoprocessorError {
    /// The input proof does not bind the ciphertext to the submitting principal
    #[error("invalid input proof")]
    InvalidInputProof,

    /// The ciphertext does not hold the expected encrypted type
    #[error("ciphertext type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: EncryptedType, found: EncryptedType },

    /// The requester holds no decryption grant on the handle
    #[error("access denied to handle {0}")]
    AccessDenied(String),

    /// Poseidon2 AEAD operation failed
    #[error("AEAD error: {0}")]
    Aead(String),

    /// Underlying crypto library error
    #[error("CryptoCore error: {0}")]
    CryptoCore(#[from] CryptoCoreError),

    /// A mutex lock was poisoned (another thread panicked while holding the lock)
    #[error("mutex lock poisoned")]
    MutexPoisoned,

    /// Decoded bytes do not form a valid value
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
}
