//! Encryption collaborator seam.
//!
//! The engine never touches plaintext. Everything it needs from homomorphic
//! encryption goes through [`HomomorphicBackend`]:
//!
//! - validating a teacher's encrypted input before it is stored,
//! - comparing a stored ciphertext against a plaintext threshold,
//! - producing an encrypted constant for students without a record.
//!
//! Decryption happens outside the engine. A decrypting collaborator asks the
//! engine, through [`HandleAcl`], whether a requester holds a grant on a handle.
//!
//! [`SealedCoprocessor`] is a reference collaborator: a coprocessor holding a
//! network key, evaluating comparisons under Poseidon2 AEAD, and enforcing the
//! engine's grants on user decryption.

pub mod cryptography;
mod error;
mod handle;
mod sealed;

pub use error::CoprocessorError;
pub use handle::{
    CipherHandle, EncryptedInput, EncryptedType, HandleId, INPUT_PROOF_LENGTH, InputProof,
};
pub use sealed::SealedCoprocessor;

use crate::principal::Principal;

pub type Result<T> = std::result::Result<T, CoprocessorError>;

pub trait HomomorphicBackend {
    /// Checks that `input` was encrypted for `submitter` and returns the
    /// handle to store.
    fn verify_input(&self, input: &EncryptedInput, submitter: &Principal) -> Result<CipherHandle>;

    /// Encrypted `value >= threshold` for an encrypted `euint32` value.
    fn ge_scalar(&self, value: &CipherHandle, threshold: u32) -> Result<CipherHandle>;

    fn encrypt_bool(&self, value: bool) -> Result<CipherHandle>;
}

/// Read side of the engine's decryption grants.
pub trait HandleAcl {
    fn is_allowed(&self, handle: &HandleId, requester: &Principal) -> bool;
}

impl<B: HomomorphicBackend + ?Sized> HomomorphicBackend for &B {
    fn verify_input(&self, input: &EncryptedInput, submitter: &Principal) -> Result<CipherHandle> {
        (**self).verify_input(input, submitter)
    }

    fn ge_scalar(&self, value: &CipherHandle, threshold: u32) -> Result<CipherHandle> {
        (**self).ge_scalar(value, threshold)
    }

    fn encrypt_bool(&self, value: bool) -> Result<CipherHandle> {
        (**self).encrypt_bool(value)
    }
}

impl<B: HomomorphicBackend + ?Sized> HomomorphicBackend for std::sync::Arc<B> {
    fn verify_input(&self, input: &EncryptedInput, submitter: &Principal) -> Result<CipherHandle> {
        (**self).verify_input(input, submitter)
    }

    fn ge_scalar(&self, value: &CipherHandle, threshold: u32) -> Result<CipherHandle> {
        (**self).ge_scalar(value, threshold)
    }

    fn encrypt_bool(&self, value: bool) -> Result<CipherHandle> {
        (**self).encrypt_bool(value)
    }
}
