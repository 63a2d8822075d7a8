//! # ScoreVault Core
//!
//! Access-control engine for encrypted student scores.
//!
//! Teachers submit scores as opaque ciphertext handles. Students read their own
//! handle and may share it with others. A third party, such as a school, can
//! learn whether a score meets an admission threshold without ever learning the
//! score: the comparison runs on ciphertext and yields an encrypted boolean.
//!
//! # Quick Start
//!
//! ```ignore
//! use scorevault_core::prelude::*;
//!
//! let coprocessor = SealedCoprocessor::new()?;
//! let mut vault = ScoreVault::new(registrar, &coprocessor)?;
//!
//! vault.authorize_teacher(&registrar, teacher)?;
//! let input = coprocessor.encrypt_u32(85, &teacher)?;
//! vault.submit_score(&teacher, student, &input)?;
//!
//! vault.grant_access(&student, school)?;
//! let verdict = vault.meets_admission_threshold(&school, &student, 80)?;
//! let admitted = coprocessor.user_decrypt_bool(&verdict, &school, &vault)?;
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         ScoreVault                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐              │
//! │  │   Access    │  │   Record    │  │  Threshold  │              │
//! │  │   Control   │  │    Store    │  │   Engine    │              │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘              │
//! │         │                │                │                     │
//! │         └────────────────┼────────────────┘                     │
//! │                          │                                      │
//! │  ┌───────────────────────┴───────────────────────┐              │
//! │  │        HomomorphicBackend / HandleAcl         │              │
//! │  │  ┌─────────────────┐  ┌──────────────────┐    │              │
//! │  │  │ Poseidon2 AEAD  │  │  BLAKE3 keyed    │    │              │
//! │  │  │ (miden-crypto)  │  │  input proofs    │    │              │
//! │  │  └─────────────────┘  └──────────────────┘    │              │
//! │  └───────────────────────────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`access_control`]: owner, teacher registry, grants and handle grants
//! - [`records`]: one encrypted score slot per student
//! - [`threshold`]: encrypted admission-threshold checks
//! - [`engine`]: the [`engine::ScoreVault`] façade
//! - [`coprocessor`]: the encryption collaborator seam and a reference coprocessor
//!
//! # Security Considerations
//!
//! - The engine never decrypts. Plaintext only leaves the coprocessor for a
//!   requester holding a grant on the handle.
//! - Score inputs carry a proof bound to the submitting teacher; replaying
//!   another teacher's ciphertext is rejected.

/// Owner, teacher registry, access grants and per-handle decryption grants
pub mod access_control;

/// Type-level configuration: domain-separated hashing and threshold bounds
pub mod configuration;

/// Encryption collaborator seam and the reference coprocessor
pub mod coprocessor;

pub mod engine;
pub mod error;
pub mod events;
pub mod principal;
pub mod records;
pub mod threshold;

/// Re-exported logging macros from tracing
pub mod log {
    pub use tracing::{debug, error, info, trace, warn};
}

/// Prelude module for convenient imports.
///
/// ```ignore
/// use scorevault_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access_control::AccessControl;

    pub use crate::configuration::{Configuration, DefaultLabel, DomainLabel, ScoreVaultConfiguration};

    pub use crate::coprocessor::{
        CipherHandle, CoprocessorError, EncryptedInput, EncryptedType, HandleAcl, HandleId,
        HomomorphicBackend, SealedCoprocessor,
    };

    pub use crate::engine::ScoreVault;
    pub use crate::error::EngineError;
    pub use crate::events::EngineEvent;
    pub use crate::principal::Principal;
}
