//! School admissions played against a ScoreVault engine.
//!
//! A registrar runs the engine and authorizes teachers. Teachers encrypt and
//! submit scores, students read their own and share them, and a school learns
//! only whether each applicant clears its cutoff.

pub mod admissions_office;
pub mod types;

pub use admissions_office::AdmissionsOffice;
pub use types::{Decision, Role, SystemError, SystemResult};
