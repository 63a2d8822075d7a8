//! Caller identities.
//!
//! A [`Principal`] is the authenticated caller identity handed to the engine by
//! the identity/transport layer. The engine never inspects its bytes beyond
//! equality and hashing; the all-zero value is reserved as the null identity.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Length in bytes of a principal (account address equivalent).
pub const PRINCIPAL_LENGTH: usize = 20;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal([u8; PRINCIPAL_LENGTH]);

impl Principal {
    /// The null identity. Never a valid owner, teacher, student or grantee.
    pub const NULL: Self = Self([0u8; PRINCIPAL_LENGTH]);

    pub const fn new(bytes: [u8; PRINCIPAL_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derives a principal from arbitrary key material (e.g. a public key).
    ///
    /// Uses the first [`PRINCIPAL_LENGTH`] bytes of the BLAKE3 digest, in the
    /// same way account addresses truncate a public-key hash.
    pub fn from_key_material(material: &[u8]) -> Self {
        let digest = blake3::hash(material);
        let mut bytes = [0u8; PRINCIPAL_LENGTH];
        bytes.copy_from_slice(&digest.as_bytes()[..PRINCIPAL_LENGTH]);
        Self(bytes)
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; PRINCIPAL_LENGTH]
    }

    pub fn as_bytes(&self) -> &[u8; PRINCIPAL_LENGTH] {
        &self.0
    }
}

impl From<[u8; PRINCIPAL_LENGTH]> for Principal {
    fn from(bytes: [u8; PRINCIPAL_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({self})")
    }
}

/// Errors raised when parsing a principal from its hex form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParsePrincipalError {
    #[error("missing 0x prefix")]
    MissingPrefix,

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl FromStr for Principal {
    type Err = ParsePrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(ParsePrincipalError::MissingPrefix)?;

        let mut bytes = [0u8; PRINCIPAL_LENGTH];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}
