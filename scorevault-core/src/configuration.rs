mod scorevault;

use crate::{coprocessor::HandleId, principal::Principal};
pub use scorevault::ScoreVaultConfiguration;

/// Size in bytes of the digests produced by [`Configuration::hash`].
pub const DIGEST_BYTES: usize = 32;

pub type Digest = [u8; DIGEST_BYTES];

/// Domain separation label mixed into every digest of a deployment.
///
/// Two engines configured with different labels never agree on a handle
/// identifier or an input proof, even when they share coprocessor keys.
pub trait DomainLabel: Clone + Send + Sync + 'static {
    fn domain_label() -> &'static [u8];
}

#[derive(Clone)]
pub struct DefaultLabel;

impl DomainLabel for DefaultLabel {
    fn domain_label() -> &'static [u8] {
        "ScoreVault".as_bytes()
    }
}

pub trait Configuration: Clone + Send + Sync + 'static {
    fn hash(item: &[u8]) -> Digest;

    /// Highest admission threshold accepted by the threshold engine (inclusive).
    fn max_threshold() -> u32;

    fn handle_id(type_tag: u8, ciphertext: &[u8]) -> HandleId;

    /// Bytes authenticated by an input proof: the handle and who submitted it.
    fn input_binding(handle: &HandleId, submitter: &Principal) -> Vec<u8>;
}
