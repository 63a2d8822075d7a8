use super::{Configuration, DIGEST_BYTES, Digest, DomainLabel};
use crate::{coprocessor::HandleId, principal::Principal};
use core::marker::PhantomData;

/// Admission thresholds are percentages.
const MAX_ADMISSION_THRESHOLD: u32 = 100;

const HANDLE_ID_TAG: u8 = 0x01;
const INPUT_BINDING_TAG: u8 = 0x02;

#[derive(Clone)]
pub struct ScoreVaultConfiguration<L>(PhantomData<L>);

impl<L: DomainLabel> Configuration for ScoreVaultConfiguration<L> {
    fn hash(item: &[u8]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(L::domain_label());
        hasher.update(item);
        hasher.finalize().into()
    }

    fn max_threshold() -> u32 {
        MAX_ADMISSION_THRESHOLD
    }

    fn handle_id(type_tag: u8, ciphertext: &[u8]) -> HandleId {
        let mut data = Vec::with_capacity(2 + ciphertext.len());
        data.push(HANDLE_ID_TAG);
        data.push(type_tag);
        data.extend_from_slice(ciphertext);
        HandleId(Self::hash(&data))
    }

    fn input_binding(handle: &HandleId, submitter: &Principal) -> Vec<u8> {
        let mut data = Vec::with_capacity(1 + DIGEST_BYTES + submitter.as_bytes().len());
        data.push(INPUT_BINDING_TAG);
        data.extend_from_slice(handle.as_bytes());
        data.extend_from_slice(submitter.as_bytes());
        Self::hash(&data).to_vec()
    }
}
