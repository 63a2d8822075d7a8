//! Threshold Engine
//!
//! Turns a stored encrypted score and a plaintext threshold into an encrypted
//! boolean by delegating the comparison to the encryption collaborator. The
//! engine itself never sees a score, a comparison outcome or any plaintext
//! derived from them.

use crate::{
    configuration::Configuration,
    coprocessor::{CipherHandle, HomomorphicBackend},
    error::{EngineError, Result},
};
use std::marker::PhantomData;

pub struct ThresholdEngine<'a, B, TC> {
    backend: &'a B,
    _config: PhantomData<TC>,
}

impl<'a, B: HomomorphicBackend, TC: Configuration> ThresholdEngine<'a, B, TC> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend, _config: PhantomData }
    }

    /// # Errors
    ///
    /// Returns `InvalidArgument` if `threshold` exceeds
    /// [`Configuration::max_threshold`].
    pub fn validate_threshold(threshold: u32) -> Result<()> {
        let max = TC::max_threshold();
        if threshold > max {
            return Err(EngineError::InvalidArgument(format!(
                "threshold {threshold} is outside [0, {max}]"
            )));
        }
        Ok(())
    }

    /// Encrypted `score >= threshold`.
    pub fn evaluate(&self, score: &CipherHandle, threshold: u32) -> Result<CipherHandle> {
        Self::validate_threshold(threshold)?;
        Ok(self.backend.ge_scalar(score, threshold)?)
    }

    /// Evaluates every slot independently. A missing score yields an
    /// encryption of `false`, so the output has the same length and order as
    /// `scores`.
    pub fn evaluate_batch(
        &self,
        scores: &[Option<&CipherHandle>],
        threshold: u32,
    ) -> Result<Vec<CipherHandle>> {
        Self::validate_threshold(threshold)?;
        scores
            .iter()
            .map(|score| match score {
                Some(score) => self.backend.ge_scalar(score, threshold),
                None => self.backend.encrypt_bool(false),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(EngineError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        configuration::{DefaultLabel, ScoreVaultConfiguration},
        coprocessor::{EncryptedType, HandleAcl, HandleId, SealedCoprocessor},
        principal::Principal,
    };
    use cosmian_crypto_core::{CsRng, reexport::rand_core::SeedableRng};

    type Engine<'a> = ThresholdEngine<'a, SealedCoprocessor, ScoreVaultConfiguration<DefaultLabel>>;

    struct AllowAll;

    impl HandleAcl for AllowAll {
        fn is_allowed(&self, _: &HandleId, _: &Principal) -> bool {
            true
        }
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(Engine::validate_threshold(0).is_ok());
        assert!(Engine::validate_threshold(100).is_ok());
        assert!(matches!(Engine::validate_threshold(101), Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn test_batch_fills_missing_with_false() {
        let cop = SealedCoprocessor::from_rng(CsRng::from_seed([11u8; 32])).unwrap();
        let engine = Engine::new(&cop);
        let teacher = Principal::from_key_material(b"teacher");
        let reader = Principal::from_key_material(b"reader");

        let high = cop.encrypt_u32(90, &teacher).unwrap().handle;
        let low = cop.encrypt_u32(40, &teacher).unwrap().handle;

        let results = engine.evaluate_batch(&[Some(&high), None, Some(&low)], 50).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.encrypted_type() == EncryptedType::Bool));

        let plain: Vec<bool> = results
            .iter()
            .map(|r| cop.user_decrypt_bool(r, &reader, &AllowAll).unwrap())
            .collect();
        assert_eq!(plain, vec![true, false, false]);
    }

    #[test]
    fn test_out_of_range_threshold_skips_backend() {
        let cop = SealedCoprocessor::from_rng(CsRng::from_seed([12u8; 32])).unwrap();
        let engine = Engine::new(&cop);
        let teacher = Principal::from_key_material(b"teacher");
        let score = cop.encrypt_u32(100, &teacher).unwrap().handle;

        assert!(matches!(engine.evaluate(&score, 101), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(
            engine.evaluate_batch(&[Some(&score)], 150),
            Err(EngineError::InvalidArgument(_))
        ));
    }
}
