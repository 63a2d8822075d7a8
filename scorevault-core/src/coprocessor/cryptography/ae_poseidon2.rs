//! Poseidon2 AEAD adapter.
//!
//! Wraps the `miden-crypto` AEAD Poseidon2 scheme behind the [`AE`] trait so the
//! reference coprocessor can seal scores and comparison results. Keys, nonces and
//! tags are each four Goldilocks field elements (32 bytes).

use super::traits::AE;
use crate::coprocessor::CoprocessorError;
use cosmian_crypto_core::{SymmetricKey, reexport::rand_core::CryptoRngCore};
use miden_crypto::{
    aead::aead_poseidon2::{EncryptedData, Nonce, SecretKey},
    utils::{Deserializable, Serializable},
};
use zeroize::Zeroizing;

pub const POSEIDON2_KEY_SIZE: usize = 32;

pub const POSEIDON2_NONCE_SIZE: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct Poseidon2Aead;

impl Poseidon2Aead {
    fn to_secret_key(
        key: &SymmetricKey<POSEIDON2_KEY_SIZE>,
    ) -> Result<SecretKey, CoprocessorError> {
        SecretKey::read_from_bytes(&key[..])
            .map_err(|_| CoprocessorError::Aead("failed to create secret key".to_string()))
    }
}

impl AE<POSEIDON2_KEY_SIZE> for Poseidon2Aead {
    type Error = CoprocessorError;

    fn encrypt(
        rng: &mut impl CryptoRngCore,
        key: &SymmetricKey<POSEIDON2_KEY_SIZE>,
        ptx: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CoprocessorError> {
        let secret_key = Self::to_secret_key(key)?;

        // Fresh nonce per seal: two encryptions of the same score never share a handle.
        let mut nonce_bytes = [0u8; POSEIDON2_NONCE_SIZE];
        rng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::read_from_bytes(&nonce_bytes)
            .map_err(|_| CoprocessorError::Aead("failed to create nonce".to_string()))?;

        let encrypted_data = secret_key
            .encrypt_bytes_with_nonce(ptx, aad, nonce)
            .map_err(|e| CoprocessorError::Aead(format!("encryption failed: {e:?}")))?;

        Ok(encrypted_data.to_bytes())
    }

    fn decrypt(
        key: &SymmetricKey<POSEIDON2_KEY_SIZE>,
        ctx: &[u8],
        aad: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, CoprocessorError> {
        let secret_key = Self::to_secret_key(key)?;

        let encrypted_data = EncryptedData::read_from_bytes(ctx)
            .map_err(|_| CoprocessorError::Aead("failed to deserialize ciphertext".to_string()))?;

        let plaintext = secret_key
            .decrypt_bytes_with_associated_data(&encrypted_data, aad)
            .map_err(|e| CoprocessorError::Aead(format!("decryption failed: {e:?}")))?;

        Ok(Zeroizing::new(plaintext))
    }
}
