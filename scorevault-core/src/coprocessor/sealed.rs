use super::{
    CipherHandle, CoprocessorError, EncryptedInput, EncryptedType, HandleAcl, HandleId,
    HomomorphicBackend, INPUT_PROOF_LENGTH, InputProof, Result,
    cryptography::{AE, POSEIDON2_KEY_SIZE, Poseidon2Aead},
};
use crate::{
    configuration::{Configuration, DefaultLabel, ScoreVaultConfiguration},
    log::{debug, warn},
    principal::Principal,
};
use cosmian_crypto_core::{
    CsRng, Secret, SymmetricKey, kdf256,
    reexport::rand_core::{RngCore, SeedableRng},
};
use std::{
    fmt,
    marker::PhantomData,
    sync::{Mutex, MutexGuard},
};
use zeroize::Zeroizing;

const NETWORK_SEED_LENGTH: usize = 32;

const AEAD_KEY_INFO: &[u8] = b"scorevault/aead";
const PROOF_KEY_INFO: &[u8] = b"scorevault/input-proof";

/// Reference encryption collaborator.
///
/// Models a threshold coprocessor: it holds the network key, evaluates
/// comparisons on behalf of the engine and releases plaintext only to
/// requesters the engine has granted access to. Every seal uses a fresh
/// nonce, so re-encrypting the same score yields an unrelated handle.
///
/// # Thread Safety
///
/// All methods take `&self`; the internal RNG is protected by a mutex.
pub struct SealedCoprocessor<TC = ScoreVaultConfiguration<DefaultLabel>> {
    rng: Mutex<CsRng>,
    aead_key: SymmetricKey<POSEIDON2_KEY_SIZE>,
    proof_key: Secret<INPUT_PROOF_LENGTH>,
    _config: PhantomData<TC>,
}

impl<TC: Configuration> SealedCoprocessor<TC> {
    /// Creates a coprocessor with a fresh network key.
    pub fn new() -> Result<Self> {
        Self::from_rng(CsRng::from_entropy())
    }

    /// Creates a coprocessor whose network key and nonces come from `rng`.
    pub fn from_rng(mut rng: CsRng) -> Result<Self> {
        let mut seed_bytes = [0u8; NETWORK_SEED_LENGTH];
        rng.fill_bytes(&mut seed_bytes);
        let seed = Secret::<NETWORK_SEED_LENGTH>::from_unprotected_bytes(&mut seed_bytes);

        let aead_key = SymmetricKey::<POSEIDON2_KEY_SIZE>::derive(&seed, AEAD_KEY_INFO)?;
        let mut proof_key = Secret::<INPUT_PROOF_LENGTH>::default();
        kdf256!(&mut *proof_key, &*seed, PROOF_KEY_INFO);

        Ok(Self { rng: Mutex::new(rng), aead_key, proof_key, _config: PhantomData })
    }

    fn lock_rng(&self) -> Result<MutexGuard<'_, CsRng>> {
        self.rng.lock().map_err(|_| CoprocessorError::MutexPoisoned)
    }

    fn seal(&self, encrypted_type: EncryptedType, plaintext: &[u8]) -> Result<CipherHandle> {
        let ciphertext = Poseidon2Aead::encrypt(
            &mut *self.lock_rng()?,
            &self.aead_key,
            plaintext,
            &[encrypted_type.tag()],
        )?;
        let id = TC::handle_id(encrypted_type.tag(), &ciphertext);
        Ok(CipherHandle::new(id, encrypted_type, ciphertext))
    }

    fn open(&self, handle: &CipherHandle, expected: EncryptedType) -> Result<Zeroizing<Vec<u8>>> {
        if handle.encrypted_type() != expected {
            return Err(CoprocessorError::TypeMismatch {
                expected,
                found: handle.encrypted_type(),
            });
        }
        Poseidon2Aead::decrypt(&self.aead_key, handle.ciphertext(), &[expected.tag()])
    }

    fn open_u32(&self, handle: &CipherHandle) -> Result<u32> {
        let plaintext = self.open(handle, EncryptedType::Uint32)?;
        let bytes: [u8; 4] = plaintext.as_slice().try_into().map_err(|_| {
            CoprocessorError::Malformed(format!("expected 4 bytes, got {}", plaintext.len()))
        })?;
        Ok(u32::from_be_bytes(bytes))
    }

    fn open_bool(&self, handle: &CipherHandle) -> Result<bool> {
        let plaintext = self.open(handle, EncryptedType::Bool)?;
        match plaintext.as_slice() {
            [0] => Ok(false),
            [1] => Ok(true),
            other => {
                Err(CoprocessorError::Malformed(format!("invalid boolean encoding {other:?}")))
            }
        }
    }

    fn input_proof(&self, handle: &HandleId, submitter: &Principal) -> blake3::Hash {
        let mut key = Zeroizing::new([0u8; INPUT_PROOF_LENGTH]);
        key.copy_from_slice(&self.proof_key[..]);
        blake3::keyed_hash(&key, &TC::input_binding(handle, submitter))
    }

    /// Encrypts a score for submission by `submitter`.
    ///
    /// This is the client side of the protocol: the resulting input only
    /// verifies when submitted by the same principal.
    pub fn encrypt_u32(&self, value: u32, submitter: &Principal) -> Result<EncryptedInput> {
        let handle = self.seal(EncryptedType::Uint32, &value.to_be_bytes())?;
        let proof = InputProof(*self.input_proof(&handle.id(), submitter).as_bytes());
        Ok(EncryptedInput { handle, proof })
    }

    /// Decrypts an `euint32` handle for `requester`, provided `acl` grants it.
    pub fn user_decrypt_u32(
        &self,
        handle: &CipherHandle,
        requester: &Principal,
        acl: &impl HandleAcl,
    ) -> Result<u32> {
        self.check_grant(handle, requester, acl)?;
        self.open_u32(handle)
    }

    /// Decrypts an `ebool` handle for `requester`, provided `acl` grants it.
    pub fn user_decrypt_bool(
        &self,
        handle: &CipherHandle,
        requester: &Principal,
        acl: &impl HandleAcl,
    ) -> Result<bool> {
        self.check_grant(handle, requester, acl)?;
        self.open_bool(handle)
    }

    fn check_grant(
        &self,
        handle: &CipherHandle,
        requester: &Principal,
        acl: &impl HandleAcl,
    ) -> Result<()> {
        if acl.is_allowed(&handle.id(), requester) {
            Ok(())
        } else {
            warn!("Decryption of handle {} refused for {requester}", handle.id());
            Err(CoprocessorError::AccessDenied(handle.id().to_string()))
        }
    }
}

impl<TC: Configuration> HomomorphicBackend for SealedCoprocessor<TC> {
    fn verify_input(&self, input: &EncryptedInput, submitter: &Principal) -> Result<CipherHandle> {
        let handle = &input.handle;
        if TC::handle_id(handle.encrypted_type().tag(), handle.ciphertext()) != handle.id() {
            return Err(CoprocessorError::InvalidInputProof);
        }

        // blake3::Hash equality is constant time.
        let expected = self.input_proof(&handle.id(), submitter);
        if expected != blake3::Hash::from(input.proof.0) {
            return Err(CoprocessorError::InvalidInputProof);
        }

        Ok(handle.clone())
    }

    fn ge_scalar(&self, value: &CipherHandle, threshold: u32) -> Result<CipherHandle> {
        let meets = self.open_u32(value)? >= threshold;
        let result = self.seal(EncryptedType::Bool, &[u8::from(meets)])?;
        debug!("Evaluated ge({}, {threshold}) -> {}", value.id(), result.id());
        Ok(result)
    }

    fn encrypt_bool(&self, value: bool) -> Result<CipherHandle> {
        self.seal(EncryptedType::Bool, &[u8::from(value)])
    }
}

impl<TC> fmt::Debug for SealedCoprocessor<TC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedCoprocessor").finish_non_exhaustive()
    }
}
