use cosmian_crypto_core::{SymmetricKey, reexport::rand_core::CryptoRngCore};
use zeroize::Zeroizing;

/// Authenticated encryption with associated data.
pub trait AE<const KEY_LENGTH: usize> {
    type Error: std::error::Error;

    fn encrypt(
        rng: &mut impl CryptoRngCore,
        key: &SymmetricKey<KEY_LENGTH>,
        ptx: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, Self::Error>;

    fn decrypt(
        key: &SymmetricKey<KEY_LENGTH>,
        ctx: &[u8],
        aad: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Self::Error>;
}
