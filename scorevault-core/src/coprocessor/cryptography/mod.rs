//! Symmetric primitives backing the reference coprocessor.

pub mod ae_poseidon2;
pub mod traits;

pub use ae_poseidon2::{POSEIDON2_KEY_SIZE, Poseidon2Aead};
pub use traits::AE;
