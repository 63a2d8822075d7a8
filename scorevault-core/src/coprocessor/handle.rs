use super::CoprocessorError;
use crate::configuration::{DIGEST_BYTES, Digest};
use cosmian_crypto_core::bytes_ser_de::{Deserializer, Serializable, Serializer, to_leb128_len};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length in bytes of an [`InputProof`].
pub const INPUT_PROOF_LENGTH: usize = 32;

/// Identifier of a ciphertext, used as the key of decryption grants.
///
/// The identifier is a digest over the ciphertext. It labels a handle; it says
/// nothing about the plaintext.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId(pub Digest);

impl HandleId {
    pub fn as_bytes(&self) -> &Digest {
        &self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..4]))
    }
}

impl fmt::Debug for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandleId({self})")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EncryptedType {
    Bool = 0,
    Uint32 = 4,
}

impl EncryptedType {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Result<Self, CoprocessorError> {
        match tag {
            0 => Ok(Self::Bool),
            4 => Ok(Self::Uint32),
            _ => Err(CoprocessorError::Malformed(format!("unknown type tag {tag}"))),
        }
    }
}

impl fmt::Display for EncryptedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "ebool"),
            Self::Uint32 => write!(f, "euint32"),
        }
    }
}

/// An opaque encrypted value.
///
/// The engine stores, returns and forwards handles to its encryption
/// collaborator. It never decrypts, compares or combines them, which is why
/// this type implements neither `PartialEq` nor any ordering.
#[derive(Clone)]
pub struct CipherHandle {
    id: HandleId,
    encrypted_type: EncryptedType,
    ciphertext: Vec<u8>,
}

impl CipherHandle {
    /// Assembles a handle. Only collaborators mint handles; the identifier
    /// must be the configured digest of `(encrypted_type, ciphertext)`.
    pub fn new(id: HandleId, encrypted_type: EncryptedType, ciphertext: Vec<u8>) -> Self {
        Self { id, encrypted_type, ciphertext }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn encrypted_type(&self) -> EncryptedType {
        self.encrypted_type
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl fmt::Debug for CipherHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherHandle")
            .field("id", &self.id)
            .field("type", &self.encrypted_type)
            .field("len", &self.ciphertext.len())
            .finish()
    }
}

/// Proof, produced at encryption time, that a ciphertext was submitted by a
/// given principal.
#[derive(Clone, Copy, Debug)]
pub struct InputProof(pub [u8; INPUT_PROOF_LENGTH]);

/// What a teacher sends along with `submit_score`.
#[derive(Clone, Debug)]
pub struct EncryptedInput {
    pub handle: CipherHandle,
    pub proof: InputProof,
}

impl Serializable for CipherHandle {
    type Error = CoprocessorError;

    fn length(&self) -> usize {
        DIGEST_BYTES + 1 + to_leb128_len(self.ciphertext.len()) + self.ciphertext.len()
    }

    fn write(&self, ser: &mut Serializer) -> Result<usize, Self::Error> {
        let mut n = ser.write_array(&self.id.0)?;
        n += ser.write_array(&[self.encrypted_type.tag()])?;
        n += ser.write_vec(&self.ciphertext)?;
        Ok(n)
    }

    fn read(de: &mut Deserializer) -> Result<Self, Self::Error> {
        let id = HandleId(de.read_array::<DIGEST_BYTES>()?);
        let [tag] = de.read_array::<1>()?;
        let encrypted_type = EncryptedType::from_tag(tag)?;
        let ciphertext = de.read_vec()?;
        Ok(Self { id, encrypted_type, ciphertext })
    }
}

impl Serializable for EncryptedInput {
    type Error = CoprocessorError;

    fn length(&self) -> usize {
        self.handle.length() + INPUT_PROOF_LENGTH
    }

    fn write(&self, ser: &mut Serializer) -> Result<usize, Self::Error> {
        let mut n = self.handle.write(ser)?;
        n += ser.write_array(&self.proof.0)?;
        Ok(n)
    }

    fn read(de: &mut Deserializer) -> Result<Self, Self::Error> {
        let handle = de.read::<CipherHandle>()?;
        let proof = InputProof(de.read_array::<INPUT_PROOF_LENGTH>()?);
        Ok(Self { handle, proof })
    }
}
