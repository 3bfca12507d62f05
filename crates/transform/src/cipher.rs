//! AES-GCM sealing and opening for 128, 192 and 256-bit keys.
//!
//! **Nonce discipline:** every call to [`GcmCipher::seal`] must receive a
//! nonce from [`generate_nonce`]. GCM nonce reuse under one key breaks both
//! confidentiality and authentication.

use std::fmt;

use aes_gcm::{
    aead::{consts::U12, rand_core::RngCore, Aead, KeyInit, OsRng},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};

use crate::error::TransformError;

/// Byte length of a GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// AES-192 in GCM mode with the standard 96-bit nonce.
type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES variant selected by the key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Map a raw key length onto an AES variant.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Key`] for anything other than 16, 24 or 32.
    pub fn from_len(len: usize) -> Result<Self, TransformError> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            other => Err(TransformError::Key(other)),
        }
    }

    /// Key length in bits.
    pub fn bits(self) -> u16 {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }
}

enum Inner {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

/// An AES-GCM instance keyed for a single transform call.
pub struct GcmCipher {
    inner: Inner,
}

impl fmt::Debug for GcmCipher {
    // Never print key schedules.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcmCipher")
            .field("key_size", &self.key_size())
            .finish_non_exhaustive()
    }
}

impl GcmCipher {
    /// Build an AES-GCM cipher from raw key bytes. The key is used as given,
    /// never padded or truncated.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Key`] if `key` is not 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, TransformError> {
        let bad_len = |_| TransformError::Key(key.len());
        let inner = match KeySize::from_len(key.len())? {
            KeySize::Aes128 => Inner::Aes128(Aes128Gcm::new_from_slice(key).map_err(bad_len)?),
            KeySize::Aes192 => Inner::Aes192(Aes192Gcm::new_from_slice(key).map_err(bad_len)?),
            KeySize::Aes256 => Inner::Aes256(Aes256Gcm::new_from_slice(key).map_err(bad_len)?),
        };
        Ok(Self { inner })
    }

    pub fn key_size(&self) -> KeySize {
        match self.inner {
            Inner::Aes128(_) => KeySize::Aes128,
            Inner::Aes192(_) => KeySize::Aes192,
            Inner::Aes256(_) => KeySize::Aes256,
        }
    }

    /// Encrypt `plaintext` with no associated data, returning ciphertext + tag.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Seal`] if the AEAD refuses the input, which
    /// only happens past the GCM plaintext length limit.
    pub fn seal(&self, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>, TransformError> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        let sealed = match &self.inner {
            Inner::Aes128(c) => c.encrypt(nonce, plaintext),
            Inner::Aes192(c) => c.encrypt(nonce, plaintext),
            Inner::Aes256(c) => c.encrypt(nonce, plaintext),
        };
        sealed.map_err(|_| TransformError::Seal)
    }

    /// Verify the tag on `sealed` and return the plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Authentication`] if the tag does not verify.
    /// No plaintext bytes are released in that case.
    pub fn open(&self, nonce: &[u8; NONCE_LEN], sealed: &[u8]) -> Result<Vec<u8>, TransformError> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        let opened = match &self.inner {
            Inner::Aes128(c) => c.decrypt(nonce, sealed),
            Inner::Aes192(c) => c.decrypt(nonce, sealed),
            Inner::Aes256(c) => c.decrypt(nonce, sealed),
        };
        opened.map_err(|_| TransformError::Authentication)
    }
}

/// Draw a fresh 96-bit nonce from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`TransformError::Randomness`] if the OS random source fails.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN], TransformError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| TransformError::Randomness(e.to_string()))?;
    Ok(nonce)
}
