//! AES-GCM transform engine for `encryptor`.
//!
//! Two stateless operations: [`encrypt`] turns plaintext into URL-safe base64
//! of `nonce || ciphertext || tag`, and [`decrypt`] reverses it. Each call
//! builds its own cipher and nonce, so both are safe to call from any number
//! of threads at once.
//!
//! Keys are raw bytes of length 16, 24 or 32 (AES-128/192/256). There is no
//! key derivation.

pub mod cipher;
pub mod envelope;
pub mod error;

use tracing::debug;

pub use cipher::{GcmCipher, KeySize, NONCE_LEN, TAG_LEN};
pub use envelope::Envelope;
pub use error::TransformError;

/// Encrypt `plaintext` under `key` and return the encoded envelope.
///
/// Output differs on every call because a fresh random nonce is drawn.
///
/// # Errors
///
/// - [`TransformError::Key`] if `key` is not 16, 24 or 32 bytes.
/// - [`TransformError::Randomness`] if no nonce could be drawn.
/// - [`TransformError::Seal`] if the AEAD refuses the plaintext.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<String, TransformError> {
    let cipher = GcmCipher::new(key)?;
    let nonce = cipher::generate_nonce()?;
    let sealed = cipher.seal(&nonce, plaintext)?;

    let encoded = Envelope { nonce, sealed }.encode();
    debug!(
        key_bits = cipher.key_size().bits(),
        plaintext_len = plaintext.len(),
        encoded_len = encoded.len(),
        "sealed envelope"
    );
    Ok(encoded)
}

/// Decode and authenticate `encoded` under `key`, returning the plaintext.
///
/// # Errors
///
/// - [`TransformError::Key`] if `key` is not 16, 24 or 32 bytes.
/// - [`TransformError::Encoding`] if `encoded` is not URL-safe base64.
/// - [`TransformError::MalformedEnvelope`] if the decoded bytes are shorter
///   than a nonce.
/// - [`TransformError::Authentication`] if the tag does not verify.
pub fn decrypt(encoded: &[u8], key: &[u8]) -> Result<Vec<u8>, TransformError> {
    let cipher = GcmCipher::new(key)?;
    let envelope = Envelope::decode(encoded)?;
    let plaintext = cipher.open(&envelope.nonce, &envelope.sealed)?;

    debug!(
        key_bits = cipher.key_size().bits(),
        encoded_len = encoded.len(),
        plaintext_len = plaintext.len(),
        "opened envelope"
    );
    Ok(plaintext)
}
