//! Error type surfaced by the transform engine.

use thiserror::Error;

/// Everything that can go wrong while encrypting or decrypting.
///
/// Each variant has a stable machine-readable [`code`](TransformError::code).
/// None of them carry key or plaintext material.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The key is not a valid AES key size (16, 24 or 32 bytes).
    #[error("invalid key size: {0} bytes (expected 16, 24 or 32)")]
    Key(usize),

    /// The OS random source could not produce a nonce.
    #[error("random source unavailable: {0}")]
    Randomness(String),

    /// The input is not valid URL-safe base64.
    #[error("invalid base64 input: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The decoded envelope is too short to hold a nonce.
    #[error("malformed envelope: {len} bytes is shorter than the {min}-byte minimum")]
    MalformedEnvelope {
        /// Decoded length that was received.
        len: usize,
        /// Minimum length required.
        min: usize,
    },

    /// Tag verification failed: wrong key, corruption, or tampering.
    #[error("authentication failed: wrong key or corrupted data")]
    Authentication,

    /// AEAD sealing failed (plaintext exceeds the GCM length limit).
    #[error("aead seal failed")]
    Seal,
}

impl TransformError {
    /// Short machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            TransformError::Key(_) => "key_error",
            TransformError::Randomness(_) => "randomness_error",
            TransformError::Encoding(_) => "encoding_error",
            TransformError::MalformedEnvelope { .. } => "malformed_envelope",
            TransformError::Authentication => "authentication_error",
            TransformError::Seal => "seal_error",
        }
    }
}
