//! Ciphertext envelope and its text encoding.
//!
//! # Wire format
//!
//! ```text
//! base64url-padded( nonce(12) || ciphertext || tag(16) )
//! ```
//!
//! The nonce travels with the ciphertext; it is not secret, it only must not
//! repeat under the same key.

use std::borrow::Cow;

use base64::{engine::general_purpose::URL_SAFE, Engine as _};

use crate::cipher::{NONCE_LEN, TAG_LEN};
use crate::error::TransformError;

/// A nonce plus the sealed (ciphertext + tag) bytes it was used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub sealed: Vec<u8>,
}

impl Envelope {
    /// Concatenate `nonce || sealed`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + self.sealed.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.sealed);
        out
    }

    /// Split raw envelope bytes into nonce and sealed remainder.
    ///
    /// Only the nonce length is checked here. A remainder too short to hold a
    /// tag is left for [`GcmCipher::open`](crate::cipher::GcmCipher::open) to
    /// reject as an authentication failure.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MalformedEnvelope`] if `bytes` is shorter
    /// than [`NONCE_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransformError> {
        if bytes.len() < NONCE_LEN {
            return Err(TransformError::MalformedEnvelope {
                len: bytes.len(),
                min: NONCE_LEN,
            });
        }
        let (nonce_bytes, sealed) = bytes.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            sealed: sealed.to_vec(),
        })
    }

    /// Encode to URL-safe, padded base64.
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.to_bytes())
    }

    /// Decode URL-safe base64 text back into an envelope.
    ///
    /// Line terminators are ignored wherever they appear, so line-wrapped or
    /// newline-terminated files still decode. Any other stray byte is an
    /// encoding error.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Encoding`] on invalid base64 and
    /// [`TransformError::MalformedEnvelope`] if the decoded bytes are too short.
    pub fn decode(encoded: &[u8]) -> Result<Self, TransformError> {
        let bytes = URL_SAFE.decode(strip_line_breaks(encoded))?;
        Self::from_bytes(&bytes)
    }
}

/// Length of the encoded output for a plaintext of `plaintext_len` bytes.
pub fn encoded_len(plaintext_len: usize) -> usize {
    let raw = NONCE_LEN + plaintext_len + TAG_LEN;
    raw.div_ceil(3) * 4
}

fn strip_line_breaks(input: &[u8]) -> Cow<'_, [u8]> {
    if input.iter().any(|&b| matches!(b, b'\n' | b'\r')) {
        Cow::Owned(
            input
                .iter()
                .copied()
                .filter(|&b| !matches!(b, b'\n' | b'\r'))
                .collect(),
        )
    } else {
        Cow::Borrowed(input)
    }
}
