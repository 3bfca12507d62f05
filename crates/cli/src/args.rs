//! Command-line flags and their validation.
//!
//! Flags are accepted both Go-style (`-src in.txt`, `-src=in.txt`) and
//! GNU-style (`--src in.txt`). [`normalize`] rewrites the former into the
//! latter before clap sees them.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::error::{CliError, Mode};

/// Long flag names that may also be written with a single dash.
const LONG_FLAGS: &[&str] = &["encrypt", "decrypt", "src", "dest", "key", "help", "version"];

#[derive(Debug, Parser)]
#[command(
    name = "encryptor",
    version,
    about = "Encrypt or decrypt a file with AES-GCM",
    long_about = "Reads SRC fully into memory, encrypts or decrypts it with AES-GCM \
                  under a raw 16, 24 or 32 byte key, and writes the result to DEST. \
                  Encrypted output is URL-safe base64 of nonce || ciphertext || tag."
)]
pub struct Args {
    /// Encrypts data
    #[arg(long)]
    pub encrypt: bool,

    /// Decrypts data
    #[arg(long)]
    pub decrypt: bool,

    /// Source file
    #[arg(long, value_name = "PATH")]
    pub src: Option<PathBuf>,

    /// Destination file
    #[arg(long, value_name = "PATH")]
    pub dest: Option<PathBuf>,

    /// Private key string, used as raw bytes (16, 24 or 32 bytes)
    #[arg(long, env = "ENCRYPTOR_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

/// A validated request to transform one file.
pub struct Invocation {
    pub mode: Mode,
    pub src: PathBuf,
    pub dest: PathBuf,
    pub key: Zeroizing<Vec<u8>>,
}

impl Args {
    /// Check flag combinations and take ownership of the key bytes.
    ///
    /// A missing key becomes an empty key, which the transform engine rejects
    /// with a key-size error naming the operation.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] if both or neither of `--encrypt` and
    /// `--decrypt` are set, or if `--src` or `--dest` is missing.
    pub fn into_invocation(self) -> Result<Invocation, CliError> {
        let mode = match (self.encrypt, self.decrypt) {
            (true, true) => {
                return Err(CliError::Usage(
                    "Please specify either -encrypt or -decrypt, not both.".into(),
                ))
            }
            (false, false) => {
                return Err(CliError::Usage(
                    "Please specify one of -encrypt or -decrypt.".into(),
                ))
            }
            (true, false) => Mode::Encrypt,
            (false, true) => Mode::Decrypt,
        };

        let (src, dest) = match (self.src, self.dest) {
            (Some(src), Some(dest)) => (src, dest),
            _ => {
                return Err(CliError::Usage(
                    "Please provide both source and destination file paths.".into(),
                ))
            }
        };

        let key = Zeroizing::new(self.key.map(String::into_bytes).unwrap_or_default());
        Ok(Invocation {
            mode,
            src,
            dest,
            key,
        })
    }
}

/// Rewrite single-dash long flags (`-src`, `-key=...`) to their double-dash
/// form. Everything after a bare `--` is passed through untouched.
pub fn normalize<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        match arg.to_str() {
            Some(s) if is_single_dash_long(s) => out.push(format!("-{s}").into()),
            _ => out.push(arg),
        }
    }
    out
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
