//! Top-level error type for the `encryptor` binary.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use transform::TransformError;

/// Which way the transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Encrypt => "encryption",
            Mode::Decrypt => "decryption",
        })
    }
}

/// Everything that aborts a run.
///
/// Variants map to process exit codes:
/// - [`CliError::Usage`] → 2
/// - [`CliError::Config`] → 78 (`EX_CONFIG`)
/// - [`CliError::FileIo`] → 74 (`EX_IOERR`)
/// - [`CliError::Transform`] → 1
#[derive(Debug, Error)]
pub enum CliError {
    /// Conflicting, missing, or unparseable flags.
    #[error("{0}")]
    Usage(String),

    /// `ENCRYPTOR_*` environment configuration is invalid.
    #[error("Configuration invalid: {0}")]
    Config(String),

    /// The source could not be read or the destination could not be written.
    #[error("Error {action} {}: {source}", .path.display())]
    FileIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transform engine rejected the input or key.
    #[error("Error during the {operation} process: {source}")]
    Transform {
        operation: Mode,
        #[source]
        source: TransformError,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Config(_) => 78,
            CliError::FileIo { .. } => 74,
            CliError::Transform { .. } => 1,
        }
    }

    /// Short machine-readable error code, used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "usage_error",
            CliError::Config(_) => "config_error",
            CliError::FileIo { .. } => "file_io_error",
            CliError::Transform { source, .. } => source.code(),
        }
    }
}
