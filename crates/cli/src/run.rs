//! One end-to-end run: read the source, transform it, write the destination.

use tracing::{info, instrument};

use crate::args::Invocation;
use crate::error::{CliError, Mode};
use crate::fs;

/// Apply `mode` to `data` under `key`.
pub fn apply(mode: Mode, data: &[u8], key: &[u8]) -> Result<Vec<u8>, CliError> {
    let result = match mode {
        Mode::Encrypt => transform::encrypt(data, key).map(String::into_bytes),
        Mode::Decrypt => transform::decrypt(data, key),
    };
    result.map_err(|source| CliError::Transform {
        operation: mode,
        source,
    })
}

/// Execute a validated invocation. The destination is written only after the
/// transform has succeeded.
#[instrument(skip_all, fields(operation = %inv.mode, src = %inv.src.display(), dest = %inv.dest.display()))]
pub fn run(inv: &Invocation) -> Result<(), CliError> {
    let data = fs::read_source(&inv.src)?;
    let output = apply(inv.mode, &data, &inv.key)?;
    fs::write_destination(&inv.dest, &output)?;
    info!(input_bytes = data.len(), output_bytes = output.len(), "operation completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use zeroize::Zeroizing;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn invocation(mode: Mode, src: &std::path::Path, dest: &std::path::Path, key: &[u8]) -> Invocation {
        Invocation {
            mode,
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            key: Zeroizing::new(key.to_vec()),
        }
    }

    #[test]
    fn apply_round_trip() {
        let encoded = apply(Mode::Encrypt, b"hello world", KEY).unwrap();
        assert_eq!(apply(Mode::Decrypt, &encoded, KEY).unwrap(), b"hello world");
    }

    #[test]
    fn apply_error_names_operation() {
        let err = apply(Mode::Decrypt, b"!!!", KEY).unwrap_err();
        assert!(matches!(err, CliError::Transform { operation: Mode::Decrypt, .. }));
        assert_eq!(err.code(), "encoding_error");
    }

    #[test]
    fn run_encrypts_then_decrypts_files() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let sealed = dir.path().join("sealed.txt");
        let opened = dir.path().join("opened.txt");
        std::fs::write(&plain, b"file contents\n").unwrap();

        run(&invocation(Mode::Encrypt, &plain, &sealed, KEY)).unwrap();
        run(&invocation(Mode::Decrypt, &sealed, &opened, KEY)).unwrap();
        assert_eq!(std::fs::read(&opened).unwrap(), b"file contents\n");
    }

    #[test]
    fn failed_transform_leaves_destination_untouched() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest.txt");
        std::fs::write(&src, b"data").unwrap();

        let err = run(&invocation(Mode::Encrypt, &src, &dest, b"short")).unwrap_err();
        assert_eq!(err.code(), "key_error");
        assert!(!dest.exists());
    }

    #[test]
    fn failed_decrypt_keeps_existing_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest.txt");
        std::fs::write(&src, apply(Mode::Encrypt, b"data", KEY).unwrap()).unwrap();
        std::fs::write(&dest, b"previous").unwrap();

        let wrong = b"fedcba9876543210fedcba9876543210";
        let err = run(&invocation(Mode::Decrypt, &src, &dest, wrong)).unwrap_err();
        assert_eq!(err.code(), "authentication_error");
        assert_eq!(std::fs::read(&dest).unwrap(), b"previous");
    }

    #[test]
    fn in_place_encryption_works() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("same.txt");
        std::fs::write(&path, b"overwrite me").unwrap();

        run(&invocation(Mode::Encrypt, &path, &path, KEY)).unwrap();
        run(&invocation(Mode::Decrypt, &path, &path, KEY)).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"overwrite me");
    }
}
