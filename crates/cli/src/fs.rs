//! Whole-file reads and writes for the source and destination paths.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::CliError;

/// Permission bits for written destination files (`rw-r--r--`).
#[cfg(unix)]
const DEST_MODE: u32 = 0o644;

/// Read the whole source file into memory.
pub fn read_source(path: &Path) -> Result<Vec<u8>, CliError> {
    let data = std::fs::read(path).map_err(|source| CliError::FileIo {
        action: "reading source file",
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = data.len(), "read source");
    Ok(data)
}

/// Replace `path` with `data`.
///
/// The bytes go to a temporary file in the destination directory, which is
/// renamed over `path` only once fully written and synced. A failed write
/// leaves any existing destination (including the source, when writing in
/// place) untouched.
pub fn write_destination(path: &Path, data: &[u8]) -> Result<(), CliError> {
    write_atomically(path, |file| file.write_all(data))?;
    debug!(path = %path.display(), bytes = data.len(), "wrote destination");
    Ok(())
}

fn write_atomically<F>(path: &Path, fill: F) -> Result<(), CliError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let io_err = |source| CliError::FileIo {
        action: "writing to destination file",
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(DEST_MODE))
            .map_err(io_err)?;
    }

    fill(tmp.as_file_mut()).map_err(io_err)?;
    tmp.as_file_mut().flush().map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_destination(&path, b"payload").unwrap();
        assert_eq!(read_source(&path).unwrap(), b"payload");
    }

    #[test]
    fn write_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, b"a much longer previous content").unwrap();
        write_destination(&path, b"short").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn read_missing_file_is_file_io_error() {
        let dir = tempdir().unwrap();
        let err = read_source(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, CliError::FileIo { action: "reading source file", .. }));
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn write_into_missing_directory_is_file_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.txt");
        let err = write_destination(&path, b"x").unwrap_err();
        assert!(matches!(
            err,
            CliError::FileIo { action: "writing to destination file", .. }
        ));
    }

    #[test]
    fn failed_write_keeps_existing_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("same.txt");
        std::fs::write(&path, b"original source bytes").unwrap();

        let err = write_atomically(&path, |file| {
            file.write_all(b"half")?;
            Err(io::Error::new(io::ErrorKind::Other, "File too large"))
        })
        .unwrap_err();

        assert!(matches!(
            err,
            CliError::FileIo { action: "writing to destination file", .. }
        ));
        assert_eq!(std::fs::read(&path).unwrap(), b"original source bytes");
        // The temporary file is cleaned up on failure.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn successful_write_leaves_no_temporary_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested.txt");
        write_destination(&path, b"abc").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_rw_r_r() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_destination(&path, b"x").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, DEST_MODE);
    }
}
