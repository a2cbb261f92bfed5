//! Atomic file replacement
//!
//! Writes land in a temp file next to the destination and are renamed into
//! place, so readers never observe a half-written file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace `path` with `content`, creating parent directories.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = parent_dir(path)?;
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copy `src` over `dst` via temp file plus rename.
///
/// Falls back to a direct copy when the rename is refused (for instance a
/// running executable on Windows, or a cross-device temp dir).
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let parent = parent_dir(dst)?;
    fs::create_dir_all(parent)?;

    let staged = NamedTempFile::new_in(parent).and_then(|tmp| {
        fs::copy(src, tmp.path())?;
        tmp.persist(dst).map_err(|e| e.error)?;
        Ok(())
    });

    match staged {
        Ok(()) => Ok(()),
        Err(_) => fs::copy(src, dst).map(|_| ()),
    }
}

fn parent_dir(path: &Path) -> io::Result<&Path> {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => Ok(p),
        Some(_) => Ok(Path::new(".")),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no parent directory for {}", path.display()),
        )),
    }
}
