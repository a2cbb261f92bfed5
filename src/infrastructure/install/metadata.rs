//! `install_metadata.json`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::infrastructure::fs::write_atomic;

/// What an install did, so uninstall can reverse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallMetadata {
    pub target_path: PathBuf,
    pub added_to_path: bool,
    /// rc file that got the PATH line, or `UserEnv`/`MachineEnv` on Windows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_line: Option<String>,
    /// PATH value before it was modified (Windows).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_user_path: Option<String>,
    pub installed_at: DateTime<Utc>,
}

pub struct MetadataStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl MetadataStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("install_metadata.json"),
            lock_path: data_dir.join("install_metadata.lock"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> io::Result<InstallMetadata> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save(&self, meta: &InstallMetadata) -> io::Result<()> {
        let mut body = serde_json::to_vec_pretty(meta)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        body.push(b'\n');
        self.locked(|| write_atomic(&self.path, &body))
    }

    /// Succeeds when there is nothing to remove.
    pub fn remove(&self) -> io::Result<()> {
        self.locked(|| match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        })
    }

    /// Run `f` holding an exclusive lock, so concurrent installs do not
    /// interleave their writes.
    fn locked<T>(&self, f: impl FnOnce() -> io::Result<T>) -> io::Result<T> {
        if let Some(parent) = self.lock_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock_file = fs::File::create(&self.lock_path)?;
        lock_file.lock_exclusive()?;
        let result = f();
        let _ = lock_file.unlock();
        result
    }
}
