//! Self-installation
//!
//! Copies the running binary into a user or system bin directory, optionally
//! puts that directory on PATH, and records what it did in
//! `<data dir>/install_metadata.json` so `krnr uninstall` can undo it.
//!
//! Every function takes an [`InstallEnv`] instead of reading the process
//! environment, so tests can point home, PATH and the system bin at temp
//! directories.

mod metadata;
mod path_entry;
mod plan;
mod uninstall;

use std::path::{Component, Path, PathBuf};

pub use metadata::{InstallMetadata, MetadataStore};
pub use plan::{execute_install, get_status, plan_install, InstallStatus};
pub use uninstall::{plan_uninstall, uninstall};

use crate::config;
use crate::error::{KrnrError, KrnrResult};
use crate::infrastructure::fs::krnr_home_dir;

/// Overrides the system bin directory.
pub const ENV_SYSTEM_BIN: &str = "KRNR_TEST_SYSTEM_BIN";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub user: bool,
    pub system: bool,
    /// Explicit target directory.
    pub path: Option<PathBuf>,
    /// Binary to install; the running executable when unset.
    pub from: Option<PathBuf>,
    pub dry_run: bool,
    pub check: bool,
    pub yes: bool,
    pub add_to_path: bool,
}

/// Everything install/uninstall read from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallEnv {
    pub home: PathBuf,
    pub data_dir: PathBuf,
    pub system_bin: PathBuf,
    pub path_env: String,
    /// `$SHELL`, used to pick an rc file.
    pub shell: String,
}

impl InstallEnv {
    pub fn detect() -> KrnrResult<Self> {
        let home = krnr_home_dir().ok_or(KrnrError::NoDataDir)?;
        let system_bin = std::env::var(ENV_SYSTEM_BIN)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_system_bin);
        Ok(Self {
            home,
            data_dir: config::data_dir()?,
            system_bin,
            path_env: std::env::var("PATH").unwrap_or_default(),
            shell: std::env::var("SHELL").unwrap_or_default(),
        })
    }

    /// `<home>/krnr/bin`
    pub fn default_user_bin(&self) -> PathBuf {
        self.home.join("krnr").join("bin")
    }

    pub fn user_target(&self) -> PathBuf {
        self.default_user_bin().join(binary_name())
    }

    pub fn system_target(&self) -> PathBuf {
        self.system_bin.join(binary_name())
    }

    fn metadata_store(&self) -> MetadataStore {
        MetadataStore::new(&self.data_dir)
    }
}

fn default_system_bin() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\krnr")
    } else {
        PathBuf::from("/usr/local/bin")
    }
}

pub fn binary_name() -> &'static str {
    if cfg!(windows) {
        "krnr.exe"
    } else {
        "krnr"
    }
}

/// Whether `dir` is one of the entries of `path_env`.
///
/// Entries are trimmed and lexically cleaned before comparing; the
/// comparison ignores case on Windows.
pub fn contains_path(path_env: &str, dir: &Path) -> bool {
    if path_env.trim().is_empty() || dir.as_os_str().is_empty() {
        return false;
    }
    let want = clean(dir);
    std::env::split_paths(path_env)
        .filter(|p| !p.as_os_str().is_empty())
        .any(|p| same_path(&clean(Path::new(p.to_string_lossy().trim())), &want))
}

pub(crate) fn same_path(a: &Path, b: &Path) -> bool {
    if cfg!(windows) {
        a.to_string_lossy().eq_ignore_ascii_case(&b.to_string_lossy())
    } else {
        a == b
    }
}

/// Lexical cleanup: drops `.` components, trailing separators and resolves
/// `..` where possible, without touching the file system.
pub(crate) fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
