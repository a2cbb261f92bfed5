//! PATH lookup for executables.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolve `name` the way a shell would: paths are checked directly, bare
/// names are searched in `$PATH` (with `%PATHEXT%` suffixes on Windows).
pub fn find_executable(name: &str) -> Option<PathBuf> {
    find_executable_in(name, env::var_os("PATH"))
}

pub(crate) fn find_executable_in(name: &str, path_env: Option<OsString>) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let as_path = Path::new(name);
    if as_path.components().count() > 1 {
        return candidates(as_path).into_iter().find(|p| is_executable(p));
    }

    let path_env = path_env?;
    env::split_paths(&path_env)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir.join(name)))
        .find(|p| is_executable(p))
}

fn candidates(base: &Path) -> Vec<PathBuf> {
    let mut out = vec![base.to_path_buf()];
    if cfg!(windows) && base.extension().is_none() {
        let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
        for ext in exts.split(';').filter(|e| !e.is_empty()) {
            let mut with_ext = base.as_os_str().to_owned();
            with_ext.push(ext);
            out.push(PathBuf::from(with_ext));
        }
    }
    out
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
