//! Putting the install directory on PATH, and taking it off again.
//!
//! Unix appends an `export PATH=...` line to the user's shell rc file.
//! Windows edits the persistent user (or machine) `Path` through PowerShell.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{KrnrError, KrnrResult};

use super::InstallEnv;

/// Where a PATH change was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChange {
    pub path_file: String,
    pub path_line: Option<String>,
    pub old_path: Option<String>,
}

/// The two lines appended to an rc file for `dir`.
pub fn rc_lines(dir: &Path) -> String {
    format!(
        "# krnr: add {dir} to PATH\nexport PATH=\"{dir}:$PATH\"\n",
        dir = dir.display()
    )
}

/// `.bashrc` or `.zshrc` when present, else by `$SHELL`, else `.profile`.
pub fn rc_file(env: &InstallEnv) -> PathBuf {
    let home = &env.home;
    for name in [".bashrc", ".zshrc"] {
        if home.join(name).is_file() {
            return home.join(name);
        }
    }
    if env.shell.contains("zsh") {
        home.join(".zshrc")
    } else if env.shell.contains("bash") {
        home.join(".bashrc")
    } else {
        home.join(".profile")
    }
}

pub fn add_to_path(env: &InstallEnv, dir: &Path, system: bool) -> KrnrResult<PathChange> {
    if cfg!(windows) {
        return windows::add(env, dir, system);
    }
    if system {
        return Err(KrnrError::Install(format!(
            "system PATH modifications require admin privileges; move the binary to {} or add {} to system PATH manually",
            env.system_bin.display(),
            dir.display()
        )));
    }
    add_to_rc(env, dir)
}

fn add_to_rc(env: &InstallEnv, dir: &Path) -> KrnrResult<PathChange> {
    let rc = rc_file(env);
    let lines = rc_lines(dir);
    if let Some(parent) = rc.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(&rc)?;
    file.write_all(lines.as_bytes())?;
    file.sync_all()?;
    Ok(PathChange {
        path_file: rc.display().to_string(),
        path_line: Some(lines.trim_end().to_string()),
        old_path: None,
    })
}

/// Drop every line of `rc` that mentions both `dir` and `krnr`.
///
/// Returns a human-readable note of what happened.
pub fn remove_from_rc(rc: &Path, dir: &Path) -> KrnrResult<String> {
    let Ok(content) = fs::read_to_string(rc) else {
        return Ok(format!("No PATH file {} found; nothing to remove", rc.display()));
    };
    let needle = dir.display().to_string();
    let kept: Vec<&str> = content
        .split('\n')
        .filter(|line| !(line.contains(&needle) && line.contains("krnr")))
        .collect();
    fs::write(rc, kept.join("\n"))?;
    Ok(format!("Removed PATH entry from {}", rc.display()))
}

/// Undo a recorded PATH change.
pub fn remove_recorded(
    env: &InstallEnv,
    dir: &Path,
    path_file: Option<&str>,
    old_path: Option<&str>,
) -> KrnrResult<Vec<String>> {
    if cfg!(windows) {
        return windows::remove(dir, path_file, old_path);
    }
    let rc = match path_file {
        Some(f) if !f.is_empty() => PathBuf::from(f),
        _ => {
            let bashrc = env.home.join(".bashrc");
            if bashrc.is_file() {
                bashrc
            } else {
                env.home.join(".profile")
            }
        }
    };
    Ok(vec![remove_from_rc(&rc, dir)?])
}

/// `;`-separated `current` without `dir`, and whether anything was removed.
pub(crate) fn path_without(current: &str, dir: &Path) -> (String, bool) {
    let want = super::clean(dir);
    let mut removed = false;
    let kept: Vec<String> = current
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| {
            let hit = super::same_path(&super::clean(Path::new(p)), &want);
            removed |= hit;
            !hit
        })
        .map(str::to_string)
        .collect();
    (kept.join(";"), removed)
}

mod windows {
    use std::path::Path;
    use std::process::Command;

    use super::{path_without, PathChange};
    use crate::error::{KrnrError, KrnrResult};
    use crate::infrastructure::install::{contains_path, InstallEnv};

    /// Skip the persistent PATH write (tests).
    const ENV_NO_SETX: &str = "KRNR_TEST_NO_SETX";

    fn scope(system: bool) -> (&'static str, &'static str) {
        if system {
            ("Machine", "MachineEnv")
        } else {
            ("User", "UserEnv")
        }
    }

    fn quote(s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    fn get_path(scope: &str) -> String {
        Command::new("powershell")
            .args([
                "-NoProfile",
                "-Command",
                &format!("[Environment]::GetEnvironmentVariable('Path','{scope}')"),
            ])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
            .unwrap_or_default()
    }

    fn set_path(scope: &str, value: &str) -> KrnrResult<()> {
        let script = format!(
            "[Environment]::SetEnvironmentVariable('Path', {}, '{scope}')",
            quote(value)
        );
        let out = Command::new("powershell")
            .args(["-NoProfile", "-Command", &script])
            .output()?;
        if out.status.success() {
            Ok(())
        } else {
            Err(KrnrError::Install(format!(
                "set {scope} PATH: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            )))
        }
    }

    pub fn add(env: &InstallEnv, dir: &Path, system: bool) -> KrnrResult<PathChange> {
        let (scope, label) = scope(system);
        let old = get_path(scope);
        let change = PathChange {
            path_file: label.to_string(),
            path_line: None,
            old_path: Some(old.clone()).filter(|s| !s.is_empty()),
        };
        if contains_path(&old, dir) || contains_path(&env.path_env, dir) {
            return Ok(change);
        }
        if std::env::var_os(ENV_NO_SETX).is_some() {
            return Ok(change);
        }
        let dir = dir.display().to_string();
        let new = if old.is_empty() { dir } else { format!("{old};{dir}") };
        set_path(scope, &new)?;
        Ok(change)
    }

    pub fn remove(dir: &Path, path_file: Option<&str>, old_path: Option<&str>) -> KrnrResult<Vec<String>> {
        let scope = if path_file == Some("MachineEnv") { "Machine" } else { "User" };
        let test_mode = std::env::var_os(ENV_NO_SETX).is_some();

        if let Some(old) = old_path.filter(|s| !s.is_empty()) {
            if test_mode {
                return Ok(vec![format!(
                    "Note: would restore {scope} PATH to previous value (test mode)"
                )]);
            }
            set_path(scope, old)?;
            return Ok(vec![format!("Restored {scope} PATH to previous value")]);
        }

        let current = get_path(scope);
        if current.is_empty() {
            return Ok(vec![format!("No {scope} PATH found; nothing to remove")]);
        }
        let (new, removed) = path_without(&current, dir);
        if !removed {
            return Ok(vec![format!(
                "No {scope} PATH entry for {} found; nothing to do",
                dir.display()
            )]);
        }
        if test_mode {
            return Ok(vec![format!(
                "Note: would remove {} from {scope} PATH (test mode)",
                dir.display()
            )]);
        }
        set_path(scope, &new)?;
        Ok(vec![format!("Removed {} from {scope} PATH", dir.display())])
    }
}
