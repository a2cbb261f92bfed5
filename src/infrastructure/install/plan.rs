//! Planning and performing an install, and reporting install status.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::error::{KrnrError, KrnrResult};
use crate::infrastructure::fs::{copy_file, find_executable};

use super::path_entry::add_to_path;
use super::{binary_name, contains_path, same_path, InstallEnv, InstallMetadata, InstallOptions};

fn source_binary(opts: &InstallOptions) -> KrnrResult<PathBuf> {
    match &opts.from {
        Some(from) => Ok(from.clone()),
        None => std::env::current_exe().map_err(|e| {
            KrnrError::Install(format!("determine current executable: {e}"))
        }),
    }
}

fn target_dir(env: &InstallEnv, opts: &InstallOptions) -> PathBuf {
    match &opts.path {
        Some(p) => p.clone(),
        None if opts.system => env.system_bin.clone(),
        None => env.default_user_bin(),
    }
}

/// Human-readable actions an install would take, and the target path.
pub fn plan_install(env: &InstallEnv, opts: &InstallOptions) -> KrnrResult<(Vec<String>, PathBuf)> {
    let src = source_binary(opts)?;
    let dir = target_dir(env, opts);
    let target = dir.join(binary_name());

    let mut actions = vec![format!("Ensure directory exists: {}", dir.display())];
    if same_path(&src, &target) {
        actions.push("No-op: source and destination are identical".into());
        return Ok((actions, target));
    }
    actions.push(format!("Copy {} -> {}", src.display(), target.display()));
    if cfg!(unix) {
        actions.push(format!("Set executable bit on {}", target.display()));
    }
    if !contains_path(&env.path_env, &dir) {
        actions.extend(path_hints(&dir));
    }
    Ok((actions, target))
}

fn path_hints(dir: &Path) -> Vec<String> {
    let dir = dir.display();
    if cfg!(windows) {
        vec![
            format!("Add {dir} to user PATH (e.g., via setx)"),
            format!("(Suggestion) Add {dir} to your user PATH (run: setx PATH \"%PATH%;{dir}\")"),
        ]
    } else {
        vec![format!(
            "Add 'export PATH=\"{dir}:$PATH\"' to your shell rc (e.g., ~/.bashrc) or move to a location already on PATH"
        )]
    }
}

/// Perform the install and record it. Returns the planned actions.
pub fn execute_install(env: &InstallEnv, opts: &InstallOptions) -> KrnrResult<Vec<String>> {
    let (mut actions, target) = plan_install(env, opts)?;
    if opts.dry_run {
        return Ok(actions);
    }

    let src = source_binary(opts)?;
    if !src.is_file() {
        return Err(KrnrError::Install(format!(
            "source executable not found: {}",
            src.display()
        )));
    }
    if !same_path(&src, &target) {
        copy_file(&src, &target)
            .map_err(|e| KrnrError::Install(format!("copy {} -> {}: {e}", src.display(), target.display())))?;
        set_executable(&target)?;
    }

    let dir = target.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut meta = InstallMetadata {
        target_path: target,
        added_to_path: false,
        path_file: None,
        path_line: None,
        old_user_path: None,
        installed_at: Utc::now(),
    };
    if opts.add_to_path {
        let change = add_to_path(env, &dir, opts.system)
            .map_err(|e| KrnrError::Install(format!("add to PATH: {e}")))?;
        actions.push(format!("Added {} to PATH via {}", dir.display(), change.path_file));
        meta.added_to_path = true;
        meta.path_file = Some(change.path_file);
        meta.path_line = change.path_line;
        meta.old_user_path = change.old_path;
    }

    env.metadata_store()
        .save(&meta)
        .map_err(|e| KrnrError::Install(format!("save metadata: {e}")))?;
    Ok(actions)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> KrnrResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| KrnrError::Install(format!("set exec bit: {e}")))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> KrnrResult<()> {
    Ok(())
}

/// Where krnr is installed and whether those places are on PATH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStatus {
    pub user_path: PathBuf,
    pub system_path: PathBuf,
    pub user_installed: bool,
    pub system_installed: bool,
    pub user_on_path: bool,
    pub system_on_path: bool,
    pub metadata_found: bool,
}

pub fn get_status(env: &InstallEnv) -> InstallStatus {
    let user_path = env.user_target();
    let system_path = env.system_target();
    let mut status = InstallStatus {
        user_installed: user_path.is_file(),
        system_installed: system_path.is_file(),
        user_on_path: contains_path(&env.path_env, &env.default_user_bin()),
        system_on_path: contains_path(&env.path_env, &env.system_bin),
        metadata_found: env.metadata_store().exists(),
        user_path,
        system_path,
    };

    // Whatever PATH resolves `krnr` to is installed and reachable.
    if let Some(found) = find_executable(binary_name()) {
        if same_path(&found, &status.user_path) {
            status.user_installed = true;
            status.user_on_path = true;
        }
        if same_path(&found, &status.system_path) {
            status.system_installed = true;
            status.system_on_path = true;
        }
    }
    status
}
