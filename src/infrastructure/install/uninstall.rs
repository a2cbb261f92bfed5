//! Reversing an install.

use std::fs;
use std::path::Path;

use crate::error::{KrnrError, KrnrResult};

use super::path_entry::remove_recorded;
use super::{InstallEnv, InstallMetadata};

/// What [`uninstall`] would do.
pub fn plan_uninstall(env: &InstallEnv) -> Vec<String> {
    match env.metadata_store().load() {
        Ok(meta) => plan_with_metadata(env, &meta),
        Err(_) => vec![
            "No install metadata found.".into(),
            format!("Check for binaries at: {}", env.user_target().display()),
            format!("Or at system location: {}", env.system_target().display()),
            "If you installed manually, remove those files and any PATH entries yourself, or re-run install with --add-to-path and then uninstall.".into(),
        ],
    }
}

fn plan_with_metadata(env: &InstallEnv, meta: &InstallMetadata) -> Vec<String> {
    let mut actions = vec![format!("Remove binary: {}", meta.target_path.display())];
    for (other, label) in [
        (env.user_target(), "Also remove user binary"),
        (env.system_target(), "Also remove system binary"),
    ] {
        if other != meta.target_path && other.is_file() {
            actions.push(format!("{label}: {}", other.display()));
        }
    }
    if meta.added_to_path {
        let action = match meta.path_file.as_deref() {
            Some("MachineEnv") => "Remove PATH entries from Machine PATH (requires admin)".to_string(),
            Some("UserEnv") if meta.old_user_path.is_some() => {
                "Restore user PATH to previous value".to_string()
            }
            Some("UserEnv") => "Remove PATH entry from user PATH".to_string(),
            Some(file) => format!("Remove PATH entries from {file}"),
            None => "Remove PATH entries from ~/.bashrc or ~/.profile".to_string(),
        };
        actions.push(action);
    }
    actions
}

/// Remove the recorded install, other default installs, and PATH entries.
pub fn uninstall(env: &InstallEnv) -> KrnrResult<Vec<String>> {
    let store = env.metadata_store();
    let meta = store
        .load()
        .map_err(|e| KrnrError::Install(format!("load metadata: {e}")))?;

    let mut actions = remove_target(&meta.target_path);

    if meta.added_to_path {
        let dir = meta.target_path.parent().unwrap_or(Path::new(""));
        match remove_recorded(
            env,
            dir,
            meta.path_file.as_deref(),
            meta.old_user_path.as_deref(),
        ) {
            Ok(notes) => actions.extend(notes),
            Err(e) => actions.push(format!("failed to remove PATH entry: {e}")),
        }
    }

    for other in [env.user_target(), env.system_target()] {
        if other == meta.target_path || !other.is_file() {
            continue;
        }
        match fs::remove_file(&other) {
            Ok(()) => {
                actions.push(format!("Removed {}", other.display()));
                if let Some(parent) = other.parent() {
                    let _ = fs::remove_dir(parent);
                }
            }
            Err(e) => actions.push(format!("Failed to remove {}: {e}", other.display())),
        }
    }

    store.remove()?;
    Ok(actions)
}

fn remove_target(target: &Path) -> Vec<String> {
    if !target.exists() {
        return vec![format!("Target {} not found; skipping", target.display())];
    }
    if let Err(e) = fs::remove_file(target) {
        return vec![
            format!("Failed to remove {}: {e}", target.display()),
            "If the file is in use, stop any running instances (or run krnr from outside the install directory) and retry.".into(),
        ];
    }

    let mut actions = vec![format!("Removed {}", target.display())];
    let Some(parent) = target.parent() else {
        return actions;
    };
    if fs::remove_dir(parent).is_ok() {
        actions.push(format!("Removed empty directory {}", parent.display()));
    } else if let Ok(entries) = fs::read_dir(parent) {
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        if !names.is_empty() {
            actions.push(format!(
                "Directory {} not empty; contains: {} - please remove manually if desired",
                parent.display(),
                names.join(", ")
            ));
        }
    }
    actions
}
