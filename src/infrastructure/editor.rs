//! External editor round-trips.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::Builder;

use crate::error::{KrnrError, KrnrResult};

/// Program and leading arguments for `$EDITOR` (e.g. `code --wait`).
pub fn editor_command(editor: Option<&str>) -> (String, Vec<String>) {
    let fallback = if cfg!(windows) { "notepad" } else { "vi" };
    let mut parts = editor.unwrap_or("").split_whitespace().map(str::to_string);
    match parts.next() {
        Some(program) => (program, parts.collect()),
        None => (fallback.to_string(), Vec::new()),
    }
}

/// Open `path` in the user's editor and wait for it to exit.
pub fn open_editor(path: &Path) -> KrnrResult<()> {
    let editor = std::env::var("EDITOR").ok();
    let (program, args) = editor_command(editor.as_deref());
    let status = Command::new(&program)
        .args(&args)
        .arg(path)
        .status()
        .map_err(|e| KrnrError::Editor(format!("{program}: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(KrnrError::Editor(format!("{program}: {status}")))
    }
}

/// Lines of an edited buffer, trimmed, without blanks and `#` comments.
pub fn parse_edited(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Let the user edit `commands` (one per line) and return the result.
pub fn edit_commands(name: &str, commands: &[String]) -> KrnrResult<Vec<String>> {
    let file = Builder::new()
        .prefix("krnr-edit-")
        .suffix(".txt")
        .tempfile()?;
    let mut body = format!(
        "# Editing '{name}'. One command per line; blank lines and lines starting with # are ignored.\n"
    );
    for cmd in commands {
        body.push_str(cmd);
        body.push('\n');
    }
    fs::write(file.path(), body)?;
    open_editor(file.path())?;
    let edited = fs::read_to_string(file.path())?;
    Ok(parse_edited(&edited))
}
