//! Command text normalization
//!
//! Commands are often pasted from chat apps or rich-text editors, which
//! insert typographic quotes and invisible characters the shell chokes on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandTextError {
    #[error("invalid command: contains newline characters; each command must be a single line")]
    Newline,

    #[error("invalid command: contains control characters; remove non-printable characters")]
    ControlCharacter,
}

/// Map smart quotes and NBSP to ASCII and drop zero-width marks and NUL.
pub fn sanitize_command(command: &str) -> String {
    command
        .chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{201C}' | '\u{201D}' => Some('"'),
            '\u{00A0}' => Some(' '),
            '\u{200B}' | '\u{200E}' | '\u{200F}' | '\0' => None,
            other => Some(other),
        })
        .collect()
}

fn is_forbidden_control(c: char) -> bool {
    (c < ' ' && c != '\t') || c == '\u{7f}'
}

/// Reject text that cannot be passed to a shell as a single argument.
pub fn validate_command(command: &str) -> Result<(), CommandTextError> {
    if command.contains('\n') {
        return Err(CommandTextError::Newline);
    }
    if command.chars().any(is_forbidden_control) {
        return Err(CommandTextError::ControlCharacter);
    }
    Ok(())
}

/// Sanitize then validate, returning the text that will actually run.
pub fn prepare_command(command: &str) -> Result<String, CommandTextError> {
    let cleaned = sanitize_command(command);
    validate_command(&cleaned)?;
    Ok(cleaned)
}
