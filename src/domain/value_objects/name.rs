//! Command set names
//!
//! Names are user-typed and frequently pasted, so invisible characters are
//! common. Validation never mutates; sanitizing is a separate, explicit step.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("contains control character U+{code:04X} ({ch:?})")]
    ControlCharacter { code: u32, ch: char },
}

/// Reject empty (after trimming) names and names containing control characters.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(ch) = name.chars().find(|c| c.is_control()) {
        return Err(NameError::ControlCharacter {
            code: ch as u32,
            ch,
        });
    }
    Ok(())
}

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Strip control and zero-width characters, then trim.
///
/// Returns the cleaned name and whether anything changed.
pub fn sanitize_name(name: &str) -> (String, bool) {
    if name.is_empty() {
        return (String::new(), false);
    }
    let kept: String = name
        .chars()
        .filter(|c| !c.is_control() && !ZERO_WIDTH.contains(c))
        .collect();
    let cleaned = kept.trim().to_string();
    let changed = cleaned != name;
    (cleaned, changed)
}
