//! Command Policy
//!
//! Denylist of destructive shell patterns checked before a command runs, and
//! the rule deciding which parameter values are never echoed.
//! This policy performs no I/O.

use regex::Regex;
use thiserror::Error;

/// Built-in patterns. Checking is conservative, not exhaustive.
const DEFAULT_DENY: &[&str] = &[
    // destructive filesystem ops
    r"(?i)\brm\s+-rf\s+/?$",
    r"(?i)\brm\s+-rf\s+/",
    r"(?i)\bmkfs\b",
    r"(?i)\bdd\s+if=",
    // fork bomb, e.g. :(){ :|:& };:
    r":\(\)\s*\{",
    // package managers removing packages
    r"(?i)\bapt-get\s+remove\s+",
    r"(?i)\byum\s+remove\s+",
    // disk wipe
    r"(?i)\bwipefs\b",
];

/// Substrings marking a parameter name as secret.
const SECRET_MARKERS: &[&str] = &[
    "secret", "token", "password", "passwd", "pwd", "apikey", "api_key", "key",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("empty command")]
    Empty,

    #[error("command appears destructive or unsafe")]
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid deny pattern '{pattern}': {message}")]
pub struct InvalidDenyPattern {
    pub pattern: String,
    pub message: String,
}

/// Compiled denylist.
#[derive(Debug, Clone)]
pub struct CommandPolicy {
    deny: Vec<Regex>,
}

impl CommandPolicy {
    /// Built-in denylist plus user-supplied `extra` patterns.
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Result<Self, InvalidDenyPattern> {
        let mut deny = Vec::with_capacity(DEFAULT_DENY.len() + extra.len());
        for pattern in DEFAULT_DENY
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
        {
            let re = Regex::new(pattern).map_err(|e| InvalidDenyPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            deny.push(re);
        }
        Ok(Self { deny })
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.deny.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deny.is_empty()
    }

    /// `Ok(())` when the command may run.
    pub fn check_allowed(&self, command: &str) -> Result<(), PolicyViolation> {
        let cmd = command.trim();
        if cmd.is_empty() {
            return Err(PolicyViolation::Empty);
        }
        if self.deny.iter().any(|re| re.is_match(cmd)) {
            return Err(PolicyViolation::Destructive);
        }
        Ok(())
    }
}

impl Default for CommandPolicy {
    fn default() -> Self {
        let deny = DEFAULT_DENY
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        Self { deny }
    }
}

/// Whether values of this parameter must be shown as `<redacted>`.
pub fn is_secret_param_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    SECRET_MARKERS.iter().any(|m| lower.contains(m))
}
