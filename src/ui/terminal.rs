//! Terminal capability detection.
//!
//! Decides whether krnr may color its output and draw Unicode, and whether
//! it runs under CI.

use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
    pub width: u16,
}

impl TerminalCapabilities {
    /// Both ends are a terminal, so prompts can be answered.
    pub fn interactive(&self) -> bool {
        self.stdin_tty && self.stdout_tty
    }
}

pub fn detect_capabilities() -> TerminalCapabilities {
    detect_with(
        |key| std::env::var(key).ok(),
        std::io::stdout().is_terminal(),
        std::io::stdin().is_terminal(),
        crossterm::terminal::size().ok().map(|(w, _)| w),
    )
}

fn detect_with(
    get_env: impl Fn(&str) -> Option<String>,
    stdout_tty: bool,
    stdin_tty: bool,
    width: Option<u16>,
) -> TerminalCapabilities {
    let term = get_env("TERM").unwrap_or_default();
    let dumb = term.eq_ignore_ascii_case("dumb");
    let no_color = get_env("NO_COLOR").is_some() || get_env("KRNR_NO_COLOR").is_some();

    TerminalCapabilities {
        stdout_tty,
        stdin_tty,
        supports_color: stdout_tty && !dumb && !no_color,
        supports_unicode: !dumb && unicode_locale(&get_env),
        is_ci: is_ci_env(&get_env),
        width: width.unwrap_or(80),
    }
}

fn is_ci_env(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    const KEYS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "JENKINS_HOME",
        "BUILDKITE",
        "CIRCLECI",
        "TRAVIS",
    ];

    KEYS.iter().any(|k| get_env(k).is_some())
}

fn unicode_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    if cfg!(windows) {
        // Windows Terminal and recent conhost render UTF-8 fine.
        return get_env("WT_SESSION").is_some() || get_env("TERM_PROGRAM").is_some();
    }
    for key in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Some(val) = get_env(key).filter(|v| !v.is_empty()) {
            let v = val.to_lowercase();
            return v.contains("utf-8") || v.contains("utf8");
        }
    }
    true
}
