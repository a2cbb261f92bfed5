//! Command output clean-up for the interactive menu.
//!
//! Keeps SGR color codes and drops every other escape sequence that could
//! move the cursor, switch screens or retitle the terminal. Cursor-forward
//! (`CUF`) and column-absolute (`CHA`) become spaces so side-by-side layouts
//! stay readable.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Widest gap a single `CUF` may open.
const MAX_FORWARD: usize = 512;

fn osc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)").expect("static regex"))
}

fn csi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[([0-9;?]*)([A-Za-z])").expect("static regex"))
}

pub fn sanitize_output(input: &str) -> String {
    let text = input.replace("\r\n", "\n").replace('\r', "\n");
    let text = osc_re().replace_all(&text, "");
    csi_re().replace_all(&text, replace_csi).into_owned()
}

fn replace_csi(caps: &Captures<'_>) -> Cow<'static, str> {
    match &caps[2] {
        "m" => Cow::Owned(caps[0].to_string()),
        "C" => Cow::Owned(" ".repeat(first_param(&caps[1], 1).min(MAX_FORWARD))),
        "G" => Cow::Borrowed("  "),
        _ => Cow::Borrowed(""),
    }
}

/// First numeric parameter, `default` when absent or zero.
fn first_param(params: &str, default: usize) -> usize {
    params
        .trim_start_matches('?')
        .split(';')
        .next()
        .and_then(|p| p.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}
