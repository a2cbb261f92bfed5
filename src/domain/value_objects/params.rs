//! `{{name}}` parameter placeholders
//!
//! Commands may reference parameters that are supplied at run time with
//! `--param name=value`, read from the environment with `name=env:VAR`, or
//! prompted for interactively.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([a-zA-Z0-9_.-]+)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue {
    pub value: String,
    /// Value came from `env:VAR` and must never be echoed.
    pub env_bound: bool,
}

/// Parameter values collected for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
    env_bound: BTreeSet<String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        if value.env_bound {
            self.env_bound.insert(name.clone());
        } else {
            self.env_bound.remove(&name);
        }
        self.values.insert(name, value.value);
    }

    /// Insert a literal (prompted or flag) value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(
            name,
            ParamValue {
                value: value.into(),
                env_bound: false,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_env_bound(&self, name: &str) -> bool {
        self.env_bound.contains(name)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Copy of the values where every entry for which `hide` returns true
    /// (and every env-bound entry) is replaced by `<redacted>`.
    pub fn redacted(&self, hide: impl Fn(&str) -> bool) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| {
                let shown = if hide(k) || self.is_env_bound(k) {
                    "<redacted>".to_string()
                } else {
                    v.clone()
                };
                (k.clone(), shown)
            })
            .collect()
    }
}

/// Placeholders left unresolved by [`apply_params`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing parameters: {}", .missing.join(", "))]
pub struct MissingParams {
    /// Text with every known placeholder substituted.
    pub partial: String,
    /// Sorted, deduplicated names with no value.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid --param value: {0} (expected name=value)")]
pub struct InvalidParamFlag(pub String);

/// Unique parameter names referenced in `text`, in order of first appearance.
pub fn find_params(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for caps in placeholder_re().captures_iter(text) {
        let name = &caps[1];
        if seen.insert(name.to_string()) {
            out.push(name.to_string());
        }
    }
    out
}

/// Substitute every placeholder in `text` with its value from `values`.
pub fn apply_params(text: &str, values: &BTreeMap<String, String>) -> Result<String, MissingParams> {
    let mut missing = BTreeSet::new();
    let result = placeholder_re().replace_all(text, |caps: &Captures<'_>| {
        let name = &caps[1];
        match values.get(name) {
            Some(v) => v.clone(),
            None => {
                missing.insert(name.to_string());
                caps[0].to_string()
            }
        }
    });

    if missing.is_empty() {
        Ok(result.into_owned())
    } else {
        Err(MissingParams {
            partial: result.into_owned(),
            missing: missing.into_iter().collect(),
        })
    }
}

/// Parse one `--param name=value` flag.
///
/// A value of `env:VAR` is read from the environment (empty when unset) and
/// marked env-bound.
pub fn parse_param_flag(flag: &str) -> Result<(String, ParamValue), InvalidParamFlag> {
    parse_param_flag_with(flag, |key| std::env::var(key).ok())
}

pub(crate) fn parse_param_flag_with(
    flag: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(String, ParamValue), InvalidParamFlag> {
    let Some((name, value)) = flag.split_once('=') else {
        return Err(InvalidParamFlag(flag.to_string()));
    };

    let param = match value.strip_prefix("env:") {
        Some(key) => ParamValue {
            value: lookup(key).unwrap_or_default(),
            env_bound: true,
        },
        None => ParamValue {
            value: value.to_string(),
            env_bound: false,
        },
    };
    Ok((name.to_string(), param))
}
