//! Configuration loading

use std::fs;
use std::path::Path;

use crate::error::{KrnrError, KrnrResult};

use super::paths;
use super::types::{ColorMode, Config};
use super::ConfigWarning;

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> KrnrResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> KrnrResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| KrnrError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

pub fn load_or_default() -> Config {
    if let Ok(path) = paths::config_path() {
        if path.exists() {
            if let Ok(config) = Config::load(&path) {
                return config.with_env_overrides();
            }
        }
    }
    Config::default().with_env_overrides()
}

/// Apply `KRNR_SHELL`, `KRNR_TIMEOUT`, and `KRNR_NO_COLOR`/`NO_COLOR`.
pub fn with_env_overrides(mut config: Config, env: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(shell) = env("KRNR_SHELL").filter(|s| !s.trim().is_empty()) {
        config.run.shell = Some(shell.trim().to_string());
    }

    if let Some(secs) = env("KRNR_TIMEOUT").and_then(|v| v.trim().parse::<u64>().ok()) {
        config.run.timeout_secs = secs;
    }

    if env("KRNR_NO_COLOR").is_some() || env("NO_COLOR").is_some() {
        config.output.color = ColorMode::Never;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "run",
        "shell",
        "timeout_secs",
        "show_stderr",
        "security",
        "extra_deny",
        "output",
        "color",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
