//! Combining command lists when an import merges into an existing set.

use std::collections::HashSet;

/// Existing commands followed by incoming ones.
///
/// With `dedupe`, an incoming command already present (or repeated within
/// the incoming list) is dropped. Existing duplicates are left as they are.
pub fn merge_commands(existing: &[String], incoming: &[String], dedupe: bool) -> Vec<String> {
    let mut out: Vec<String> = existing.to_vec();
    if !dedupe {
        out.extend(incoming.iter().cloned());
        return out;
    }

    let mut seen: HashSet<String> = existing.iter().cloned().collect();
    for cmd in incoming {
        if seen.insert(cmd.clone()) {
            out.push(cmd.clone());
        }
    }
    out
}
