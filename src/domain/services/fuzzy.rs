//! Fuzzy matching for `list --filter --fuzzy` and the interactive browser.

use crate::domain::entities::CommandSet;

/// Case-insensitive substring or character-subsequence match.
///
/// An empty query matches everything.
pub fn fuzzy_match(target: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let target = target.to_lowercase();
    let query = query.to_lowercase();
    if target.contains(&query) {
        return true;
    }

    let mut wanted = query.chars().peekable();
    for ch in target.chars() {
        if wanted.peek() == Some(&ch) {
            wanted.next();
            if wanted.peek().is_none() {
                return true;
            }
        }
    }
    false
}

/// Match against name, description, command text, or tags.
pub fn matches_command_set(set: &CommandSet, query: &str) -> bool {
    fuzzy_match(&set.name, query)
        || set
            .description
            .as_deref()
            .is_some_and(|d| fuzzy_match(d, query))
        || set.commands.iter().any(|c| fuzzy_match(&c.command, query))
        || set.tags.iter().any(|t| fuzzy_match(t, query))
}
