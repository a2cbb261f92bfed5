use krnr::CommandSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// `- name` per set, as printed by `krnr list`.
pub fn render_list(sets: &[CommandSet]) -> String {
    sets.iter().map(|s| format!("- {}\n", s.name)).collect()
}

/// Menu rows: names padded to a common display width, then the description,
/// each row cut to `max_width` columns.
pub fn browse_labels(sets: &[CommandSet], max_width: usize) -> Vec<String> {
    let name_width = sets.iter().map(|s| s.name.width()).max().unwrap_or(0);
    sets.iter()
        .map(|s| {
            let mut row = s.name.clone();
            if let Some(description) = s.description.as_deref().filter(|d| !d.is_empty()) {
                row.push_str(&" ".repeat(name_width - s.name.width() + 2));
                row.push_str(description);
            }
            truncate_to_width(&row, max_width)
        })
        .collect()
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

pub fn render_describe(set: &CommandSet) -> String {
    let mut out = format!("Name: {}\n", set.name);
    if let Some(description) = set.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("Description: {}\n", description));
    }
    if let Some(author) = set.author_display() {
        out.push_str(&format!("Author: {}\n", author));
    }
    if !set.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", set.tags.join(", ")));
    }
    out.push_str(&format!("Created: {}\n", set.created_at));
    if let Some(last_run) = &set.last_run {
        out.push_str(&format!("Last run: {}\n", last_run));
    }
    out.push_str("Commands:\n");
    for c in &set.commands {
        out.push_str(&format!("{}: {}\n", c.position, c.command));
    }
    out
}
