use krnr::domain::services::{DiffResult, DiffTag};

use crate::ui::theme;

/// Render a command diff with old/new positions in the gutter.
///
/// `from`/`to` label the two sides, e.g. `current` and `v3`.
pub fn render_command_diff(from: &str, to: &str, diff: &DiffResult, color: bool) -> String {
    let width = diff
        .lines
        .iter()
        .flat_map(|l| [l.old_pos, l.new_pos])
        .flatten()
        .max()
        .unwrap_or(1)
        .to_string()
        .len();

    let mut out = String::new();
    out.push_str(&theme::paint(&format!("--- {}", from), theme::colors::INFO, color));
    out.push('\n');
    out.push_str(&theme::paint(&format!("+++ {}", to), theme::colors::INFO, color));
    out.push('\n');

    for line in &diff.lines {
        let col = |pos: Option<usize>| {
            pos.map(|n| format!("{:>width$}", n, width = width))
                .unwrap_or_else(|| " ".repeat(width))
        };
        let (sign, tint) = match line.tag {
            DiffTag::Delete => ("-", theme::colors::ERROR),
            DiffTag::Insert => ("+", theme::colors::SUCCESS),
            DiffTag::Equal => (" ", theme::colors::DIM),
        };
        let text = format!(
            "{} {} {} {}",
            col(line.old_pos),
            col(line.new_pos),
            sign,
            line.command
        );
        out.push_str(&theme::paint(&text, tint, color));
        out.push('\n');
    }

    if !diff.has_changes() {
        out.push_str("(no changes)\n");
    }
    out
}
