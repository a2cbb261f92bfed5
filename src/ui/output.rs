use std::path::Path;

use krnr::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::theme;

/// Diagnostic line on stderr, shown from `-v` upwards.
pub fn debug(ui: &UiContext, message: impl AsRef<str>) {
    if ui.verbose > 0 && !ui.json {
        let prefix = theme::paint("debug:", theme::colors::DIM, ui.color);
        eprintln!("{} {}", prefix, message.as_ref());
    }
}

pub fn warn(ui: &UiContext, message: impl AsRef<str>) {
    if ui.json {
        return;
    }
    let icon = theme::paint(theme::Icon::Warning.glyph(ui.unicode), theme::colors::WARNING, ui.color);
    eprintln!("{} {}", icon, message.as_ref());
}

pub fn print_config_warnings(ui: &UiContext, path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", path.display(), line),
            None => path.display().to_string(),
        };
        let mut message = format!("Unknown config key '{}' in {}", w.key, location);
        if let Some(suggestion) = &w.suggestion {
            message.push_str(&format!(" (did you mean '{}'?)", suggestion));
        }
        warn(ui, message);
    }
}
