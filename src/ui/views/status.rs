use krnr::infrastructure::install::InstallStatus;

pub fn render_status(status: &InstallStatus) -> String {
    let mut out = String::from("krnr status:\n");
    let row = |label: &str, installed: bool, path: &std::path::Path, on_path: bool| {
        if installed {
            format!("- {} install: {} (on PATH: {})\n", label, path.display(), on_path)
        } else {
            format!("- {} install: not found (expected: {})\n", label, path.display())
        }
    };
    out.push_str(&row("User", status.user_installed, &status.user_path, status.user_on_path));
    out.push_str(&row(
        "System",
        status.system_installed,
        &status.system_path,
        status.system_on_path,
    ));
    out.push_str(if status.metadata_found {
        "- Install metadata: present\n"
    } else {
        "- Install metadata: not found\n"
    });
    out
}

/// `header` followed by `- action` lines.
pub fn render_plan(header: &str, actions: &[String]) -> String {
    let mut out = format!("{}\n", header);
    for action in actions {
        out.push_str(&format!("- {}\n", action));
    }
    out
}
