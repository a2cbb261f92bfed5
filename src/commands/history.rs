use anyhow::Result;
use krnr::RegistryUseCase;

use super::Session;
use crate::ui::diff::render_command_diff;
use crate::ui::json::emit_data;
use crate::ui::views::render_history;

pub fn cmd_history(session: &Session, name: &str) -> Result<()> {
    let repo = session.open_repo()?;
    let versions = RegistryUseCase::new(&repo).history(name)?;

    if session.ui.json {
        emit_data("history", serde_json::json!({ "name": name, "versions": versions }))?;
    } else {
        print!("{}", render_history(name, &versions));
    }
    Ok(())
}

/// Restore version `to`, printing the change it makes first.
pub fn cmd_rollback(session: &Session, name: &str, to: i64) -> Result<()> {
    let repo = session.open_repo()?;
    let diff = RegistryUseCase::new(&repo).rollback(name, to)?;

    if session.ui.json {
        emit_data(
            "rollback",
            serde_json::json!({
                "name": name,
                "version": to,
                "additions": diff.additions,
                "deletions": diff.deletions,
            }),
        )?;
    } else {
        print!(
            "{}",
            render_command_diff("current", &format!("v{}", to), &diff, session.ui.color)
        );
        println!("rolled back {} to v{}", name, to);
    }
    Ok(())
}
