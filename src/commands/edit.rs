use anyhow::Result;
use krnr::infrastructure::editor::edit_commands;
use krnr::RegistryUseCase;

use super::Session;
use crate::ui::json::emit_data;
use crate::ui::prompt::prompter_for;

/// Replace the commands of `name`, from `-c` flags or through `$EDITOR`.
pub fn cmd_edit(session: &Session, name: &str, commands: Vec<String>) -> Result<()> {
    let repo = session.open_repo()?;
    let registry = RegistryUseCase::new(&repo);

    let commands = if commands.is_empty() {
        let set = registry.get(name)?;
        edit_commands(name, &set.command_texts())?
    } else {
        commands
    };
    let count = registry.replace_commands(name, &commands)?;

    if session.ui.json {
        emit_data("edit", serde_json::json!({ "name": name, "commands": count }))?;
    } else {
        println!("updated '{}' with {} commands", name, count);
    }
    Ok(())
}

pub fn cmd_delete(session: &Session, name: &str, yes: bool) -> Result<()> {
    let repo = session.open_repo()?;
    let registry = RegistryUseCase::new(&repo);
    registry.get(name)?;

    if !yes && !session.ui.json {
        let prompter = prompter_for(&session.ui);
        if !prompter.confirm(&format!("Delete '{}' permanently?", name))? {
            println!("aborted");
            return Ok(());
        }
    }

    registry.delete(name)?;
    if session.ui.json {
        emit_data("delete", serde_json::json!({ "name": name, "deleted": true }))?;
    } else {
        println!("deleted '{}'", name);
    }
    Ok(())
}
