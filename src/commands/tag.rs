use anyhow::Result;
use krnr::RegistryUseCase;

use super::Session;
use crate::cli::TagCommands;
use crate::ui::json::emit_data;

pub fn cmd_tag(session: &Session, action: TagCommands) -> Result<()> {
    let repo = session.open_repo()?;
    let registry = RegistryUseCase::new(&repo);
    let json = session.ui.json;

    match action {
        TagCommands::Add { name, tag } => {
            registry.add_tag(&name, &tag)?;
            if json {
                emit_data("tag", serde_json::json!({ "action": "add", "name": name, "tag": tag }))?;
            } else {
                println!("added tag '{}' to '{}'", tag, name);
            }
        }
        TagCommands::Remove { name, tag } => {
            registry.remove_tag(&name, &tag)?;
            if json {
                emit_data("tag", serde_json::json!({ "action": "remove", "name": name, "tag": tag }))?;
            } else {
                println!("removed tag '{}' from '{}'", tag, name);
            }
        }
        TagCommands::List { name } => {
            let tags = registry.tags(&name)?;
            if json {
                emit_data("tag", serde_json::json!({ "action": "list", "name": name, "tags": tags }))?;
            } else {
                for tag in tags {
                    println!("- {}", tag);
                }
            }
        }
    }
    Ok(())
}
