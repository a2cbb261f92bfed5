use std::io::{self, Write};

use anyhow::Result;
use krnr::domain::ports::SetMetadata;
use krnr::domain::services::record_commands;
use krnr::RegistryUseCase;

use super::Session;
use crate::ui::json::emit_data;

pub fn cmd_save(
    session: &Session,
    name: String,
    description: Option<String>,
    commands: Vec<String>,
    author: Option<String>,
    author_email: Option<String>,
) -> Result<()> {
    let repo = session.open_repo()?;
    let profiles = session.profiles()?;
    let registry = RegistryUseCase::new(&repo).with_profiles(&profiles);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let name = registry.free_name(&name, &mut input, &mut stdout)?;

    let (author_name, author_email) = registry.resolve_author(author, author_email)?;
    let meta = SetMetadata {
        description,
        author_name,
        author_email,
        ..SetMetadata::named(&name)
    };
    let count = registry.save(&meta, &commands)?;

    if session.ui.json {
        emit_data("save", serde_json::json!({ "name": name, "commands": count }))?;
    } else {
        println!("saved '{}' with {} commands", name, count);
    }
    Ok(())
}

pub fn cmd_record(session: &Session, name: String, description: Option<String>) -> Result<()> {
    let repo = session.open_repo()?;
    let registry = RegistryUseCase::new(&repo);

    // Name re-prompts and the recorded lines share one reader so nothing
    // typed ahead is lost between them.
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let name = registry.free_name(&name, &mut input, &mut stdout)?;

    if !session.ui.json {
        println!("Enter commands, one per line. End with EOF (Ctrl-D on Unix, Ctrl-Z on Windows).");
        stdout.flush()?;
    }
    let commands = record_commands(&mut input)?;
    if commands.is_empty() {
        if session.ui.json {
            emit_data("record", serde_json::json!({ "name": name, "commands": 0 }))?;
        } else {
            println!("no commands recorded; aborting");
        }
        return Ok(());
    }

    registry.save_recorded(&name, description, &commands)?;
    if session.ui.json {
        emit_data("record", serde_json::json!({ "name": name, "commands": commands.len() }))?;
    } else {
        println!("saved '{}' with {} commands", name, commands.len());
    }
    Ok(())
}
