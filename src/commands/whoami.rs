use anyhow::Result;
use krnr::domain::ports::{Profile, ProfileRepository};

use super::Session;
use crate::cli::WhoamiCommands;
use crate::ui::json::emit_data;

fn display(profile: &Profile) -> String {
    match profile.email() {
        Some(email) => format!("{} <{}>", profile.name, email),
        None => profile.name.clone(),
    }
}

pub fn cmd_whoami(session: &Session, action: WhoamiCommands) -> Result<()> {
    let profiles = session.profiles()?;
    let json = session.ui.json;

    match action {
        WhoamiCommands::Set { name, email } => {
            let profile = Profile {
                name: name.trim().to_string(),
                email: email.unwrap_or_default().trim().to_string(),
            };
            profiles.set(&profile)?;
            if json {
                emit_data("whoami", serde_json::json!({ "action": "set", "profile": profile }))?;
            } else {
                println!("stored author as: {}", display(&profile));
            }
        }
        WhoamiCommands::Show => {
            let profile = profiles.get()?;
            if json {
                emit_data("whoami", serde_json::json!({ "action": "show", "profile": profile }))?;
            } else {
                match profile {
                    Some(p) => println!("{}", display(&p)),
                    None => println!("no stored author identity"),
                }
            }
        }
        WhoamiCommands::Clear => {
            profiles.clear()?;
            if json {
                emit_data("whoami", serde_json::json!({ "action": "clear" }))?;
            } else {
                println!("cleared stored author identity");
            }
        }
    }
    Ok(())
}
