use anyhow::Result;
use krnr::RegistryUseCase;

use super::Session;
use crate::ui::json::emit_data;
use crate::ui::output;
use crate::ui::views::{render_describe, render_list};

pub fn cmd_list(session: &Session, tag: Option<&str>, filter: Option<&str>, fuzzy: bool) -> Result<()> {
    let repo = session.open_repo()?;
    let sets = RegistryUseCase::new(&repo).list(tag, filter, fuzzy)?;
    output::debug(&session.ui, format!("{} command sets matched", sets.len()));

    if session.ui.json {
        emit_data("list", serde_json::json!({ "sets": sets }))?;
    } else {
        print!("{}", render_list(&sets));
    }
    Ok(())
}

pub fn cmd_describe(session: &Session, name: &str) -> Result<()> {
    let repo = session.open_repo()?;
    let set = RegistryUseCase::new(&repo).get(name)?;

    if session.ui.json {
        emit_data("describe", serde_json::json!({ "set": set }))?;
    } else {
        print!("{}", render_describe(&set));
    }
    Ok(())
}
