//! CommandSet entity
//!
//! A named workflow: metadata plus an ordered list of commands.

use serde::Serialize;

/// A single shell command within a [`CommandSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub id: i64,
    pub command_set_id: i64,
    /// 1-based position inside the set.
    pub position: i64,
    pub command: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandSet {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub created_at: String,
    pub last_run: Option<String>,
    /// Empty when loaded through a listing query.
    pub commands: Vec<Command>,
    pub tags: Vec<String>,
}

impl CommandSet {
    /// Command text in position order.
    pub fn command_texts(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.command.clone()).collect()
    }

    /// `Name <email>`, `Name`, or `None` when no author was recorded.
    pub fn author_display(&self) -> Option<String> {
        match (&self.author_name, &self.author_email) {
            (Some(name), Some(email)) if !email.is_empty() => Some(format!("{} <{}>", name, email)),
            (Some(name), _) => Some(name.clone()),
            _ => None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
