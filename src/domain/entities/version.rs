//! Version snapshots
//!
//! Every mutation of a command set appends one of these.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// What produced a version snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Rollback,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Rollback => "rollback",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Operation::Create),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            "rollback" => Ok(Operation::Rollback),
            other => Err(format!("unknown version operation: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub id: i64,
    pub command_set_id: i64,
    /// Monotonic per set, starting at 1.
    pub version: i64,
    pub created_at: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub description: Option<String>,
    pub commands: Vec<String>,
    pub operation: Operation,
}
