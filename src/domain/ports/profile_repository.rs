//! ProfileRepository port
//!
//! The local author identity (`krnr whoami`), used as the default author of
//! new command sets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl Profile {
    pub fn email(&self) -> Option<&str> {
        (!self.email.is_empty()).then_some(self.email.as_str())
    }
}

pub trait ProfileRepository {
    fn get(&self) -> Result<Option<Profile>, ProfileError>;
    fn set(&self, profile: &Profile) -> Result<(), ProfileError>;
    /// Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), ProfileError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to access profile: {0}")]
    Access(#[from] std::io::Error),

    #[error("profile file corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}
