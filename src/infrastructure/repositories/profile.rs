//! JSON Profile Repository
//!
//! Persists the author profile at `<data dir>/whoami.json`.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::ports::{Profile, ProfileError, ProfileRepository};
use crate::infrastructure::fs::write_atomic;

pub struct JsonProfileRepository {
    path: PathBuf,
}

impl JsonProfileRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join("whoami.json"),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ProfileRepository for JsonProfileRepository {
    fn get(&self) -> Result<Option<Profile>, ProfileError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn set(&self, profile: &Profile) -> Result<(), ProfileError> {
        let mut json = serde_json::to_string_pretty(profile)?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ProfileError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
