//! Registry Use Case
//!
//! Application-layer orchestration for saving, editing and versioning
//! command sets.

use std::io::{BufRead, Write};

use crate::domain::entities::{CommandSet, Version};
use crate::domain::ports::{CommandSetRepository, ProfileRepository, SetMetadata};
use crate::domain::services::{diff_commands, DiffResult};
use crate::error::{KrnrError, KrnrResult};

pub struct RegistryUseCase<'a> {
    repository: &'a dyn CommandSetRepository,
    profiles: Option<&'a dyn ProfileRepository>,
}

impl<'a> RegistryUseCase<'a> {
    pub fn new(repository: &'a dyn CommandSetRepository) -> Self {
        Self {
            repository,
            profiles: None,
        }
    }

    /// Use the stored `whoami` profile as the default author.
    pub fn with_profiles(mut self, profiles: &'a dyn ProfileRepository) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn get(&self, name: &str) -> KrnrResult<CommandSet> {
        self.repository
            .get_command_set_by_name(name)?
            .ok_or_else(|| KrnrError::NotFound(name.to_string()))
    }

    /// Explicit author wins; otherwise the stored profile, if any.
    ///
    /// An explicit email without an explicit author is ignored.
    pub fn resolve_author(
        &self,
        author: Option<String>,
        email: Option<String>,
    ) -> KrnrResult<(Option<String>, Option<String>)> {
        let author = author.filter(|a| !a.is_empty());
        if author.is_some() {
            return Ok((author, email.filter(|e| !e.is_empty())));
        }
        let Some(profiles) = self.profiles else {
            return Ok((None, None));
        };
        Ok(match profiles.get()? {
            Some(p) => {
                let email = p.email().map(str::to_string);
                (Some(p.name).filter(|n| !n.is_empty()), email)
            }
            None => (None, None),
        })
    }

    /// Keep asking on `input` until `name` is not taken.
    ///
    /// A blank answer prints `name cannot be empty` and returns the empty
    /// name, which the subsequent create rejects.
    pub fn free_name(
        &self,
        name: &str,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> KrnrResult<String> {
        let mut name = name.to_string();
        while !name.is_empty() && self.repository.get_command_set_by_name(&name)?.is_some() {
            write!(out, "name '{}' already exists; enter a new name: ", name)?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(KrnrError::Aborted);
            }
            name = line.trim().to_string();
            if name.is_empty() {
                writeln!(out, "name cannot be empty")?;
            }
        }
        Ok(name)
    }

    /// Create a set; returns how many commands were stored.
    pub fn save(&self, meta: &SetMetadata, commands: &[String]) -> KrnrResult<usize> {
        let id = self.repository.create_command_set(meta, commands)?;
        Ok(self.repository.list_versions(id)?.first().map_or(0, |v| v.commands.len()))
    }

    /// Save commands captured by the recorder.
    pub fn save_recorded(
        &self,
        name: &str,
        description: Option<String>,
        commands: &[String],
    ) -> KrnrResult<i64> {
        let meta = SetMetadata {
            description,
            ..SetMetadata::named(name)
        };
        Ok(self.repository.create_command_set(&meta, commands)?)
    }

    /// Replace every command of `name`; blank lines are dropped.
    pub fn replace_commands(&self, name: &str, commands: &[String]) -> KrnrResult<usize> {
        let set = self.get(name)?;
        let commands: Vec<String> = commands
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        self.repository.replace_commands(set.id, &commands)?;
        Ok(commands.len())
    }

    /// Returns whether a set was deleted.
    pub fn delete(&self, name: &str) -> KrnrResult<bool> {
        let existed = self.repository.get_command_set_by_name(name)?.is_some();
        self.repository.delete_command_set(name)?;
        Ok(existed)
    }

    pub fn history(&self, name: &str) -> KrnrResult<Vec<Version>> {
        Ok(self.repository.list_versions_by_name(name)?)
    }

    /// Diff between the current commands of `name` and `version`.
    pub fn preview_rollback(&self, name: &str, version: i64) -> KrnrResult<DiffResult> {
        if version <= 0 {
            return Err(KrnrError::InvalidVersion(version));
        }
        let set = self.get(name)?;
        let target = self
            .repository
            .get_version(set.id, version)?
            .ok_or_else(|| KrnrError::VersionNotFound {
                name: name.to_string(),
                version,
            })?;
        Ok(diff_commands(&set.command_texts(), &target.commands))
    }

    /// Restore `version` of `name`; returns the change that was applied.
    pub fn rollback(&self, name: &str, version: i64) -> KrnrResult<DiffResult> {
        let diff = self.preview_rollback(name, version)?;
        self.repository.apply_version_by_name(name, version)?;
        Ok(diff)
    }

    pub fn add_tag(&self, name: &str, tag: &str) -> KrnrResult<()> {
        let set = self.get(name)?;
        Ok(self.repository.add_tag_to_command_set(set.id, tag.trim())?)
    }

    pub fn remove_tag(&self, name: &str, tag: &str) -> KrnrResult<()> {
        let set = self.get(name)?;
        Ok(self.repository.remove_tag_from_command_set(set.id, tag.trim())?)
    }

    pub fn tags(&self, name: &str) -> KrnrResult<Vec<String>> {
        let set = self.get(name)?;
        Ok(self.repository.list_tags_for_command_set(set.id)?)
    }

    /// Listing for `krnr list`: by tag, by text filter (plain or fuzzy), or all.
    pub fn list(&self, tag: Option<&str>, filter: Option<&str>, fuzzy: bool) -> KrnrResult<Vec<CommandSet>> {
        let mut sets = match (filter, fuzzy) {
            (Some(q), true) => self.repository.fuzzy_search_command_sets(q)?,
            (Some(q), false) => self.repository.search_command_sets(q)?,
            (None, _) => match tag {
                Some(t) => return Ok(self.repository.list_command_sets_by_tag(t)?),
                None => self.repository.list_command_sets()?,
            },
        };
        if let Some(t) = tag {
            sets.retain(|s| s.has_tag(t));
        }
        Ok(sets)
    }
}
