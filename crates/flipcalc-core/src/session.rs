//! Saved searches and the one-shot parameter override.
//!
//! [`SessionState`] is an explicit value: every operation consumes the state
//! and returns the next one. Persisting the saved list between runs is left
//! to [`load_saved_searches`] / [`store_saved_searches`], which read and write
//! a YAML file.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::params::SearchParams;
use crate::ConfigError;

const SAVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    /// Derived from the parameters; see [`SearchParams::saved_name`].
    pub name: String,
    pub params: SearchParams,
    /// Local time the search was saved, formatted `YYYY-MM-DD HH:MM`.
    pub saved_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// A saved search with the same name already exists; nothing changed.
    Duplicate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    saved: Vec<SavedSearch>,
    pending_override: Option<SearchParams>,
}

impl SessionState {
    #[must_use]
    pub fn with_saved(saved: Vec<SavedSearch>) -> Self {
        Self {
            saved,
            pending_override: None,
        }
    }

    #[must_use]
    pub fn saved(&self) -> &[SavedSearch] {
        &self.saved
    }

    #[must_use]
    pub fn pending_override(&self) -> Option<&SearchParams> {
        self.pending_override.as_ref()
    }

    /// Saves `params` under its derived name unless that name is taken.
    #[must_use]
    pub fn save(mut self, params: SearchParams, now: NaiveDateTime) -> (Self, SaveOutcome) {
        let name = params.saved_name();
        if self.saved.iter().any(|s| s.name == name) {
            return (self, SaveOutcome::Duplicate);
        }
        self.saved.push(SavedSearch {
            name,
            params,
            saved_at: now.format(SAVED_AT_FORMAT).to_string(),
        });
        (self, SaveOutcome::Saved)
    }

    /// Queues the saved search at `index` as the override for the next search.
    /// An out-of-range index leaves the state unchanged.
    #[must_use]
    pub fn load(mut self, index: usize) -> Self {
        if let Some(search) = self.saved.get(index) {
            self.pending_override = Some(search.params.clone());
        }
        self
    }

    /// Removes the saved search at `index`. An out-of-range index leaves the
    /// state unchanged.
    #[must_use]
    pub fn delete(mut self, index: usize) -> Self {
        if index < self.saved.len() {
            self.saved.remove(index);
        }
        self
    }

    /// Hands out the pending override, clearing it so it applies exactly once.
    #[must_use]
    pub fn take_override(mut self) -> (Self, Option<SearchParams>) {
        let taken = self.pending_override.take();
        (self, taken)
    }

    #[must_use]
    pub fn into_saved(self) -> Vec<SavedSearch> {
        self.saved
    }
}

#[derive(Debug, Default, Deserialize)]
struct SavedSearchFile {
    #[serde(default)]
    saved_searches: Vec<SavedSearch>,
}

#[derive(Serialize)]
struct SavedSearchFileRef<'a> {
    saved_searches: &'a [SavedSearch],
}

/// Loads saved searches from a YAML file. A missing or empty file yields an
/// empty list.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains
/// duplicate names.
pub fn load_saved_searches(path: &Path) -> Result<Vec<SavedSearch>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(ConfigError::SavedSearchIo {
                path: path.display().to_string(),
                source: e,
            })
        }
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let file: SavedSearchFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SavedSearchParse)?;

    let mut seen = HashSet::new();
    for search in &file.saved_searches {
        if !seen.insert(search.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate saved search name '{}'",
                search.name
            )));
        }
    }

    Ok(file.saved_searches)
}

/// Writes saved searches to a YAML file, creating parent directories.
///
/// # Errors
///
/// Returns `ConfigError` if serialization or the write fails.
pub fn store_saved_searches(path: &Path, saved: &[SavedSearch]) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::SavedSearchIo {
        path: path.display().to_string(),
        source,
    };

    let yaml = serde_yaml::to_string(&SavedSearchFileRef {
        saved_searches: saved,
    })
    .map_err(ConfigError::SavedSearchWrite)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, yaml).map_err(io_err)
}
