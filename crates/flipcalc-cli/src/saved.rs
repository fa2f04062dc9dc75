//! Saved-search command handlers.
//!
//! The saved list lives in a YAML file between runs. Every handler reads the
//! file into a [`SessionState`], applies one operation, and writes the list
//! back only when it changed. Users address entries by their 1-based number
//! from `saved list`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::Subcommand;
use flipcalc_core::{
    load_saved_searches, store_saved_searches, SaveOutcome, SearchParams, SessionState,
};

use crate::args::SearchArgs;

#[derive(Debug, Subcommand)]
pub enum SavedCommands {
    /// List saved searches
    List,
    /// Save a search for later
    Add(SearchArgs),
    /// Delete a saved search by its number
    Delete {
        /// Number shown by `saved list`
        number: usize,
    },
    /// Run a saved search
    Run {
        /// Number shown by `saved list`
        number: usize,
        /// Write results as CSV; defaults to a timestamped file in the export dir
        #[arg(long, num_args = 0..=1, value_name = "PATH")]
        export: Option<Option<PathBuf>>,
    },
}

pub(crate) fn load_state(path: &Path) -> anyhow::Result<SessionState> {
    let saved = load_saved_searches(path)
        .with_context(|| format!("failed to load saved searches from {}", path.display()))?;
    Ok(SessionState::with_saved(saved))
}

fn store_state(path: &Path, state: SessionState) -> anyhow::Result<()> {
    store_saved_searches(path, &state.into_saved())
        .with_context(|| format!("failed to write saved searches to {}", path.display()))
}

fn to_index(number: usize, state: &SessionState) -> anyhow::Result<usize> {
    match number.checked_sub(1) {
        Some(index) if index < state.saved().len() => Ok(index),
        _ => anyhow::bail!(
            "no saved search #{number}; {} saved, see `saved list`",
            state.saved().len()
        ),
    }
}

/// Print the saved searches with their numbers.
pub(crate) fn run_saved_list(path: &Path) -> anyhow::Result<()> {
    let state = load_state(path)?;
    if state.saved().is_empty() {
        println!("no saved searches; add one with `saved add`");
        return Ok(());
    }

    println!("{:<5}{:<18}NAME", "#", "SAVED AT");
    for (i, search) in state.saved().iter().enumerate() {
        println!("{:<5}{:<18}{}", i + 1, search.saved_at, search.name);
    }
    Ok(())
}

/// Validate and save `params`. Saving a name that already exists is a no-op.
pub(crate) fn run_saved_add(path: &Path, params: SearchParams) -> anyhow::Result<()> {
    let name = params.saved_name();
    match add_saved(path, params, Local::now().naive_local())? {
        SaveOutcome::Saved => println!("saved search: {name}"),
        SaveOutcome::Duplicate => println!("search already saved: {name}"),
    }
    Ok(())
}

fn add_saved(
    path: &Path,
    params: SearchParams,
    now: NaiveDateTime,
) -> anyhow::Result<SaveOutcome> {
    params.validate().context("invalid search parameters")?;

    let (state, outcome) = load_state(path)?.save(params, now);
    if outcome == SaveOutcome::Saved {
        store_state(path, state)?;
    }
    Ok(outcome)
}

pub(crate) fn run_saved_delete(path: &Path, number: usize) -> anyhow::Result<()> {
    let name = delete_saved(path, number)?;
    println!("deleted saved search: {name}");
    Ok(())
}

fn delete_saved(path: &Path, number: usize) -> anyhow::Result<String> {
    let state = load_state(path)?;
    let index = to_index(number, &state)?;
    let name = state.saved()[index].name.clone();
    store_state(path, state.delete(index))?;
    Ok(name)
}

/// Load the saved list with entry `number` queued as the one-shot override
/// for the next search. The override is never written back.
pub(crate) fn load_for_run(path: &Path, number: usize) -> anyhow::Result<SessionState> {
    let state = load_state(path)?;
    let index = to_index(number, &state)?;
    tracing::info!(name = %state.saved()[index].name, "running saved search");
    Ok(state.load(index))
}
