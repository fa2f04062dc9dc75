use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use flipcalc_core::{aggregate, AppConfig, SearchParams, SessionState};
use flipcalc_ebay::EbayClient;

use crate::{export, render};

/// Picks the parameters for this search: a pending override from a loaded
/// saved search wins over the command-line parameters, and is consumed.
pub(crate) fn resolve_params(
    state: SessionState,
    from_args: SearchParams,
) -> (SessionState, SearchParams) {
    let (state, pending) = state.take_override();
    (state, pending.unwrap_or(from_args))
}

/// Search the marketplace, print the analytics and results table, and
/// optionally export the results as CSV.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the token exchange or
/// search fails, or the export cannot be written. Nothing is printed to
/// stdout when the search itself fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    state: SessionState,
    from_args: SearchParams,
    export_to: Option<Option<PathBuf>>,
) -> anyhow::Result<()> {
    let (_state, params) = resolve_params(state, from_args);
    params.validate().context("invalid search parameters")?;

    let client = EbayClient::from_config(config).context("failed to build marketplace client")?;
    let report = client
        .search_listings(&params, &config.fees)
        .await
        .with_context(|| format!("search for '{}' failed", params.search_term))?;

    render::print_skip_report(&report);
    let results = aggregate(report.listings);
    render::print_results(&results);

    if let Some(path) = export_to {
        if results.listings.is_empty() {
            eprintln!("nothing to export");
            return Ok(());
        }
        let path = path.unwrap_or_else(|| {
            export::default_export_path(&config.export_dir, Local::now().naive_local())
        });
        export::write_csv(&path, &results.listings)?;
        println!("exported {} listings to {}", results.listings.len(), path.display());
    }

    Ok(())
}
