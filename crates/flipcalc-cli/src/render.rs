//! Terminal output for search results.

use flipcalc_core::money::to_cents;
use flipcalc_core::{AggregatedResults, NormalizedListing, ResultSummary};
use flipcalc_ebay::NormalizeReport;
use rust_decimal::Decimal;

const TITLE_WIDTH: usize = 50;

/// Formats an amount as dollars and cents, e.g. `$14.75` or `-$0.40`.
pub(crate) fn money(value: Decimal) -> String {
    let mut cents = to_cents(value);
    cents.rescale(2);
    if cents < Decimal::ZERO {
        format!("-${}", cents.abs())
    } else {
        format!("${}", cents.abs())
    }
}

pub(crate) fn percent(value: Decimal) -> String {
    let mut rounded = to_cents(value);
    rounded.rescale(2);
    format!("{rounded}%")
}

/// Prints the analytics header, the results table, and the listing count.
pub(crate) fn print_results(results: &AggregatedResults) {
    let Some(summary) = &results.summary else {
        println!("no listings found matching your criteria; try adjusting the search parameters");
        return;
    };

    for line in summary_lines(summary) {
        println!("{line}");
    }
    println!();
    println!("{}", table_header());
    for listing in &results.listings {
        println!("{}", table_row(listing));
    }
    println!();
    println!("found {} listings", results.listings.len());
}

/// Prints how many fetched items were filtered out, if any.
pub(crate) fn print_skip_report(report: &NormalizeReport) {
    if let Some(line) = skip_report(report) {
        eprintln!("{line}");
    }
}

fn summary_lines(summary: &ResultSummary) -> Vec<String> {
    vec![
        "PRICE ANALYTICS".to_string(),
        format!("  {:<26}{}", "Listings:", summary.count),
        format!("  {:<26}{}", "Average price:", money(summary.average_price)),
        format!("  {:<26}{}", "Median price:", money(summary.median_price)),
        format!("  {:<26}{}", "Median payout:", money(summary.median_payout)),
        format!(
            "  {:<26}{}",
            "Median acquisition cost:",
            money(summary.median_acquisition_cost)
        ),
        format!("  {:<26}{}", "Median net profit:", money(summary.median_net_profit)),
    ]
}

fn table_header() -> String {
    format!(
        "{:<10}{:<9}{:<10}{:<10}{:<10}{:<15}{:<15}TITLE",
        "PRICE", "SHIP", "PAYOUT", "NET", "MARGIN", "SELLER", "CONDITION"
    )
}

fn table_row(listing: &NormalizedListing) -> String {
    format!(
        "{:<10}{:<9}{:<10}{:<10}{:<10}{:<15}{:<15}{}",
        money(listing.price),
        money(listing.buyer_shipping),
        money(listing.estimate.payout),
        money(listing.estimate.net_profit),
        percent(listing.estimate.margin_percent),
        listing.seller_tier.label(),
        truncate(&listing.condition, 11),
        truncate(&listing.title, TITLE_WIDTH)
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}

fn skip_report(report: &NormalizeReport) -> Option<String> {
    let skipped = report.skipped();
    if skipped == 0 {
        return None;
    }
    Some(format!(
        "skipped {skipped} items: {} for parts, {} over max price, {} excluded by title, {} malformed",
        report.skipped_for_parts,
        report.skipped_over_budget,
        report.skipped_excluded,
        report.malformed
    ))
}
