//! CSV export of a result set.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use csv::Writer;
use flipcalc_core::money::to_cents;
use flipcalc_core::NormalizedListing;
use rust_decimal::Decimal;

const HEADER: [&str; 17] = [
    "item_id",
    "listing",
    "condition",
    "price",
    "buyer_shipping",
    "total_cost",
    "payout",
    "total_expenses",
    "acquisition_cost",
    "net_profit",
    "profit_margin",
    "listing_type",
    "seller",
    "seller_rating",
    "seller_feedback",
    "seller_feedback_score",
    "link",
];

/// `{export_dir}/ebay_search_YYYYMMDD_HHMM.csv`
pub(crate) fn default_export_path(export_dir: &Path, now: NaiveDateTime) -> PathBuf {
    export_dir.join(format!("ebay_search_{}.csv", now.format("%Y%m%d_%H%M")))
}

/// Writes listings to a CSV file at `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row fails to write.
pub(crate) fn write_csv(path: &Path, listings: &[NormalizedListing]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    write_listings(file, listings)
        .with_context(|| format!("failed to write CSV file {}", path.display()))
}

/// Rounds to cents and always renders two decimal places.
fn two_places(value: Decimal) -> String {
    let mut rounded = to_cents(value);
    rounded.rescale(2);
    rounded.to_string()
}

fn write_listings<W: Write>(out: W, listings: &[NormalizedListing]) -> anyhow::Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for listing in listings {
        writer.write_record(&[
            listing.item_id.clone(),
            listing.title.clone(),
            listing.condition.clone(),
            two_places(listing.price),
            two_places(listing.buyer_shipping),
            two_places(listing.total_cost()),
            two_places(listing.estimate.payout),
            two_places(listing.estimate.total_expenses),
            two_places(listing.estimate.acquisition_cost),
            two_places(listing.estimate.net_profit),
            two_places(listing.estimate.margin_percent),
            listing.listing_type(),
            listing.seller.clone(),
            listing.seller_tier.label().to_string(),
            listing
                .seller_feedback_percent
                .map(|p| p.to_string())
                .unwrap_or_default(),
            listing
                .seller_feedback_score
                .map(|s| s.to_string())
                .unwrap_or_default(),
            listing.link.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
