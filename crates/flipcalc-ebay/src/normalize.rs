//! Filtering and normalization of raw item summaries into
//! [`flipcalc_core::NormalizedListing`]s.
//!
//! Each item is handled on its own: a record that cannot be parsed is counted
//! and skipped, and the rest of the batch carries on.

use flipcalc_core::money::parse_amount;
use flipcalc_core::seller::parse_feedback_percent;
use flipcalc_core::{
    classify_seller, estimate_with_basis, FeeSchedule, NormalizedListing, SearchParams,
};
use rust_decimal::Decimal;

use crate::types::{Amount, ItemSummary};

/// Condition code for "for parts or not working".
pub const FOR_PARTS_CONDITION_ID: &str = "7000";

const EXPECTED_CURRENCY: &str = "USD";

/// Why an item did not make it into the normalized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ForParts,
    /// Price plus shipping exceeds the user's ceiling.
    OverBudget { total: Decimal, max: Decimal },
    /// Title contains one of the category's exclusion phrases.
    ExcludedPhrase(&'static str),
    Malformed(String),
}

/// Result of normalizing one page of search results.
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    /// Accepted listings, in fetch order.
    pub listings: Vec<NormalizedListing>,
    pub skipped_for_parts: usize,
    pub skipped_over_budget: usize,
    pub skipped_excluded: usize,
    pub malformed: usize,
}

impl NormalizeReport {
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped_for_parts + self.skipped_over_budget + self.skipped_excluded + self.malformed
    }

    fn record_skip(&mut self, item_id: &str, reason: &SkipReason) {
        match reason {
            SkipReason::ForParts => self.skipped_for_parts += 1,
            SkipReason::OverBudget { total, max } => {
                tracing::debug!(item_id, %total, %max, "skipping item over max price");
                self.skipped_over_budget += 1;
            }
            SkipReason::ExcludedPhrase(phrase) => {
                tracing::debug!(item_id, phrase, "skipping item with excluded phrase");
                self.skipped_excluded += 1;
            }
            SkipReason::Malformed(why) => {
                tracing::warn!(item_id, reason = %why, "skipping malformed item");
                self.malformed += 1;
            }
        }
    }
}

/// Normalizes a page of raw item summaries.
#[must_use]
pub fn normalize_listings(
    raw_items: Vec<serde_json::Value>,
    params: &SearchParams,
    fees: &FeeSchedule,
) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for (idx, raw) in raw_items.into_iter().enumerate() {
        let item = match serde_json::from_value::<ItemSummary>(raw) {
            Ok(item) => item,
            Err(e) => {
                report.record_skip(&format!("#{idx}"), &SkipReason::Malformed(e.to_string()));
                continue;
            }
        };
        let item_id = item.item_id.clone().unwrap_or_else(|| format!("#{idx}"));

        match normalize_item(item, params, fees) {
            Ok(listing) => report.listings.push(listing),
            Err(reason) => report.record_skip(&item_id, &reason),
        }
    }

    if report.skipped() > 0 {
        tracing::info!(
            accepted = report.listings.len(),
            for_parts = report.skipped_for_parts,
            over_budget = report.skipped_over_budget,
            excluded = report.skipped_excluded,
            malformed = report.malformed,
            "filtered search results"
        );
    }
    report
}

/// Filters one item and, if it passes, attaches its profit estimate and
/// seller tier.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the item is filtered out or malformed.
pub fn normalize_item(
    item: ItemSummary,
    params: &SearchParams,
    fees: &FeeSchedule,
) -> Result<NormalizedListing, SkipReason> {
    if item.condition_id.as_deref() == Some(FOR_PARTS_CONDITION_ID) {
        return Err(SkipReason::ForParts);
    }

    let price = match &item.price {
        Some(amount) => parse_usd(amount, "price")?,
        None => return Err(SkipReason::Malformed("missing price".to_string())),
    };
    // Only the first shipping option is considered; none means free or pickup.
    let shipping_cost = item
        .shipping_options
        .first()
        .and_then(|o| o.shipping_cost.as_ref());
    let buyer_shipping = match shipping_cost {
        Some(amount) => parse_usd(amount, "shipping cost")?,
        None => Decimal::ZERO,
    };

    let total = price
        .checked_add(buyer_shipping)
        .ok_or_else(|| SkipReason::Malformed("price plus shipping overflows".to_string()))?;
    if total > params.max_price {
        return Err(SkipReason::OverBudget {
            total,
            max: params.max_price,
        });
    }

    let title = item.title.unwrap_or_default();
    if let Some(phrase) = params.category.excluded_phrase_in(&title) {
        return Err(SkipReason::ExcludedPhrase(phrase));
    }

    let estimate = estimate_with_basis(
        &params.estimate_inputs(price, buyer_shipping),
        &params.cost_basis,
        fees,
    );

    let seller = item.seller;
    let seller_feedback_score = seller.as_ref().and_then(|s| s.feedback_score);
    let seller_feedback_percent = seller
        .as_ref()
        .and_then(|s| s.feedback_percentage.as_deref())
        .and_then(parse_feedback_percent);
    let seller_tier = classify_seller(seller_feedback_score, seller_feedback_percent);
    let seller_name = seller
        .and_then(|s| s.username)
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(NormalizedListing {
        item_id: item.item_id.unwrap_or_default(),
        title,
        condition: item.condition.unwrap_or_else(|| "Unknown".to_string()),
        price,
        buyer_shipping,
        estimate,
        buying_options: item.buying_options,
        seller: seller_name,
        seller_tier,
        seller_feedback_percent,
        seller_feedback_score,
        link: item.item_web_url.unwrap_or_default(),
    })
}

fn parse_usd(amount: &Amount, field: &str) -> Result<Decimal, SkipReason> {
    if let Some(currency) = amount.currency.as_deref() {
        if currency != EXPECTED_CURRENCY {
            return Err(SkipReason::Malformed(format!(
                "{field} in unexpected currency {currency}"
            )));
        }
    }
    match parse_amount(&amount.value) {
        Some(value) if value >= Decimal::ZERO => Ok(value),
        _ => Err(SkipReason::Malformed(format!(
            "unparseable {field} '{}'",
            amount.value
        ))),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
