//! Ordering, de-duplication and summary statistics over a result set.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::listing::NormalizedListing;

/// Summary statistics over a non-empty result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub count: usize,
    pub average_price: Decimal,
    pub median_price: Decimal,
    pub median_payout: Decimal,
    pub median_acquisition_cost: Decimal,
    pub median_net_profit: Decimal,
}

#[derive(Debug, Clone)]
pub struct AggregatedResults {
    /// Listings sorted ascending by price.
    pub listings: Vec<NormalizedListing>,
    /// `None` when there are no listings.
    pub summary: Option<ResultSummary>,
}

/// Drops listings whose item id was already seen, keeping the first
/// occurrence. Listings without an id are always kept.
#[must_use]
pub fn dedupe_listings(listings: Vec<NormalizedListing>) -> Vec<NormalizedListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|l| l.item_id.is_empty() || seen.insert(l.item_id.clone()))
        .collect()
}

/// Sorts ascending by price. The sort is stable, so equal prices keep fetch order.
pub fn sort_by_price(listings: &mut [NormalizedListing]) {
    listings.sort_by(|a, b| a.price.cmp(&b.price));
}

/// Computes summary statistics, or `None` for an empty set.
#[must_use]
pub fn summarize(listings: &[NormalizedListing]) -> Option<ResultSummary> {
    if listings.is_empty() {
        return None;
    }

    let prices: Vec<Decimal> = listings.iter().map(|l| l.price).collect();
    let average_price = mean(&prices)?;

    Some(ResultSummary {
        count: listings.len(),
        average_price,
        median_price: median(prices)?,
        median_payout: median(listings.iter().map(|l| l.estimate.payout).collect())?,
        median_acquisition_cost: median(
            listings
                .iter()
                .map(|l| l.estimate.acquisition_cost)
                .collect(),
        )?,
        median_net_profit: median(listings.iter().map(|l| l.estimate.net_profit).collect())?,
    })
}

/// De-duplicates, sorts and summarizes a batch of listings.
#[must_use]
pub fn aggregate(listings: Vec<NormalizedListing>) -> AggregatedResults {
    let mut listings = dedupe_listings(listings);
    sort_by_price(&mut listings);
    let summary = summarize(&listings);
    AggregatedResults { listings, summary }
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    let total = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    total.checked_div(Decimal::from(values.len()))
}

/// Median; the mean of the two middle values for even-length input.
fn median(mut values: Vec<Decimal>) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        values[mid - 1]
            .checked_add(values[mid])?
            .checked_div(Decimal::TWO)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::profit::ProfitEstimate;
    use crate::seller::SellerTier;

    fn listing(item_id: &str, price: Decimal, net_profit: Decimal) -> NormalizedListing {
        NormalizedListing {
            item_id: item_id.to_string(),
            title: format!("item {item_id}"),
            condition: "Good".to_string(),
            price,
            buyer_shipping: Decimal::ZERO,
            estimate: ProfitEstimate {
                net_profit,
                margin_percent: Decimal::ZERO,
                total_expenses: Decimal::ZERO,
                payout: net_profit + dec!(2),
                acquisition_cost: dec!(2),
            },
            buying_options: vec!["FIXED_PRICE".to_string()],
            seller: "seller".to_string(),
            seller_tier: SellerTier::Good,
            seller_feedback_percent: Some(99.0),
            seller_feedback_score: Some(120),
            link: format!("https://example.test/{item_id}"),
        }
    }

    #[test]
    fn empty_input_has_no_summary() {
        let results = aggregate(Vec::new());
        assert!(results.listings.is_empty());
        assert!(results.summary.is_none());
    }

    #[test]
    fn sorts_ascending_and_keeps_fetch_order_for_ties() {
        let results = aggregate(vec![
            listing("a", dec!(9.99), dec!(1)),
            listing("b", dec!(4.50), dec!(1)),
            listing("c", dec!(9.99), dec!(1)),
            listing("d", dec!(4.50), dec!(1)),
        ]);
        let ids: Vec<&str> = results.listings.iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "a", "c"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let results = aggregate(vec![
            listing("a", dec!(10), dec!(1)),
            listing("a", dec!(1), dec!(1)),
            listing("", dec!(3), dec!(1)),
            listing("", dec!(3), dec!(1)),
        ]);
        assert_eq!(results.listings.len(), 3);
        assert!(results
            .listings
            .iter()
            .any(|l| l.item_id == "a" && l.price == dec!(10)));
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        let summary = summarize(&[
            listing("a", dec!(5), dec!(-1)),
            listing("b", dec!(20), dec!(8)),
            listing("c", dec!(10), dec!(3)),
        ])
        .unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.median_price, dec!(10));
        assert_eq!(summary.median_net_profit, dec!(3));
        assert_eq!(summary.median_payout, dec!(5));
        assert_eq!(summary.median_acquisition_cost, dec!(2));
        assert_eq!(summary.average_price, dec!(35) / dec!(3));
    }

    #[test]
    fn even_count_median_averages_middle_pair() {
        let summary = summarize(&[
            listing("a", dec!(4), dec!(1)),
            listing("b", dec!(8), dec!(2)),
            listing("c", dec!(6), dec!(4)),
            listing("d", dec!(100), dec!(10)),
        ])
        .unwrap();
        assert_eq!(summary.median_price, dec!(7));
        assert_eq!(summary.median_net_profit, dec!(3));
        assert_eq!(summary.average_price, dec!(29.5));
    }
}
