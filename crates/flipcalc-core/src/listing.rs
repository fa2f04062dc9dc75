use rust_decimal::Decimal;

use crate::profit::ProfitEstimate;
use crate::seller::SellerTier;

/// A marketplace listing that passed filtering, with its profit estimate and
/// seller tier attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListing {
    /// Marketplace item id, e.g. `"v1|115656711010|0"`.
    pub item_id: String,
    pub title: String,
    /// Condition label as the marketplace displays it (e.g. `"Very Good"`).
    pub condition: String,
    pub price: Decimal,
    /// Shipping charged to the buyer on this listing; zero when free or absent.
    pub buyer_shipping: Decimal,
    pub estimate: ProfitEstimate,
    /// Buying-option tags such as `FIXED_PRICE` or `BEST_OFFER`.
    pub buying_options: Vec<String>,
    pub seller: String,
    pub seller_tier: SellerTier,
    pub seller_feedback_percent: Option<f64>,
    pub seller_feedback_score: Option<i64>,
    pub link: String,
}

impl NormalizedListing {
    /// Price plus buyer shipping: what it costs to acquire this listing.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.price.saturating_add(self.buyer_shipping)
    }

    #[must_use]
    pub fn listing_type(&self) -> String {
        self.buying_options.join(", ")
    }
}
