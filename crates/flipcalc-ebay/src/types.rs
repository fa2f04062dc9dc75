//! Browse API response types.
//!
//! Only the fields the normalizer reads are modelled. Every field is optional
//! or defaulted: item summaries in the wild omit `shippingOptions` for local
//! pickup, omit `seller.feedbackPercentage` for brand-new accounts, and send
//! amounts as decimal strings (`"12.99"`), never as JSON numbers.

use serde::Deserialize;

/// Response from the client-credentials token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Lifetime in seconds; the marketplace issues 7200 today.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Top-level response from `GET /buy/browse/v1/item_summary/search`.
///
/// Item summaries are kept as raw JSON so that one malformed record can be
/// skipped without failing the whole page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub item_summaries: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Amount>,
    #[serde(default)]
    pub shipping_options: Vec<ShippingOption>,
    /// Display label, e.g. `"Very Good"`.
    #[serde(default)]
    pub condition: Option<String>,
    /// Numeric condition code as a string; `"7000"` is "for parts or not working".
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub buying_options: Vec<String>,
    #[serde(default)]
    pub seller: Option<Seller>,
    #[serde(default)]
    pub item_web_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Amount {
    pub value: String,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    #[serde(default)]
    pub shipping_cost: Option<Amount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub feedback_score: Option<i64>,
    /// Positive feedback percentage as a decimal string, e.g. `"99.8"`.
    #[serde(default)]
    pub feedback_percentage: Option<String>,
}
