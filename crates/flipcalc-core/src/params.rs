//! User-supplied search and cost parameters.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;
use crate::profit::EstimateInputs;

pub const MIN_MAX_PRICE: Decimal = Decimal::ONE;
pub const MAX_MAX_PRICE: Decimal = dec!(10000);
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("search term must not be empty")]
    EmptySearchTerm,

    #[error("unknown category \"{0}\"")]
    UnknownCategory(String),

    #[error("max price {0} must be between 1 and 10000")]
    MaxPriceOutOfRange(Decimal),

    #[error("limit {0} must be between 1 and 100")]
    LimitOutOfRange(u32),

    #[error("{field} {value} must be between 0 and 100")]
    PercentOutOfRange { field: &'static str, value: Decimal },

    #[error("{field} {value} must not be negative")]
    NegativeAmount { field: &'static str, value: Decimal },
}

/// How the acquisition cost of each listing is determined. The two modes are
/// mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum CostBasis {
    /// A fixed cost of goods sold applied to every listing.
    Cogs(Decimal),
    /// A desired profit margin in percent; the acquisition cost is solved per listing.
    TargetMargin(Decimal),
}

impl Default for CostBasis {
    fn default() -> Self {
        CostBasis::Cogs(dec!(2))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub search_term: String,
    pub category: Category,
    /// Ceiling on price plus buyer shipping.
    pub max_price: Decimal,
    pub cost_basis: CostBasis,
    /// What the reseller pays to ship the item on.
    pub shipping_cost: Decimal,
    pub ad_rate_percent: Decimal,
    pub limit: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: Category::All,
            max_price: dec!(150),
            cost_basis: CostBasis::default(),
            shipping_cost: dec!(4.47),
            ad_rate_percent: dec!(3.0),
            limit: 25,
        }
    }
}

impl SearchParams {
    /// Checks the parameters before a search is sent.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParamsError`] found.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.search_term.trim().is_empty() {
            return Err(ParamsError::EmptySearchTerm);
        }
        if self.max_price < MIN_MAX_PRICE || self.max_price > MAX_MAX_PRICE {
            return Err(ParamsError::MaxPriceOutOfRange(self.max_price));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ParamsError::LimitOutOfRange(self.limit));
        }
        check_non_negative("shipping cost", self.shipping_cost)?;
        check_percent("ad rate", self.ad_rate_percent)?;
        match self.cost_basis {
            CostBasis::Cogs(cogs) => check_non_negative("cogs", cogs),
            CostBasis::TargetMargin(margin) => check_percent("target margin", margin),
        }
    }

    /// Display name used to identify a saved search, e.g.
    /// `"zelda in Video Games & Consoles ($40)"`.
    #[must_use]
    pub fn saved_name(&self) -> String {
        format!(
            "{} in {} (${})",
            self.search_term,
            self.category.label(),
            self.max_price.normalize()
        )
    }

    /// Builds calculator inputs for a listing at `price` with `buyer_shipping`.
    #[must_use]
    pub fn estimate_inputs(&self, price: Decimal, buyer_shipping: Decimal) -> EstimateInputs {
        EstimateInputs {
            price: Some(price),
            buyer_shipping: Some(buyer_shipping),
            seller_shipping_cost: Some(self.shipping_cost),
            ad_rate_percent: Some(self.ad_rate_percent),
            category: self.category,
        }
    }
}

/// # Errors
///
/// Returns [`ParamsError::NegativeAmount`] when `value` is below zero.
pub fn check_non_negative(field: &'static str, value: Decimal) -> Result<(), ParamsError> {
    if value < Decimal::ZERO {
        return Err(ParamsError::NegativeAmount { field, value });
    }
    Ok(())
}

/// # Errors
///
/// Returns [`ParamsError::PercentOutOfRange`] unless `value` is within 0..=100.
pub fn check_percent(field: &'static str, value: Decimal) -> Result<(), ParamsError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ParamsError::PercentOutOfRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(term: &str) -> SearchParams {
        SearchParams {
            search_term: term.to_string(),
            ..SearchParams::default()
        }
    }

    #[test]
    fn defaults_validate_once_term_is_set() {
        assert_eq!(params("zelda").validate(), Ok(()));
    }

    #[test]
    fn blank_term_is_rejected() {
        assert_eq!(params("   ").validate(), Err(ParamsError::EmptySearchTerm));
    }

    #[test]
    fn max_price_bounds() {
        let mut p = params("zelda");
        p.max_price = dec!(0.5);
        assert_eq!(p.validate(), Err(ParamsError::MaxPriceOutOfRange(dec!(0.5))));
        p.max_price = dec!(10001);
        assert_eq!(p.validate(), Err(ParamsError::MaxPriceOutOfRange(dec!(10001))));
        p.max_price = dec!(10000);
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn limit_bounds() {
        let mut p = params("zelda");
        p.limit = 0;
        assert_eq!(p.validate(), Err(ParamsError::LimitOutOfRange(0)));
        p.limit = 101;
        assert_eq!(p.validate(), Err(ParamsError::LimitOutOfRange(101)));
        p.limit = 100;
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn target_margin_over_100_is_rejected() {
        let mut p = params("zelda");
        p.cost_basis = CostBasis::TargetMargin(dec!(120));
        assert!(matches!(
            p.validate(),
            Err(ParamsError::PercentOutOfRange { field: "target margin", .. })
        ));
    }

    #[test]
    fn negative_cogs_is_rejected() {
        let mut p = params("zelda");
        p.cost_basis = CostBasis::Cogs(dec!(-1));
        assert!(matches!(
            p.validate(),
            Err(ParamsError::NegativeAmount { field: "cogs", .. })
        ));
    }

    #[test]
    fn saved_name_uses_label_and_plain_price() {
        let p = SearchParams {
            search_term: "zelda".to_string(),
            category: Category::VideoGames,
            max_price: dec!(40.00),
            ..SearchParams::default()
        };
        assert_eq!(p.saved_name(), "zelda in Video Games & Consoles ($40)");
    }

    #[test]
    fn cost_basis_serializes_as_tagged_variant() {
        let yaml = serde_yaml::to_string(&CostBasis::TargetMargin(dec!(25))).unwrap();
        assert!(yaml.contains("mode: target_margin"), "{yaml}");
        let back: CostBasis = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, CostBasis::TargetMargin(dec!(25)));
    }
}
