//! Marketplace fee schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Which final-value fee rate a category is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    Standard,
    Preferred,
}

/// Fee and tax constants applied to every sale.
///
/// Rates are fractions (`0.153` is 15.3 %). The flat fee is charged once per
/// transaction on top of the percentage fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub default_rate: Decimal,
    pub preferred_rate: Decimal,
    pub flat_fee: Decimal,
    pub sales_tax_rate: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            default_rate: dec!(0.153),
            preferred_rate: dec!(0.136),
            flat_fee: dec!(0.40),
            sales_tax_rate: dec!(0.0825),
        }
    }
}

impl FeeSchedule {
    /// Final-value fee rate for `category`.
    #[must_use]
    pub fn rate_for(&self, category: Category) -> Decimal {
        match category.fee_tier() {
            FeeTier::Standard => self.default_rate,
            FeeTier::Preferred => self.preferred_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_categories_get_preferred_rate() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.rate_for(Category::Headphones), dec!(0.136));
        assert_eq!(fees.rate_for(Category::VideoGames), dec!(0.136));
    }

    #[test]
    fn other_categories_get_default_rate() {
        let fees = FeeSchedule::default();
        for category in [
            Category::All,
            Category::Books,
            Category::DvdBluRay,
            Category::MusicCds,
            Category::MusicCassettes,
        ] {
            assert_eq!(fees.rate_for(category), dec!(0.153), "{category}");
        }
    }
}
