//! Seller quality tiers derived from feedback score and percentage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SellerTier {
    Elite,
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Average,
    Inexperienced,
    #[serde(rename = "Low Rated")]
    LowRated,
    Uncategorized,
}

impl SellerTier {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SellerTier::Elite => "Elite",
            SellerTier::Excellent => "Excellent",
            SellerTier::VeryGood => "Very Good",
            SellerTier::Good => "Good",
            SellerTier::Average => "Average",
            SellerTier::Inexperienced => "Inexperienced",
            SellerTier::LowRated => "Low Rated",
            SellerTier::Uncategorized => "Uncategorized",
        }
    }
}

impl std::fmt::Display for SellerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a seller from their feedback score and positive-feedback
/// percentage.
///
/// Rules are checked in order and the first match wins, so a seller with
/// 6000 ratings at 98.5 % is `Excellent`, not `Elite`. Missing or out-of-range
/// inputs (negative score, percentage outside 0..=100, NaN) are
/// `Uncategorized`.
#[must_use]
pub fn classify_seller(feedback_score: Option<i64>, feedback_percent: Option<f64>) -> SellerTier {
    let (Some(score), Some(percent)) = (feedback_score, feedback_percent) else {
        return SellerTier::Uncategorized;
    };
    if score < 0 || !(0.0..=100.0).contains(&percent) {
        return SellerTier::Uncategorized;
    }

    if score >= 5000 && percent >= 99.0 {
        SellerTier::Elite
    } else if score >= 1000 && percent >= 98.0 {
        SellerTier::Excellent
    } else if score >= 500 && percent >= 97.0 {
        SellerTier::VeryGood
    } else if score >= 100 && percent >= 95.0 {
        SellerTier::Good
    } else if score >= 100 && percent >= 90.0 {
        SellerTier::Average
    } else if score < 100 && percent >= 90.0 {
        SellerTier::Inexperienced
    } else if percent < 90.0 {
        SellerTier::LowRated
    } else {
        SellerTier::Uncategorized
    }
}

/// Parses the marketplace's feedback percentage string (e.g. `"99.7"`).
#[must_use]
pub fn parse_feedback_percent(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
}
