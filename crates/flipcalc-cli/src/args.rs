//! Flags shared by `search`, `saved add`, and `estimate`.

use clap::Args;
use flipcalc_core::{Category, CostBasis, SearchParams};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Search term, matched as an exact phrase
    pub term: String,
    /// Category slug, label, or marketplace id (e.g. video-games, 267)
    #[arg(long, short = 'c', default_value = "all")]
    pub category: Category,
    /// Ceiling on price plus buyer shipping, in USD
    #[arg(long, default_value = "150")]
    pub max_price: Decimal,
    /// Fixed cost of goods per item
    #[arg(long, conflicts_with = "target_margin")]
    pub cogs: Option<Decimal>,
    /// Desired profit margin in percent; solves the acquisition cost per listing
    #[arg(long)]
    pub target_margin: Option<Decimal>,
    /// What you pay to ship the item on
    #[arg(long, default_value = "4.47")]
    pub shipping_cost: Decimal,
    /// Promoted-listing ad rate in percent
    #[arg(long, default_value = "3")]
    pub ad_rate: Decimal,
    /// Maximum number of results to fetch (1-100)
    #[arg(long, default_value = "25")]
    pub limit: u32,
}

impl SearchArgs {
    #[must_use]
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            search_term: self.term.clone(),
            category: self.category,
            max_price: self.max_price,
            cost_basis: cost_basis(self.cogs, self.target_margin),
            shipping_cost: self.shipping_cost,
            ad_rate_percent: self.ad_rate,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    /// Expected sale price, in USD
    #[arg(long)]
    pub price: Decimal,
    #[arg(long, short = 'c', default_value = "all")]
    pub category: Category,
    #[arg(long, conflicts_with = "target_margin")]
    pub cogs: Option<Decimal>,
    #[arg(long)]
    pub target_margin: Option<Decimal>,
    #[arg(long, default_value = "4.47")]
    pub shipping_cost: Decimal,
    #[arg(long, default_value = "3")]
    pub ad_rate: Decimal,
}

impl EstimateArgs {
    #[must_use]
    pub fn cost_basis(&self) -> CostBasis {
        cost_basis(self.cogs, self.target_margin)
    }
}

fn cost_basis(cogs: Option<Decimal>, target_margin: Option<Decimal>) -> CostBasis {
    match (cogs, target_margin) {
        (_, Some(margin)) => CostBasis::TargetMargin(margin),
        (Some(cogs), None) => CostBasis::Cogs(cogs),
        (None, None) => CostBasis::default(),
    }
}
