//! Fee and profit estimation for a single listing.
//!
//! Both [`estimate_profit`] and [`solve_target_cost`] are pure and total: any
//! input they cannot make sense of is coerced to zero, and an arithmetic
//! overflow yields [`ProfitEstimate::ZERO`] (or a zero cost) instead of an
//! error. The formulas are:
//!
//! ```text
//! sold_price        = price + seller_shipping
//! taxed_sold_price  = sold_price * (1 + tax_rate)
//! marketplace_fee   = taxed_sold_price * fee_rate + flat_fee
//! ad_fee            = ad_rate% * taxed_sold_price
//! total_expenses    = marketplace_fee + ad_fee + seller_shipping
//! payout            = sold_price - total_expenses
//! net_profit        = payout - acquisition_cost
//! margin%           = net_profit / price * 100     (0 when price is 0)
//! ```

use rust_decimal::Decimal;

use crate::category::Category;
use crate::fees::FeeSchedule;
use crate::money::coerce_amount;
use crate::params::CostBasis;

/// Numeric inputs for one estimate.
///
/// Amounts are optional so the boundary can hand over whatever it managed to
/// parse; `None` and negative values count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EstimateInputs {
    /// Listing price, excluding shipping.
    pub price: Option<Decimal>,
    /// Shipping the buyer pays on the listing. Informational only; it does not
    /// enter the payout formula.
    pub buyer_shipping: Option<Decimal>,
    /// Shipping the reseller expects to pay when re-selling the item.
    pub seller_shipping_cost: Option<Decimal>,
    /// Promoted-listing rate in percent (`3` means 3 %).
    pub ad_rate_percent: Option<Decimal>,
    pub category: Category,
}

/// Derived financial metrics for one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitEstimate {
    pub net_profit: Decimal,
    pub margin_percent: Decimal,
    pub total_expenses: Decimal,
    pub payout: Decimal,
    /// The acquisition cost the estimate was computed with: the user's COGS or
    /// the solved target cost.
    pub acquisition_cost: Decimal,
}

impl ProfitEstimate {
    pub const ZERO: Self = Self {
        net_profit: Decimal::ZERO,
        margin_percent: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        payout: Decimal::ZERO,
        acquisition_cost: Decimal::ZERO,
    };
}

struct Payout {
    total_expenses: Decimal,
    payout: Decimal,
}

fn compute_payout(
    price: Decimal,
    seller_shipping: Decimal,
    ad_rate_percent: Decimal,
    fee_rate: Decimal,
    fees: &FeeSchedule,
) -> Option<Payout> {
    let sold_price = price.checked_add(seller_shipping)?;
    let tax_multiplier = Decimal::ONE.checked_add(fees.sales_tax_rate)?;
    let taxed_sold_price = sold_price.checked_mul(tax_multiplier)?;
    let marketplace_fee = taxed_sold_price
        .checked_mul(fee_rate)?
        .checked_add(fees.flat_fee)?;
    let ad_fee = ad_rate_percent
        .checked_div(Decimal::ONE_HUNDRED)?
        .checked_mul(taxed_sold_price)?;
    let total_expenses = marketplace_fee
        .checked_add(ad_fee)?
        .checked_add(seller_shipping)?;
    let payout = sold_price.checked_sub(total_expenses)?;
    Some(Payout {
        total_expenses,
        payout,
    })
}

fn payout_for(inputs: &EstimateInputs, fees: &FeeSchedule) -> Option<Payout> {
    compute_payout(
        coerce_amount(inputs.price),
        coerce_amount(inputs.seller_shipping_cost),
        coerce_amount(inputs.ad_rate_percent),
        fees.rate_for(inputs.category),
        fees,
    )
}

/// Estimates payout and profit for reselling a listing bought at
/// `acquisition_cost`.
#[must_use]
pub fn estimate_profit(
    inputs: &EstimateInputs,
    acquisition_cost: Option<Decimal>,
    fees: &FeeSchedule,
) -> ProfitEstimate {
    let price = coerce_amount(inputs.price);
    let acquisition_cost = coerce_amount(acquisition_cost);

    let estimate = payout_for(inputs, fees).and_then(|p| {
        let net_profit = p.payout.checked_sub(acquisition_cost)?;
        let margin_percent = if price > Decimal::ZERO {
            net_profit
                .checked_div(price)?
                .checked_mul(Decimal::ONE_HUNDRED)?
        } else {
            Decimal::ZERO
        };
        Some(ProfitEstimate {
            net_profit,
            margin_percent,
            total_expenses: p.total_expenses,
            payout: p.payout,
            acquisition_cost,
        })
    });

    estimate.unwrap_or_else(|| {
        tracing::warn!(
            ?inputs,
            %acquisition_cost,
            "profit calculation overflowed; using zero estimate"
        );
        ProfitEstimate::ZERO
    })
}

/// Solves for the highest acquisition cost that still yields
/// `target_margin_percent`, floored at zero.
#[must_use]
pub fn solve_target_cost(
    inputs: &EstimateInputs,
    target_margin_percent: Option<Decimal>,
    fees: &FeeSchedule,
) -> Decimal {
    let price = coerce_amount(inputs.price);
    let target = coerce_amount(target_margin_percent);

    let cost = payout_for(inputs, fees).and_then(|p| {
        let required_profit = target
            .checked_div(Decimal::ONE_HUNDRED)?
            .checked_mul(price)?;
        p.payout.checked_sub(required_profit)
    });

    match cost {
        Some(c) => c.max(Decimal::ZERO),
        None => {
            tracing::warn!(?inputs, %target, "target cost calculation overflowed; using zero");
            Decimal::ZERO
        }
    }
}

/// Estimates a listing under either cost mode: a fixed COGS, or the cost
/// solved from a target margin.
#[must_use]
pub fn estimate_with_basis(
    inputs: &EstimateInputs,
    basis: &CostBasis,
    fees: &FeeSchedule,
) -> ProfitEstimate {
    let acquisition_cost = match basis {
        CostBasis::Cogs(cogs) => *cogs,
        CostBasis::TargetMargin(margin) => solve_target_cost(inputs, Some(*margin), fees),
    };
    estimate_profit(inputs, Some(acquisition_cost), fees)
}

#[cfg(test)]
#[path = "profit_test.rs"]
mod tests;
