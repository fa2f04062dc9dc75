use flipcalc_core::params::{check_non_negative, check_percent};
use flipcalc_core::{
    estimate_with_basis, AppConfig, CostBasis, EstimateInputs, ParamsError, ProfitEstimate,
};

use crate::args::EstimateArgs;
use crate::render::{money, percent};

/// Runs the calculator for a single sale price and prints the breakdown.
///
/// # Errors
///
/// Returns an error if an amount is negative or a percentage falls outside 0-100.
pub(crate) fn run_estimate(config: &AppConfig, args: &EstimateArgs) -> anyhow::Result<()> {
    validate(args)?;

    let inputs = EstimateInputs {
        price: Some(args.price),
        buyer_shipping: None,
        seller_shipping_cost: Some(args.shipping_cost),
        ad_rate_percent: Some(args.ad_rate),
        category: args.category,
    };
    let basis = args.cost_basis();
    let estimate = estimate_with_basis(&inputs, &basis, &config.fees);

    for line in estimate_lines(args, &basis, &estimate) {
        println!("{line}");
    }
    Ok(())
}

fn validate(args: &EstimateArgs) -> Result<(), ParamsError> {
    check_non_negative("price", args.price)?;
    check_non_negative("shipping cost", args.shipping_cost)?;
    check_percent("ad rate", args.ad_rate)?;
    match args.cost_basis() {
        CostBasis::Cogs(cogs) => check_non_negative("cogs", cogs),
        CostBasis::TargetMargin(margin) => check_percent("target margin", margin),
    }
}

fn estimate_lines(
    args: &EstimateArgs,
    basis: &CostBasis,
    estimate: &ProfitEstimate,
) -> Vec<String> {
    let cost_label = match basis {
        CostBasis::Cogs(_) => "COGS:".to_string(),
        CostBasis::TargetMargin(m) => format!("Max cost @ {}%:", m.normalize()),
    };
    vec![
        format!("{:<20}{}", "Category:", args.category),
        format!("{:<20}{}", "Sale price:", money(args.price)),
        format!("{:<20}{}", "Total expenses:", money(estimate.total_expenses)),
        format!("{:<20}{}", "Payout:", money(estimate.payout)),
        format!("{:<20}{}", cost_label, money(estimate.acquisition_cost)),
        format!("{:<20}{}", "Net profit:", money(estimate.net_profit)),
        format!("{:<20}{}", "Margin:", percent(estimate.margin_percent)),
    ]
}

#[cfg(test)]
mod tests {
    use flipcalc_core::{Category, FeeSchedule};
    use rust_decimal_macros::dec;

    use super::*;

    fn args() -> EstimateArgs {
        EstimateArgs {
            price: dec!(20),
            category: Category::Books,
            cogs: Some(dec!(2)),
            target_margin: None,
            shipping_cost: dec!(4.47),
            ad_rate: dec!(3),
        }
    }

    fn estimate_for(args: &EstimateArgs) -> ProfitEstimate {
        let inputs = EstimateInputs {
            price: Some(args.price),
            buyer_shipping: None,
            seller_shipping_cost: Some(args.shipping_cost),
            ad_rate_percent: Some(args.ad_rate),
            category: args.category,
        };
        estimate_with_basis(&inputs, &args.cost_basis(), &FeeSchedule::default())
    }

    #[test]
    fn lines_show_rounded_breakdown() {
        let args = args();
        let lines = estimate_lines(&args, &args.cost_basis(), &estimate_for(&args));

        assert!(lines.contains(&format!("{:<20}$14.75", "Payout:")));
        assert!(lines.contains(&format!("{:<20}$2.00", "COGS:")));
        assert!(lines.contains(&format!("{:<20}$12.75", "Net profit:")));
        assert!(lines.contains(&format!("{:<20}63.76%", "Margin:")));
    }

    #[test]
    fn target_margin_line_names_the_margin() {
        let mut args = args();
        args.cogs = None;
        args.target_margin = Some(dec!(25));
        let lines = estimate_lines(&args, &args.cost_basis(), &estimate_for(&args));
        assert!(lines.contains(&format!("{:<20}$9.75", "Max cost @ 25%:")));
        assert!(lines.contains(&format!("{:<20}25.00%", "Margin:")));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut args = args();
        args.price = dec!(-1);
        assert!(matches!(
            validate(&args),
            Err(ParamsError::NegativeAmount { field: "price", .. })
        ));
    }

    #[test]
    fn ad_rate_over_hundred_is_rejected() {
        let mut args = args();
        args.ad_rate = dec!(100.5);
        assert!(matches!(
            validate(&args),
            Err(ParamsError::PercentOutOfRange { field: "ad rate", .. })
        ));
    }
}
