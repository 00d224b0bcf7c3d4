use crate::eligibility::classifier;
use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSituation {
    pub countable_assets: f64,
    pub resource_limit: f64,
    pub excess_assets: f64,
    pub home_value: f64,
    pub mortgage_balance: f64,
    pub home_equity: f64,
    pub home_equity_limit: f64,
    pub excess_home_equity: f64,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<AssetSituation> {
    run_stage(PlanningModule::Asset, || {
        let situation = assess(ctx);
        let strategies = determine_strategies(&situation, ctx);
        let narrative = narrative(&situation);
        Ok(StageOutput {
            situation,
            strategies,
            narrative,
        })
    })
}

fn assess(ctx: &PlanningContext<'_>) -> AssetSituation {
    let eligibility = ctx.eligibility;

    let home_value: f64 = ctx
        .financial
        .assets
        .iter()
        .filter(|(key, _)| classifier::is_home_key(key))
        .map(|(_, amount)| amount)
        .sum();
    let mortgage_balance = ctx.financial.expense("mortgage_balance");
    let home_equity = (home_value - mortgage_balance).max(0.0);
    let excess_home_equity = (home_equity - ctx.rules.home_equity_limit).max(0.0);

    AssetSituation {
        countable_assets: eligibility.countable_assets,
        resource_limit: eligibility.resource_limit,
        excess_assets: eligibility.spenddown_amount,
        home_value,
        mortgage_balance,
        home_equity,
        home_equity_limit: ctx.rules.home_equity_limit,
        excess_home_equity,
    }
}

fn determine_strategies(situation: &AssetSituation, ctx: &PlanningContext<'_>) -> Vec<Strategy> {
    let mut strategies = Vec::new();

    if situation.excess_assets > 0.0 {
        strategies.push(
            Strategy::new(
                StrategyKind::SpendDown,
                "Accelerated Spend-Down",
                format!(
                    "Reduce countable assets by ${:.2} through allowable purchases: debt payoff, home repairs, medical equipment, and prepaid funeral arrangements.",
                    situation.excess_assets
                ),
                EffectivenessTier::High,
                "Before application",
                CostBand::Minimal,
            )
            .with_pros([
                "Every dollar spent on exempt purposes moves the applicant toward the limit",
                "No lookback exposure when value is received in return",
            ])
            .with_cons(["Assets are consumed rather than preserved"])
            .with_steps(vec![
                "Inventory countable accounts and their balances".to_string(),
                "Pay off consumer debt and the home mortgage first".to_string(),
                "Prepay funeral and burial arrangements (irrevocable contract)".to_string(),
                "Document every transaction for the caseworker file".to_string(),
            ]),
        );

        strategies.push(
            Strategy::new(
                StrategyKind::ExemptionConversion,
                "Convert Countable Assets to Exempt Form",
                "Shift countable funds into exempt categories: home improvements, a reliable vehicle, and personal effects, keeping value in the household.",
                EffectivenessTier::High,
                "Before application",
                CostBand::Minimal,
            )
            .with_pros(["Value is preserved in exempt form rather than spent"])
            .with_cons(["Exempt assets may still face estate recovery later"]),
        );

        if ctx.client.marital_status.is_married() {
            strategies.push(
                Strategy::new(
                    StrategyKind::AssetRetitling,
                    "Retitle Assets to the Community Spouse",
                    "Move countable assets into the community spouse's name up to the resource allowance before the snapshot date.",
                    EffectivenessTier::Medium,
                    "Before application",
                    CostBand::Minimal,
                )
                .with_pros(["Protected by the spousal impoverishment rules"])
                .with_cons(["Allowance ceiling limits how much can be shifted"]),
            );
        }
    }

    if situation.excess_home_equity > 0.0 {
        strategies.push(
            Strategy::new(
                StrategyKind::HomeEquityReduction,
                "Reduce Excess Home Equity",
                format!(
                    "Home equity exceeds the ${:.0} limit by ${:.2}; a home equity loan or partial interest transfer can bring it within bounds.",
                    situation.home_equity_limit, situation.excess_home_equity
                ),
                EffectivenessTier::Medium,
                "Before application",
                CostBand::Moderate,
            )
            .with_cons([
                "Loan proceeds become countable until spent on exempt purposes",
                "Interest accrues against the home",
            ]),
        );
    }

    strategies
}

fn narrative(situation: &AssetSituation) -> String {
    let mut text = format!(
        "Countable assets total ${:.2} against a resource limit of ${:.2}.",
        situation.countable_assets, situation.resource_limit
    );

    if situation.excess_assets > 0.0 {
        text.push_str(&format!(
            " A spend-down of ${:.2} is required before resource eligibility is reached.",
            situation.excess_assets
        ));
    } else {
        text.push_str(" Resources are already within the limit.");
    }

    if situation.home_value > 0.0 {
        text.push_str(&format!(
            " Home equity is ${:.2} (value ${:.2} less mortgage ${:.2}) against a limit of ${:.0}.",
            situation.home_equity,
            situation.home_value,
            situation.mortgage_balance,
            situation.home_equity_limit
        ));
        if situation.excess_home_equity > 0.0 {
            text.push_str(&format!(
                " Excess home equity of ${:.2} blocks eligibility until reduced.",
                situation.excess_home_equity
            ));
        }
    }

    text
}
