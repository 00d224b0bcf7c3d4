use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpousalSituation {
    pub community_spouse_resource_allowance: f64,
    pub spouse_monthly_income: f64,
    pub mmna_min: f64,
    pub mmna_max: f64,
    pub monthly_needs_allowance: f64,
    pub spouse_needs_care: bool,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<SpousalSituation> {
    run_stage(PlanningModule::Spousal, || {
        let situation = assess(ctx);
        let strategies = determine_strategies(&situation);
        let narrative = narrative(&situation);
        Ok(StageOutput {
            situation,
            strategies,
            narrative,
        })
    })
}

fn assess(ctx: &PlanningContext<'_>) -> SpousalSituation {
    let rules = ctx.rules;
    let spouse_income = ctx.client.spouse_income();

    // The community spouse keeps the countable pool up to the married
    // resource tier.
    let csra = ctx
        .eligibility
        .countable_assets
        .min(rules.resource_limit_married);

    let shortfall = (rules.mmna_min - spouse_income).max(0.0);
    let monthly_needs_allowance = shortfall.min(rules.mmna_max);

    SpousalSituation {
        community_spouse_resource_allowance: csra,
        spouse_monthly_income: spouse_income,
        mmna_min: rules.mmna_min,
        mmna_max: rules.mmna_max,
        monthly_needs_allowance,
        spouse_needs_care: ctx
            .client
            .spouse
            .as_ref()
            .is_some_and(|spouse| spouse.needs_care),
    }
}

fn determine_strategies(situation: &SpousalSituation) -> Vec<Strategy> {
    let mut strategies = Vec::new();

    if situation.community_spouse_resource_allowance > 0.0 {
        strategies.push(
            Strategy::new(
                StrategyKind::SpousalResourceTransfer,
                "Community Spouse Resource Allowance",
                format!(
                    "Shift up to ${:.2} of countable assets into the community spouse's name. Inter-spousal transfers are exempt from the lookback, but must be completed before the snapshot date.",
                    situation.community_spouse_resource_allowance
                ),
                EffectivenessTier::High,
                "Before the resource snapshot",
                CostBand::Minimal,
            )
            .with_pros([
                "Transfers between spouses carry no penalty",
                "Protected assets stay inside the household",
            ])
            .with_cons(["The allowance is capped at the married resource tier"])
            .with_steps(vec![
                "Inventory jointly held and individually held accounts".to_string(),
                "Retitle accounts into the community spouse's sole name".to_string(),
                "Keep statements documenting the pre-snapshot balances".to_string(),
            ]),
        );
    }

    if situation.monthly_needs_allowance > 0.0 {
        strategies.push(
            Strategy::new(
                StrategyKind::SpousalAllowance,
                "Monthly Maintenance Needs Allowance",
                format!(
                    "The community spouse's income of ${:.2} falls short of the ${:.2} minimum allowance; ${:.2} of the applicant's income can be diverted each month.",
                    situation.spouse_monthly_income,
                    situation.mmna_min,
                    situation.monthly_needs_allowance
                ),
                EffectivenessTier::High,
                "At application",
                CostBand::Minimal,
            )
            .with_pros([
                "Diverted income reduces the applicant's share of cost",
                "A fair-hearing request can raise the allowance toward the maximum",
            ])
            .with_cons(["Requires documenting the spouse's income and shelter costs"]),
        );
    }

    strategies
}

fn narrative(situation: &SpousalSituation) -> String {
    let mut text = format!(
        "The community spouse may retain ${:.2} of countable resources.",
        situation.community_spouse_resource_allowance
    );

    if situation.monthly_needs_allowance > 0.0 {
        text.push_str(&format!(
            " Spouse income of ${:.2} supports a monthly income diversion of ${:.2} (allowance range ${:.2}-${:.2}).",
            situation.spouse_monthly_income,
            situation.monthly_needs_allowance,
            situation.mmna_min,
            situation.mmna_max
        ));
    } else {
        text.push_str(&format!(
            " Spouse income of ${:.2} already meets the ${:.2} minimum allowance.",
            situation.spouse_monthly_income, situation.mmna_min
        ));
    }

    if situation.spouse_needs_care {
        text.push_str(
            " The community spouse also anticipates needing care; both spouses' eligibility should be planned together.",
        );
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthStatus, MaritalStatus, SpouseProfile};
    use crate::planning::modules::test_support::context_fixture;

    fn married(spouse_income: f64) -> SpouseProfile {
        SpouseProfile {
            age: 79,
            health: HealthStatus::Good,
            needs_care: false,
            monthly_income: spouse_income,
        }
    }

    #[test]
    fn csra_is_capped_at_the_married_resource_tier() {
        let fixture = context_fixture(|client, financial| {
            client.marital_status = MaritalStatus::Married;
            client.spouse = Some(married(1_200.0));
            financial.assets.insert("savings".to_string(), 100_000.0);
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(
            situation.community_spouse_resource_allowance,
            fixture.rules.resource_limit_married
        );
        assert!(outcome
            .strategies
            .iter()
            .any(|strategy| strategy.kind == StrategyKind::SpousalResourceTransfer));
    }

    #[test]
    fn small_estate_transfers_everything_countable() {
        let fixture = context_fixture(|client, financial| {
            client.marital_status = MaritalStatus::Married;
            client.spouse = Some(married(1_200.0));
            financial.assets.clear();
            financial.assets.insert("savings".to_string(), 2_500.0);
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(situation.community_spouse_resource_allowance, 2_500.0);
    }

    #[test]
    fn income_shortfall_sets_the_needs_allowance() {
        let fixture = context_fixture(|client, _| {
            client.marital_status = MaritalStatus::Married;
            client.spouse = Some(married(1_000.0));
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        let expected = fixture.rules.mmna_min - 1_000.0;
        assert_eq!(situation.monthly_needs_allowance, expected);
        assert!(outcome
            .strategies
            .iter()
            .any(|strategy| strategy.kind == StrategyKind::SpousalAllowance));
    }

    #[test]
    fn well_provided_spouse_gets_no_diversion() {
        let fixture = context_fixture(|client, _| {
            client.marital_status = MaritalStatus::Married;
            client.spouse = Some(married(5_000.0));
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(situation.monthly_needs_allowance, 0.0);
        assert!(!outcome
            .strategies
            .iter()
            .any(|strategy| strategy.kind == StrategyKind::SpousalAllowance));
    }
}
