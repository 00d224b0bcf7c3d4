use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceSituation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_share_of_cost: Option<f64>,
    pub personal_needs_allowance: f64,
    pub annual_redetermination: bool,
    pub relocation_planned: bool,
    pub retained_spousal_assets: bool,
}

pub fn run(
    ctx: &PlanningContext<'_>,
    share_of_cost: Option<f64>,
) -> ModuleOutcome<MaintenanceSituation> {
    run_stage(PlanningModule::PostEligibility, || {
        let situation = assess(ctx, share_of_cost);
        let strategies = determine_strategies(&situation);
        let narrative = narrative(&situation);
        Ok(StageOutput {
            situation,
            strategies,
            narrative,
        })
    })
}

fn assess(ctx: &PlanningContext<'_>, share_of_cost: Option<f64>) -> MaintenanceSituation {
    MaintenanceSituation {
        monthly_share_of_cost: share_of_cost,
        personal_needs_allowance: ctx.rules.personal_needs_allowance,
        annual_redetermination: true,
        relocation_planned: ctx.client.relocation_planned,
        retained_spousal_assets: ctx.client.marital_status.is_married()
            && ctx.eligibility.countable_assets > 0.0,
    }
}

fn determine_strategies(situation: &MaintenanceSituation) -> Vec<Strategy> {
    let mut strategies = Vec::new();

    if let Some(share) = situation.monthly_share_of_cost {
        if share > 0.0 {
            strategies.push(
                Strategy::new(
                    StrategyKind::PatientLiabilityManagement,
                    "Patient Liability Management",
                    format!(
                        "The monthly share of cost is about ${:.2}. Track allowable deductions (uncovered medical costs, insurance premiums) each month; every documented deduction lowers the amount owed to the facility.",
                        share
                    ),
                    EffectivenessTier::Medium,
                    "Monthly, ongoing",
                    CostBand::Minimal,
                )
                .with_pros(["Documented deductions reduce the amount owed every month"])
                .with_steps(vec![
                    "Keep receipts for all out-of-pocket medical costs".to_string(),
                    "Report insurance premium changes to the caseworker".to_string(),
                    format!(
                        "Reserve the ${:.2} personal needs allowance before paying the facility",
                        situation.personal_needs_allowance
                    ),
                ]),
            );
        }
    }

    strategies.push(
        Strategy::new(
            StrategyKind::AnnualRedetermination,
            "Annual Redetermination Readiness",
            "Eligibility is redetermined every year. Missed paperwork is the most common cause of coverage loss, so the renewal packet should be maintained continuously rather than rebuilt annually.",
            EffectivenessTier::High,
            "Calendar 60 days before the renewal date",
            CostBand::Minimal,
        )
        .with_steps(vec![
            "Calendar the renewal date with a 60-day lead".to_string(),
            "Keep rolling twelve months of account statements on file".to_string(),
            "Report any inheritance, settlement, or asset change within ten days".to_string(),
        ]),
    );

    if situation.retained_spousal_assets {
        strategies.push(
            Strategy::new(
                StrategyKind::AssetRetitling,
                "Maintain Spousal Asset Separation",
                "Assets retained by the community spouse must stay titled in the spouse's sole name; commingling them back into joint accounts re-exposes them at redetermination.",
                EffectivenessTier::Medium,
                "Ongoing",
                CostBand::Minimal,
            )
            .with_cons(["Requires discipline in day-to-day banking"]),
        );
    }

    if situation.relocation_planned {
        strategies.push(
            Strategy::new(
                StrategyKind::RelocationPlanning,
                "Interstate Relocation Coordination",
                "Eligibility does not transfer between jurisdictions. A move requires closing the current case and reapplying under the destination's rules, ideally with both applications sequenced to avoid a coverage gap.",
                EffectivenessTier::Medium,
                "Begin 90 days before the move",
                CostBand::Moderate,
            )
            .with_cons([
                "Resource and income limits differ at the destination",
                "A coverage gap is possible if the cases are not sequenced",
            ]),
        );
    }

    strategies
}

fn narrative(situation: &MaintenanceSituation) -> String {
    let mut text = match situation.monthly_share_of_cost {
        Some(share) if share > 0.0 => format!(
            "Once approved, the projected monthly share of cost is ${:.2}, with a ${:.2} personal needs allowance retained.",
            share, situation.personal_needs_allowance
        ),
        _ => "Once approved, ongoing compliance centers on the annual redetermination."
            .to_string(),
    };

    if situation.relocation_planned {
        text.push_str(" A planned relocation will require a fresh application in the destination jurisdiction.");
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthStatus, MaritalStatus, SpouseProfile};
    use crate::planning::modules::test_support::context_fixture;

    #[test]
    fn share_of_cost_drives_liability_management() {
        let fixture = context_fixture(|_, _| {});
        let outcome = run(&fixture.context(), Some(1_250.0));
        let kinds: Vec<_> = outcome.strategies.iter().map(|s| s.kind).collect();
        assert!(kinds.contains(&StrategyKind::PatientLiabilityManagement));
        assert!(kinds.contains(&StrategyKind::AnnualRedetermination));
    }

    #[test]
    fn redetermination_is_always_recommended() {
        let fixture = context_fixture(|_, _| {});
        let outcome = run(&fixture.context(), None);
        assert!(outcome
            .strategies
            .iter()
            .any(|strategy| strategy.kind == StrategyKind::AnnualRedetermination));
    }

    #[test]
    fn relocation_flag_adds_the_relocation_strategy() {
        let fixture = context_fixture(|client, _| {
            client.relocation_planned = true;
        });
        let outcome = run(&fixture.context(), None);
        assert!(outcome
            .strategies
            .iter()
            .any(|strategy| strategy.kind == StrategyKind::RelocationPlanning));
    }

    #[test]
    fn married_with_retained_assets_keeps_separation_advice() {
        let fixture = context_fixture(|client, financial| {
            client.marital_status = MaritalStatus::Married;
            client.spouse = Some(SpouseProfile {
                age: 78,
                health: HealthStatus::Good,
                needs_care: false,
                monthly_income: 1_500.0,
            });
            financial.assets.insert("savings".to_string(), 2_000.0);
        });
        let outcome = run(&fixture.context(), None);
        assert!(outcome
            .strategies
            .iter()
            .any(|strategy| strategy.kind == StrategyKind::AssetRetitling));
    }
}
