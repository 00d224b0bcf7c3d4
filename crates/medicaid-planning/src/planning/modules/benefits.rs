use crate::domain::HealthStatus;
use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::Serialize;

/// Cross-screens for programs adjacent to long-term-care Medicaid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenefitsSituation {
    pub va_aid_attendance: bool,
    pub medicare_savings_program: bool,
    pub ssi_referral: bool,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<BenefitsSituation> {
    run_stage(PlanningModule::RelatedBenefits, || {
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

fn assess(ctx: &PlanningContext<'_>) -> BenefitsSituation {
    let needs_care = ctx.client.health != HealthStatus::Good || ctx.client.in_crisis;

    BenefitsSituation {
        va_aid_attendance: ctx.client.veteran && needs_care,
        medicare_savings_program: ctx.eligibility.total_income
            <= ctx.rules.income_limit_single,
        ssi_referral: ctx.eligibility.resource_eligible && ctx.eligibility.total_income < 1_000.0,
    }
}

fn determine_strategies(situation: &BenefitsSituation) -> Vec<Strategy> {
    let mut strategies = Vec::new();

    if situation.va_aid_attendance {
        strategies.push(
            Strategy::new(
                StrategyKind::BenefitCoordination,
                "VA Aid & Attendance Screening",
                "File a VA Aid & Attendance claim in parallel; the pension can offset care costs during the Medicaid decision window.",
                EffectivenessTier::Medium,
                "In parallel with the application",
                CostBand::Minimal,
            )
            .with_pros(["Monthly pension stacks with other care funding"])
            .with_cons(["VA income counting interacts with the Medicaid budget"]),
        );
    }

    if situation.medicare_savings_program {
        strategies.push(
            Strategy::new(
                StrategyKind::BenefitCoordination,
                "Medicare Savings Program Enrollment",
                "Income falls within the Medicare Savings Program range; enrollment covers premiums that otherwise reduce the care budget.",
                EffectivenessTier::Medium,
                "Within 30 days",
                CostBand::Minimal,
            )
            .with_pros(["Recovers the Part B premium from the monthly budget"]),
        );
    }

    if situation.ssi_referral {
        strategies.push(Strategy::new(
            StrategyKind::BenefitCoordination,
            "SSI Referral",
            "Resources and income are low enough that an SSI screening is warranted alongside the long-term-care application.",
            EffectivenessTier::Low,
            "Within 30 days",
            CostBand::Minimal,
        ));
    }

    strategies
}

fn narrative(situation: &BenefitsSituation) -> String {
    let mut programs = Vec::new();
    if situation.va_aid_attendance {
        programs.push("VA Aid & Attendance");
    }
    if situation.medicare_savings_program {
        programs.push("a Medicare Savings Program");
    }
    if situation.ssi_referral {
        programs.push("SSI");
    }

    if programs.is_empty() {
        "No adjacent benefit programs apply to this household.".to_string()
    } else {
        format!(
            "The household should be screened for {} alongside the Medicaid application.",
            programs.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::modules::test_support::context_fixture;

    #[test]
    fn veteran_needing_care_gets_va_screening() {
        let fixture = context_fixture(|client, _| {
            client.veteran = true;
            client.health = HealthStatus::Declining;
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert!(situation.va_aid_attendance);
        assert!(outcome
            .strategies
            .iter()
            .any(|strategy| strategy.name.contains("VA Aid")));
    }

    #[test]
    fn healthy_non_veteran_is_not_va_screened() {
        let fixture = context_fixture(|client, _| {
            client.veteran = false;
            client.health = HealthStatus::Good;
            client.in_crisis = false;
        });
        let outcome = run(&fixture.context());
        assert!(!outcome.situation.expect("assessed").va_aid_attendance);
    }
}
