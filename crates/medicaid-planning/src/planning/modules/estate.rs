use crate::eligibility::classifier;
use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstateSituation {
    pub home_value: f64,
    pub probate_exposure: f64,
    pub recovery_risk: bool,
    pub has_protected_heirs: bool,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<EstateSituation> {
    run_stage(PlanningModule::EstateRecovery, || {
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

fn assess(ctx: &PlanningContext<'_>) -> EstateSituation {
    let home_value: f64 = ctx
        .financial
        .assets
        .iter()
        .filter(|(key, _)| classifier::is_home_key(key))
        .map(|(_, amount)| amount)
        .sum();

    // The probate estate the state can reach: the home plus whatever
    // countable assets remain after spend-down.
    let probate_exposure = home_value
        + ctx
            .eligibility
            .countable_assets
            .min(ctx.eligibility.resource_limit);

    // Recovery is deferred while a spouse or a disabled/minor child
    // survives the recipient.
    let has_protected_heirs = ctx.client.marital_status.is_married()
        || ctx
            .client
            .dependents
            .iter()
            .any(|dependent| dependent.disabled || dependent.age < 21);

    EstateSituation {
        home_value,
        probate_exposure,
        recovery_risk: probate_exposure > 0.0,
        has_protected_heirs,
    }
}

fn determine_strategies(situation: &EstateSituation) -> Vec<Strategy> {
    if !situation.recovery_risk {
        return Vec::new();
    }

    let mut strategies = vec![Strategy::new(
        StrategyKind::EstateRecoveryProtection,
        "Probate Avoidance for the Recovery Estate",
        format!(
            "About ${:.2} of the estate is exposed to recovery after death. Moving the home and remaining accounts outside probate (enhanced life estate deed, beneficiary designations, or trust titling) removes them from the recoverable estate in probate-only jurisdictions.",
            situation.probate_exposure
        ),
        EffectivenessTier::High,
        "After eligibility is secured",
        CostBand::Moderate,
    )
    .with_pros([
        "Non-probate transfers defeat recovery where the state claims probate assets only",
        "Heirs take the home without an estate claim attached",
    ])
    .with_cons([
        "Expanded-recovery jurisdictions can reach some non-probate transfers",
        "Deed work must not disturb current exemption status",
    ])
    .with_steps(vec![
        "Confirm whether the jurisdiction recovers beyond the probate estate".to_string(),
        "Record an enhanced life estate deed for the home where available".to_string(),
        "Add pay-on-death designations to remaining accounts".to_string(),
    ])];

    if situation.has_protected_heirs {
        strategies.push(
            Strategy::new(
                StrategyKind::EstateRecoveryProtection,
                "Recovery Deferral Through Protected Heirs",
                "Recovery must be deferred while a surviving spouse, a child under 21, or a disabled child survives the recipient. Documenting the protected heir now positions the estate to assert the deferral immediately.",
                EffectivenessTier::Medium,
                "Document now, assert at claim time",
                CostBand::Minimal,
            )
            .with_pros(["A statutory deferral, not a discretionary hardship request"]),
        );
    }

    strategies
}

fn narrative(situation: &EstateSituation) -> String {
    if !situation.recovery_risk {
        return "No estate assets are exposed to post-death recovery.".to_string();
    }

    let mut text = format!(
        "An estimated ${:.2} of the estate (home ${:.2}) is exposed to recovery after death.",
        situation.probate_exposure, situation.home_value
    );
    if situation.has_protected_heirs {
        text.push_str(" A protected heir defers any claim while they survive the recipient.");
    }
    text
}
