use crate::domain::HealthStatus;
use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::{Deserialize, Serialize};

/// Urgency tier for lookback-sensitive trust funding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustSituation {
    pub needs_trust: bool,
    pub special_needs_trust: bool,
    pub transfer_risk: RiskTier,
    pub lookback_months: u32,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<TrustSituation> {
    run_stage(PlanningModule::Trust, || {
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

fn assess(ctx: &PlanningContext<'_>) -> TrustSituation {
    let eligibility = ctx.eligibility;
    let client = ctx.client;

    let mut risk_signals = 0u8;
    if client.age > 80 {
        risk_signals += 1;
    }
    if matches!(client.health, HealthStatus::Declining | HealthStatus::Critical) {
        risk_signals += 1;
    }
    if client.in_crisis {
        risk_signals += 1;
    }

    let transfer_risk = match risk_signals {
        0 => RiskTier::Low,
        1 => RiskTier::Medium,
        _ => RiskTier::High,
    };

    TrustSituation {
        needs_trust: !eligibility.resource_eligible || !eligibility.income_eligible,
        special_needs_trust: client.has_special_needs_dependent(),
        transfer_risk,
        lookback_months: ctx.rules.lookback_months,
    }
}

fn determine_strategies(situation: &TrustSituation, ctx: &PlanningContext<'_>) -> Vec<Strategy> {
    let mut strategies = Vec::new();

    if situation.needs_trust && !ctx.eligibility.resource_eligible {
        let timing = match situation.transfer_risk {
            RiskTier::High => "Immediately; every month of delay extends the penalty horizon",
            RiskTier::Medium => "Within 30 days",
            RiskTier::Low => "Within 90 days",
        };
        strategies.push(
            Strategy::new(
                StrategyKind::IrrevocableTrust,
                "Irrevocable Asset Protection Trust",
                format!(
                    "Move excess countable assets into an irrevocable trust. Funding starts the {}-month lookback clock, so the transfer urgency is {}.",
                    situation.lookback_months,
                    situation.transfer_risk.label().to_lowercase()
                ),
                EffectivenessTier::High,
                timing,
                CostBand::Substantial,
            )
            .with_pros([
                "Assets are outside the countable estate once the lookback passes",
                "Shields assets from estate recovery",
            ])
            .with_cons([
                "Grantor gives up control of the principal",
                "Transfers within the lookback window trigger a penalty period",
            ])
            .with_steps(vec![
                "Select trustee and remainder beneficiaries".to_string(),
                "Execute the trust instrument with an elder-law attorney".to_string(),
                "Retitle selected assets into the trust".to_string(),
                "Calendar the lookback expiration date".to_string(),
            ]),
        );
    }

    if situation.special_needs_trust {
        strategies.push(
            Strategy::new(
                StrategyKind::SpecialNeedsTrust,
                "Special Needs Trust for Dependent",
                "A dependent with special needs can receive assets through a special needs trust without disturbing either the applicant's eligibility or the dependent's own benefits.",
                EffectivenessTier::High,
                "Before application",
                CostBand::Substantial,
            )
            .with_pros([
                "Transfers to the trust are exempt from the penalty rules",
                "Preserves the dependent's means-tested benefits",
            ])
            .with_cons(["Requires ongoing trustee administration"]),
        );
    }

    strategies
}

fn narrative(situation: &TrustSituation) -> String {
    let mut text = if situation.needs_trust {
        "A trust instrument is indicated because the client is not yet fully eligible."
            .to_string()
    } else {
        "No trust is required for eligibility at current asset and income levels.".to_string()
    };

    if situation.special_needs_trust {
        text.push_str(
            " A special needs trust should be established for the dependent with special needs.",
        );
    }

    text.push_str(&format!(
        " Transfer risk is {} given the {}-month lookback.",
        situation.transfer_risk.label().to_lowercase(),
        situation.lookback_months
    ));
    text
}
