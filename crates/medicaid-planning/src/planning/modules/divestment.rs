use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivestmentSituation {
    pub lookback_months: u32,
    pub penalty_divisor: f64,
    pub countable_transfers: f64,
    pub exempt_transfers: f64,
    pub penalty_months: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exempt_recipients: Vec<String>,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<DivestmentSituation> {
    run_stage(PlanningModule::Divestment, || {
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

fn assess(ctx: &PlanningContext<'_>) -> DivestmentSituation {
    let lookback = ctx.rules.lookback_months;
    let divisor = ctx.rules.average_monthly_care_cost;

    let mut countable_transfers = 0.0;
    let mut exempt_transfers = 0.0;
    let mut exempt_recipients = Vec::new();

    for transfer in &ctx.financial.transfers {
        if transfer.months_ago > lookback {
            continue;
        }
        if transfer.recipient.is_exempt() {
            exempt_transfers += transfer.amount;
            let label = transfer.recipient.label().to_string();
            if !exempt_recipients.contains(&label) {
                exempt_recipients.push(label);
            }
        } else {
            countable_transfers += transfer.amount;
        }
    }

    let penalty_months = if divisor > 0.0 {
        countable_transfers / divisor
    } else {
        0.0
    };

    DivestmentSituation {
        lookback_months: lookback,
        penalty_divisor: divisor,
        countable_transfers,
        exempt_transfers,
        penalty_months,
        exempt_recipients,
    }
}

fn determine_strategies(situation: &DivestmentSituation) -> Vec<Strategy> {
    if situation.penalty_months <= 0.0 {
        return Vec::new();
    }

    vec![Strategy::new(
        StrategyKind::PenaltyMitigation,
        "Transfer Penalty Mitigation",
        format!(
            "Uncompensated transfers of ${:.2} within the {}-month lookback project a penalty of about {:.1} months. Returning assets, documenting fair-value consideration, or reclassifying transfers under the spouse/disabled-child/caregiver-child exceptions shortens or removes it.",
            situation.countable_transfers, situation.lookback_months, situation.penalty_months
        ),
        EffectivenessTier::Medium,
        "Before application",
        CostBand::Moderate,
    )
    .with_pros([
        "A full return of transferred assets erases the penalty",
        "Statutory exceptions cover several common family transfers",
    ])
    .with_cons([
        "Recipients may be unable or unwilling to return assets",
        "Partial returns only shorten the penalty proportionally",
    ])
    .with_steps(vec![
        "List every transfer in the lookback window with dates and recipients".to_string(),
        "Match transfers against the statutory exemption categories".to_string(),
        "Request return of assets where no exception applies".to_string(),
        "Consider delaying the application until the penalty exposure clears".to_string(),
    ])]
}

fn narrative(situation: &DivestmentSituation) -> String {
    if situation.countable_transfers <= 0.0 && situation.exempt_transfers <= 0.0 {
        return format!(
            "No transfers were reported within the {}-month lookback window.",
            situation.lookback_months
        );
    }

    let mut text = format!(
        "Transfers within the {}-month lookback: ${:.2} penalty-countable, ${:.2} under statutory exceptions.",
        situation.lookback_months, situation.countable_transfers, situation.exempt_transfers
    );

    if situation.penalty_months > 0.0 {
        text.push_str(&format!(
            " At a divisor of ${:.2}/month the projected penalty period is {:.1} months.",
            situation.penalty_divisor, situation.penalty_months
        ));
    }

    if !situation.exempt_recipients.is_empty() {
        text.push_str(&format!(
            " Exempt recipients: {}.",
            situation.exempt_recipients.join(", ")
        ));
    }

    text
}
