use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use crate::error::PlanningError;
use serde::Serialize;

/// Monthly housing-maintenance deduction is allowed only up to this cap.
pub const HOUSING_MAINTENANCE_CAP: f64 = 750.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeDeductions {
    pub personal_needs_allowance: f64,
    pub housing_maintenance: f64,
    pub health_insurance_premiums: f64,
    pub spousal_allowance: f64,
}

impl IncomeDeductions {
    pub fn total(&self) -> f64 {
        self.personal_needs_allowance
            + self.housing_maintenance
            + self.health_insurance_premiums
            + self.spousal_allowance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeSituation {
    pub total_income: f64,
    pub income_limit: f64,
    pub income_cap_jurisdiction: bool,
    pub needs_income_trust: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_trust_name: Option<String>,
    pub deductions: IncomeDeductions,
    pub total_deductions: f64,
    pub share_of_cost: f64,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<IncomeSituation> {
    run_stage(PlanningModule::Income, || {
        let situation = assess(ctx)?;
        let strategies = determine_strategies(&situation);
        let narrative = narrative(&situation);
        Ok(StageOutput {
            situation,
            strategies,
            narrative,
        })
    })
}

fn assess(ctx: &PlanningContext<'_>) -> Result<IncomeSituation, PlanningError> {
    let eligibility = ctx.eligibility;
    let rules = ctx.rules;

    let needs_income_trust = rules.income_cap && eligibility.total_income > eligibility.income_limit;
    let income_trust_name = if needs_income_trust {
        // An income-cap jurisdiction must name its trust instrument; a
        // dataset that omits it is incomplete, not a case for a default.
        Some(rules.income_trust_name.clone().ok_or(
            PlanningError::MissingRuleField {
                jurisdiction: ctx.jurisdiction.to_string(),
                field: "income_trust_name",
            },
        )?)
    } else {
        rules.income_trust_name.clone()
    };

    let spousal_allowance = if ctx.client.marital_status.is_married() {
        (rules.mmna_min - ctx.client.spouse_income()).max(0.0)
    } else {
        0.0
    };

    let housing = ctx
        .financial
        .expense("housing_maintenance")
        .max(ctx.financial.expense("rent"));

    let deductions = IncomeDeductions {
        personal_needs_allowance: rules.personal_needs_allowance,
        housing_maintenance: housing.min(HOUSING_MAINTENANCE_CAP),
        health_insurance_premiums: ctx.financial.expense("health_insurance"),
        spousal_allowance,
    };

    let total_deductions = deductions.total();
    let share_of_cost = (eligibility.total_income - total_deductions).max(0.0);

    Ok(IncomeSituation {
        total_income: eligibility.total_income,
        income_limit: eligibility.income_limit,
        income_cap_jurisdiction: rules.income_cap,
        needs_income_trust,
        income_trust_name,
        deductions,
        total_deductions,
        share_of_cost,
    })
}

fn determine_strategies(situation: &IncomeSituation) -> Vec<Strategy> {
    let mut strategies = Vec::new();

    if situation.needs_income_trust {
        let trust_name = situation
            .income_trust_name
            .as_deref()
            .unwrap_or("Qualified Income Trust");
        strategies.push(
            Strategy::new(
                StrategyKind::MillerTrust,
                trust_name.to_string(),
                format!(
                    "Income of ${:.2} exceeds the ${:.2} cap. In this jurisdiction a {} is the only path to income eligibility: excess income is deposited to the trust each month and flows to the state on death.",
                    situation.total_income, situation.income_limit, trust_name
                ),
                EffectivenessTier::High,
                "Before application, funded in the month of filing",
                CostBand::Moderate,
            )
            .with_pros([
                "Restores income eligibility in an income-cap jurisdiction",
                "Accepted, routine instrument with established banking procedures",
            ])
            .with_cons([
                "Trust balance remaining at death goes to the state",
                "Monthly deposits must be kept current or eligibility lapses",
            ])
            .with_steps(vec![
                "Have an elder-law attorney draft the trust instrument".to_string(),
                "Open the dedicated trust bank account".to_string(),
                "Redirect the excess income into the trust every month".to_string(),
                "File the trust document with the application".to_string(),
            ]),
        );
    } else if situation.total_income > situation.income_limit {
        strategies.push(
            Strategy::new(
                StrategyKind::SpendDown,
                "Medically Needy Income Spend-Down",
                format!(
                    "Income of ${:.2} exceeds the ${:.2} limit, but this jurisdiction allows spending the excess on incurred medical costs to reach eligibility for the month.",
                    situation.total_income, situation.income_limit
                ),
                EffectivenessTier::Medium,
                "Monthly, ongoing",
                CostBand::Minimal,
            )
            .with_pros(["No trust instrument required"])
            .with_cons(["Must be re-established every budget period"]),
        );
    }

    strategies
}

fn narrative(situation: &IncomeSituation) -> String {
    let mut text = format!(
        "Total monthly income is ${:.2} against a limit of ${:.2}.",
        situation.total_income, situation.income_limit
    );

    if situation.needs_income_trust {
        if let Some(name) = &situation.income_trust_name {
            text.push_str(&format!(
                " This is an income-cap jurisdiction; a {name} is mandatory to reach eligibility."
            ));
        }
    } else if situation.total_income > situation.income_limit {
        text.push_str(" Excess income can be offset through the medically needy spend-down.");
    } else {
        text.push_str(" Income is within the limit.");
    }

    text.push_str(&format!(
        " After deductions of ${:.2} the projected monthly share of cost is ${:.2}.",
        situation.total_deductions, situation.share_of_cost
    ));
    text
}
