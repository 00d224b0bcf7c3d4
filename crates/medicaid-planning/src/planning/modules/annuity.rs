use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::Serialize;

/// Assumed life-table endpoint used when the client supplies no explicit
/// life expectancy.
pub const LIFE_TABLE_ENDPOINT_YEARS: f64 = 87.0;

/// Assumed annual rate for the level-payment computation.
pub const ANNUITY_ANNUAL_RATE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnuitySituation {
    pub appropriate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappropriate_reason: Option<String>,
    pub premium: f64,
    pub life_expectancy_years: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub compliant: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compliance_notes: Vec<String>,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<AnnuitySituation> {
    run_stage(PlanningModule::Annuity, || {
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

/// Monthly payment for a level-payment annuity over `months` at the given
/// annual rate.
pub fn level_payment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    if months == 0 || principal <= 0.0 {
        return 0.0;
    }
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(months as i32)))
}

fn assess(ctx: &PlanningContext<'_>) -> AnnuitySituation {
    let eligibility = ctx.eligibility;

    let life_expectancy_years = ctx
        .client
        .life_expectancy_years
        .unwrap_or((LIFE_TABLE_ENDPOINT_YEARS - ctx.client.age as f64).max(1.0));
    let life_months = (life_expectancy_years * 12.0).floor().max(1.0) as u32;

    if eligibility.resource_eligible {
        return AnnuitySituation {
            appropriate: false,
            inappropriate_reason: Some("already eligible".to_string()),
            premium: 0.0,
            life_expectancy_years,
            term_months: 0,
            monthly_payment: 0.0,
            compliant: false,
            compliance_notes: Vec::new(),
        };
    }

    if eligibility.spenddown_amount <= 0.0 {
        return AnnuitySituation {
            appropriate: false,
            inappropriate_reason: Some("no excess countable assets".to_string()),
            premium: 0.0,
            life_expectancy_years,
            term_months: 0,
            monthly_payment: 0.0,
            compliant: false,
            compliance_notes: Vec::new(),
        };
    }

    // The term is capped at remaining life expectancy; a shorter term is
    // allowed, a longer one is actuarially non-compliant.
    let term_months = life_months;
    let premium = eligibility.spenddown_amount;
    let monthly_payment = level_payment(premium, ANNUITY_ANNUAL_RATE, term_months);

    let mut compliance_notes = Vec::new();
    if term_months < ctx.rules.min_annuity_term_months {
        compliance_notes.push(format!(
            "remaining life expectancy supports only {} months, below the jurisdiction minimum of {}",
            term_months, ctx.rules.min_annuity_term_months
        ));
    }

    AnnuitySituation {
        appropriate: true,
        inappropriate_reason: None,
        premium,
        life_expectancy_years,
        term_months,
        monthly_payment,
        compliant: compliance_notes.is_empty(),
        compliance_notes,
    }
}

fn determine_strategies(situation: &AnnuitySituation) -> Vec<Strategy> {
    if !situation.appropriate || !situation.compliant {
        return Vec::new();
    }

    vec![Strategy::new(
        StrategyKind::Annuity,
        "Medicaid-Compliant Immediate Annuity",
        format!(
            "Convert the ${:.2} excess into an irrevocable, actuarially sound immediate annuity over {} months, paying about ${:.2} per month. The lump sum stops being a countable resource on purchase.",
            situation.premium, situation.term_months, situation.monthly_payment
        ),
        EffectivenessTier::High,
        "At application",
        CostBand::Moderate,
    )
    .with_pros([
        "Converts a countable resource into an income stream immediately",
        "No lookback penalty when the contract is compliant",
    ])
    .with_cons([
        "The state must be named remainder beneficiary",
        "Payments increase the monthly share of cost",
    ])
    .with_steps(vec![
        "Confirm the contract is irrevocable, non-assignable, and actuarially sound".to_string(),
        "Name the state as first remainder beneficiary".to_string(),
        "Purchase in the application month and disclose the contract".to_string(),
    ])]
}

fn narrative(situation: &AnnuitySituation) -> String {
    if !situation.appropriate {
        return format!(
            "An annuity is not appropriate: {}.",
            situation
                .inappropriate_reason
                .as_deref()
                .unwrap_or("not indicated")
        );
    }

    let mut text = format!(
        "A compliant annuity could convert ${:.2} into roughly ${:.2}/month over a {}-month term (life expectancy {:.1} years).",
        situation.premium,
        situation.monthly_payment,
        situation.term_months,
        situation.life_expectancy_years
    );
    for note in &situation.compliance_notes {
        text.push_str(&format!(" Compliance concern: {note}."));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::planning::modules::test_support::context_fixture;

    #[test]
    fn already_eligible_client_is_not_an_annuity_candidate() {
        let fixture = context_fixture(|_, financial| {
            financial.assets.clear();
            financial.assets.insert("checking".to_string(), 1_000.0);
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert!(!situation.appropriate);
        assert_eq!(
            situation.inappropriate_reason.as_deref(),
            Some("already eligible")
        );
        assert!(outcome.strategies.is_empty());
    }

    #[test]
    fn excess_assets_produce_a_compliant_term_and_payment() {
        let fixture = context_fixture(|client, financial| {
            client.age = 80;
            client.life_expectancy_years = None;
            financial.assets.insert("savings".to_string(), 50_000.0);
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert!(situation.appropriate);
        assert_eq!(situation.term_months, 7 * 12);
        assert!(situation.compliant);
        // 48,000 over 84 months at 5%: between plain principal/term and a
        // generous upper bound.
        assert!(situation.monthly_payment > 48_000.0 / 84.0);
        assert!(situation.monthly_payment < 800.0);
    }

    #[test]
    fn explicit_life_expectancy_overrides_the_table() {
        let fixture = context_fixture(|client, financial| {
            client.life_expectancy_years = Some(2.0);
            financial.assets.insert("savings".to_string(), 50_000.0);
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(situation.term_months, 24);
    }

    #[test]
    fn term_below_jurisdiction_minimum_is_flagged() {
        let fixture = context_fixture(|client, financial| {
            client.life_expectancy_years = Some(0.25);
            financial.assets.insert("savings".to_string(), 50_000.0);
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert!(!situation.compliant);
        assert!(outcome.strategies.is_empty());
    }

    #[test]
    fn level_payment_matches_zero_rate_closed_form() {
        assert_eq!(level_payment(12_000.0, 0.0, 12), 1_000.0);
        assert_eq!(level_payment(0.0, 0.05, 12), 0.0);
        assert_eq!(level_payment(10_000.0, 0.05, 0), 0.0);
    }
}
