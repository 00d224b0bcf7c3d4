use std::collections::BTreeMap;

use chrono::NaiveDate;
use medicaid_planning::domain::{
    AssetTransfer, ClientProfile, FinancialProfile, HealthStatus, MaritalStatus, SpouseProfile,
    TransferRecipient,
};
use medicaid_planning::planning::{PlanningModule, StrategyKind};
use medicaid_planning::PlanningEngine;
use serde_json::json;

fn married_client() -> ClientProfile {
    ClientProfile {
        age: 82,
        marital_status: MaritalStatus::Married,
        health: HealthStatus::Declining,
        in_crisis: false,
        veteran: false,
        relocation_planned: false,
        life_expectancy_years: None,
        spouse: Some(SpouseProfile {
            age: 79,
            health: HealthStatus::Good,
            needs_care: false,
            monthly_income: 1_200.0,
        }),
        dependents: Vec::new(),
    }
}

fn single_client() -> ClientProfile {
    ClientProfile {
        marital_status: MaritalStatus::Single,
        spouse: None,
        health: HealthStatus::Fair,
        ..married_client()
    }
}

fn financial(savings: f64, monthly_income: f64) -> FinancialProfile {
    let mut assets = BTreeMap::new();
    assets.insert("savings".to_string(), savings);
    let mut income = BTreeMap::new();
    income.insert("pension".to_string(), monthly_income);
    FinancialProfile {
        assets,
        income,
        ..FinancialProfile::default()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

#[test]
fn married_cap_state_plan_recommends_an_income_trust() {
    let engine = PlanningEngine::with_builtin_rules();
    let overrides = json!({ "income_limit_married": 2_901.0 });
    let plan = engine
        .comprehensive_plan(
            &married_client(),
            &financial(50_000.0, 3_000.0),
            "florida",
            Some(&overrides),
            today(),
        )
        .expect("plan builds");

    let income = plan.income.situation.as_ref().expect("income stage ran");
    assert!(income.needs_income_trust);
    assert_eq!(income.income_trust_name.as_deref(), Some("Qualified Income Trust"));

    let kinds: Vec<_> = plan.strategies.iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&StrategyKind::MillerTrust));
    assert!(kinds.contains(&StrategyKind::SpendDown));
    assert!(kinds.contains(&StrategyKind::SpousalResourceTransfer));
}

#[test]
fn spousal_stage_runs_only_for_married_clients() {
    let engine = PlanningEngine::with_builtin_rules();

    let married = engine
        .comprehensive_plan(&married_client(), &financial(50_000.0, 1_500.0), "florida", None, today())
        .expect("married plan builds");
    assert!(married.spousal.is_some());
    assert_eq!(married.results().len(), 11);

    let single = engine
        .comprehensive_plan(&single_client(), &financial(50_000.0, 1_500.0), "florida", None, today())
        .expect("single plan builds");
    assert!(single.spousal.is_none());
    assert_eq!(single.results().len(), 10);
}

#[test]
fn transfer_penalty_blocks_prompt_filing() {
    let engine = PlanningEngine::with_builtin_rules();
    let mut money = financial(50_000.0, 1_500.0);
    money.transfers.push(AssetTransfer {
        amount: 54_045.0,
        months_ago: 12,
        recipient: TransferRecipient::Other,
    });

    let plan = engine
        .comprehensive_plan(&single_client(), &money, "florida", None, today())
        .expect("plan builds");

    let divestment = plan
        .divestment
        .situation
        .as_ref()
        .expect("divestment stage ran");
    assert!(divestment.penalty_months > 0.0);

    let timing = plan.timing.situation.as_ref().expect("timing stage ran");
    assert!(timing.remediation_needed);
    assert!(plan
        .strategies
        .iter()
        .any(|strategy| strategy.kind == StrategyKind::PenaltyMitigation));
}

#[test]
fn failing_stage_is_isolated_from_the_rest_of_the_plan() {
    let engine = PlanningEngine::with_builtin_rules();
    let overrides = json!({ "income_trust_name": null });
    let plan = engine
        .comprehensive_plan(
            &single_client(),
            &financial(50_000.0, 4_000.0),
            "florida",
            Some(&overrides),
            today(),
        )
        .expect("plan builds despite the stage failure");

    assert!(!plan.income.status.is_success());
    assert!(plan.income.situation.is_none());
    assert!(plan.asset.status.is_success());
    assert!(plan.estate.status.is_success());
    assert!(!plan.strategies.is_empty());
    assert!(!plan.report.is_empty());
}

#[test]
fn module_endpoint_contract_matches_the_full_plan() {
    let engine = PlanningEngine::with_builtin_rules();
    let plan = engine
        .comprehensive_plan(&single_client(), &financial(50_000.0, 1_500.0), "florida", None, today())
        .expect("plan builds");
    let extracted = engine
        .module_plan(
            PlanningModule::Asset,
            &single_client(),
            &financial(50_000.0, 1_500.0),
            "florida",
            None,
            today(),
        )
        .expect("stage extracts");

    assert_eq!(Some(extracted), plan.result_for(PlanningModule::Asset));
}

#[test]
fn report_reflects_every_stage_in_order() {
    let engine = PlanningEngine::with_builtin_rules();
    let plan = engine
        .comprehensive_plan(&married_client(), &financial(50_000.0, 1_500.0), "florida", None, today())
        .expect("plan builds");

    let mut cursor = 0;
    for result in plan.results() {
        let heading = result.module.label().to_uppercase();
        let position = plan.report[cursor..]
            .find(&heading)
            .unwrap_or_else(|| panic!("missing or misplaced section '{heading}'"));
        cursor += position + heading.len();
    }
}
