use chrono::{Local, NaiveDate};
use clap::Args;
use medicaid_planning::config::AppConfig;
use medicaid_planning::domain::{
    ClientProfile, HealthStatus, MaritalStatus, RawFinancialProfile, SpouseProfile,
};
use medicaid_planning::error::{AppError, PlanningError};
use medicaid_planning::PlanningEngine;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::infra::build_engine;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding `{ client, financial, jurisdiction?, overrides? }`
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Jurisdiction to assess against (overrides the file's value)
    #[arg(long)]
    pub(crate) jurisdiction: Option<String>,
    /// Assessment date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Jurisdiction for the canned scenario
    #[arg(long, default_value = "florida")]
    pub(crate) jurisdiction: String,
    /// Assessment date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct AssessmentFile {
    client: ClientProfile,
    financial: RawFinancialProfile,
    #[serde(default)]
    jurisdiction: Option<String>,
    #[serde(default)]
    overrides: Option<Value>,
}

fn load_engine() -> Result<PlanningEngine, AppError> {
    let config = AppConfig::load()?;
    build_engine(config.rules.dataset_path.as_deref())
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        file,
        jurisdiction,
        today,
    } = args;

    let raw = std::fs::read_to_string(&file)?;
    let parsed: AssessmentFile = serde_json::from_str(&raw).map_err(|err| {
        PlanningError::Data(format!("cannot parse {}: {err}", file.display()))
    })?;

    let jurisdiction = jurisdiction
        .or(parsed.jurisdiction)
        .ok_or_else(|| {
            PlanningError::Validation(
                "no jurisdiction given; pass --jurisdiction or set it in the file".to_string(),
            )
        })?;

    let engine = load_engine()?;
    let financial = parsed.financial.normalize();
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let plan = engine.comprehensive_plan(
        &parsed.client,
        &financial,
        &jurisdiction,
        parsed.overrides.as_ref(),
        today,
    )?;

    println!("{}", plan.report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { jurisdiction, today } = args;

    println!("Medicaid planning demo scenario");
    println!("An 82-year-old in declining health, married, community spouse at home.\n");

    let client = ClientProfile {
        age: 82,
        marital_status: MaritalStatus::Married,
        health: HealthStatus::Declining,
        in_crisis: true,
        veteran: true,
        relocation_planned: false,
        life_expectancy_years: None,
        spouse: Some(SpouseProfile {
            age: 79,
            health: HealthStatus::Good,
            needs_care: false,
            monthly_income: 1_200.0,
        }),
        dependents: Vec::new(),
    };

    let financial: RawFinancialProfile = serde_json::from_value(json!({
        "assets": {
            "Home": 320000,
            "Savings": "180,000",
            "Vehicle": 12000,
            "Burial Funds": 8000
        },
        "income": { "Social Security": 1900, "Pension": 1400 },
        "expenses": { "Health Insurance": 320 },
        "transfers": [
            { "amount": 25000, "months_ago": 18, "recipient": "other" }
        ]
    }))
    .map_err(|err| PlanningError::Data(format!("demo payload invalid: {err}")))?;

    let engine = load_engine()?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let plan = engine.comprehensive_plan(
        &client,
        &financial.normalize(),
        &jurisdiction,
        None,
        today,
    )?;

    println!("{}", plan.report);

    println!("Stage status");
    for result in plan.results() {
        let status = if result.status.is_success() {
            "ok".to_string()
        } else {
            "failed".to_string()
        };
        println!(
            "- {}: {} ({} strategies)",
            result.module.label(),
            status,
            result.strategies.len()
        );
    }

    Ok(())
}
