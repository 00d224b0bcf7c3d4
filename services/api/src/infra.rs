use chrono::NaiveDate;
use medicaid_planning::error::AppError;
use medicaid_planning::rules::RuleRepository;
use medicaid_planning::PlanningEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine backed by the configured dataset, or by the compiled-in table
/// when no dataset path is set.
pub(crate) fn build_engine(dataset_path: Option<&Path>) -> Result<PlanningEngine, AppError> {
    let repository = match dataset_path {
        Some(path) => RuleRepository::from_path(path)?,
        None => RuleRepository::builtin(),
    };
    Ok(PlanningEngine::new(repository))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
