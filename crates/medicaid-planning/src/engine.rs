use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{ClientProfile, FinancialProfile};
use crate::eligibility::{self, EligibilityResult};
use crate::error::PlanningError;
use crate::planning::{orchestrator, ComprehensivePlan, PlanningModule, PlanningResult};
use crate::rules::RuleRepository;

/// Facade over the rule repository and the planning pipeline. Construct it
/// once with an explicit repository and share it by reference; every entry
/// point is a pure computation over its arguments.
#[derive(Debug, Clone)]
pub struct PlanningEngine {
    rules: RuleRepository,
}

impl PlanningEngine {
    pub fn new(rules: RuleRepository) -> Self {
        Self { rules }
    }

    /// Engine over the compiled-in jurisdiction dataset.
    pub fn with_builtin_rules() -> Self {
        Self::new(RuleRepository::builtin())
    }

    pub fn rules(&self) -> &RuleRepository {
        &self.rules
    }

    /// Snapshot eligibility only: classification, limits, and the
    /// spend-down figure, without the planning stages.
    pub fn evaluate_eligibility(
        &self,
        client: &ClientProfile,
        financial: &FinancialProfile,
        jurisdiction: &str,
        overrides: Option<&Value>,
    ) -> Result<EligibilityResult, PlanningError> {
        client.validate()?;
        financial.validate()?;
        let rules = self.rules.get_with_overrides(jurisdiction, overrides)?;
        Ok(eligibility::evaluate(financial, &rules, client.marital_status))
    }

    /// Run the full planning pipeline for one client.
    pub fn comprehensive_plan(
        &self,
        client: &ClientProfile,
        financial: &FinancialProfile,
        jurisdiction: &str,
        overrides: Option<&Value>,
        today: NaiveDate,
    ) -> Result<ComprehensivePlan, PlanningError> {
        let key = self.rules.canonical_key(jurisdiction)?;
        let rules = self.rules.get_with_overrides(&key, overrides)?;
        orchestrator::run(client, financial, &rules, &key, today)
    }

    /// One stage's result. The pipeline is computed in full so the stage
    /// sees the same cross-stage inputs it would in a comprehensive run.
    pub fn module_plan(
        &self,
        module: PlanningModule,
        client: &ClientProfile,
        financial: &FinancialProfile,
        jurisdiction: &str,
        overrides: Option<&Value>,
        today: NaiveDate,
    ) -> Result<PlanningResult, PlanningError> {
        let plan = self.comprehensive_plan(client, financial, jurisdiction, overrides, today)?;
        plan.result_for(module).ok_or_else(|| {
            PlanningError::Validation(format!(
                "the {} stage applies only to married clients",
                module.key()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthStatus, MaritalStatus};
    use std::collections::BTreeMap;

    fn client() -> ClientProfile {
        ClientProfile {
            age: 82,
            marital_status: MaritalStatus::Single,
            health: HealthStatus::Fair,
            in_crisis: false,
            veteran: false,
            relocation_planned: false,
            life_expectancy_years: None,
            spouse: None,
            dependents: Vec::new(),
        }
    }

    fn financial() -> FinancialProfile {
        let mut assets = BTreeMap::new();
        assets.insert("savings".to_string(), 50_000.0);
        let mut income = BTreeMap::new();
        income.insert("social_security".to_string(), 1_500.0);
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
    fn eligibility_accepts_alias_jurisdictions() {
        let engine = PlanningEngine::with_builtin_rules();
        let by_code = engine
            .evaluate_eligibility(&client(), &financial(), "FL", None)
            .expect("code resolves");
        let by_name = engine
            .evaluate_eligibility(&client(), &financial(), "Florida", None)
            .expect("name resolves");
        assert_eq!(by_code, by_name);
        assert_eq!(by_code.spenddown_amount, 48_000.0);
    }

    #[test]
    fn overrides_flow_through_to_the_evaluation() {
        let engine = PlanningEngine::with_builtin_rules();
        let overrides = serde_json::json!({ "resource_limit_single": 60_000.0 });
        let result = engine
            .evaluate_eligibility(&client(), &financial(), "florida", Some(&overrides))
            .expect("override applies");
        assert!(result.resource_eligible);
        assert_eq!(result.spenddown_amount, 0.0);
    }

    #[test]
    fn comprehensive_plan_canonicalizes_the_jurisdiction() {
        let engine = PlanningEngine::with_builtin_rules();
        let plan = engine
            .comprehensive_plan(&client(), &financial(), "  FL ", None, today())
            .expect("plan builds");
        assert_eq!(plan.jurisdiction, "florida");
    }

    #[test]
    fn module_plan_extracts_a_single_stage() {
        let engine = PlanningEngine::with_builtin_rules();
        let result = engine
            .module_plan(
                PlanningModule::Asset,
                &client(),
                &financial(),
                "florida",
                None,
                today(),
            )
            .expect("stage extracts");
        assert_eq!(result.module, PlanningModule::Asset);
        assert!(result.status.is_success());
    }

    #[test]
    fn spousal_module_plan_rejects_single_clients() {
        let engine = PlanningEngine::with_builtin_rules();
        let err = engine
            .module_plan(
                PlanningModule::Spousal,
                &client(),
                &financial(),
                "florida",
                None,
                today(),
            )
            .expect_err("single client has no spousal stage");
        assert!(matches!(err, PlanningError::Validation(_)));
    }

    #[test]
    fn unknown_jurisdiction_surfaces_the_lookup_error() {
        let engine = PlanningEngine::with_builtin_rules();
        let err = engine
            .comprehensive_plan(&client(), &financial(), "atlantis", None, today())
            .expect_err("no such jurisdiction");
        assert!(matches!(err, PlanningError::UnknownJurisdiction { .. }));
    }
}
