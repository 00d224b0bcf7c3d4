use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{ClientProfile, FinancialProfile};
use crate::eligibility::{self, EligibilityResult};
use crate::error::PlanningError;
use crate::planning::modules::{
    annuity, asset, benefits, care, divestment, estate, income, maintenance, spousal, timing,
    trust, AnnuitySituation, AssetSituation, BenefitsSituation, CareSituation,
    DivestmentSituation, EstateSituation, IncomeSituation, MaintenanceSituation, SpousalSituation,
    TimingInputs, TimingSituation, TrustSituation,
};
use crate::planning::strategy::Strategy;
use crate::planning::{aggregator, report, ModuleOutcome, PlanningContext, PlanningModule,
    PlanningResult};

/// Every stage outcome for one assessment run, in orchestration order,
/// plus the deduplicated strategy list and the rendered report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensivePlan {
    pub jurisdiction: String,
    pub generated_on: NaiveDate,
    pub client: ClientProfile,
    pub eligibility: EligibilityResult,
    pub care: ModuleOutcome<CareSituation>,
    pub benefits: ModuleOutcome<BenefitsSituation>,
    pub asset: ModuleOutcome<AssetSituation>,
    pub income: ModuleOutcome<IncomeSituation>,
    pub trust: ModuleOutcome<TrustSituation>,
    pub annuity: ModuleOutcome<AnnuitySituation>,
    pub divestment: ModuleOutcome<DivestmentSituation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spousal: Option<ModuleOutcome<SpousalSituation>>,
    pub timing: ModuleOutcome<TimingSituation>,
    pub maintenance: ModuleOutcome<MaintenanceSituation>,
    pub estate: ModuleOutcome<EstateSituation>,
    pub strategies: Vec<Strategy>,
    pub report: String,
}

impl ComprehensivePlan {
    /// Type-erased per-stage results in orchestration order. The spousal
    /// stage appears only for married clients.
    pub fn results(&self) -> Vec<PlanningResult> {
        let mut results = vec![
            self.care.to_result(),
            self.benefits.to_result(),
            self.asset.to_result(),
            self.income.to_result(),
            self.trust.to_result(),
            self.annuity.to_result(),
            self.divestment.to_result(),
        ];
        if let Some(spousal) = &self.spousal {
            results.push(spousal.to_result());
        }
        results.push(self.timing.to_result());
        results.push(self.maintenance.to_result());
        results.push(self.estate.to_result());
        results
    }

    pub fn result_for(&self, module: PlanningModule) -> Option<PlanningResult> {
        match module {
            PlanningModule::Care => Some(self.care.to_result()),
            PlanningModule::RelatedBenefits => Some(self.benefits.to_result()),
            PlanningModule::Asset => Some(self.asset.to_result()),
            PlanningModule::Income => Some(self.income.to_result()),
            PlanningModule::Trust => Some(self.trust.to_result()),
            PlanningModule::Annuity => Some(self.annuity.to_result()),
            PlanningModule::Divestment => Some(self.divestment.to_result()),
            PlanningModule::Spousal => self.spousal.as_ref().map(ModuleOutcome::to_result),
            PlanningModule::ApplicationTiming => Some(self.timing.to_result()),
            PlanningModule::PostEligibility => Some(self.maintenance.to_result()),
            PlanningModule::EstateRecovery => Some(self.estate.to_result()),
        }
    }
}

/// Run the full planning pipeline. Validation and rule lookup failures
/// abort before any stage runs; once the pipeline starts, a failing stage
/// surfaces as that stage's error outcome and the remaining stages still
/// run.
pub fn run(
    client: &ClientProfile,
    financial: &FinancialProfile,
    rules: &crate::rules::JurisdictionRuleSet,
    jurisdiction: &str,
    today: NaiveDate,
) -> Result<ComprehensivePlan, PlanningError> {
    client.validate()?;
    financial.validate()?;

    let eligibility = eligibility::evaluate(financial, rules, client.marital_status);
    let ctx = PlanningContext {
        client,
        financial,
        rules,
        jurisdiction,
        eligibility: &eligibility,
    };

    tracing::info!(
        jurisdiction,
        eligible = eligibility.eligible,
        spenddown = eligibility.spenddown_amount,
        "starting comprehensive planning run"
    );

    let care = care::run(&ctx);
    let benefits = benefits::run(&ctx);
    let asset = asset::run(&ctx);
    let income = income::run(&ctx);
    let trust = trust::run(&ctx);
    let annuity = annuity::run(&ctx);
    let divestment = divestment::run(&ctx);

    let spousal = client
        .marital_status
        .is_married()
        .then(|| spousal::run(&ctx));

    let timing_inputs = TimingInputs {
        married: client.marital_status.is_married(),
        trust_needed: trust
            .situation
            .as_ref()
            .is_some_and(|situation| situation.needs_trust),
        annuity_recommended: annuity
            .situation
            .as_ref()
            .is_some_and(|situation| situation.appropriate && situation.compliant),
        spenddown_required: eligibility.spenddown_amount > 0.0,
        income_trust_required: income
            .situation
            .as_ref()
            .is_some_and(|situation| situation.needs_income_trust),
        penalty_months: divestment
            .situation
            .as_ref()
            .map(|situation| situation.penalty_months)
            .unwrap_or(0.0),
    };
    let timing = timing::run(&ctx, timing_inputs);

    let share_of_cost = income
        .situation
        .as_ref()
        .map(|situation| situation.share_of_cost);
    let maintenance = maintenance::run(&ctx, share_of_cost);
    let estate = estate::run(&ctx);

    let strategies = {
        let mut stages: Vec<&[Strategy]> = vec![
            &care.strategies,
            &benefits.strategies,
            &asset.strategies,
            &income.strategies,
            &trust.strategies,
            &annuity.strategies,
            &divestment.strategies,
        ];
        if let Some(spousal) = &spousal {
            stages.push(&spousal.strategies);
        }
        stages.push(&timing.strategies);
        stages.push(&maintenance.strategies);
        stages.push(&estate.strategies);
        aggregator::aggregate(stages)
    };

    let mut plan = ComprehensivePlan {
        jurisdiction: jurisdiction.to_string(),
        generated_on: today,
        client: client.clone(),
        eligibility,
        care,
        benefits,
        asset,
        income,
        trust,
        annuity,
        divestment,
        spousal,
        timing,
        maintenance,
        estate,
        strategies,
        report: String::new(),
    };
    plan.report = report::render(&plan);
    Ok(plan)
}
