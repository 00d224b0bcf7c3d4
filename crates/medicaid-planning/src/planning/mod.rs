pub mod aggregator;
pub mod modules;
pub mod orchestrator;
pub mod report;
pub mod strategy;

pub use orchestrator::ComprehensivePlan;
pub use strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};

use crate::domain::{ClientProfile, FinancialProfile};
use crate::eligibility::EligibilityResult;
use crate::error::PlanningError;
use crate::rules::JurisdictionRuleSet;
use serde::{Deserialize, Serialize};

/// Planning stages in their fixed orchestration order. Asset and income
/// remediation run before the trust/annuity/divestment instruments that
/// depend on their figures; spousal runs only for married clients;
/// application timing consumes every prior outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanningModule {
    Care,
    RelatedBenefits,
    Asset,
    Income,
    Trust,
    Annuity,
    Divestment,
    Spousal,
    ApplicationTiming,
    PostEligibility,
    EstateRecovery,
}

impl PlanningModule {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Care,
            Self::RelatedBenefits,
            Self::Asset,
            Self::Income,
            Self::Trust,
            Self::Annuity,
            Self::Divestment,
            Self::Spousal,
            Self::ApplicationTiming,
            Self::PostEligibility,
            Self::EstateRecovery,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Care => "Care Needs",
            Self::RelatedBenefits => "Related Benefits",
            Self::Asset => "Asset Planning",
            Self::Income => "Income & Share of Cost",
            Self::Trust => "Trust Planning",
            Self::Annuity => "Annuity Planning",
            Self::Divestment => "Divestment Review",
            Self::Spousal => "Community Spouse Protection",
            Self::ApplicationTiming => "Application Timing",
            Self::PostEligibility => "Post-Eligibility Maintenance",
            Self::EstateRecovery => "Estate Recovery",
        }
    }

    /// Stable key used for routing and log fields.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Care => "care",
            Self::RelatedBenefits => "related-benefits",
            Self::Asset => "asset",
            Self::Income => "income",
            Self::Trust => "trust",
            Self::Annuity => "annuity",
            Self::Divestment => "divestment",
            Self::Spousal => "spousal",
            Self::ApplicationTiming => "application-timing",
            Self::PostEligibility => "post-eligibility",
            Self::EstateRecovery => "estate-recovery",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|module| module.key() == key.trim().to_ascii_lowercase())
    }
}

/// Outcome status carried by every per-module result. Serialized as the
/// `status`/`error` envelope callers branch on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "error")]
pub enum ModuleStatus {
    Success,
    Error(String),
}

impl ModuleStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ModuleStatus::Success)
    }
}

/// One planning stage's result: situation assessment, strategy list, and
/// narrative, or an error status when the stage failed internally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleOutcome<S> {
    pub module: PlanningModule,
    #[serde(flatten)]
    pub status: ModuleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<S>,
    pub strategies: Vec<Strategy>,
    pub narrative: String,
}

impl<S: Serialize> ModuleOutcome<S> {
    /// Type-erased view for reports and the per-module API contract.
    pub fn to_result(&self) -> PlanningResult {
        PlanningResult {
            module: self.module,
            status: self.status.clone(),
            situation: self
                .situation
                .as_ref()
                .and_then(|situation| serde_json::to_value(situation).ok()),
            strategies: self.strategies.clone(),
            narrative: self.narrative.clone(),
        }
    }
}

/// Uniform, type-erased per-module result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningResult {
    pub module: PlanningModule,
    #[serde(flatten)]
    pub status: ModuleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<serde_json::Value>,
    pub strategies: Vec<Strategy>,
    pub narrative: String,
}

/// Read-only inputs shared by every planning stage.
#[derive(Debug, Clone, Copy)]
pub struct PlanningContext<'a> {
    pub client: &'a ClientProfile,
    pub financial: &'a FinancialProfile,
    pub rules: &'a JurisdictionRuleSet,
    pub jurisdiction: &'a str,
    pub eligibility: &'a EligibilityResult,
}

pub(crate) struct StageOutput<S> {
    pub situation: S,
    pub strategies: Vec<Strategy>,
    pub narrative: String,
}

/// Run one stage, converting any internal failure into that stage's
/// error-status outcome. Validation and lookup errors never reach this
/// wrapper; they abort the run before the pipeline starts.
pub(crate) fn run_stage<S, F>(module: PlanningModule, stage: F) -> ModuleOutcome<S>
where
    F: FnOnce() -> Result<StageOutput<S>, PlanningError>,
{
    match stage() {
        Ok(output) => ModuleOutcome {
            module,
            status: ModuleStatus::Success,
            situation: Some(output.situation),
            strategies: output.strategies,
            narrative: output.narrative,
        },
        Err(err) => {
            tracing::warn!(module = module.key(), error = %err, "planning stage failed");
            ModuleOutcome {
                module,
                status: ModuleStatus::Error(err.to_string()),
                situation: None,
                strategies: Vec::new(),
                narrative: String::new(),
            }
        }
    }
}
