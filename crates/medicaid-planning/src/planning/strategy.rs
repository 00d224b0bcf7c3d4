use serde::{Deserialize, Serialize};

/// Closed vocabulary of remediation strategy types. Every planning stage
/// emits this canonical shape; the aggregator deduplicates on
/// `(kind, name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    SpendDown,
    ExemptionConversion,
    AssetRetitling,
    HomeEquityReduction,
    MillerTrust,
    IrrevocableTrust,
    SpecialNeedsTrust,
    Annuity,
    PenaltyMitigation,
    SpousalAllowance,
    SpousalResourceTransfer,
    ApplicationTiming,
    DocumentPreparation,
    PatientLiabilityManagement,
    AnnualRedetermination,
    RelocationPlanning,
    EstateRecoveryProtection,
    BenefitCoordination,
    CarePlacement,
    ProfessionalConsultation,
}

impl StrategyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SpendDown => "Spend-Down",
            Self::ExemptionConversion => "Exemption Conversion",
            Self::AssetRetitling => "Asset Retitling",
            Self::HomeEquityReduction => "Home Equity Reduction",
            Self::MillerTrust => "Qualified Income Trust",
            Self::IrrevocableTrust => "Irrevocable Trust",
            Self::SpecialNeedsTrust => "Special Needs Trust",
            Self::Annuity => "Medicaid-Compliant Annuity",
            Self::PenaltyMitigation => "Transfer Penalty Mitigation",
            Self::SpousalAllowance => "Spousal Income Allowance",
            Self::SpousalResourceTransfer => "Spousal Resource Transfer",
            Self::ApplicationTiming => "Application Timing",
            Self::DocumentPreparation => "Document Preparation",
            Self::PatientLiabilityManagement => "Patient Liability Management",
            Self::AnnualRedetermination => "Annual Redetermination",
            Self::RelocationPlanning => "Relocation Planning",
            Self::EstateRecoveryProtection => "Estate Recovery Protection",
            Self::BenefitCoordination => "Benefit Coordination",
            Self::CarePlacement => "Care Placement",
            Self::ProfessionalConsultation => "Professional Consultation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessTier {
    High,
    Medium,
    Low,
}

impl EffectivenessTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Rough professional-fee band; narrative reports print the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBand {
    Minimal,
    Moderate,
    Substantial,
}

impl CostBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Moderate => "Moderate",
            Self::Substantial => "Substantial",
        }
    }
}

/// Immutable strategy recommendation. Strategies are value objects;
/// equivalence for deduplication purposes is `(kind, name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub kind: StrategyKind,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    pub effectiveness: EffectivenessTier,
    pub timing: String,
    pub cost: CostBand,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

impl Strategy {
    pub fn new(
        kind: StrategyKind,
        name: impl Into<String>,
        description: impl Into<String>,
        effectiveness: EffectivenessTier,
        timing: impl Into<String>,
        cost: CostBand,
    ) -> Self {
        let name = name.into();
        Self {
            id: slug(&name),
            kind,
            name,
            description: description.into(),
            pros: Vec::new(),
            cons: Vec::new(),
            effectiveness,
            timing: timing.into(),
            cost,
            steps: Vec::new(),
        }
    }

    pub fn with_pros<I: IntoIterator<Item = &'static str>>(mut self, pros: I) -> Self {
        self.pros = pros.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_cons<I: IntoIterator<Item = &'static str>>(mut self, cons: I) -> Self {
        self.cons = cons.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_steps<I: IntoIterator<Item = String>>(mut self, steps: I) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Key used for cross-module deduplication.
    pub fn dedup_key(&self) -> (StrategyKind, String) {
        (self.kind, self.name.trim().to_ascii_lowercase())
    }
}

fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_a_slug_of_the_name() {
        let strategy = Strategy::new(
            StrategyKind::SpendDown,
            "Accelerated Spend-Down Plan",
            "Reduce countable assets below the limit.",
            EffectivenessTier::High,
            "Before application",
            CostBand::Minimal,
        );
        assert_eq!(strategy.id, "accelerated-spend-down-plan");
    }

    #[test]
    fn dedup_key_ignores_name_case() {
        let a = Strategy::new(
            StrategyKind::MillerTrust,
            "Qualified Income Trust",
            "",
            EffectivenessTier::High,
            "now",
            CostBand::Moderate,
        );
        let b = Strategy::new(
            StrategyKind::MillerTrust,
            "qualified income trust",
            "",
            EffectivenessTier::High,
            "now",
            CostBand::Moderate,
        );
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&StrategyKind::MillerTrust).expect("serializes");
        assert_eq!(json, "\"miller-trust\"");
        let json = serde_json::to_string(&StrategyKind::SpousalAllowance).expect("serializes");
        assert_eq!(json, "\"spousal-allowance\"");
    }
}
