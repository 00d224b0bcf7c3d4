use crate::error::PlanningError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married",
            Self::Widowed => "Widowed",
            Self::Divorced => "Divorced",
        }
    }

    /// Only `Married` selects married-tier limits; widowed and divorced
    /// applicants are assessed against the single tier.
    pub const fn is_married(self) -> bool {
        matches!(self, Self::Married)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Good,
    Fair,
    Declining,
    Critical,
}

impl HealthStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Declining => "Declining",
            Self::Critical => "Critical",
        }
    }
}

/// Community (non-applicant) spouse facts used for CSRA and MMNA math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpouseProfile {
    pub age: u8,
    pub health: HealthStatus,
    #[serde(default)]
    pub needs_care: bool,
    #[serde(default)]
    pub monthly_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependent {
    pub relationship: String,
    pub age: u8,
    #[serde(default)]
    pub special_needs: bool,
    #[serde(default)]
    pub disabled: bool,
}

/// Identity-agnostic demographic facts for one assessment run. Immutable
/// once constructed; every stage receives it by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub age: u8,
    pub marital_status: MaritalStatus,
    pub health: HealthStatus,
    #[serde(default)]
    pub in_crisis: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub relocation_planned: bool,
    #[serde(default)]
    pub life_expectancy_years: Option<f64>,
    #[serde(default)]
    pub spouse: Option<SpouseProfile>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

impl ClientProfile {
    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.age < 18 || self.age > 120 {
            return Err(PlanningError::Validation(format!(
                "applicant age {} outside supported range 18-120",
                self.age
            )));
        }

        if self.marital_status.is_married() && self.spouse.is_none() {
            return Err(PlanningError::Validation(
                "married applicant requires a spouse profile".to_string(),
            ));
        }

        if let Some(expectancy) = self.life_expectancy_years {
            if !expectancy.is_finite() || expectancy <= 0.0 {
                return Err(PlanningError::Validation(format!(
                    "life expectancy {expectancy} must be a positive number of years"
                )));
            }
        }

        Ok(())
    }

    pub fn spouse_income(&self) -> f64 {
        self.spouse
            .as_ref()
            .map(|spouse| spouse.monthly_income)
            .unwrap_or(0.0)
    }

    pub fn has_special_needs_dependent(&self) -> bool {
        self.dependents
            .iter()
            .any(|dependent| dependent.special_needs || dependent.disabled)
    }
}
