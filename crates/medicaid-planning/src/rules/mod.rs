mod dataset;

use crate::domain::MaritalStatus;
use crate::error::PlanningError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Per-jurisdiction eligibility limits, loaded once and treated as
/// read-only reference data. Every numeric field is required: a dataset
/// entry missing one fails at load time instead of silently defaulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionRuleSet {
    pub resource_limit_single: f64,
    pub resource_limit_married: f64,
    pub income_limit_single: f64,
    pub income_limit_married: f64,
    pub home_equity_limit: f64,
    pub personal_needs_allowance: f64,
    pub mmna_min: f64,
    pub mmna_max: f64,
    pub lookback_months: u32,
    pub average_monthly_care_cost: f64,
    pub income_cap: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_trust_name: Option<String>,
    pub min_annuity_term_months: u32,
}

impl JurisdictionRuleSet {
    pub fn resource_limit(&self, status: MaritalStatus) -> f64 {
        if status.is_married() {
            self.resource_limit_married
        } else {
            self.resource_limit_single
        }
    }

    pub fn income_limit(&self, status: MaritalStatus) -> f64 {
        if status.is_married() {
            self.income_limit_married
        } else {
            self.income_limit_single
        }
    }
}

/// Income-trust projection for income-cap jurisdictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeTrustRequirement {
    pub trust_name: String,
    pub income_limit: f64,
    pub excess_income: f64,
}

/// Immutable table of jurisdiction rule sets keyed by canonical
/// lower-snake name, with alias lookup for two-letter codes and loose
/// case/spacing variants. Constructed explicitly and handed to the engine;
/// there is no process-global table.
#[derive(Debug, Clone)]
pub struct RuleRepository {
    table: BTreeMap<String, JurisdictionRuleSet>,
}

impl RuleRepository {
    /// Table compiled into the crate (`rules/dataset.rs`).
    pub fn builtin() -> Self {
        Self {
            table: dataset::builtin_table(),
        }
    }

    pub fn from_table(table: BTreeMap<String, JurisdictionRuleSet>) -> Self {
        Self { table }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PlanningError> {
        let table: BTreeMap<String, JurisdictionRuleSet> = serde_json::from_reader(reader)
            .map_err(|err| PlanningError::Data(err.to_string()))?;
        Ok(Self {
            table: table
                .into_iter()
                .map(|(key, rules)| (canonical_form(&key), rules))
                .collect(),
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PlanningError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|err| {
            PlanningError::Data(format!(
                "cannot open rule dataset {}: {err}",
                path.as_ref().display()
            ))
        })?;
        Self::from_reader(file)
    }

    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Resolve a jurisdiction name to its canonical table key. Full names,
    /// two-letter codes, and case/spacing variants all map to one key.
    pub fn canonical_key(&self, jurisdiction: &str) -> Result<String, PlanningError> {
        let normalized = canonical_form(jurisdiction);
        if normalized.is_empty() {
            return Err(PlanningError::Validation(
                "jurisdiction must not be empty".to_string(),
            ));
        }

        if self.table.contains_key(&normalized) {
            return Ok(normalized);
        }

        if let Some(full) = dataset::resolve_alias(&normalized) {
            if self.table.contains_key(full) {
                return Ok(full.to_string());
            }
        }

        Err(PlanningError::UnknownJurisdiction {
            requested: jurisdiction.trim().to_string(),
        })
    }

    pub fn get(&self, jurisdiction: &str) -> Result<&JurisdictionRuleSet, PlanningError> {
        let key = self.canonical_key(jurisdiction)?;
        self.table
            .get(&key)
            .ok_or_else(|| PlanningError::UnknownJurisdiction {
                requested: jurisdiction.trim().to_string(),
            })
    }

    /// Look up a rule set and apply a deep-merge override on a fresh copy.
    /// The base table is never mutated; applying the same override twice
    /// yields the same result as applying it once.
    pub fn get_with_overrides(
        &self,
        jurisdiction: &str,
        overrides: Option<&Value>,
    ) -> Result<JurisdictionRuleSet, PlanningError> {
        let base = self.get(jurisdiction)?;
        match overrides {
            None => Ok(base.clone()),
            Some(overrides) => apply_overrides(base, overrides),
        }
    }

    /// Projection kept consistent with `get` for the same jurisdiction.
    pub fn home_equity_limit(&self, jurisdiction: &str) -> Result<f64, PlanningError> {
        Ok(self.get(jurisdiction)?.home_equity_limit)
    }

    /// Whether the jurisdiction requires a qualified income trust at the
    /// given monthly income. `None` when no trust is needed; an error when
    /// the dataset flags an income cap but names no trust instrument.
    pub fn income_trust_requirement(
        &self,
        jurisdiction: &str,
        total_income: f64,
        status: MaritalStatus,
    ) -> Result<Option<IncomeTrustRequirement>, PlanningError> {
        let key = self.canonical_key(jurisdiction)?;
        let rules = &self.table[&key];
        let limit = rules.income_limit(status);
        if !rules.income_cap || total_income <= limit {
            return Ok(None);
        }

        let trust_name =
            rules
                .income_trust_name
                .clone()
                .ok_or(PlanningError::MissingRuleField {
                    jurisdiction: key,
                    field: "income_trust_name",
                })?;

        Ok(Some(IncomeTrustRequirement {
            trust_name,
            income_limit: limit,
            excess_income: total_income - limit,
        }))
    }
}

/// Merge an override document onto a rule set without touching the base:
/// serialize, deep-merge key-by-key (override scalars replace base scalars,
/// nested objects merge recursively), deserialize back into the strict type.
pub fn apply_overrides(
    base: &JurisdictionRuleSet,
    overrides: &Value,
) -> Result<JurisdictionRuleSet, PlanningError> {
    let mut merged = serde_json::to_value(base)
        .map_err(|err| PlanningError::Data(format!("rule set serialization failed: {err}")))?;
    merge_values(&mut merged, overrides);
    serde_json::from_value(merged)
        .map_err(|err| PlanningError::Data(format!("rule override produced invalid table: {err}")))
}

fn merge_values(base: &mut Value, overrides: &Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overrides) => *base = overrides.clone(),
    }
}

fn canonical_form(raw: &str) -> String {
    crate::domain::financial::normalize_key(raw)
}
