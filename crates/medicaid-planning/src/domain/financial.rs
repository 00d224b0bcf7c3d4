use crate::error::PlanningError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferRecipient {
    Spouse,
    DisabledChild,
    CaregiverChild,
    Other,
}

impl TransferRecipient {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spouse => "Spouse",
            Self::DisabledChild => "Disabled child",
            Self::CaregiverChild => "Caregiver child",
            Self::Other => "Other",
        }
    }

    /// Transfers to these recipients fall under statutory exceptions and do
    /// not accrue a penalty period.
    pub const fn is_exempt(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// One uncompensated transfer reported for the lookback review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTransfer {
    pub amount: f64,
    pub months_ago: u32,
    pub recipient: TransferRecipient,
}

/// Normalized financial facts. Keys are lower-snake, values are finite and
/// non-negative; modules consume this shape without re-checking either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    #[serde(default)]
    pub assets: BTreeMap<String, f64>,
    #[serde(default)]
    pub income: BTreeMap<String, f64>,
    #[serde(default)]
    pub expenses: BTreeMap<String, f64>,
    #[serde(default)]
    pub transfers: Vec<AssetTransfer>,
}

impl FinancialProfile {
    pub fn asset(&self, key: &str) -> f64 {
        self.assets.get(key).copied().unwrap_or(0.0)
    }

    pub fn expense(&self, key: &str) -> f64 {
        self.expenses.get(key).copied().unwrap_or(0.0)
    }

    /// Guard for profiles constructed directly rather than through
    /// [`RawFinancialProfile::normalize`].
    pub fn validate(&self) -> Result<(), PlanningError> {
        let entries = self
            .assets
            .iter()
            .chain(self.income.iter())
            .chain(self.expenses.iter());
        for (key, amount) in entries {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(PlanningError::Validation(format!(
                    "financial entry '{key}' has invalid amount {amount}"
                )));
            }
        }

        for transfer in &self.transfers {
            if !transfer.amount.is_finite() || transfer.amount < 0.0 {
                return Err(PlanningError::Validation(format!(
                    "transfer amount {} is invalid",
                    transfer.amount
                )));
            }
        }

        Ok(())
    }
}

/// Loosely shaped financial payload as it arrives at the system boundary:
/// keys in arbitrary case/spacing, amounts as numbers or numeric strings,
/// income either a map of sources or a single bare number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFinancialProfile {
    #[serde(default)]
    pub assets: BTreeMap<String, Value>,
    #[serde(default)]
    pub income: Option<Value>,
    #[serde(default)]
    pub expenses: BTreeMap<String, Value>,
    #[serde(default)]
    pub transfers: Vec<AssetTransfer>,
}

impl RawFinancialProfile {
    /// Normalize once, at the boundary. Malformed values become zero rather
    /// than failing the run; negative amounts are clamped to zero.
    pub fn normalize(self) -> FinancialProfile {
        let assets = normalize_map(self.assets);
        let expenses = normalize_map(self.expenses);

        let income = match self.income {
            Some(Value::Object(map)) => normalize_map(map.into_iter().collect()),
            Some(value) => {
                let mut map = BTreeMap::new();
                let amount = coerce_amount(&value);
                if amount > 0.0 {
                    map.insert("income".to_string(), amount);
                }
                map
            }
            None => BTreeMap::new(),
        };

        let transfers = self
            .transfers
            .into_iter()
            .filter(|transfer| transfer.amount.is_finite() && transfer.amount > 0.0)
            .collect();

        FinancialProfile {
            assets,
            income,
            expenses,
            transfers,
        }
    }
}

fn normalize_map(raw: BTreeMap<String, Value>) -> BTreeMap<String, f64> {
    let mut normalized = BTreeMap::new();
    for (key, value) in raw {
        let key = normalize_key(&key);
        if key.is_empty() {
            continue;
        }
        // Duplicate keys after normalization collapse into one entry.
        *normalized.entry(key).or_insert(0.0) += coerce_amount(&value);
    }
    normalized
}

/// Lower-snake a key: trim, lowercase, collapse any run of non-alphanumeric
/// characters into a single underscore.
pub(crate) fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut last_was_sep = true;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            key.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            key.push('_');
            last_was_sep = true;
        }
    }
    key.trim_end_matches('_').to_string()
}

/// Coerce a loose JSON value into a non-negative dollar amount. Anything
/// non-numeric is zero; that tolerance belongs here, not inside modules.
pub(crate) fn coerce_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().replace([',', '$'], "").parse().unwrap_or(0.0),
        _ => 0.0,
    };

    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_key_collapses_case_and_spacing() {
        assert_eq!(normalize_key("  Primary Residence "), "primary_residence");
        assert_eq!(normalize_key("Social Security"), "social_security");
        assert_eq!(normalize_key("401k"), "401k");
        assert_eq!(normalize_key("Bank--Checking"), "bank_checking");
    }

    #[test]
    fn coerce_amount_handles_strings_and_garbage() {
        assert_eq!(coerce_amount(&json!(1500)), 1500.0);
        assert_eq!(coerce_amount(&json!("2,500")), 2500.0);
        assert_eq!(coerce_amount(&json!("$300")), 300.0);
        assert_eq!(coerce_amount(&json!("n/a")), 0.0);
        assert_eq!(coerce_amount(&json!(-40)), 0.0);
        assert_eq!(coerce_amount(&json!(null)), 0.0);
    }

    #[test]
    fn normalize_wraps_bare_income_number() {
        let raw = RawFinancialProfile {
            income: Some(json!(3200)),
            ..RawFinancialProfile::default()
        };
        let profile = raw.normalize();
        assert_eq!(profile.income.get("income"), Some(&3200.0));
    }

    #[test]
    fn normalize_merges_keys_that_collide_after_cleanup() {
        let raw = RawFinancialProfile {
            assets: [
                ("Checking".to_string(), json!(1000)),
                ("  checking ".to_string(), json!(250)),
            ]
            .into_iter()
            .collect(),
            ..RawFinancialProfile::default()
        };
        let profile = raw.normalize();
        assert_eq!(profile.assets.get("checking"), Some(&1250.0));
    }

    #[test]
    fn normalize_drops_zero_amount_transfers() {
        let raw = RawFinancialProfile {
            transfers: vec![
                AssetTransfer {
                    amount: 0.0,
                    months_ago: 3,
                    recipient: TransferRecipient::Other,
                },
                AssetTransfer {
                    amount: 12_000.0,
                    months_ago: 10,
                    recipient: TransferRecipient::Other,
                },
            ],
            ..RawFinancialProfile::default()
        };
        let profile = raw.normalize();
        assert_eq!(profile.transfers.len(), 1);
    }

    #[test]
    fn validate_flags_negative_direct_entries() {
        let mut profile = FinancialProfile::default();
        profile.assets.insert("savings".to_string(), -10.0);
        assert!(profile.validate().is_err());
    }
}
