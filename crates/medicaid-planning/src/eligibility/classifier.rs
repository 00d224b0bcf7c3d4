use crate::rules::JurisdictionRuleSet;
use std::collections::BTreeMap;

/// Non-countable allowance for one vehicle; value above it counts toward
/// the resource limit.
pub const VEHICLE_EXEMPTION: f64 = 4_650.0;

/// Split of an asset map into countable and exempt totals. Classification
/// is a partition: the two figures always sum to the input total.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssetClassification {
    pub countable: f64,
    pub non_countable: f64,
}

pub(crate) fn is_home_key(key: &str) -> bool {
    matches!(key, "home" | "primary_residence" | "house" | "homestead")
}

fn is_vehicle_key(key: &str) -> bool {
    matches!(key, "vehicle" | "car" | "automobile" | "auto")
}

fn is_fully_exempt_key(key: &str) -> bool {
    matches!(
        key,
        "burial_funds"
            | "prepaid_funeral"
            | "burial_plot"
            | "funeral_plan"
            | "irrevocable_funeral"
            | "term_life"
            | "term_life_insurance"
            | "personal_effects"
            | "household_goods"
            | "personal_property"
            | "non_countable"
            | "exempt"
    )
}

/// Classify every asset entry against the fixed exemption vocabulary. The
/// primary residence is exempt up to the jurisdiction's home-equity limit,
/// a vehicle up to [`VEHICLE_EXEMPTION`]; burial arrangements, term life
/// insurance, and personal effects are fully exempt. Everything else,
/// retirement accounts included, is countable.
pub fn classify_assets(
    assets: &BTreeMap<String, f64>,
    rules: &JurisdictionRuleSet,
) -> AssetClassification {
    let mut classification = AssetClassification::default();

    for (key, amount) in assets {
        let exempt_portion = if is_home_key(key) {
            amount.min(rules.home_equity_limit)
        } else if is_vehicle_key(key) {
            amount.min(VEHICLE_EXEMPTION)
        } else if is_fully_exempt_key(key) {
            *amount
        } else {
            0.0
        };

        classification.non_countable += exempt_portion;
        classification.countable += amount - exempt_portion;
    }

    classification
}

/// Sum all monthly income sources. Malformed entries were zeroed at the
/// normalization boundary, so this never fails.
pub fn total_income(income: &BTreeMap<String, f64>) -> f64 {
    income.values().sum()
}
