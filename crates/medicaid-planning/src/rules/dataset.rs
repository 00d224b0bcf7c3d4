use super::JurisdictionRuleSet;
use std::collections::BTreeMap;

/// 2025 reference figures for the jurisdictions the engine ships with.
/// Income-cap states name their qualified-income-trust instrument; the
/// engine refuses to invent one when the dataset omits it.
pub(super) fn builtin_table() -> BTreeMap<String, JurisdictionRuleSet> {
    let mut table = BTreeMap::new();

    table.insert(
        "florida".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 2_000.0,
            resource_limit_married: 3_000.0,
            income_limit_single: 2_901.0,
            income_limit_married: 5_802.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 160.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 10_809.0,
            income_cap: true,
            income_trust_name: Some("Qualified Income Trust".to_string()),
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "texas".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 2_000.0,
            resource_limit_married: 3_000.0,
            income_limit_single: 2_901.0,
            income_limit_married: 5_802.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 75.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 7_156.0,
            income_cap: true,
            income_trust_name: Some("Miller Trust".to_string()),
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "georgia".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 2_000.0,
            resource_limit_married: 3_000.0,
            income_limit_single: 2_901.0,
            income_limit_married: 5_802.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 70.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 8_518.0,
            income_cap: true,
            income_trust_name: Some("Qualified Income Trust".to_string()),
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "iowa".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 2_000.0,
            resource_limit_married: 3_000.0,
            income_limit_single: 2_901.0,
            income_limit_married: 5_802.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 50.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 7_757.0,
            income_cap: true,
            income_trust_name: Some("Medical Assistance Income Trust".to_string()),
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "ohio".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 2_000.0,
            resource_limit_married: 3_000.0,
            income_limit_single: 2_901.0,
            income_limit_married: 5_802.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 50.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 7_454.0,
            income_cap: true,
            income_trust_name: Some("Qualified Income Trust".to_string()),
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "california".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 130_000.0,
            resource_limit_married: 195_000.0,
            income_limit_single: 1_801.0,
            income_limit_married: 2_433.0,
            home_equity_limit: 1_097_000.0,
            personal_needs_allowance: 35.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 30,
            average_monthly_care_cost: 10_933.0,
            income_cap: false,
            income_trust_name: None,
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "new_york".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 32_396.0,
            resource_limit_married: 43_781.0,
            income_limit_single: 1_800.0,
            income_limit_married: 2_433.0,
            home_equity_limit: 1_097_000.0,
            personal_needs_allowance: 50.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 14_273.0,
            income_cap: false,
            income_trust_name: None,
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "pennsylvania".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 2_400.0,
            resource_limit_married: 4_800.0,
            income_limit_single: 2_901.0,
            income_limit_married: 5_802.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 60.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 11_109.0,
            income_cap: false,
            income_trust_name: None,
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "illinois".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 17_500.0,
            resource_limit_married: 26_250.0,
            income_limit_single: 1_304.0,
            income_limit_married: 1_763.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 60.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 6_950.0,
            income_cap: false,
            income_trust_name: None,
            min_annuity_term_months: 6,
        },
    );

    table.insert(
        "michigan".to_string(),
        JurisdictionRuleSet {
            resource_limit_single: 2_000.0,
            resource_limit_married: 3_000.0,
            income_limit_single: 2_901.0,
            income_limit_married: 5_802.0,
            home_equity_limit: 730_000.0,
            personal_needs_allowance: 60.0,
            mmna_min: 2_555.0,
            mmna_max: 3_948.0,
            lookback_months: 60,
            average_monthly_care_cost: 9_560.0,
            income_cap: false,
            income_trust_name: None,
            min_annuity_term_months: 6,
        },
    );

    table
}

const ALIASES: &[(&str, &str)] = &[
    ("fl", "florida"),
    ("tx", "texas"),
    ("ga", "georgia"),
    ("ia", "iowa"),
    ("oh", "ohio"),
    ("ca", "california"),
    ("ny", "new_york"),
    ("pa", "pennsylvania"),
    ("il", "illinois"),
    ("mi", "michigan"),
];

pub(super) fn resolve_alias(normalized: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, full)| *full)
}
