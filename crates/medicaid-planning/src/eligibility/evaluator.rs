use super::classifier::{classify_assets, total_income};
use super::EligibilityResult;
use crate::domain::{FinancialProfile, MaritalStatus};
use crate::rules::JurisdictionRuleSet;

/// Combine the asset classification with the jurisdiction's limits into
/// eligibility flags and the spend-down figure.
pub fn evaluate(
    financial: &FinancialProfile,
    rules: &JurisdictionRuleSet,
    status: MaritalStatus,
) -> EligibilityResult {
    let classification = classify_assets(&financial.assets, rules);
    let resource_limit = rules.resource_limit(status);
    let income_limit = rules.income_limit(status);
    let income = total_income(&financial.income);

    let spenddown_amount = (classification.countable - resource_limit).max(0.0);
    let resource_eligible = classification.countable <= resource_limit;
    let income_eligible = income <= income_limit;

    EligibilityResult {
        countable_assets: classification.countable,
        non_countable_assets: classification.non_countable,
        resource_limit,
        spenddown_amount,
        resource_eligible,
        total_income: income,
        income_limit,
        income_eligible,
        eligible: resource_eligible && income_eligible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleRepository;
    use std::collections::BTreeMap;

    fn profile(countable: f64, monthly_income: f64) -> FinancialProfile {
        let mut assets = BTreeMap::new();
        assets.insert("savings".to_string(), countable);
        let mut income = BTreeMap::new();
        income.insert("social_security".to_string(), monthly_income);
        FinancialProfile {
            assets,
            income,
            ..FinancialProfile::default()
        }
    }

    #[test]
    fn florida_single_with_excess_assets_owes_spenddown() {
        let repository = RuleRepository::builtin();
        let rules = repository.get("florida").expect("florida rules");
        let result = evaluate(&profile(50_000.0, 1_500.0), rules, MaritalStatus::Single);

        assert!(!result.resource_eligible);
        assert_eq!(result.resource_limit, 2_000.0);
        assert_eq!(result.spenddown_amount, 48_000.0);
        assert!(result.income_eligible);
        assert!(!result.eligible);
    }

    #[test]
    fn spenddown_is_zero_whenever_resource_eligible() {
        let repository = RuleRepository::builtin();
        let rules = repository.get("michigan").expect("michigan rules");
        let result = evaluate(&profile(1_200.0, 900.0), rules, MaritalStatus::Single);

        assert!(result.resource_eligible);
        assert_eq!(result.spenddown_amount, 0.0);
        assert!(result.eligible);
    }

    #[test]
    fn married_status_selects_married_tier_limits() {
        let repository = RuleRepository::builtin();
        let rules = repository.get("texas").expect("texas rules");
        let result = evaluate(&profile(2_500.0, 3_000.0), rules, MaritalStatus::Married);

        assert_eq!(result.resource_limit, rules.resource_limit_married);
        assert_eq!(result.income_limit, rules.income_limit_married);
        assert!(result.resource_eligible);
    }

    #[test]
    fn widowed_clients_use_the_single_tier() {
        let repository = RuleRepository::builtin();
        let rules = repository.get("texas").expect("texas rules");
        let result = evaluate(&profile(2_500.0, 1_000.0), rules, MaritalStatus::Widowed);
        assert_eq!(result.resource_limit, rules.resource_limit_single);
        assert!(!result.resource_eligible);
    }
}
