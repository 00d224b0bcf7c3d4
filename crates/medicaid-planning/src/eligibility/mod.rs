pub mod classifier;
pub mod evaluator;

pub use classifier::{classify_assets, total_income, AssetClassification, VEHICLE_EXEMPTION};
pub use evaluator::evaluate;

use serde::{Deserialize, Serialize};

/// Derived eligibility figures for one assessment run. This is the single
/// point downstream planning stages consult for "does this client currently
/// qualify"; none of them recompute it.
///
/// Invariants: `spenddown_amount == max(0, countable_assets -
/// resource_limit)` and `resource_eligible == (countable_assets <=
/// resource_limit)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub countable_assets: f64,
    pub non_countable_assets: f64,
    pub resource_limit: f64,
    pub spenddown_amount: f64,
    pub resource_eligible: bool,
    pub total_income: f64,
    pub income_limit: f64,
    pub income_eligible: bool,
    pub eligible: bool,
}
