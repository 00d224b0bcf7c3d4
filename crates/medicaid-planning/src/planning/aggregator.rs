use std::collections::HashSet;

use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};

/// Flatten the per-stage strategy lists into one recommendation list.
/// Stage order is preserved, duplicates (same kind and name) keep their
/// first occurrence, and an empty result falls back to a consultation
/// referral so callers always receive at least one recommendation.
pub fn aggregate<'a, I>(stage_strategies: I) -> Vec<Strategy>
where
    I: IntoIterator<Item = &'a [Strategy]>,
{
    let mut seen = HashSet::new();
    let mut combined = Vec::new();

    for strategies in stage_strategies {
        for strategy in strategies {
            if seen.insert(strategy.dedup_key()) {
                combined.push(strategy.clone());
            }
        }
    }

    if combined.is_empty() {
        combined.push(consultation_fallback());
    }

    combined
}

fn consultation_fallback() -> Strategy {
    Strategy::new(
        StrategyKind::ProfessionalConsultation,
        "Elder Law Consultation",
        "No individual planning actions are indicated by the current profile. A review with an elder-law attorney confirms the position and catches anything the structured assessment cannot see.",
        EffectivenessTier::Medium,
        "At convenience",
        CostBand::Moderate,
    )
}
