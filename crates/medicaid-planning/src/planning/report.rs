use std::fmt::Write;

use crate::planning::orchestrator::ComprehensivePlan;
use crate::planning::{ModuleStatus, PlanningResult};

/// Render the plan as a plain-text advisory report: header, eligibility
/// summary, one section per stage in orchestration order, then the
/// combined strategy list.
pub fn render(plan: &ComprehensivePlan) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "LONG-TERM CARE PLANNING REPORT");
    let _ = writeln!(
        out,
        "Jurisdiction: {} | Generated: {}",
        title_case(&plan.jurisdiction),
        plan.generated_on
    );
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out);

    let eligibility = &plan.eligibility;
    let _ = writeln!(out, "ELIGIBILITY SUMMARY");
    let _ = writeln!(
        out,
        "  Countable assets: ${:.2} (limit ${:.2})",
        eligibility.countable_assets, eligibility.resource_limit
    );
    let _ = writeln!(
        out,
        "  Monthly income:   ${:.2} (limit ${:.2})",
        eligibility.total_income, eligibility.income_limit
    );
    let _ = writeln!(
        out,
        "  Status: {}",
        if eligibility.eligible {
            "eligible now".to_string()
        } else if eligibility.spenddown_amount > 0.0 {
            format!("not yet eligible; ${:.2} spend-down required", eligibility.spenddown_amount)
        } else {
            "not yet eligible; income exceeds the limit".to_string()
        }
    );
    let _ = writeln!(out);

    for result in plan.results() {
        render_section(&mut out, &result);
    }

    let _ = writeln!(out, "RECOMMENDED STRATEGIES ({})", plan.strategies.len());
    for (index, strategy) in plan.strategies.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} [{} / effectiveness: {} / cost: {}]",
            index + 1,
            strategy.name,
            strategy.timing,
            strategy.effectiveness.label(),
            strategy.cost.label()
        );
        let _ = writeln!(out, "     {}", strategy.description);
    }

    out
}

fn render_section(out: &mut String, result: &PlanningResult) {
    let _ = writeln!(out, "{}", result.module.label().to_uppercase());
    match &result.status {
        ModuleStatus::Success => {
            let _ = writeln!(out, "  {}", result.narrative);
        }
        ModuleStatus::Error(message) => {
            let _ = writeln!(out, "  This section could not be assessed: {message}");
        }
    }
    let _ = writeln!(out);
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientProfile, FinancialProfile, HealthStatus, MaritalStatus};
    use crate::planning::orchestrator;
    use crate::rules::RuleRepository;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample_plan() -> ComprehensivePlan {
        let client = ClientProfile {
            age: 82,
            marital_status: MaritalStatus::Single,
            health: HealthStatus::Fair,
            in_crisis: false,
            veteran: false,
            relocation_planned: false,
            life_expectancy_years: None,
            spouse: None,
            dependents: Vec::new(),
        };
        let mut assets = BTreeMap::new();
        assets.insert("savings".to_string(), 50_000.0);
        let mut income = BTreeMap::new();
        income.insert("social_security".to_string(), 1_500.0);
        let financial = FinancialProfile {
            assets,
            income,
            ..FinancialProfile::default()
        };
        let repository = RuleRepository::builtin();
        let rules = repository.get("florida").expect("florida rules");
        orchestrator::run(
            &client,
            &financial,
            rules,
            "florida",
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
        )
        .expect("plan builds")
    }

    #[test]
    fn sections_appear_in_orchestration_order() {
        let plan = sample_plan();
        let report = render(&plan);

        let mut last = 0;
        for result in plan.results() {
            let heading = result.module.label().to_uppercase();
            let position = report[last..]
                .find(&heading)
                .unwrap_or_else(|| panic!("section '{heading}' missing or out of order"));
            last += position + heading.len();
        }
    }

    #[test]
    fn report_names_jurisdiction_and_spenddown() {
        let report = render(&sample_plan());
        assert!(report.contains("Florida"));
        assert!(report.contains("$48000.00 spend-down required"));
        assert!(report.contains("RECOMMENDED STRATEGIES"));
    }

    #[test]
    fn title_case_handles_multi_word_keys() {
        assert_eq!(title_case("new_york"), "New York");
        assert_eq!(title_case("florida"), "Florida");
    }
}
