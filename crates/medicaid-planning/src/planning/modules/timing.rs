use crate::domain::HealthStatus;
use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::{Deserialize, Serialize};

/// Signals collected from earlier stages that shape the filing plan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingInputs {
    pub married: bool,
    pub trust_needed: bool,
    pub annuity_recommended: bool,
    pub spenddown_required: bool,
    pub income_trust_required: bool,
    pub penalty_months: f64,
}

/// Who files and signs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantParty {
    SelfApplicant,
    CommunitySpouse,
    AuthorizedRepresentative,
}

impl ApplicantParty {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfApplicant => "the applicant",
            Self::CommunitySpouse => "the community spouse",
            Self::AuthorizedRepresentative => "an authorized representative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSituation {
    pub filing_party: ApplicantParty,
    pub remediation_needed: bool,
    pub estimated_weeks_to_ready: u32,
    pub documents: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocking_items: Vec<String>,
}

pub fn run(ctx: &PlanningContext<'_>, inputs: TimingInputs) -> ModuleOutcome<TimingSituation> {
    run_stage(PlanningModule::ApplicationTiming, || {
        let situation = assess(ctx, inputs);
        let strategies = determine_strategies(&situation);
        let narrative = narrative(&situation);
        Ok(StageOutput {
            situation,
            strategies,
            narrative,
        })
    })
}

fn assess(ctx: &PlanningContext<'_>, inputs: TimingInputs) -> TimingSituation {
    let client = ctx.client;

    let filing_party = if client.age >= 85 || client.health == HealthStatus::Critical {
        ApplicantParty::AuthorizedRepresentative
    } else if inputs.married {
        ApplicantParty::CommunitySpouse
    } else {
        ApplicantParty::SelfApplicant
    };

    let mut blocking_items = Vec::new();
    if inputs.spenddown_required {
        blocking_items.push("complete the asset spend-down".to_string());
    }
    if inputs.trust_needed {
        blocking_items.push("execute and fund the trust instrument".to_string());
    }
    if inputs.income_trust_required {
        blocking_items.push("open and fund the income trust account".to_string());
    }
    if inputs.annuity_recommended {
        blocking_items.push("purchase the compliant annuity contract".to_string());
    }
    if inputs.penalty_months > 0.0 {
        blocking_items.push(format!(
            "resolve the projected {:.1}-month transfer penalty",
            inputs.penalty_months
        ));
    }

    let remediation_needed = !blocking_items.is_empty();
    let estimated_weeks_to_ready = if remediation_needed { 16 } else { 6 };

    let mut documents = vec![
        "Birth certificate or proof of citizenship".to_string(),
        "Social Security and Medicare cards".to_string(),
        "Five years of statements for every financial account".to_string(),
        "Deeds and current valuations for real property".to_string(),
        "Life insurance policies with cash-value statements".to_string(),
        "Income verification for every income source".to_string(),
        "Physician statement of the level of care required".to_string(),
    ];
    if inputs.married {
        documents.push("Marriage certificate".to_string());
        documents.push("Community spouse income and shelter-cost records".to_string());
    }
    if inputs.trust_needed || inputs.income_trust_required {
        documents.push("Executed trust instrument and trust account statements".to_string());
    }
    if inputs.annuity_recommended {
        documents.push("Annuity contract naming the state remainder beneficiary".to_string());
    }

    TimingSituation {
        filing_party,
        remediation_needed,
        estimated_weeks_to_ready,
        documents,
        blocking_items,
    }
}

fn determine_strategies(situation: &TimingSituation) -> Vec<Strategy> {
    let timing_description = if situation.remediation_needed {
        format!(
            "File only after the blocking items are resolved ({}). Filing early locks in a denial or penalty that correct sequencing avoids.",
            situation.blocking_items.join("; ")
        )
    } else {
        "No remediation is outstanding; file in the month care costs begin so coverage reaches back to the application date.".to_string()
    };

    vec![
        Strategy::new(
            StrategyKind::ApplicationTiming,
            "Application Filing Plan",
            timing_description,
            EffectivenessTier::High,
            if situation.remediation_needed {
                "After remediation completes"
            } else {
                "This month"
            },
            CostBand::Minimal,
        )
        .with_pros(["Correct sequencing avoids avoidable denials and penalty starts"])
        .with_steps(
            situation
                .blocking_items
                .iter()
                .cloned()
                .chain(std::iter::once(format!(
                    "File the application through {}",
                    situation.filing_party.label()
                )))
                .collect::<Vec<_>>(),
        ),
        Strategy::new(
            StrategyKind::DocumentPreparation,
            "Document Assembly",
            format!(
                "Assemble the {}-item verification packet before filing; missing documents are the most common cause of processing delays.",
                situation.documents.len()
            ),
            EffectivenessTier::Medium,
            "Start now",
            CostBand::Minimal,
        )
        .with_steps(situation.documents.clone()),
    ]
}

fn narrative(situation: &TimingSituation) -> String {
    let mut text = format!(
        "The application should be filed through {}; estimated time to a filing-ready position is about {} weeks.",
        situation.filing_party.label(),
        situation.estimated_weeks_to_ready
    );
    if situation.remediation_needed {
        text.push_str(&format!(
            " {} item(s) must be completed first: {}.",
            situation.blocking_items.len(),
            situation.blocking_items.join("; ")
        ));
    } else {
        text.push_str(" No remediation items are outstanding.");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthStatus, MaritalStatus, SpouseProfile};
    use crate::planning::modules::test_support::context_fixture;

    #[test]
    fn clean_profile_files_promptly() {
        let fixture = context_fixture(|client, financial| {
            client.age = 72;
            financial.assets.clear();
            financial.assets.insert("checking".to_string(), 500.0);
        });
        let outcome = run(&fixture.context(), TimingInputs::default());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(situation.filing_party, ApplicantParty::SelfApplicant);
        assert!(!situation.remediation_needed);
        assert_eq!(situation.estimated_weeks_to_ready, 6);
    }

    #[test]
    fn remediation_extends_the_timeline_and_blocks_filing() {
        let fixture = context_fixture(|client, _| {
            client.age = 72;
        });
        let inputs = TimingInputs {
            spenddown_required: true,
            penalty_months: 3.5,
            ..TimingInputs::default()
        };
        let outcome = run(&fixture.context(), inputs);
        let situation = outcome.situation.expect("situation assessed");
        assert!(situation.remediation_needed);
        assert_eq!(situation.estimated_weeks_to_ready, 16);
        assert_eq!(situation.blocking_items.len(), 2);
    }

    #[test]
    fn critical_health_routes_through_a_representative() {
        let fixture = context_fixture(|client, _| {
            client.age = 70;
            client.health = HealthStatus::Critical;
        });
        let outcome = run(&fixture.context(), TimingInputs::default());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(
            situation.filing_party,
            ApplicantParty::AuthorizedRepresentative
        );
    }

    #[test]
    fn married_filing_adds_spousal_documents() {
        let fixture = context_fixture(|client, _| {
            client.age = 72;
            client.marital_status = MaritalStatus::Married;
            client.spouse = Some(SpouseProfile {
                age: 70,
                health: HealthStatus::Good,
                needs_care: false,
                monthly_income: 1_500.0,
            });
        });
        let inputs = TimingInputs {
            married: true,
            ..TimingInputs::default()
        };
        let outcome = run(&fixture.context(), inputs);
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(situation.filing_party, ApplicantParty::CommunitySpouse);
        assert!(situation
            .documents
            .iter()
            .any(|doc| doc == "Marriage certificate"));
    }
}
