use crate::domain::HealthStatus;
use crate::planning::strategy::{CostBand, EffectivenessTier, Strategy, StrategyKind};
use crate::planning::{run_stage, ModuleOutcome, PlanningContext, PlanningModule, StageOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareLevel {
    InHome,
    AssistedLiving,
    NursingFacility,
}

impl CareLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InHome => "In-Home Care",
            Self::AssistedLiving => "Assisted Living",
            Self::NursingFacility => "Skilled Nursing Facility",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareSituation {
    pub recommended_level: CareLevel,
    pub urgent: bool,
    pub reasons: Vec<String>,
}

pub fn run(ctx: &PlanningContext<'_>) -> ModuleOutcome<CareSituation> {
    run_stage(PlanningModule::Care, || {
        let situation = assess(ctx);
        let strategies = determine_strategies(&situation);
        let narrative = narrative(&situation);
        Ok(StageOutput {
            situation,
            strategies,
            narrative,
        })
    })
}

fn assess(ctx: &PlanningContext<'_>) -> CareSituation {
    let client = ctx.client;
    let mut reasons = Vec::new();

    let recommended_level = match client.health {
        HealthStatus::Critical => {
            reasons.push("Critical health status requires skilled nursing support".to_string());
            CareLevel::NursingFacility
        }
        HealthStatus::Declining if client.in_crisis => {
            reasons.push(
                "Declining health combined with a care crisis points to facility placement"
                    .to_string(),
            );
            CareLevel::NursingFacility
        }
        HealthStatus::Declining => {
            reasons.push("Declining health supports supervised residential care".to_string());
            CareLevel::AssistedLiving
        }
        HealthStatus::Fair if client.age >= 85 => {
            reasons.push(format!(
                "Age {} with fair health favors a supported setting",
                client.age
            ));
            CareLevel::AssistedLiving
        }
        _ => {
            reasons.push("Current health supports remaining at home with services".to_string());
            CareLevel::InHome
        }
    };

    CareSituation {
        recommended_level,
        urgent: client.in_crisis || client.health == HealthStatus::Critical,
        reasons,
    }
}

fn determine_strategies(situation: &CareSituation) -> Vec<Strategy> {
    if situation.recommended_level == CareLevel::InHome && !situation.urgent {
        return Vec::new();
    }

    let timing = if situation.urgent {
        "Immediately"
    } else {
        "Within 60 days"
    };

    vec![Strategy::new(
        StrategyKind::CarePlacement,
        format!("Arrange {}", situation.recommended_level.label()),
        format!(
            "Secure placement at the {} level before the benefit application is filed so the care setting matches the covered service.",
            situation.recommended_level.label()
        ),
        EffectivenessTier::High,
        timing,
        CostBand::Moderate,
    )
    .with_pros([
        "Care setting matches the level of need documented in the application",
        "Facility admission records support the medical-necessity determination",
    ])
    .with_cons(["Placement availability varies by region"])]
}

fn narrative(situation: &CareSituation) -> String {
    let mut text = format!(
        "Recommended care level: {}.",
        situation.recommended_level.label()
    );
    if situation.urgent {
        text.push_str(" The situation is urgent; placement and filing should not wait.");
    }
    for reason in &situation.reasons {
        text.push(' ');
        text.push_str(reason);
        text.push('.');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::modules::test_support::context_fixture;

    #[test]
    fn critical_health_recommends_nursing_facility() {
        let fixture = context_fixture(|client, _| {
            client.health = HealthStatus::Critical;
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(situation.recommended_level, CareLevel::NursingFacility);
        assert!(situation.urgent);
        assert!(!outcome.strategies.is_empty());
    }

    #[test]
    fn healthy_client_stays_home_with_no_placement_strategy() {
        let fixture = context_fixture(|client, _| {
            client.health = HealthStatus::Good;
            client.in_crisis = false;
        });
        let outcome = run(&fixture.context());
        let situation = outcome.situation.expect("situation assessed");
        assert_eq!(situation.recommended_level, CareLevel::InHome);
        assert!(outcome.strategies.is_empty());
    }
}
