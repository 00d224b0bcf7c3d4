//! Rule-driven Medicaid long-term-care eligibility assessment and planning.
//!
//! The crate evaluates a client's financial position against per-jurisdiction
//! limits, then runs a fixed pipeline of planning stages (care, assets,
//! income, trusts, annuities, divestment, spousal protection, application
//! timing, post-eligibility maintenance, estate recovery) and aggregates the
//! resulting strategies into one consolidated plan.

pub mod config;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod planning;
pub mod rules;
pub mod telemetry;

pub use engine::PlanningEngine;
pub use error::{AppError, PlanningError};
