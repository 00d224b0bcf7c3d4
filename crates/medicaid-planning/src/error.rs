use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Closed taxonomy for failures inside the eligibility and planning engine.
///
/// Validation and lookup errors abort an assessment run; a `Computation`
/// error raised inside a planning stage is caught at the stage boundary and
/// converted into that stage's error-status result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("invalid client data: {0}")]
    Validation(String),
    #[error("unknown jurisdiction '{requested}'")]
    UnknownJurisdiction { requested: String },
    #[error("rule data for '{jurisdiction}' is missing required field '{field}'")]
    MissingRuleField {
        jurisdiction: String,
        field: &'static str,
    },
    #[error("failed to load rule dataset: {0}")]
    Data(String),
    #[error("planning computation failed: {0}")]
    Computation(String),
}

impl PlanningError {
    /// True for failures that reject the whole run before any stage executes.
    pub fn aborts_run(&self) -> bool {
        matches!(
            self,
            PlanningError::Validation(_)
                | PlanningError::UnknownJurisdiction { .. }
                | PlanningError::Data(_)
        )
    }
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Engine(PlanningError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Engine(err) => write!(f, "planning error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Engine(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Engine(PlanningError::UnknownJurisdiction { .. }) => StatusCode::NOT_FOUND,
            AppError::Engine(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "status": "error", "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<PlanningError> for AppError {
    fn from(value: PlanningError) -> Self {
        Self::Engine(value)
    }
}
