use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::scoring::ScoringConfigError;
use std::fmt;

/// Top-level error for embedding applications wiring up the engine.
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Scoring(ScoringConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(err) => write!(f, "configuration error: {err}"),
            EngineError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            EngineError::Scoring(err) => write!(f, "scoring configuration error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(err) => Some(err),
            EngineError::Telemetry(err) => Some(err),
            EngineError::Scoring(err) => Some(err),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for EngineError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ScoringConfigError> for EngineError {
    fn from(value: ScoringConfigError) -> Self {
        Self::Scoring(value)
    }
}
