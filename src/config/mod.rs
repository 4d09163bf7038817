use std::env;
use std::fmt;

/// Top-level configuration for the pipeline engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub gates: GatePolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("PIPELINE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let gates = GatePolicy {
            require_pink_team_approval: read_bool("REQUIRE_PINK_TEAM_APPROVAL", true)?,
            require_gold_team_approval: read_bool("REQUIRE_GOLD_TEAM_APPROVAL", true)?,
            pink_team_max_attempts: read_attempts("PINK_TEAM_MAX_ATTEMPTS", 3)?,
            gold_team_max_attempts: read_attempts("GOLD_TEAM_MAX_ATTEMPTS", 3)?,
        };

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            gates,
        })
    }
}

/// Approval gate enforcement knobs for the orchestrator.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    pub require_pink_team_approval: bool,
    pub require_gold_team_approval: bool,
    pub pink_team_max_attempts: u32,
    pub gold_team_max_attempts: u32,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            require_pink_team_approval: true,
            require_gold_team_approval: true,
            pink_team_max_attempts: 3,
            gold_team_max_attempts: 3,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn read_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidBool { key, value: raw }),
        },
    }
}

fn read_attempts(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => {
            let parsed = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidAttempts { key, value: raw })?;
            // A gate always gets at least one evaluation.
            Ok(parsed.max(1))
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBool { key: &'static str, value: String },
    InvalidAttempts { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBool { key, value } => {
                write!(f, "{key} must be a boolean, got '{value}'")
            }
            ConfigError::InvalidAttempts { key, value } => {
                write!(f, "{key} must be a positive integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
