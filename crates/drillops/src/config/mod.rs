use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub console: ConsoleConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let ledger = env::var("APP_LEDGER").ok().map(PathBuf::from);

        let board_limit = match env::var("APP_BOARD_LIMIT") {
            Ok(raw) => {
                let parsed: usize = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidBoardLimit { value: raw.clone() })?;
                // 0 means "no cap", the historical spreadsheet behavior.
                if parsed == 0 {
                    None
                } else {
                    Some(parsed)
                }
            }
            Err(_) => None,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            console: ConsoleConfig {
                ledger,
                board_limit,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Console-rendering defaults.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Ledger CSV loaded when no explicit source is given on the
    /// command line.
    pub ledger: Option<PathBuf>,
    /// Maximum number of rows the console renders per board.
    pub board_limit: Option<usize>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBoardLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBoardLimit { value } => {
                write!(f, "APP_BOARD_LIMIT must be a whole number, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
