//! Configuration management for the Scrap ERP client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with SCRAP__ prefix (SCRAP__API__BASE_URL)

use chrono::NaiveDate;
use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DateRange, ReplayOrder};

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Company (database) credentials sent as Basic auth
    #[serde(default)]
    pub company: CompanyConfig,

    /// Logged-in user context
    #[serde(default)]
    pub session: SessionConfig,

    pub ledger: LedgerConfig,

    /// Ledger report parameters for the CLI
    #[serde(default)]
    pub report: ReportConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CompanyConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub company_id: Option<String>,
    pub production_unit_id: Option<String>,

    /// "YY-YY"; derived from today's date when absent
    pub financial_year: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    /// `reverse` or `voucher_date`
    pub replay_order: ReplayOrder,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    pub item_id: Option<i64>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl ReportConfig {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.from_date, self.to_date)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SCRAP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "https://api.indusanalytics.co.in")?
            .set_default("api.timeout_secs", 30)?
            .set_default("ledger.replay_order", "reverse")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SCRAP__ prefix)
            .add_source(
                Environment::with_prefix("SCRAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.indusanalytics.co.in".to_string(),
            timeout_secs: 30,
        }
    }
}
