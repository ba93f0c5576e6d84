//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Password recovery configuration.
    pub recovery: RecoveryConfig,
    /// Receipt rendering configuration.
    #[serde(default)]
    pub receipt: ReceiptConfig,
    /// First-run bootstrap of the administrator account.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`postgres://…` or `sqlite://…`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Password recovery configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RecoveryConfig {
    /// Secret key for signing reset tokens.
    pub secret: String,
    /// How long a reset token stays valid after a correct answer.
    #[serde(default = "default_reset_token_expiry")]
    pub token_expiry_secs: u64,
}

fn default_reset_token_expiry() -> u64 {
    600 // 10 minutes
}

/// Receipt rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptConfig {
    /// Locale for the amount-in-words line (`th` or `en`).
    #[serde(default = "default_receipt_locale")]
    pub locale: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            locale: default_receipt_locale(),
        }
    }
}

fn default_receipt_locale() -> String {
    "th".to_string()
}

/// Administrator bootstrap used by the seeder.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Initial password for the `admin` account. Bootstrap is skipped when unset.
    pub admin_password: Option<String>,
    /// Recovery question for the `admin` account.
    #[serde(default = "default_recovery_question")]
    pub recovery_question: String,
    /// Recovery answer for the `admin` account.
    #[serde(default)]
    pub recovery_answer: String,
}

fn default_recovery_question() -> String {
    "What is the name of this village?".to_string()
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_password: None,
            recovery_question: default_recovery_question(),
            recovery_answer: String::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VILLA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
