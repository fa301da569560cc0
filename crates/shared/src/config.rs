//! Application configuration management.
//!
//! Loaded once at startup from `config/default.toml`, `config/{RUN_MODE}.toml`
//! and `TEMPO__*` environment variables, then validated.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Bearer token verification.
    pub auth: AuthConfig,
    /// Timesheet business rules.
    #[serde(default)]
    pub timesheet: TimesheetConfig,
    /// Entry creation rate limit.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
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

/// Bearer token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret used by the identity provider.
    pub jwt_secret: String,
    /// Lifetime of tokens minted by the seeder, in minutes.
    #[serde(default = "default_token_minutes")]
    pub access_token_expires_minutes: i64,
}

fn default_token_minutes() -> i64 {
    60
}

/// Timesheet business rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetConfig {
    /// IANA timezone that defines the business date.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// How many days back an entry may be dated.
    #[serde(default = "default_backdate_limit")]
    pub backdate_limit_days: i64,
    /// Expected hours per working day.
    #[serde(default = "default_workday_hours")]
    pub workday_hours: u32,
    /// Reject entries dated after today.
    #[serde(default)]
    pub reject_future_dates: bool,
}

impl Default for TimesheetConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            backdate_limit_days: default_backdate_limit(),
            workday_hours: default_workday_hours(),
            reject_future_dates: false,
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Largest accepted backdate window, roughly a century.
pub const MAX_BACKDATE_LIMIT_DAYS: i64 = 36_500;

fn default_backdate_limit() -> i64 {
    7
}

fn default_workday_hours() -> u32 {
    8
}

/// Fixed-window rate limit applied to entry creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    60
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default)]
    pub filter: Option<String>,
}

impl TimesheetConfig {
    /// Parses the configured timezone.
    pub fn tz(&self) -> Result<Tz, config::ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config::ConfigError::Message(format!("unknown timezone: {}", self.timezone)))
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TEMPO").separator("__"))
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Checks cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let invalid = |msg: &str| Err(config::ConfigError::Message(msg.to_string()));

        self.timesheet.tz()?;
        if self.timesheet.workday_hours == 0 || self.timesheet.workday_hours > 24 {
            return invalid("timesheet.workday_hours must be between 1 and 24");
        }
        if !(0..=MAX_BACKDATE_LIMIT_DAYS).contains(&self.timesheet.backdate_limit_days) {
            return invalid("timesheet.backdate_limit_days must be between 0 and 36500");
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0 {
            return invalid("rate_limit.max_requests and rate_limit.window_secs must be positive");
        }
        if self.auth.jwt_secret.is_empty() {
            return invalid("auth.jwt_secret must be set");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/tempo".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: "secret".to_string(),
                access_token_expires_minutes: 60,
            },
            timesheet: TimesheetConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = sample();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.timesheet.backdate_limit_days, 7);
        assert_eq!(config.timesheet.workday_hours, 8);
        assert!(!config.timesheet.reject_future_dates);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timezone_parses() {
        let mut config = sample();
        config.timesheet.timezone = "Asia/Jakarta".to_string();
        assert_eq!(config.timesheet.tz().unwrap(), chrono_tz::Asia::Jakarta);

        config.timesheet.timezone = "Mars/Olympus".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_workday_and_rate_limit() {
        let mut config = sample();
        config.timesheet.workday_hours = 0;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.rate_limit.window_secs = 0;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.timesheet.backdate_limit_days = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backdate_limit_upper_bound() {
        let mut config = sample();
        config.timesheet.backdate_limit_days = MAX_BACKDATE_LIMIT_DAYS;
        assert!(config.validate().is_ok());

        config.timesheet.backdate_limit_days = MAX_BACKDATE_LIMIT_DAYS + 1;
        assert!(config.validate().is_err());

        config.timesheet.backdate_limit_days = i64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = config::Config::builder()
            .set_override("database.url", "postgres://db/tempo")
            .unwrap()
            .set_override("auth.jwt_secret", "s3cret")
            .unwrap()
            .set_override("timesheet.backdate_limit_days", 14)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.timesheet.backdate_limit_days, 14);
        assert_eq!(config.timesheet.timezone, "UTC");
        assert_eq!(config.rate_limit.max_requests, 10);
    }
}
