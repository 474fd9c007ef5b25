//! Application configuration.
//!
//! Everything is environment-driven with working defaults: a fresh
//! checkout runs against the public Coalition demo feed with no setup.
//! Values are read once at startup and shared immutably after that.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

pub const APP_NAME: &str = "Careboard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen address, same port the dashboard frontend expects.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Public demo feed. Credentials are published by the provider and
/// carry no secret value, so they double as defaults.
pub const DEFAULT_PROVIDER_URL: &str =
    "https://fedskillstest.coalitiontechnologies.workers.dev/patients";
pub const DEFAULT_PROVIDER_USERNAME: &str = "coalition";
pub const DEFAULT_PROVIDER_PASSWORD: &str = "skills-test";

pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Patient served by `GET /api/patient` and targeted by sync.
pub const DEFAULT_PATIENT_NAME: &str = "Jessica Taylor";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_PKG_NAME"))
}

// ═══════════════════════════════════════════════════════════════════════════
// Paths
// ═══════════════════════════════════════════════════════════════════════════

/// Application data directory: `~/Careboard`.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Cannot determine home directory")
        .join(APP_NAME)
}

/// Default SQLite database location.
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("careboard.db")
}

// ═══════════════════════════════════════════════════════════════════════════
// Runtime configuration
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Resolved configuration, built once at startup from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the API server listens on (`BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// SQLite database file (`DATABASE_PATH`).
    pub database_path: PathBuf,
    /// Provider feed URL (`PROVIDER_URL`).
    pub provider_url: String,
    /// Basic auth username for the feed (`PROVIDER_USERNAME`).
    pub provider_username: String,
    /// Basic auth password for the feed (`PROVIDER_PASSWORD`).
    pub provider_password: String,
    /// Provider request timeout in seconds (`PROVIDER_TIMEOUT_SECS`).
    pub provider_timeout_secs: u64,
    /// Name resolved by the default-patient route and by sync
    /// (`DEFAULT_PATIENT_NAME`).
    pub default_patient_name: String,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: format!("{e}"),
            })?;

        let database_path = match std::env::var("DATABASE_PATH") {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_database_path(),
        };

        let provider_timeout_secs = env_or(
            "PROVIDER_TIMEOUT_SECS",
            &DEFAULT_PROVIDER_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .map_err(|e| ConfigError::Invalid {
            name: "PROVIDER_TIMEOUT_SECS",
            reason: format!("{e}"),
        })?;

        Ok(Self {
            bind_addr,
            database_path,
            provider_url: env_or("PROVIDER_URL", DEFAULT_PROVIDER_URL),
            provider_username: env_or("PROVIDER_USERNAME", DEFAULT_PROVIDER_USERNAME),
            provider_password: env_or("PROVIDER_PASSWORD", DEFAULT_PROVIDER_PASSWORD),
            provider_timeout_secs,
            default_patient_name: env_or("DEFAULT_PATIENT_NAME", DEFAULT_PATIENT_NAME),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_is_under_home() {
        let dir = app_data_dir();
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn default_database_path_is_in_data_dir() {
        let path = default_database_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("careboard.db"));
    }

    // Environment access is process-global, so defaults and overrides
    // share one test to avoid racing parallel tests on the same vars.
    #[test]
    fn from_env_defaults_and_overrides() {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.provider_username, "coalition");
        assert_eq!(config.provider_timeout_secs, 30);
        assert_eq!(config.default_patient_name, "Jessica Taylor");
        assert!(config.database_path.ends_with("careboard.db"));

        std::env::set_var("BIND_ADDR", "0.0.0.0:8080");
        std::env::set_var("DEFAULT_PATIENT_NAME", "Ryan Johnson");
        std::env::set_var("PROVIDER_TIMEOUT_SECS", "5");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.default_patient_name, "Ryan Johnson");
        assert_eq!(config.provider_timeout_secs, 5);

        std::env::set_var("BIND_ADDR", "not-an-addr");
        assert!(AppConfig::from_env().is_err());

        std::env::remove_var("BIND_ADDR");
        std::env::remove_var("DEFAULT_PATIENT_NAME");
        std::env::remove_var("PROVIDER_TIMEOUT_SECS");
    }
}
