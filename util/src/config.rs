//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// Global page size for list endpoints. `0` disables pagination.
    pub page_size: u64,
    pub superuser_username: Option<String>,
    pub superuser_password: Option<String>,
    /// Values that failed to parse and were replaced by their defaults. Read
    /// before any logger exists, so the server reports them once logging is up.
    pub rejected: Vec<RejectedValue>,
}

/// An environment value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedValue {
    pub key: String,
    pub value: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn parse_or<T: FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
    rejected: &mut Vec<RejectedValue>,
) -> T {
    let Some(raw) = raw else {
        return default;
    };
    let parsed = raw.trim().parse().ok();
    parsed.unwrap_or_else(|| {
        rejected.push(RejectedValue {
            key: key.to_owned(),
            value: raw,
        });
        default
    })
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every field has a development default so that tests and local runs work
    /// without a `.env` file.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut rejected = Vec::new();
        let port = parse_or("PORT", env::var("PORT").ok(), 3000, &mut rejected);
        let jwt_duration_minutes = parse_or(
            "JWT_DURATION_MINUTES",
            env::var("JWT_DURATION_MINUTES").ok(),
            60,
            &mut rejected,
        );
        let page_size = parse_or("PAGE_SIZE", env::var("PAGE_SIZE").ok(), 10, &mut rejected);

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "course-reviews".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/course_reviews.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port,
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "insecure-dev-secret".into()),
            jwt_duration_minutes,
            page_size,
            superuser_username: env::var("SUPERUSER_USERNAME").ok().filter(|s| !s.is_empty()),
            superuser_password: env::var("SUPERUSER_PASSWORD").ok().filter(|s| !s.is_empty()),
            rejected,
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            if let Ok(mut guard) = lock.write() {
                *guard = AppConfig::from_env();
            }
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value);
    }

    pub fn set_page_size(value: u64) {
        AppConfig::set_field(|cfg| cfg.page_size = value);
    }
}

// --- Free accessors used across crates ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

/// Global page size, or `None` when pagination is switched off (`PAGE_SIZE=0`).
pub fn page_size() -> Option<u64> {
    match AppConfig::global().page_size {
        0 => None,
        n => Some(n),
    }
}

/// Credentials for the superuser created at startup, when both are configured.
pub fn superuser_credentials() -> Option<(String, String)> {
    let cfg = AppConfig::global();
    match (&cfg.superuser_username, &cfg.superuser_password) {
        (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
        _ => None,
    }
}

/// Environment values that were ignored in favour of their defaults.
pub fn rejected_values() -> Vec<RejectedValue> {
    AppConfig::global().rejected.clone()
}
