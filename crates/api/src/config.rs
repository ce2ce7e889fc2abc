use chrono::NaiveTime;
use shelter_core::daily_tasks::parse_run_at;

use crate::mail::EmailConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound on pooled connections (default: `20`).
    pub db_max_connections: u32,
    /// Signing secret and lifetimes of access and refresh tokens.
    pub tokens: TokenConfig,
    /// Nightly daily task generation.
    pub daily_tasks: DailyTaskConfig,
    /// Password policy and reset links.
    pub accounts: AccountConfig,
    /// Outgoing mail. `None` disables e-mail delivery.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | **required**               |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| shelter_db::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_max_connections,
            tokens: TokenConfig::from_env(),
            daily_tasks: DailyTaskConfig::from_env(),
            accounts: AccountConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Access tokens are short-lived JWTs; refresh tokens are opaque and rotate
/// on every use.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 signing secret.
    pub secret: String,
    /// Access token lifetime in minutes (default: `15`).
    pub access_expiry_mins: i64,
    /// Refresh token lifetime in days (default: `7`).
    pub refresh_expiry_days: i64,
}

impl TokenConfig {
    /// | Env Var                   | Default      |
    /// |---------------------------|--------------|
    /// | `JWT_SECRET`              | **required** |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | `15`         |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | `7`          |
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .map(|v| v.parse().expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64"))
            .unwrap_or(15);
        let refresh_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .map(|v| v.parse().expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64"))
            .unwrap_or(7);

        Self {
            secret,
            access_expiry_mins,
            refresh_expiry_days,
        }
    }

    pub fn access_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_expiry_mins)
    }

    pub fn refresh_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_expiry_days)
    }
}

// ---------------------------------------------------------------------------
// Daily tasks
// ---------------------------------------------------------------------------

/// Schedule of the daily task generation job.
#[derive(Debug, Clone)]
pub struct DailyTaskConfig {
    /// Whether `main` spawns the job at all (default: `true`).
    pub enabled: bool,
    /// UTC time of day of each pass (default: `00:00`).
    pub run_at: NaiveTime,
}

impl Default for DailyTaskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            run_at: NaiveTime::MIN,
        }
    }
}

impl DailyTaskConfig {
    /// | Env Var               | Default |
    /// |-----------------------|---------|
    /// | `DAILY_TASKS_ENABLED` | `true`  |
    /// | `DAILY_TASKS_RUN_AT`  | `00:00` |
    pub fn from_env() -> Self {
        let enabled: bool = std::env::var("DAILY_TASKS_ENABLED")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("DAILY_TASKS_ENABLED must be true or false");

        let run_at = match std::env::var("DAILY_TASKS_RUN_AT") {
            Ok(value) => parse_run_at(&value).expect("DAILY_TASKS_RUN_AT must be HH:MM"),
            Err(_) => NaiveTime::MIN,
        };

        Self { enabled, run_at }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Default minimum password length.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 12;

/// Password policy and self-service reset settings.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Minimum accepted password length (default: `12`).
    pub min_password_length: usize,
    /// Lifetime of a password reset token in minutes (default: `60`).
    pub password_reset_expiry_mins: i64,
    /// Frontend page the reset link points at; the token is appended as `?token=`.
    pub password_reset_url: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            password_reset_expiry_mins: 60,
            password_reset_url: "http://localhost:5173/reset-password".into(),
        }
    }
}

impl AccountConfig {
    /// | Env Var                      | Default                                |
    /// |------------------------------|----------------------------------------|
    /// | `MIN_PASSWORD_LENGTH`        | `12`                                   |
    /// | `PASSWORD_RESET_EXPIRY_MINS` | `60`                                   |
    /// | `PASSWORD_RESET_URL`         | `http://localhost:5173/reset-password` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let min_password_length: usize = std::env::var("MIN_PASSWORD_LENGTH")
            .map(|v| v.parse().expect("MIN_PASSWORD_LENGTH must be a valid usize"))
            .unwrap_or(defaults.min_password_length);

        let password_reset_expiry_mins: i64 = std::env::var("PASSWORD_RESET_EXPIRY_MINS")
            .map(|v| v.parse().expect("PASSWORD_RESET_EXPIRY_MINS must be a valid i64"))
            .unwrap_or(defaults.password_reset_expiry_mins);

        let password_reset_url =
            std::env::var("PASSWORD_RESET_URL").unwrap_or(defaults.password_reset_url);

        Self {
            min_password_length,
            password_reset_expiry_mins,
            password_reset_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Bootstrap admin
// ---------------------------------------------------------------------------

/// First administrator account, created at start-up when missing.
#[derive(Debug, Clone)]
pub struct BootstrapAdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl BootstrapAdminConfig {
    /// Read `BOOTSTRAP_ADMIN_USERNAME`, `BOOTSTRAP_ADMIN_EMAIL` and
    /// `BOOTSTRAP_ADMIN_PASSWORD`. Returns `None` unless all three are set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("BOOTSTRAP_ADMIN_USERNAME").ok()?;
        let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        Some(Self {
            username,
            email,
            password,
        })
    }
}
