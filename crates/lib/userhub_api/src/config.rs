//! API server configuration.

use thiserror::Error;
use tracing::warn;

/// Fixed development-only signing secret, used when `APP_ENV=development`
/// and no real secret is configured. Never accepted outside development.
const DEV_JWT_SECRET: &str = "change_me_jwt_secret";

/// Minimum acceptable signing-secret length.
const MIN_SECRET_LEN: usize = 16;

/// Default access-token lifetime: 1 hour.
const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Configuration errors. These abort startup — a misconfigured signing
/// secret must never fall back silently in production.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to at least {MIN_SECRET_LEN} characters")]
    WeakJwtSecret,

    #[error("JWT_EXPIRES_IN is not a duration or a positive number of seconds: {0:?}")]
    BadExpiresIn(String),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds.
    pub access_token_ttl_secs: i64,
    /// Set the `Secure` attribute on auth cookies (off in development).
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable         | Default                                 |
    /// |------------------|-----------------------------------------|
    /// | `BIND_ADDR`      | `127.0.0.1:3000`                        |
    /// | `JWT_SECRET`     | required, unless `APP_ENV=development`  |
    /// | `JWT_EXPIRES_IN` | `1h`                                    |
    /// | `APP_ENV`        | `production`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        let development = std::env::var("APP_ENV")
            .map(|v| v == "development")
            .unwrap_or(false);

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            jwt_secret: resolve_jwt_secret(std::env::var("JWT_SECRET").ok(), development)?,
            access_token_ttl_secs: match std::env::var("JWT_EXPIRES_IN") {
                Ok(raw) => parse_expires_in(&raw)?,
                Err(_) => DEFAULT_ACCESS_TOKEN_TTL_SECS,
            },
            secure_cookies: !development,
        })
    }
}

/// Resolve the JWT signing secret.
///
/// An unset or too-short secret refuses to start the process, except in
/// development where a fixed constant is substituted with a warning.
fn resolve_jwt_secret(secret: Option<String>, development: bool) -> Result<String, ConfigError> {
    if let Some(secret) = secret
        && secret.len() >= MIN_SECRET_LEN
    {
        return Ok(secret);
    }

    if development {
        warn!("JWT_SECRET unset or too short, using the development constant");
        return Ok(DEV_JWT_SECRET.to_string());
    }

    Err(ConfigError::WeakJwtSecret)
}

/// Parse an access-token lifetime: either a positive number of seconds
/// (floored) or a duration string like `90s`, `30m`, `1h`, `7d`.
fn parse_expires_in(raw: &str) -> Result<i64, ConfigError> {
    let raw = raw.trim();

    if let Ok(secs) = raw.parse::<f64>() {
        if secs.is_finite() && secs > 0.0 {
            return Ok(secs.floor() as i64);
        }
        return Err(ConfigError::BadExpiresIn(raw.to_string()));
    }

    let (number, unit) = raw.split_at(raw.len().saturating_sub(1));
    let value: i64 = number
        .parse()
        .map_err(|_| ConfigError::BadExpiresIn(raw.to_string()))?;
    if value <= 0 {
        return Err(ConfigError::BadExpiresIn(raw.to_string()));
    }

    let secs = match unit {
        "s" => value,
        "m" => value * 60,
        "h" => value * 60 * 60,
        "d" => value * 60 * 60 * 24,
        _ => return Err(ConfigError::BadExpiresIn(raw.to_string())),
    };
    Ok(secs)
}
