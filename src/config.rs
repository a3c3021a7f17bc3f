/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、ID token 検証、cookie 寿命など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::VerifierKey;
use crate::session::CookiePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    /// `None` runs against the in-memory backend (development only).
    pub database_url: Option<String>,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub id_token_key: VerifierKey,
    pub id_token_leeway_seconds: u64,

    pub cookie_secure: bool,
    pub session_cookie_days: i64,
    pub enrollment_cookie_days: i64,

    pub admin_setup_enabled: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets (database url, key material)
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database", &self.database_url.is_some())
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .field("cookie_secure", &self.cookie_secure)
            .field("admin_setup_enabled", &self.admin_setup_enabled)
            .finish()
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env_opt(key) {
        None => Ok(default),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid(key)),
        },
    }
}

fn env_days(key: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env_opt(key) {
        None => Ok(default),
        Some(v) => v
            .parse::<i64>()
            .ok()
            .filter(|d| *d > 0)
            .ok_or(ConfigError::Invalid(key)),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url = env_opt("DATABASE_URL");
        if database_url.is_none() && app_env.is_production() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let id_token_key = match (
            env_opt("ID_TOKEN_PUBLIC_KEY_PEM"),
            env_opt("ID_TOKEN_HMAC_SECRET"),
        ) {
            (Some(pem), _) => VerifierKey::Ed25519Pem(pem.replace("\\n", "\n")),
            // shared secrets are for local development only
            (None, Some(_)) if app_env.is_production() => {
                return Err(ConfigError::Invalid("ID_TOKEN_HMAC_SECRET"));
            }
            (None, Some(secret)) => VerifierKey::HmacSecret(secret),
            (None, None) => return Err(ConfigError::Missing("ID_TOKEN_PUBLIC_KEY_PEM")),
        };

        let id_token_leeway_seconds = std::env::var("ID_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let cookie_secure = env_bool("COOKIE_SECURE", app_env.is_production())?;
        let session_cookie_days = env_days("SESSION_COOKIE_DAYS", 1)?;
        let enrollment_cookie_days = env_days("ENROLLMENT_COOKIE_DAYS", 30)?;
        let admin_setup_enabled = env_bool("ADMIN_SETUP_ENABLED", false)?;

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            auth_audience,
            id_token_key,
            id_token_leeway_seconds,
            cookie_secure,
            session_cookie_days,
            enrollment_cookie_days,
            admin_setup_enabled,
        })
    }

    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy::new(
            self.cookie_secure,
            self.session_cookie_days,
            self.enrollment_cookie_days,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_env_parsing() {
        assert_eq!(AppEnv::parse("PROD"), AppEnv::Production);
        assert_eq!(AppEnv::parse("production"), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::Missing("AUTH_ISSUER").to_string(),
            "missing configuration: AUTH_ISSUER"
        );
        assert_eq!(
            ConfigError::Invalid("PORT").to_string(),
            "invalid configuration: PORT"
        );
    }
}
