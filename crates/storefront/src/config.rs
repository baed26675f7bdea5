//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHEET_API_BASE` - Base URL of the spreadsheet API project
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SHEET_API_TOKEN` - Bearer token for the spreadsheet API
//! - `SHEET_VEHICLES_RESOURCE` - Vehicle sheet name (default: vehicles)
//! - `SHEET_VEHICLE_ROOT` - Root key wrapping a single vehicle (default: vehicle)
//! - `SHEET_USERS_RESOURCE` - User sheet name (default: users)
//! - `SHEET_USER_ROOT` - Root key wrapping a single user (default: user)
//! - `BOOTSTRAP_ADMIN_USERNAME` - Username of the configured backoffice admin
//! - `BOOTSTRAP_ADMIN_PASSWORD_HASH` - Argon2 PHC hash for that admin
//! - `BOOTSTRAP_ADMIN_EMAIL` - Contact email for that admin
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Spreadsheet API configuration
    pub sheet: SheetApiConfig,
    /// Configured backoffice admin credential, checked before the remote
    /// user lookup
    pub bootstrap_admin: Option<BootstrapAdmin>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Spreadsheet API configuration.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct SheetApiConfig {
    /// Base URL of the API project, without a trailing slash
    pub base_url: String,
    /// Optional bearer token sent as `Authorization: Bearer`
    pub api_token: Option<SecretString>,
    /// Resource name of the vehicle sheet (the list endpoint path segment)
    pub vehicles_resource: String,
    /// Root key wrapping a single vehicle record in request/response bodies
    pub vehicle_root: String,
    /// Resource name of the user sheet
    pub users_resource: String,
    /// Root key wrapping a single user record
    pub user_root: String,
}

impl std::fmt::Debug for SheetApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("vehicles_resource", &self.vehicles_resource)
            .field("vehicle_root", &self.vehicle_root)
            .field("users_resource", &self.users_resource)
            .field("user_root", &self.user_root)
            .finish()
    }
}

/// A backoffice admin credential provided through configuration.
///
/// Subsumes the legacy hardcoded-credential login: the password is supplied
/// as an argon2 PHC hash, never as a literal.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password_hash: SecretString,
    pub email: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let sheet = SheetApiConfig::from_env()?;
        let bootstrap_admin = BootstrapAdmin::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            sheet,
            bootstrap_admin,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SheetApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&get_required_env("SHEET_API_BASE")?)
            .map_err(|e| ConfigError::InvalidEnvVar("SHEET_API_BASE".to_string(), e))?;

        Ok(Self {
            base_url,
            api_token: get_optional_env("SHEET_API_TOKEN").map(SecretString::from),
            vehicles_resource: get_env_or_default("SHEET_VEHICLES_RESOURCE", "vehicles"),
            vehicle_root: get_env_or_default("SHEET_VEHICLE_ROOT", "vehicle"),
            users_resource: get_env_or_default("SHEET_USERS_RESOURCE", "users"),
            user_root: get_env_or_default("SHEET_USER_ROOT", "user"),
        })
    }
}

impl BootstrapAdmin {
    /// The three variables form one unit: either none is set, or username and
    /// password hash are both present.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let username = get_optional_env("BOOTSTRAP_ADMIN_USERNAME");
        let password_hash = get_optional_env("BOOTSTRAP_ADMIN_PASSWORD_HASH");

        match (username, password_hash) {
            (Some(username), Some(password_hash)) => Ok(Some(Self {
                username,
                password_hash: SecretString::from(password_hash),
                email: get_env_or_default("BOOTSTRAP_ADMIN_EMAIL", ""),
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar(
                "BOOTSTRAP_ADMIN_PASSWORD_HASH".to_string(),
            )),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar(
                "BOOTSTRAP_ADMIN_USERNAME".to_string(),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate an API base URL and strip any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, String> {
    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", parsed.scheme()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sheet_config() -> SheetApiConfig {
        SheetApiConfig {
            base_url: "https://sheets.example/abc123/stand".to_string(),
            api_token: Some(SecretString::from("tok_9f2k3j4l5m6n7o8p")),
            vehicles_resource: "vehicles".to_string(),
            vehicle_root: "vehicle".to_string(),
            users_resource: "users".to_string(),
            user_root: "user".to_string(),
        }
    }

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        let url = normalize_base_url("https://sheets.example/abc123/stand/").unwrap();
        assert_eq!(url, "https://sheets.example/abc123/stand");
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://sheets.example/x").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            sheet: sheet_config(),
            bootstrap_admin: None,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_sheet_config_debug_redacts_token() {
        let debug_output = format!("{:?}", sheet_config());

        assert!(debug_output.contains("sheets.example"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok_9f2k3j4l5m6n7o8p"));
    }

    #[test]
    fn test_bootstrap_admin_debug_redacts_hash() {
        let admin = BootstrapAdmin {
            username: "gerente".to_string(),
            password_hash: SecretString::from("$argon2id$v=19$m=19456,t=2,p=1$abc$def"),
            email: "gerente@example.com".to_string(),
        };

        let debug_output = format!("{admin:?}");
        assert!(debug_output.contains("gerente"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }
}
