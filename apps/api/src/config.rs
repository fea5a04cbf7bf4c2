//! Tienda API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                   | Default      |
//! |----------------------------|--------------|
//! | `TIENDA_HTTP_PORT`         | `8000`       |
//! | `TIENDA_JWT_SECRET`        | dev secret   |
//! | `TIENDA_TOKEN_TTL_MINUTES` | `15`         |
//! | `TIENDA_IMAGES_DIR`        | `images`     |
//! | `TIENDA_MAX_UPLOAD_BYTES`  | `10485760`   |
//! | `TIENDA_SEED_DEMO`         | `false`      |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;

/// Signing secret used when `TIENDA_JWT_SECRET` is unset.
/// In production, this MUST be set via environment variable.
const DEV_JWT_SECRET: &str = "tienda-dev-secret-change-in-production";

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Tienda API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Secret key for signing tokens
    pub jwt_secret: SecretString,

    /// Token lifetime in minutes
    pub token_ttl_minutes: i64,

    /// Root directory of the filesystem blob store
    pub images_dir: PathBuf,

    /// Max request body size for uploads (default: 10MB)
    pub max_upload_bytes: usize,

    /// Load the demo catalog at startup
    pub seed_demo: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 8000,
            jwt_secret: SecretString::from(DEV_JWT_SECRET),
            token_ttl_minutes: 15,
            images_dir: PathBuf::from("images"),
            max_upload_bytes: 10 * 1024 * 1024,
            seed_demo: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            http_port: parse_or(&lookup, "TIENDA_HTTP_PORT", defaults.http_port)?,

            jwt_secret: lookup("TIENDA_JWT_SECRET")
                .map(SecretString::from)
                .unwrap_or(defaults.jwt_secret),

            token_ttl_minutes: parse_or(
                &lookup,
                "TIENDA_TOKEN_TTL_MINUTES",
                defaults.token_ttl_minutes,
            )?,

            images_dir: lookup("TIENDA_IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.images_dir),

            max_upload_bytes: parse_or(
                &lookup,
                "TIENDA_MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            )?,

            seed_demo: parse_or(&lookup, "TIENDA_SEED_DEMO", defaults.seed_demo)?,
        };

        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&config.token_ttl_minutes) {
            return Err(ConfigError::InvalidValue(
                "TIENDA_TOKEN_TTL_MINUTES".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.http_port, 8000);
        assert_eq!(config.token_ttl_minutes, 15);
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert_eq!(config.max_upload_bytes, 10_485_760);
        assert!(!config.seed_demo);
        assert_eq!(config.jwt_secret.expose_secret(), DEV_JWT_SECRET);
    }

    #[test]
    fn test_overrides() {
        let config = load_with(&[
            ("TIENDA_HTTP_PORT", "9000"),
            ("TIENDA_JWT_SECRET", "s3cret"),
            ("TIENDA_TOKEN_TTL_MINUTES", "60"),
            ("TIENDA_IMAGES_DIR", "/var/tienda"),
            ("TIENDA_SEED_DEMO", "true"),
        ])
        .unwrap();

        assert_eq!(config.http_port, 9000);
        assert_eq!(config.jwt_secret.expose_secret(), "s3cret");
        assert_eq!(config.token_ttl_minutes, 60);
        assert_eq!(config.images_dir, PathBuf::from("/var/tienda"));
        assert!(config.seed_demo);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load_with(&[("TIENDA_HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "TIENDA_HTTP_PORT"
        ));
        assert!(matches!(
            load_with(&[("TIENDA_TOKEN_TTL_MINUTES", "0")]),
            Err(ConfigError::InvalidValue(key)) if key == "TIENDA_TOKEN_TTL_MINUTES"
        ));
        assert!(load_with(&[("TIENDA_SEED_DEMO", "yes")]).is_err());
    }

    #[test]
    fn test_token_ttl_upper_bound() {
        assert!(matches!(
            load_with(&[("TIENDA_TOKEN_TTL_MINUTES", "150000000000")]),
            Err(ConfigError::InvalidValue(key)) if key == "TIENDA_TOKEN_TTL_MINUTES"
        ));

        let max = MAX_TOKEN_TTL_MINUTES.to_string();
        let config = load_with(&[("TIENDA_TOKEN_TTL_MINUTES", max.as_str())]).unwrap();
        assert_eq!(config.token_ttl_minutes, MAX_TOKEN_TTL_MINUTES);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = load_with(&[("TIENDA_JWT_SECRET", "do-not-print")]).unwrap();
        assert!(!format!("{:?}", config).contains("do-not-print"));
    }
}
