//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL; `https` enables secure cookies
//!   (default: <http://localhost:3000>)
//! - `STOREFRONT_CATALOG_SIZE` - Products per catalog, 1 to 16 (default: 6)
//! - `STOREFRONT_CATALOG_SEED` - Seed for reproducible catalogs and order numbers
//! - `STOREFRONT_SUCCESS_DISMISS_SECS` - Success panel auto-close delay (default: 3)
//! - `STOREFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry performance sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::models::StorefrontSettings;
use crate::models::catalog::{DEFAULT_CATALOG_SIZE, MAX_CATALOG_SIZE};
use crate::models::storefront::DEFAULT_SUCCESS_DISMISS_SECS;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// How new storefront sessions are generated
    pub catalog: CatalogConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of requests traced by Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Catalog generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Products per generated catalog
    pub size: usize,
    /// Fixed RNG seed; `None` draws from the thread RNG
    pub seed: Option<u64>,
    /// Seconds before the success panel closes on its own
    pub success_dismiss_secs: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_CATALOG_SIZE,
            seed: None,
            success_dismiss_secs: DEFAULT_SUCCESS_DISMISS_SECS,
        }
    }
}

impl CatalogConfig {
    /// Settings handed to the storefront model.
    #[must_use]
    pub const fn settings(&self) -> StorefrontSettings {
        StorefrontSettings {
            catalog_size: self.size,
            success_dismiss_secs: self.success_dismiss_secs,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or_default(&lookup, "STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default(&lookup, "STOREFRONT_PORT", 3000_u16)?;
        let base_url = lookup("STOREFRONT_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let size = parse_or_default(&lookup, "STOREFRONT_CATALOG_SIZE", DEFAULT_CATALOG_SIZE)?;
        if !(1..=MAX_CATALOG_SIZE).contains(&size) {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_CATALOG_SIZE".to_string(),
                format!("must be between 1 and {MAX_CATALOG_SIZE} (got {size})"),
            ));
        }
        let seed = parse_optional(&lookup, "STOREFRONT_CATALOG_SEED")?;
        let success_dismiss_secs = parse_or_default(
            &lookup,
            "STOREFRONT_SUCCESS_DISMISS_SECS",
            DEFAULT_SUCCESS_DISMISS_SECS,
        )?;

        let log_format = parse_or_default(&lookup, "STOREFRONT_LOG_FORMAT", LogFormat::Pretty)?;
        let sentry_traces_sample_rate =
            parse_or_default(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog: CatalogConfig {
                size,
                seed,
                success_dismiss_secs,
            },
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present.
fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Parse a variable, falling back to a default when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}
