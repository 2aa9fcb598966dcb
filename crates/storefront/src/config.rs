//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit local development.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>).
//!   An `https` URL turns on secure session cookies.
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON file
//!   (default: `crates/storefront/data/products.json`)
//! - `STOREFRONT_BRAND_NAME` - Greeting name in order messages
//!   (default: ISHA'S FRAGRANCE)
//! - `WHATSAPP_NUMBER` - Order recipient in international format
//!   (default: +2348082201270)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use isha_core::checkout::{DEFAULT_BRAND, DEFAULT_RECIPIENT};
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/data/products.json";

/// E.164 allows at most 15 digits; anything under 8 is not a real number.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 8..=15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
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
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Catalog data file read at startup
    pub catalog_path: PathBuf,
    /// Order handoff settings
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Where WhatsApp orders go and how they greet the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub brand_name: String,
    pub whatsapp_number: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            brand_name: DEFAULT_BRAND.to_string(),
            whatsapp_number: DEFAULT_RECIPIENT.to_string(),
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
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", e))?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", e))?;
        let base_url = Url::parse(&env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000"))
            .map_err(|e| invalid("STOREFRONT_BASE_URL", e))?;
        let catalog_path = PathBuf::from(env.or_default("STOREFRONT_CATALOG_PATH", DEFAULT_CATALOG_PATH));

        let checkout = CheckoutConfig {
            brand_name: env.or_default("STOREFRONT_BRAND_NAME", DEFAULT_BRAND),
            whatsapp_number: env.or_default("WHATSAPP_NUMBER", DEFAULT_RECIPIENT),
        };
        validate_whatsapp_number(&checkout.whatsapp_number, "WHATSAPP_NUMBER")?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            checkout,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate(&env, "SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_rate(&env, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
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

/// Variable source; blank values count as unset.
struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse a sampling rate in `0.0..=1.0`.
fn parse_rate<F: Fn(&str) -> Option<String>>(
    env: &Env<'_, F>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let Some(raw) = env.optional(key) else {
        return Ok(default);
    };
    let rate = raw.parse::<f32>().map_err(|e| invalid(key, e))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(invalid(key, format!("must be between 0.0 and 1.0 (got {rate})")))
    }
}

/// Validate that a WhatsApp number is `+` followed by 8-15 digits.
fn validate_whatsapp_number(number: &str, var_name: &str) -> Result<(), ConfigError> {
    let Some(digits) = number.strip_prefix('+') else {
        return Err(invalid(var_name, "must start with '+' and a country code"));
    };

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(var_name, "must contain only digits after '+'"));
    }

    if !PHONE_DIGITS.contains(&digits.len()) {
        return Err(invalid(
            var_name,
            format!(
                "must have {} to {} digits (got {})",
                PHONE_DIGITS.start(),
                PHONE_DIGITS.end(),
                digits.len()
            ),
        ));
    }

    Ok(())
}
