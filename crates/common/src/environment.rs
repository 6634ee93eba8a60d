//! GPay environment configuration.
//!
//! Supports the staging and production wallet APIs.

use std::fmt;
use std::str::FromStr;

/// GPay environment (staging or production).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GPayEnvironment {
    /// Staging environment (test wallets).
    #[default]
    Staging,
    /// Production environment (real money).
    Production,
}

impl GPayEnvironment {
    /// Online wallet REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Staging => "https://gpay-staging.libyaguide.net/banking/api/onlinewallet/v1",
            Self::Production => "https://gpay.ly/banking/api/onlinewallet/v1",
        }
    }

    /// Returns true if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Load environment from `GPAY_ENVIRONMENT` env var.
    ///
    /// Returns `Staging` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var("GPAY_ENVIRONMENT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for GPayEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for GPayEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "live" => Ok(Self::Production),
            "staging" | "stage" | "test" | "sandbox" => Ok(Self::Staging),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Error parsing environment string.
#[derive(Debug, Clone)]
pub struct ParseEnvironmentError(String);

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid environment '{}', expected 'staging' or 'production'",
            self.0
        )
    }
}

impl std::error::Error for ParseEnvironmentError {}
