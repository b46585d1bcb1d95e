use anyhow::{Context, Result};
use chrono::Duration;
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub otp: OtpConfig,
    pub tokens: TokenConfig,
}

/// OTP challenge settings, injected into the auth service at construction
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// How long an issued code stays valid
    pub ttl: Duration,
    /// Number of digits in a generated code
    pub code_length: usize,
}

/// Token signing settings, injected into the token issuer at construction.
///
/// Access and refresh tokens are signed with distinct RSA keypairs so that
/// possession of one private key cannot forge the other token class.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub access_private_key_pem: String,
    pub access_public_key_pem: String,
    pub refresh_private_key_pem: String,
    pub refresh_public_key_pem: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            otp: OtpConfig {
                ttl: Duration::seconds(parse_seconds("OTP_EXPIRY_SECONDS", 300)?),
                code_length: 6,
            },
            tokens: TokenConfig {
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "marketplace".to_string()),
                access_ttl: Duration::seconds(parse_seconds(
                    "JWT_ACCESS_TOKEN_EXPIRATION_SECONDS",
                    900,
                )?),
                refresh_ttl: Duration::seconds(parse_seconds(
                    "JWT_REFRESH_TOKEN_EXPIRATION_SECONDS",
                    1_209_600,
                )?),
                access_private_key_pem: env::var("ACCESS_TOKEN_PRIVATE_KEY")
                    .context("ACCESS_TOKEN_PRIVATE_KEY must be set")?,
                access_public_key_pem: env::var("ACCESS_TOKEN_PUBLIC_KEY")
                    .context("ACCESS_TOKEN_PUBLIC_KEY must be set")?,
                refresh_private_key_pem: env::var("REFRESH_TOKEN_PRIVATE_KEY")
                    .context("REFRESH_TOKEN_PRIVATE_KEY must be set")?,
                refresh_public_key_pem: env::var("REFRESH_TOKEN_PUBLIC_KEY")
                    .context("REFRESH_TOKEN_PUBLIC_KEY must be set")?,
            },
        })
    }
}

/// Read an optional seconds value from the environment, falling back to a default
fn parse_seconds(var: &str, default: i64) -> Result<i64> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a whole number of seconds", var)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_default() {
        std::env::remove_var("TEST_SECONDS_UNSET");
        assert_eq!(parse_seconds("TEST_SECONDS_UNSET", 300).unwrap(), 300);
    }

    #[test]
    fn test_parse_seconds_from_env() {
        std::env::set_var("TEST_SECONDS_SET", "120");
        assert_eq!(parse_seconds("TEST_SECONDS_SET", 300).unwrap(), 120);
        std::env::remove_var("TEST_SECONDS_SET");
    }

    #[test]
    fn test_parse_seconds_rejects_garbage() {
        std::env::set_var("TEST_SECONDS_BAD", "soon");
        assert!(parse_seconds("TEST_SECONDS_BAD", 300).is_err());
        std::env::remove_var("TEST_SECONDS_BAD");
    }
}
