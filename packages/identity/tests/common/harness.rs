//! Test harness with testcontainers for integration testing.
//!
//! The Postgres container and migrations are initialized once on the first
//! test, then shared; each test gets a fresh pool and its own phone
//! numbers, so no per-test cleanup is needed.

use anyhow::{Context, Result};
use chrono::Duration;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use identity_core::config::{OtpConfig, TokenConfig};
use identity_core::domains::auth::{AuthService, TokenIssuer};

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG; try_init avoids panicking on repeat calls.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test token settings with throwaway RSA keypairs, distinct per class.
pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        issuer: "test_issuer".to_string(),
        access_ttl: Duration::seconds(900),
        refresh_ttl: Duration::seconds(86_400),
        access_private_key_pem: include_str!("../keys/access_private.pem").to_string(),
        access_public_key_pem: include_str!("../keys/access_public.pem").to_string(),
        refresh_private_key_pem: include_str!("../keys/refresh_private.pem").to_string(),
        refresh_public_key_pem: include_str!("../keys/refresh_public.pem").to_string(),
    }
}

/// Test harness providing a database pool and a wired-up auth service.
pub struct TestHarness {
    pub db_pool: PgPool,
    pub auth: AuthService,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let tokens = TokenIssuer::new(&test_token_config())?;
        let otp = OtpConfig {
            ttl: Duration::seconds(300),
            code_length: 6,
        };
        let auth = AuthService::new(db_pool.clone(), tokens, otp);

        Ok(Self { db_pool, auth })
    }

    /// An auth service whose OTP TTL is already in the past, for expiry tests.
    pub fn auth_with_expired_otps(&self) -> Result<AuthService> {
        let tokens = TokenIssuer::new(&test_token_config())?;
        let otp = OtpConfig {
            ttl: Duration::seconds(-1),
            code_length: 6,
        };
        Ok(AuthService::new(self.db_pool.clone(), tokens, otp))
    }
}
