use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::ChallengeId;

/// What an OTP challenge is verifying.
///
/// Stored as text in `verify_otps.verify_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPurpose {
    Phone,
}

impl VerifyPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
        }
    }
}

/// OTP challenge row - SQL persistence layer
///
/// At most one row exists per (verify_type, verify_info); a repeat request
/// overwrites the code and expiry in place. `current_otp` holds the Argon2
/// hash of the code, never the plaintext.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct VerifyOtp {
    pub id: ChallengeId,
    pub verify_type: String,
    pub verify_info: String,
    pub current_otp: String,
    pub otp_expiry: DateTime<Utc>,
}

impl VerifyOtp {
    /// Create or overwrite the challenge for (purpose, destination).
    ///
    /// Last write wins under concurrent requests; the replaced code simply
    /// stops verifying.
    pub async fn upsert(
        purpose: VerifyPurpose,
        destination: &str,
        otp_hash: &str,
        expiry: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO verify_otps (id, verify_type, verify_info, current_otp, otp_expiry)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (verify_type, verify_info)
            DO UPDATE SET current_otp = EXCLUDED.current_otp, otp_expiry = EXCLUDED.otp_expiry
            RETURNING *
            "#,
        )
        .bind(ChallengeId::new())
        .bind(purpose.as_str())
        .bind(destination)
        .bind(otp_hash)
        .bind(expiry)
        .fetch_one(pool)
        .await
    }

    /// Fetch the unexpired challenge for (purpose, destination), if any.
    pub async fn find_live(
        purpose: VerifyPurpose,
        destination: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM verify_otps
            WHERE verify_type = $1 AND verify_info = $2 AND otp_expiry >= now()
            "#,
        )
        .bind(purpose.as_str())
        .bind(destination)
        .fetch_optional(pool)
        .await
    }
}
