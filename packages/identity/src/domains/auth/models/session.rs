use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{CredentialId, SessionId};

/// Session row - SQL persistence layer
///
/// One row per issued refresh token. `refresh_token` stores the SHA-256
/// fingerprint of the token, which is also the lookup key on refresh.
/// Nothing in scope flips `is_available` to false yet; the flag exists so a
/// logout path can invalidate a session without deleting its audit trail.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub credential_id: CredentialId,
    pub refresh_token: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Persist a newly issued refresh token for a credential.
    ///
    /// Every sign-in creates a fresh row; concurrent sessions per
    /// credential are allowed by design.
    pub async fn create(
        credential_id: CredentialId,
        token_fingerprint: &str,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sessions (id, credential_id, refresh_token)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(SessionId::new())
        .bind(credential_id)
        .bind(token_fingerprint)
        .fetch_one(pool)
        .await
    }

    /// Find the available session matching a refresh-token fingerprint.
    pub async fn find_available(
        credential_id: CredentialId,
        token_fingerprint: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM sessions
            WHERE credential_id = $1 AND refresh_token = $2 AND is_available = true
            "#,
        )
        .bind(credential_id)
        .bind(token_fingerprint)
        .fetch_optional(pool)
        .await
    }
}
