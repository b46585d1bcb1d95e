use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::CredentialId;

use super::super::errors::AuthError;
use super::role::RoleTitle;

/// Auth credential row - SQL persistence layer
///
/// `cred_password` and `password_reset_otp` hold Argon2 digests. The two
/// reset fields are either both null or both set; every update writes them
/// together and a table CHECK constraint backs that up.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct AuthCredential {
    pub id: CredentialId,
    pub cred_login: String,
    pub cred_password: String,
    pub password_reset_otp: Option<String>,
    pub password_reset_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A credential together with its resolved role set.
#[derive(Debug, Clone)]
pub struct CredentialWithRoles {
    pub credential: AuthCredential,
    pub roles: Vec<RoleTitle>,
}

impl AuthCredential {
    /// Find a credential by its login identifier
    pub async fn find_by_login(login: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM auth_credentials WHERE cred_login = $1")
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// Find a credential by ID
    pub async fn find_by_id(
        id: CredentialId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM auth_credentials WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the credential's role titles.
    ///
    /// Query failures stay in the `Database` arm. A title outside the
    /// fixed enumeration means the table was tampered with; that surfaces
    /// as an internal error rather than a silently dropped role.
    pub async fn load_roles(&self, pool: &PgPool) -> Result<Vec<RoleTitle>, AuthError> {
        let titles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.role_title
            FROM roles r
            JOIN credential_roles cr ON cr.role_id = r.id
            WHERE cr.credential_id = $1
            ORDER BY r.role_title
            "#,
        )
        .bind(self.id)
        .fetch_all(pool)
        .await?;

        titles
            .iter()
            .map(|t| t.parse::<RoleTitle>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                AuthError::Internal(e.context("credential carries a role outside the fixed enumeration"))
            })
    }

    /// Find a credential by ID with its roles resolved
    pub async fn find_by_id_with_roles(
        id: CredentialId,
        pool: &PgPool,
    ) -> Result<Option<CredentialWithRoles>, AuthError> {
        match Self::find_by_id(id, pool).await? {
            Some(credential) => {
                let roles = credential.load_roles(pool).await?;
                Ok(Some(CredentialWithRoles { credential, roles }))
            }
            None => Ok(None),
        }
    }

    /// Store a password-reset challenge (hash + expiry) on the credential.
    pub async fn set_reset_challenge(
        id: CredentialId,
        otp_hash: &str,
        expiry: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE auth_credentials
            SET password_reset_otp = $2, password_reset_expiry = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(otp_hash)
        .bind(expiry)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Overwrite the password hash and clear both reset fields in one statement.
    pub async fn update_password_and_clear_reset(
        id: CredentialId,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE auth_credentials
            SET cred_password = $2, password_reset_otp = NULL, password_reset_expiry = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }
}
