//! Auth orchestrator - composes the hasher, OTP store, token issuer, and
//! credential/session models into the account lifecycle flows.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::common::CredentialId;
use crate::config::OtpConfig;
use crate::domains::customer::models::{Customer, CustomerProfile};

use super::errors::AuthError;
use super::hash::{fingerprint, hash_secret, verify_secret};
use super::jwt::{TokenIssuer, TokenPayload};
use super::models::{
    create_account, AuthCredential, CredentialWithRoles, Role, RoleTitle, Session, VerifyOtp,
    VerifyPurpose,
};
use super::otp::generate_code;

/// A freshly issued challenge: the plaintext code goes to the delivery
/// channel (SMS), never to storage.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub destination: String,
    pub code: String,
}

/// The token pair returned by sign-in.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signup input, already shape-checked by the boundary layer.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: String,
    pub password: String,
    pub verify_otp: String,
}

/// Orchestrates the auth flows over a shared connection pool.
///
/// All state lives in Postgres; the service itself is cheap to clone and
/// safe to share across request tasks.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    tokens: TokenIssuer,
    otp: OtpConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: TokenIssuer, otp: OtpConfig) -> Self {
        Self { pool, tokens, otp }
    }

    /// Token issuer, for boundary guards that verify incoming tokens.
    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Issue a phone-verification challenge for an unregistered number.
    ///
    /// Overwrites any live challenge for the same number; the returned
    /// plaintext code is handed to the SMS collaborator by the caller.
    pub async fn request_verify_phone(
        &self,
        mobile_phone: &str,
    ) -> Result<IssuedChallenge, AuthError> {
        if Customer::find_by_phone(mobile_phone, &self.pool)
            .await?
            .is_some()
        {
            return Err(AuthError::validation("phone number is used"));
        }

        let code = generate_code(self.otp.code_length);
        let expiry = Utc::now() + self.otp.ttl;
        VerifyOtp::upsert(
            VerifyPurpose::Phone,
            mobile_phone,
            &hash_secret(&code)?,
            expiry,
            &self.pool,
        )
        .await?;

        info!(destination = %mobile_phone, "phone verification challenge issued");
        Ok(IssuedChallenge {
            destination: mobile_phone.to_string(),
            code,
        })
    }

    /// Check a supplied code against the live challenge for a destination.
    ///
    /// Advisory: a successful check does not consume the challenge. Absent
    /// or expired challenges simply fail the check.
    pub async fn verify_challenge(
        &self,
        purpose: VerifyPurpose,
        destination: &str,
        supplied: &str,
    ) -> Result<bool, AuthError> {
        match VerifyOtp::find_live(purpose, destination, &self.pool).await? {
            Some(challenge) => verify_secret(supplied, &challenge.current_otp),
            None => Ok(false),
        }
    }

    /// Create the account aggregate from a verified phone challenge.
    ///
    /// Credential, customer profile, and wishlist are written in one
    /// transaction; a concurrent signup for the same number loses on the
    /// unique constraint and surfaces as a validation error.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<CustomerProfile, AuthError> {
        if Customer::find_by_phone(&request.mobile_phone, &self.pool)
            .await?
            .is_some()
        {
            return Err(AuthError::validation("phone number is used"));
        }

        let challenge =
            VerifyOtp::find_live(VerifyPurpose::Phone, &request.mobile_phone, &self.pool)
                .await?
                .ok_or_else(|| AuthError::validation("phone number is not verified"))?;

        if !verify_secret(&request.verify_otp, &challenge.current_otp)? {
            return Err(AuthError::validation("otp is not valid"));
        }

        let role = Role::find_by_title(RoleTitle::IndividualCustomer, &self.pool)
            .await?
            .ok_or_else(|| {
                AuthError::Internal(anyhow::anyhow!("individual_customer role is not seeded"))
            })?;

        let password_hash = hash_secret(&request.password)?;
        let (credential, customer, _wishlist) = create_account(
            &request.first_name,
            &request.last_name,
            &request.mobile_phone,
            &password_hash,
            &role,
            &self.pool,
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::validation("phone number is used")
            } else {
                AuthError::Database(e)
            }
        })?;

        info!(credential_id = %credential.id, customer_id = %customer.id, "account created");
        Ok(customer.into())
    }

    /// Check a login/password pair.
    ///
    /// Unknown login and wrong password are indistinguishable to the
    /// caller; both yield the same generic unauthorized error.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<AuthCredential, AuthError> {
        let credential = AuthCredential::find_by_login(login, &self.pool)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !verify_secret(password, &credential.cred_password)? {
            return Err(AuthError::Unauthorized);
        }

        Ok(credential)
    }

    /// Check a login/password pair and resolve the role set for token payloads.
    pub async fn authenticate_with_roles(
        &self,
        login: &str,
        password: &str,
    ) -> Result<CredentialWithRoles, AuthError> {
        let credential = self.authenticate(login, password).await?;
        let roles = credential.load_roles(&self.pool).await?;
        Ok(CredentialWithRoles { credential, roles })
    }

    /// Sign-in step two: mint both tokens and persist the refresh session.
    ///
    /// Not idempotent - every call adds a session row, one per device/login.
    pub async fn issue_session(&self, payload: &TokenPayload) -> Result<TokenPair, AuthError> {
        let access_token = self.tokens.issue_access_token(payload)?;
        let refresh_token = self.tokens.issue_refresh_token(payload)?;

        Session::create(
            payload.credential_id,
            &fingerprint(&refresh_token),
            &self.pool,
        )
        .await?;

        info!(credential_id = %payload.credential_id, "session issued");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Authorize a refresh: the supplied token must match an available
    /// session owned by the claimed credential.
    ///
    /// Returns the reconstructed payload for reissuing a fresh access token.
    pub async fn refresh_payload(
        &self,
        credential_id: CredentialId,
        refresh_token: &str,
    ) -> Result<TokenPayload, AuthError> {
        let with_roles = AuthCredential::find_by_id_with_roles(credential_id, &self.pool)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Session::find_available(credential_id, &fingerprint(refresh_token), &self.pool)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Ok(TokenPayload {
            credential_id: with_roles.credential.id,
            roles: with_roles.roles,
        })
    }

    /// Issue a password-reset challenge for a known login.
    pub async fn request_reset_password(
        &self,
        login: &str,
    ) -> Result<IssuedChallenge, AuthError> {
        let credential = AuthCredential::find_by_login(login, &self.pool)
            .await?
            .ok_or_else(|| AuthError::validation("mobile phone is not existed"))?;

        let code = generate_code(self.otp.code_length);
        let expiry = Utc::now() + self.otp.ttl;
        AuthCredential::set_reset_challenge(credential.id, &hash_secret(&code)?, expiry, &self.pool)
            .await?;

        info!(credential_id = %credential.id, "password reset challenge issued");
        Ok(IssuedChallenge {
            destination: login.to_string(),
            code,
        })
    }

    /// Complete a password reset with the delivered code.
    ///
    /// On success the password hash is replaced and both reset fields are
    /// cleared together, so the same code cannot be replayed.
    pub async fn reset_password(
        &self,
        login: &str,
        new_password: &str,
        otp: &str,
    ) -> Result<(), AuthError> {
        let credential = AuthCredential::find_by_login(login, &self.pool)
            .await?
            .ok_or_else(|| AuthError::validation("mobile phone is not existed"))?;

        let live = match (
            &credential.password_reset_otp,
            credential.password_reset_expiry,
        ) {
            (Some(hash), Some(expiry)) if expiry >= Utc::now() => verify_secret(otp, hash)?,
            _ => false,
        };

        if !live {
            return Err(AuthError::validation("invalid otp"));
        }

        AuthCredential::update_password_and_clear_reset(
            credential.id,
            &hash_secret(new_password)?,
            &self.pool,
        )
        .await?;

        info!(credential_id = %credential.id, "password reset completed");
        Ok(())
    }
}

/// True for Postgres unique-constraint violations (SQLSTATE 23505).
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
