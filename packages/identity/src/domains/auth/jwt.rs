//! Access and refresh token issuance (RS256).
//!
//! The two token classes are signed with distinct RSA keypairs: stealing
//! the access-token private key does not let an attacker mint refresh
//! tokens, and vice versa. Verification of incoming tokens is performed by
//! the HTTP guard layer, which holds only the public keys.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::CredentialId;
use crate::config::TokenConfig;

use super::errors::AuthError;
use super::models::RoleTitle;

/// Identity carried by both token classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub credential_id: CredentialId,
    pub roles: Vec<RoleTitle>,
}

/// JWT claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub credential_id: CredentialId,
    pub roles: Vec<RoleTitle>,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub jti: String,
}

impl Claims {
    /// Reconstruct the payload for reissuing a token.
    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            credential_id: self.credential_id,
            roles: self.roles.clone(),
        }
    }
}

/// Signs and verifies access/refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
    issuer: String,
}

impl TokenIssuer {
    /// Build an issuer from configured PEM keys and TTLs.
    pub fn new(config: &TokenConfig) -> Result<Self> {
        Ok(Self {
            access_encoding: EncodingKey::from_rsa_pem(config.access_private_key_pem.as_bytes())
                .context("access token private key is not a valid RSA PEM")?,
            access_decoding: DecodingKey::from_rsa_pem(config.access_public_key_pem.as_bytes())
                .context("access token public key is not a valid RSA PEM")?,
            refresh_encoding: EncodingKey::from_rsa_pem(config.refresh_private_key_pem.as_bytes())
                .context("refresh token private key is not a valid RSA PEM")?,
            refresh_decoding: DecodingKey::from_rsa_pem(config.refresh_public_key_pem.as_bytes())
                .context("refresh token public key is not a valid RSA PEM")?,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            issuer: config.issuer.clone(),
        })
    }

    /// Issue a short-lived access token.
    pub fn issue_access_token(&self, payload: &TokenPayload) -> Result<String, AuthError> {
        self.issue(payload, &self.access_encoding, self.access_ttl)
    }

    /// Issue a long-lived refresh token.
    pub fn issue_refresh_token(&self, payload: &TokenPayload) -> Result<String, AuthError> {
        self.issue(payload, &self.refresh_encoding, self.refresh_ttl)
    }

    /// Verify an access token against the access public key.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, &self.access_decoding)
    }

    /// Verify a refresh token against the refresh public key.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, &self.refresh_decoding)
    }

    fn issue(
        &self,
        payload: &TokenPayload,
        key: &EncodingKey,
        ttl: chrono::Duration,
    ) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: payload.credential_id.to_string(),
            credential_id: payload.credential_id,
            roles: payload.roles.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, key)
            .map_err(|e| AuthError::Internal(anyhow::anyhow!("token signing failed: {e}")))
    }

    fn verify(&self, token: &str, key: &DecodingKey) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthorized)
    }
}
