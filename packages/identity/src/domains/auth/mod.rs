//! Auth domain - credential lifecycle and session tokens
//!
//! Responsibilities:
//! - Phone OTP challenges (issue, verify)
//! - Transactional signup (credential + customer + wishlist)
//! - Password authentication
//! - RS256 access/refresh token issuance and verification
//! - Persisted refresh sessions and password-reset challenges
//!
//! The HTTP layer sequences the two sign-in steps explicitly:
//! `authenticate_with_roles` behind its guard, then `issue_session`.

pub mod errors;
pub mod hash;
pub mod jwt;
pub mod models;
pub mod otp;
pub mod service;

pub use errors::AuthError;
pub use jwt::{Claims, TokenIssuer, TokenPayload};
pub use service::{AuthService, IssuedChallenge, SignUpRequest, TokenPair};
