// Marketplace Identity Core
//
// This crate provides the authentication and credential lifecycle for the
// marketplace backend: phone OTP verification, transactional signup,
// password authentication, signed access/refresh tokens, and persisted
// refresh sessions.
//
// The HTTP layer, SMS delivery, and the listing/staff domains live in their
// own crates and consume this one through `domains::auth::AuthService`.

pub mod common;
pub mod config;
pub mod domains;

pub use config::*;
