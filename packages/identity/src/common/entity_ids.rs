//! Typed ID aliases for the identity domain entities.
//!
//! Each alias is a distinct type; the compiler prevents mixing them up.

pub use super::id::Id;

/// Marker type for auth credential records.
pub struct AuthCredential;

/// Marker type for role records.
pub struct Role;

/// Marker type for OTP challenge records.
pub struct VerifyOtp;

/// Marker type for refresh-token session records.
pub struct Session;

/// Marker type for customer profiles.
pub struct Customer;

/// Marker type for customer wishlists.
pub struct Wishlist;

/// Typed ID for auth credentials.
pub type CredentialId = Id<AuthCredential>;

/// Typed ID for roles.
pub type RoleId = Id<Role>;

/// Typed ID for OTP challenges.
pub type ChallengeId = Id<VerifyOtp>;

/// Typed ID for sessions.
pub type SessionId = Id<Session>;

/// Typed ID for customers.
pub type CustomerId = Id<Customer>;

/// Typed ID for wishlists.
pub type WishlistId = Id<Wishlist>;
