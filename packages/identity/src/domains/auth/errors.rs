use thiserror::Error;

/// Errors surfaced by the auth flows.
///
/// `Validation` and `Unauthorized` are the two user-facing kinds; the HTTP
/// layer maps them to 400 and 401. `Unauthorized` always renders the same
/// generic message so a caller cannot tell an unknown login from a wrong
/// password. Database and internal faults propagate unclassified.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("login or password is not correct")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
