//! Authentication error types.

use thiserror::Error;

use crate::sheet::SheetError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password combination is incorrect.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username is already registered.
    #[error("Username is already taken")]
    UserAlreadyExists,

    /// Password doesn't meet minimum requirements.
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    Hash(String),

    /// User store operation failed.
    #[error("User store error: {0}")]
    Sheet(#[from] SheetError),
}
