//! Authentication service.
//!
//! Accounts live in the remote user sheet. Passwords are stored as argon2
//! PHC hashes: registration hashes before writing, login verifies against
//! the stored hash. The legacy sheets compared plaintext; rows holding
//! anything that is not a valid hash simply fail verification.
//!
//! An optional configured bootstrap admin is checked before the remote
//! lookup, replacing the hardcoded credential pair of the legacy variant.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;

use motorstand_core::User;

use crate::config::BootstrapAdmin;
use crate::sheet::{SheetClient, UserRow};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles login against the remote user sheet (plus the optional bootstrap
/// admin) and registration of new accounts.
pub struct AuthService<'a> {
    sheet: &'a SheetClient,
    bootstrap: Option<&'a BootstrapAdmin>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(sheet: &'a SheetClient, bootstrap: Option<&'a BootstrapAdmin>) -> Self {
        Self { sheet, bootstrap }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password doesn't verify; `AuthError::Sheet` if the remote user
    /// list cannot be fetched.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        // Configured admin first: no remote round-trip needed.
        if let Some(bootstrap) = self.bootstrap
            && bootstrap.username == username
        {
            verify_password(password, bootstrap.password_hash.expose_secret())?;
            return Ok(User {
                username: bootstrap.username.clone(),
                email: bootstrap.email.clone(),
                admin: 1,
            });
        }

        let rows = self.sheet.list_users().await?;
        let row = find_user(&rows, username).ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &row.password)?;

        Ok(User {
            username: row.username.clone(),
            email: row.email.clone(),
            admin: row.admin,
        })
    }

    /// Register a new non-admin account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is too short,
    /// `AuthError::UserAlreadyExists` if the username is taken, and
    /// `AuthError::Sheet` if the remote user store cannot be reached.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        validate_password(password)?;

        let rows = self.sheet.list_users().await?;
        if find_user(&rows, username).is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let row = UserRow {
            username: username.to_string(),
            password: hash_password(password)?,
            email: email.to_string(),
            // New accounts never start with backoffice access
            admin: 0,
        };
        self.sheet.create_user(&row).await?;

        Ok(())
    }
}

/// Find a user row by exact username match.
#[must_use]
pub fn find_user<'r>(rows: &'r [UserRow], username: &str) -> Option<&'r UserRow> {
    rows.iter().find(|row| row.username == username)
}

/// Hash a password with argon2 for storage in the user sheet.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// A stored value that doesn't parse as a hash (legacy plaintext rows) is
/// treated as a failed verification, not as a server error.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` when verification fails.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        tracing::warn!("Stored password is not a valid PHC hash: {e}");
        AuthError::InvalidCredentials
    })?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Validate that a password meets minimum requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
