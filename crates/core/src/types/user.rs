//! The session-facing user identity.

use serde::{Deserialize, Serialize};

/// A user known to the remote user store.
///
/// This is the identity shape carried in the session after login. The
/// password (hash) never leaves the storefront's auth service, so it is not
/// part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    /// Numeric admin flag as stored in the user sheet: 1 grants backoffice
    /// access, anything else does not.
    pub admin: i64,
}

impl User {
    /// Whether this user may manage the inventory.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin == 1
    }
}
