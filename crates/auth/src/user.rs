//! User accounts and the allow-listed self-service profile update.

use serde::{Deserialize, Serialize};

use factura_core::{Error, Result, UserId};

use crate::Role;

/// A stored user account.
///
/// `password_hash` is opaque to this system: hashing and session issuance
/// happen elsewhere. The field is persisted because the account schema has
/// one, and it never appears in a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
}

impl UserRecord {
    /// Build a validated account record.
    ///
    /// Email and display name are normalized (trimmed, email lowercased).
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Result<Self> {
        Ok(Self {
            id,
            email: normalize_email(&email.into())?,
            display_name: normalize_display_name(&display_name.into())?,
            password_hash: password_hash.into(),
            role,
        })
    }

    /// Apply a self-service profile update.
    ///
    /// The patch type enumerates the only fields this operation may change;
    /// role and password hash are not on it, so they cannot change here no
    /// matter what the request body contained.
    pub fn apply_profile(&mut self, patch: &ProfilePatch) -> Result<()> {
        if let Some(display_name) = &patch.display_name {
            self.display_name = normalize_display_name(display_name)?;
        }
        if let Some(email) = &patch.email {
            self.email = normalize_email(email)?;
        }
        Ok(())
    }
}

/// Allow-listed self-service profile update.
///
/// Absent fields keep their stored value. Unknown fields in the request body
/// are dropped during deserialization, so a payload smuggling `role` has no
/// effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none()
    }
}

fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::invalid_argument("invalid email format"));
    }
    Ok(email)
}

fn normalize_display_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::invalid_argument("display name cannot be empty"));
    }
    Ok(name.to_string())
}
