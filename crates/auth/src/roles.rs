use serde::{Deserialize, Serialize};

use factura_core::Error;

/// Role of a user account.
///
/// The set is closed on purpose: policy decisions match on this enum and the
/// compiler ensures no capability check forgets a variant. Anything outside
/// the two known roles resolves to [`Role::Unknown`], which carries exactly
/// the privileges of [`Role::Standard`] and nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular back-office user.
    #[default]
    Standard,
    /// May additionally manage user accounts.
    Administrator,
    /// Unrecognized stored value. Evaluates as least privilege.
    Unknown,
}

impl Role {
    /// Lenient parse used when reading stored data.
    ///
    /// Never fails: an unrecognized value becomes [`Role::Unknown`] so legacy
    /// rows keep resolving, just without elevated privileges.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" => Role::Standard,
            "administrator" => Role::Administrator,
            _ => Role::Unknown,
        }
    }

    /// Strict parse used for role-assignment payloads.
    ///
    /// Only the two known role names are accepted; deliberately storing an
    /// unknown role is a request error, not a fallback case.
    pub fn from_known(raw: &str) -> Result<Self, Error> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Role::Standard),
            "administrator" => Ok(Role::Administrator),
            other => Err(Error::invalid_argument(format!(
                "unknown role '{other}', expected 'standard' or 'administrator'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Administrator => "administrator",
            Role::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::from_wire(&raw))
    }
}
