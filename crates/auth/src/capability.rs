use serde::{Deserialize, Serialize};

/// A named permission checked by the access policy.
///
/// Capabilities are the only vocabulary handlers use when asking "may this
/// caller do X"; the mapping from roles to capabilities lives in one place
/// ([`crate::policy::can_access`]) instead of being scattered per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// List all users and change their roles.
    ManageUsers,
    /// Read the caller's own profile.
    ReadOwnProfile,
    /// Update the caller's own profile.
    UpdateOwnProfile,
    /// Create, update and delete clients.
    ManageClients,
    /// Create, update and delete invoices.
    ManageInvoices,
    /// Read yearly/monthly summaries and breakdowns.
    ViewReports,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageUsers => "users.manage",
            Capability::ReadOwnProfile => "profile.read",
            Capability::UpdateOwnProfile => "profile.update",
            Capability::ManageClients => "clients.manage",
            Capability::ManageInvoices => "invoices.manage",
            Capability::ViewReports => "reports.view",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
