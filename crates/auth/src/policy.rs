use thiserror::Error;

use factura_core::Error;

use crate::{Caller, Capability, Role};

/// Access denial, distinct from an unresolved identity.
///
/// By the time this error can occur a [`Caller`] already exists, so the HTTP
/// layer maps it to 403. Missing identity is rejected earlier, as 401.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("missing capability '{0}'")]
    Forbidden(Capability),
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden(capability) => {
                Error::forbidden(format!("missing capability '{capability}'"))
            }
        }
    }
}

/// Decide whether `role` grants `capability`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
///
/// Only [`Capability::ManageUsers`] requires [`Role::Administrator`]; every
/// other capability is granted to any resolved caller. [`Role::Unknown`]
/// evaluates exactly as [`Role::Standard`]: the fallback can never widen
/// access.
pub fn can_access(role: Role, capability: Capability) -> bool {
    match capability {
        Capability::ManageUsers => role == Role::Administrator,
        Capability::ReadOwnProfile
        | Capability::UpdateOwnProfile
        | Capability::ManageClients
        | Capability::ManageInvoices
        | Capability::ViewReports => true,
    }
}

/// Authorize `caller` for `capability` or report which capability was missing.
pub fn authorize(caller: &Caller, capability: Capability) -> Result<(), AccessError> {
    if can_access(caller.role, capability) {
        Ok(())
    } else {
        Err(AccessError::Forbidden(capability))
    }
}
