use serde::{Deserialize, Serialize};

use factura_core::UserId;

use crate::Role;

/// The resolved identity of the current request.
///
/// Built exactly once per request, after the bearer token has been verified
/// and the account loaded; immutable for the request's duration. The role
/// comes from the store, not the token, so a role change takes effect on the
/// next request without waiting for tokens to expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}
