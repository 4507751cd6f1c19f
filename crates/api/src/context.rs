use factura_auth::{Caller, Role};
use factura_core::UserId;

/// Caller context for a request (authenticated identity + role).
///
/// Inserted by the auth middleware after the bearer token has been verified
/// and the account loaded; immutable and present for all protected routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallerContext {
    caller: Caller,
}

impl CallerContext {
    pub fn new(caller: Caller) -> Self {
        Self { caller }
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn user_id(&self) -> UserId {
        self.caller.user_id
    }

    pub fn role(&self) -> Role {
        self.caller.role
    }
}
