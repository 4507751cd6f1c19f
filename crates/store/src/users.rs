use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use factura_auth::UserRecord;
use factura_core::UserId;

use crate::StoreError;

/// Storage contract for user accounts.
pub trait UserStore: Send + Sync {
    fn get(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;
    fn upsert(&self, user: UserRecord) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<UserRecord>, StoreError>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn get(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        (**self).get(id)
    }

    fn upsert(&self, user: UserRecord) -> Result<(), StoreError> {
        (**self).upsert(user)
    }

    fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        (**self).list()
    }
}

/// In-memory user store for dev/test and as the contract's reference
/// implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn get(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn upsert(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(user.id, user);
        Ok(())
    }

    fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut users: Vec<UserRecord> = map.values().cloned().collect();
        // UUIDv7 ids are time-ordered, so this is creation order.
        users.sort_by_key(|u| *u.id.as_uuid());
        Ok(users)
    }
}
