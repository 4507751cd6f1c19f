use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use factura_clients::Client;
use factura_core::ClientId;

use crate::StoreError;

/// Storage contract for clients.
pub trait ClientStore: Send + Sync {
    fn get(&self, id: ClientId) -> Result<Option<Client>, StoreError>;
    fn upsert(&self, client: Client) -> Result<(), StoreError>;
    /// Returns `false` when nothing was stored under `id`.
    fn remove(&self, id: ClientId) -> Result<bool, StoreError>;
    fn list(&self) -> Result<Vec<Client>, StoreError>;
}

impl<S> ClientStore for Arc<S>
where
    S: ClientStore + ?Sized,
{
    fn get(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        (**self).get(id)
    }

    fn upsert(&self, client: Client) -> Result<(), StoreError> {
        (**self).upsert(client)
    }

    fn remove(&self, id: ClientId) -> Result<bool, StoreError> {
        (**self).remove(id)
    }

    fn list(&self) -> Result<Vec<Client>, StoreError> {
        (**self).list()
    }
}

/// In-memory client store for dev/test and as the contract's reference
/// implementation.
#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    inner: RwLock<HashMap<ClientId, Client>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStore for InMemoryClientStore {
    fn get(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn upsert(&self, client: Client) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(client.id, client);
        Ok(())
    }

    fn remove(&self, id: ClientId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<Client>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut clients: Vec<Client> = map.values().cloned().collect();
        clients.sort_by_key(|c| *c.id.as_uuid());
        Ok(clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factura_clients::ClientDraft;

    fn client(name: &str) -> Client {
        ClientDraft {
            name: name.to_string(),
            billing_name: None,
            address: None,
            postal_code: None,
            city: None,
            tax_id: None,
            email: None,
            status: None,
        }
        .into_client(ClientId::new())
        .unwrap()
    }

    #[test]
    fn upsert_get_remove_round_trips() {
        let store = InMemoryClientStore::new();
        let acme = client("Acme");

        store.upsert(acme.clone()).unwrap();
        assert_eq!(store.get(acme.id).unwrap(), Some(acme.clone()));

        assert!(store.remove(acme.id).unwrap());
        assert_eq!(store.get(acme.id).unwrap(), None);
    }

    #[test]
    fn remove_missing_reports_false() {
        let store = InMemoryClientStore::new();
        assert!(!store.remove(ClientId::new()).unwrap());
    }

    #[test]
    fn list_contains_every_stored_client() {
        let store = InMemoryClientStore::new();
        store.upsert(client("Acme")).unwrap();
        store.upsert(client("Globex")).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
    }
}
