//! Service wiring and the guarded operations behind every route.
//!
//! [`AppServices`] is built once at startup and shared via a request
//! extension. Every operation takes the resolved [`Caller`] and runs the
//! access policy before touching a store. The guard is the same for users,
//! clients, invoices, and reporting, never duplicated per resource.

use std::sync::Arc;

use chrono::Utc;

use factura_auth::{Caller, Capability, ProfilePatch, Role, UserRecord, authorize};
use factura_clients::{Client, ClientDraft, ClientPatch, StatusCounts};
use factura_core::{ClientId, Error, InvoiceId, Result, UserId};
use factura_invoicing::{Invoice, InvoiceDraft, InvoicePatch};
use factura_reporting::ReportingService;
use factura_store::{
    ClientStore, InMemoryClientStore, InMemoryInvoiceStore, InMemoryUserStore, InvoiceStore,
    UserStore,
};

pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub clients: Arc<dyn ClientStore>,
    pub invoices: Arc<dyn InvoiceStore>,
    pub reporting: ReportingService,
}

/// Build the service set over the in-memory stores (dev/test configuration;
/// a persistent backend slots in by building `AppServices` over its own store
/// handles).
pub fn build_services() -> AppServices {
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let clients: Arc<dyn ClientStore> = Arc::new(InMemoryClientStore::new());
    let invoices: Arc<dyn InvoiceStore> = Arc::new(InMemoryInvoiceStore::new());
    let reporting = ReportingService::new(invoices.clone());

    AppServices {
        users,
        clients,
        invoices,
        reporting,
    }
}

impl AppServices {
    // ----- clients -----

    pub fn create_client(&self, caller: &Caller, draft: ClientDraft) -> Result<Client> {
        authorize(caller, Capability::ManageClients)?;
        let client = draft.into_client(ClientId::new())?;
        self.clients.upsert(client.clone())?;
        Ok(client)
    }

    pub fn list_clients(&self, caller: &Caller) -> Result<Vec<Client>> {
        authorize(caller, Capability::ManageClients)?;
        Ok(self.clients.list()?)
    }

    pub fn get_client(&self, caller: &Caller, id: ClientId) -> Result<Client> {
        authorize(caller, Capability::ManageClients)?;
        self.clients
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("client {id} not found")))
    }

    pub fn update_client(
        &self,
        caller: &Caller,
        id: ClientId,
        patch: &ClientPatch,
    ) -> Result<Client> {
        authorize(caller, Capability::ManageClients)?;
        let mut client = self
            .clients
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("client {id} not found")))?;
        client.apply(patch)?;
        self.clients.upsert(client.clone())?;
        Ok(client)
    }

    /// Delete a client, unless invoices still reference it.
    ///
    /// No cascade and no orphaning: the invoices must be deleted or moved to
    /// another client first.
    pub fn delete_client(&self, caller: &Caller, id: ClientId) -> Result<()> {
        authorize(caller, Capability::ManageClients)?;
        let referencing = self.invoices.count_for_client(id)?;
        if referencing > 0 {
            return Err(Error::invalid_argument(format!(
                "client {id} is still referenced by {referencing} invoice(s)"
            )));
        }
        if !self.clients.remove(id)? {
            return Err(Error::not_found(format!("client {id} not found")));
        }
        Ok(())
    }

    pub fn client_status_counts(&self, caller: &Caller) -> Result<StatusCounts> {
        authorize(caller, Capability::ManageClients)?;
        let clients = self.clients.list()?;
        Ok(StatusCounts::tally(&clients))
    }

    // ----- invoices -----

    pub fn create_invoice(&self, caller: &Caller, draft: InvoiceDraft) -> Result<Invoice> {
        authorize(caller, Capability::ManageInvoices)?;
        self.require_client(draft.client_id)?;
        let invoice = draft.into_invoice(InvoiceId::new(), Utc::now())?;
        self.invoices.upsert(invoice.clone())?;
        Ok(invoice)
    }

    pub fn list_invoices(&self, caller: &Caller) -> Result<Vec<Invoice>> {
        authorize(caller, Capability::ManageInvoices)?;
        Ok(self.invoices.list()?)
    }

    pub fn get_invoice(&self, caller: &Caller, id: InvoiceId) -> Result<Invoice> {
        authorize(caller, Capability::ManageInvoices)?;
        self.invoices
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("invoice {id} not found")))
    }

    pub fn update_invoice(
        &self,
        caller: &Caller,
        id: InvoiceId,
        patch: &InvoicePatch,
    ) -> Result<Invoice> {
        authorize(caller, Capability::ManageInvoices)?;
        let mut invoice = self
            .invoices
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("invoice {id} not found")))?;
        if let Some(client_id) = patch.client_id {
            self.require_client(client_id)?;
        }
        invoice.apply(patch)?;
        self.invoices.upsert(invoice.clone())?;
        Ok(invoice)
    }

    pub fn delete_invoice(&self, caller: &Caller, id: InvoiceId) -> Result<()> {
        authorize(caller, Capability::ManageInvoices)?;
        if !self.invoices.remove(id)? {
            return Err(Error::not_found(format!("invoice {id} not found")));
        }
        Ok(())
    }

    fn require_client(&self, id: ClientId) -> Result<()> {
        if self.clients.get(id)?.is_none() {
            return Err(Error::not_found(format!("client {id} not found")));
        }
        Ok(())
    }

    // ----- users -----

    pub fn profile(&self, caller: &Caller) -> Result<UserRecord> {
        authorize(caller, Capability::ReadOwnProfile)?;
        self.users
            .get(caller.user_id)?
            .ok_or_else(|| Error::not_found("user record no longer exists"))
    }

    pub fn update_profile(&self, caller: &Caller, patch: &ProfilePatch) -> Result<UserRecord> {
        authorize(caller, Capability::UpdateOwnProfile)?;
        let mut user = self
            .users
            .get(caller.user_id)?
            .ok_or_else(|| Error::not_found("user record no longer exists"))?;
        user.apply_profile(patch)?;
        self.users.upsert(user.clone())?;
        Ok(user)
    }

    pub fn list_users(&self, caller: &Caller) -> Result<Vec<UserRecord>> {
        authorize(caller, Capability::ManageUsers)?;
        Ok(self.users.list()?)
    }

    /// Assign one of the two known roles to a user.
    ///
    /// The role name is parsed strictly, after the guard: deliberately
    /// storing an unrecognized role is a request error, not a fallback case.
    pub fn change_role(&self, caller: &Caller, id: UserId, role_name: &str) -> Result<UserRecord> {
        authorize(caller, Capability::ManageUsers)?;
        let role = Role::from_known(role_name)?;

        let mut user = self
            .users
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        user.role = role;
        self.users.upsert(user.clone())?;
        tracing::info!(user = %id, role = %role, changed_by = %caller.user_id, "role changed");
        Ok(user)
    }
}
