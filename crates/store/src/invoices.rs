use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use factura_core::{ClientId, InvoiceId};
use factura_invoicing::Invoice;

use crate::StoreError;

/// Storage contract for invoices.
///
/// `find_issued_between` is the aggregation engine's only query: one range
/// scan per report, never a per-month re-query.
pub trait InvoiceStore: Send + Sync {
    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;
    fn upsert(&self, invoice: Invoice) -> Result<(), StoreError>;
    /// Returns `false` when nothing was stored under `id`.
    fn remove(&self, id: InvoiceId) -> Result<bool, StoreError>;
    fn list(&self) -> Result<Vec<Invoice>, StoreError>;
    /// Invoices whose issue instant falls within `[start, end]`, both ends
    /// inclusive, ordered by issue instant.
    fn find_issued_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Invoice>, StoreError>;
    /// Number of stored invoices referencing `client_id`.
    fn count_for_client(&self, client_id: ClientId) -> Result<usize, StoreError>;
}

impl<S> InvoiceStore for Arc<S>
where
    S: InvoiceStore + ?Sized,
{
    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        (**self).get(id)
    }

    fn upsert(&self, invoice: Invoice) -> Result<(), StoreError> {
        (**self).upsert(invoice)
    }

    fn remove(&self, id: InvoiceId) -> Result<bool, StoreError> {
        (**self).remove(id)
    }

    fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        (**self).list()
    }

    fn find_issued_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Invoice>, StoreError> {
        (**self).find_issued_between(start, end)
    }

    fn count_for_client(&self, client_id: ClientId) -> Result<usize, StoreError> {
        (**self).count_for_client(client_id)
    }
}

/// In-memory invoice store for dev/test and as the contract's reference
/// implementation.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    inner: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn upsert(&self, invoice: Invoice) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(invoice.id, invoice);
        Ok(())
    }

    fn remove(&self, id: InvoiceId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut invoices: Vec<Invoice> = map.values().cloned().collect();
        invoices.sort_by_key(|i| *i.id.as_uuid());
        Ok(invoices)
    }

    fn find_issued_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Invoice>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut invoices: Vec<Invoice> = map
            .values()
            .filter(|i| i.issued_at >= start && i.issued_at <= end)
            .cloned()
            .collect();
        invoices.sort_by_key(|i| (i.issued_at, *i.id.as_uuid()));
        Ok(invoices)
    }

    fn count_for_client(&self, client_id: ClientId) -> Result<usize, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().filter(|i| i.client_id == client_id).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use factura_invoicing::{InvoiceDraft, LineItem};
    use rust_decimal::Decimal;

    fn invoice_at(client_id: ClientId, issued_at: DateTime<Utc>) -> Invoice {
        InvoiceDraft {
            client_id,
            subject: "Work".to_string(),
            issued_at: Some(issued_at),
            lines: vec![LineItem {
                description: "work".to_string(),
                quantity: Decimal::ONE,
                unit_price: Decimal::new(10_000, 2),
                tax_rate: Decimal::new(20, 2),
            }],
        }
        .into_invoice(InvoiceId::new(), issued_at)
        .unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn range_query_is_inclusive_on_both_ends() {
        let store = InMemoryInvoiceStore::new();
        let client_id = ClientId::new();

        let start = at(2024, 1, 1, 0, 0, 0);
        let end = at(2024, 12, 31, 23, 59, 59);

        store.upsert(invoice_at(client_id, start)).unwrap();
        store.upsert(invoice_at(client_id, end)).unwrap();
        store
            .upsert(invoice_at(client_id, at(2023, 12, 31, 23, 59, 59)))
            .unwrap();
        store
            .upsert(invoice_at(client_id, at(2025, 1, 1, 0, 0, 0)))
            .unwrap();

        let found = store.find_issued_between(start, end).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].issued_at, start);
        assert_eq!(found[1].issued_at, end);
    }

    #[test]
    fn count_for_client_sees_only_that_client() {
        let store = InMemoryInvoiceStore::new();
        let ours = ClientId::new();
        let theirs = ClientId::new();

        store
            .upsert(invoice_at(ours, at(2024, 3, 1, 12, 0, 0)))
            .unwrap();
        store
            .upsert(invoice_at(ours, at(2024, 4, 1, 12, 0, 0)))
            .unwrap();
        store
            .upsert(invoice_at(theirs, at(2024, 5, 1, 12, 0, 0)))
            .unwrap();

        assert_eq!(store.count_for_client(ours).unwrap(), 2);
        assert_eq!(store.count_for_client(theirs).unwrap(), 1);
        assert_eq!(store.count_for_client(ClientId::new()).unwrap(), 0);
    }

    #[test]
    fn remove_reports_whether_anything_was_deleted() {
        let store = InMemoryInvoiceStore::new();
        let invoice = invoice_at(ClientId::new(), at(2024, 6, 15, 9, 30, 0));
        let id = invoice.id;

        store.upsert(invoice).unwrap();
        assert!(store.remove(id).unwrap());
        assert!(!store.remove(id).unwrap());
    }
}
