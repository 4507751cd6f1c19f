//! Invoicing domain module.
//!
//! Business rules for invoices, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage). Money is decimal end to end; stored
//! totals are always recomputed from the line items at every write.

pub mod invoice;

pub use invoice::{Invoice, InvoiceDraft, InvoicePatch, InvoiceTotals, LineItem, compute_totals};
