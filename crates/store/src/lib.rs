//! `factura-store` — the storage contract and its in-memory reference
//! implementation.
//!
//! Every other layer reaches persistence only through the traits here, so a
//! different backend is a new implementation of three traits, not a rewrite.

pub mod clients;
pub mod error;
pub mod invoices;
pub mod users;

pub use clients::{ClientStore, InMemoryClientStore};
pub use error::StoreError;
pub use invoices::{InMemoryInvoiceStore, InvoiceStore};
pub use users::{InMemoryUserStore, UserStore};
