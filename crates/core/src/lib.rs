//! `factura-core` — shared foundation building blocks.
//!
//! Strongly-typed identifiers and the error taxonomy every other crate in the
//! workspace reports through. Pure types only, no infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{Error, Result};
pub use id::{ClientId, InvoiceId, UserId};
