//! Clients domain module (billing counterparties).
//!
//! Business rules for client records, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod client;

pub use client::{Client, ClientDraft, ClientPatch, ClientStatus, StatusCounts};
