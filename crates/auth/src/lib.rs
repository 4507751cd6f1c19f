//! `factura-auth` — pure authentication/authorization boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! verification, the role/capability policy, and account records live here;
//! wiring them to requests and persistence happens in the api crate.

pub mod caller;
pub mod capability;
pub mod claims;
pub mod policy;
pub mod roles;
pub mod token;
pub mod user;

pub use caller::Caller;
pub use capability::Capability;
pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use policy::{AccessError, authorize, can_access};
pub use roles::Role;
pub use token::{Hs256TokenVerifier, TokenError, TokenVerifier};
pub use user::{ProfilePatch, UserRecord};
