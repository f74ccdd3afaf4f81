//! Catalog domain core.
//!
//! Wire schemas, the contract fingerprint, the cursor pagination codec and
//! the domain error type. This crate has no I/O so it can be shared by the
//! API server, the persistence layer and the client.

pub mod contract;
pub mod error;
pub mod ordering;
pub mod pagination;
pub mod schema;
pub mod types;
