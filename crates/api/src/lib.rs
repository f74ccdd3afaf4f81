//! Catalog API server library.
//!
//! Exposes config, state, error handling, the query layer and routes so the
//! binary and the integration tests share them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
