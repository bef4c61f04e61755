//! Tenantry Database: Neo4j control-plane connection management.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - An in-memory control plane for tests (`MemoryControlPlane`, behind
//!   the `memory` feature)
//! - Error types ([`DbError`])

mod connection;
mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryControlPlane;
