//! Tenantry Core: domain types shared by every tenantry crate.
//!
//! This crate provides:
//! - Identity and identifier types ([`models::identity`])
//! - Provisioning results and credentials ([`models::account`], [`models::credential`])
//! - Administrative statements ([`statement::Statement`])
//! - The control-plane seam ([`control_plane::ControlPlane`])
//! - Error types ([`error::TenantryError`])

pub mod control_plane;
pub mod error;
pub mod models;
pub mod statement;

pub use control_plane::ControlPlane;
pub use error::{TenantryError, TenantryResult};
pub use statement::Statement;
