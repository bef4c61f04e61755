//! Tenantry Provision: tenant account lifecycle over a control plane.
//!
//! Provisioning creates a database, a user and a role per tenant and
//! applies a fixed privilege template; removal drops all three.

pub mod config;
pub mod credential;
pub mod service;
pub mod template;
mod words;

pub use config::ProvisionConfig;
pub use credential::{CredentialGenerator, WordPairGenerator};
pub use service::{FailurePolicy, ProvisionService};
