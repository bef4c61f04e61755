//! Domain models for tenantry.

pub mod account;
pub mod credential;
pub mod identity;
