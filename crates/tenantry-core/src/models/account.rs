//! Results of tenant lifecycle operations.
//!
//! The tenant account itself (database, user and role) lives in the
//! control plane. These records only describe what one invocation did.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::credential::Credential;
use super::identity::{Email, Identifier};

/// A tenant that was provisioned by this invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedTenant {
    pub email: Email,
    pub tenant_id: Identifier,
    /// Principal the tenant logs in as.
    pub principal_name: Identifier,
    /// The tenant's own database.
    pub database: Identifier,
    /// Returned once, never stored.
    pub credential: Credential,
    pub provisioned_at: DateTime<Utc>,
}

/// A tenant that was removed by this invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RemovedTenant {
    pub email: Email,
    pub tenant_id: Identifier,
    pub removed_at: DateTime<Utc>,
}
