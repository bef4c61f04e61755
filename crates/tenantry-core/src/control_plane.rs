//! The seam between tenant provisioning and the database that owns the
//! accounts.
//!
//! The control plane is the single source of truth for which tenants
//! exist. Implementations must not cache that answer.

use crate::error::TenantryResult;
use crate::statement::Statement;

pub trait ControlPlane: Send + Sync {
    /// Execute one administrative statement, failing if the control
    /// plane rejects it.
    fn execute(&self, statement: &Statement) -> impl Future<Output = TenantryResult<()>> + Send;
}

impl<C: ControlPlane> ControlPlane for &C {
    fn execute(&self, statement: &Statement) -> impl Future<Output = TenantryResult<()>> + Send {
        (**self).execute(statement)
    }
}
