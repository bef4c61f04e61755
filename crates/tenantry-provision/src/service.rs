//! Provisioning service: tenant add and remove orchestration.

use chrono::Utc;
use tenantry_core::control_plane::ControlPlane;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::account::{ProvisionedTenant, RemovedTenant};
use tenantry_core::models::identity::{Email, Identifier};
use tracing::{info, warn};

use crate::config::ProvisionConfig;
use crate::credential::{CredentialGenerator, WordPairGenerator};
use crate::template;

/// What a batch does once an identity fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it.
    #[default]
    Abort,
    /// Record the failure and carry on with the next identity.
    Continue,
}

/// Provisioning service.
///
/// Generic over the control plane so the workflow has no dependency on
/// the database crate. Identities are processed one at a time over the
/// single control-plane session; nothing is cached between them.
pub struct ProvisionService<C: ControlPlane, G: CredentialGenerator = WordPairGenerator> {
    control_plane: C,
    credentials: G,
    config: ProvisionConfig,
}

impl<C: ControlPlane> ProvisionService<C, WordPairGenerator> {
    pub fn new(control_plane: C, config: ProvisionConfig) -> Self {
        Self::with_generator(control_plane, WordPairGenerator, config)
    }
}

impl<C: ControlPlane, G: CredentialGenerator> ProvisionService<C, G> {
    pub fn with_generator(control_plane: C, credentials: G, config: ProvisionConfig) -> Self {
        Self {
            control_plane,
            credentials,
            config,
        }
    }

    /// Provision every identity in order, stopping at the first failure.
    ///
    /// Tenants provisioned before the failure stay provisioned.
    pub async fn provision(&self, emails: &[Email]) -> TenantryResult<Vec<ProvisionedTenant>> {
        let mut provisioned = Vec::with_capacity(emails.len());
        self.provision_each(emails, FailurePolicy::Abort, |tenant| {
            provisioned.push(tenant);
            Ok(())
        })
        .await?;
        Ok(provisioned)
    }

    /// Provision every identity in order, handing each result to
    /// `on_provisioned` as soon as it exists.
    ///
    /// Under [`FailurePolicy::Continue`] the failures are returned instead
    /// of ending the batch. An error from `on_provisioned` always ends it.
    pub async fn provision_each(
        &self,
        emails: &[Email],
        policy: FailurePolicy,
        mut on_provisioned: impl FnMut(ProvisionedTenant) -> TenantryResult<()>,
    ) -> TenantryResult<Vec<TenantryError>> {
        require_identities(emails)?;
        let mut failures = Vec::new();
        for email in emails {
            match self.provision_one(email).await {
                Ok(tenant) => on_provisioned(tenant)?,
                Err(err) => failures.push(continue_or_abort(policy, email, err)?),
            }
        }
        Ok(failures)
    }

    /// Provision a single tenant.
    ///
    /// Re-provisioning an existing tenant succeeds and replaces its
    /// password with a fresh one. A failing statement aborts the rest of
    /// the sequence and leaves the tenant partially configured.
    pub async fn provision_one(&self, email: &Email) -> TenantryResult<ProvisionedTenant> {
        // 1. Derive the identifier; reject it before any statement runs.
        let tenant = Identifier::for_email(email).map_err(|e| e.for_tenant(email.as_str()))?;

        // 2. Fresh credential for every call.
        let credential = self.credentials.generate();

        // 3. Database, user, role and privilege template.
        let statements =
            template::provisioning_statements(&tenant, &credential, &self.config.shared_database);
        for statement in &statements {
            self.control_plane
                .execute(statement)
                .await
                .map_err(|e| e.for_tenant(email.as_str()))?;
        }

        info!(
            tenant = %tenant,
            email = %email,
            shared_database = %self.config.shared_database,
            "Provisioned tenant"
        );

        Ok(ProvisionedTenant {
            email: email.clone(),
            principal_name: tenant.clone(),
            database: tenant.clone(),
            tenant_id: tenant,
            credential,
            provisioned_at: Utc::now(),
        })
    }

    /// Remove every identity in order, stopping at the first failure.
    pub async fn remove(&self, emails: &[Email]) -> TenantryResult<Vec<RemovedTenant>> {
        let mut removed = Vec::with_capacity(emails.len());
        self.remove_each(emails, FailurePolicy::Abort, |tenant| {
            removed.push(tenant);
            Ok(())
        })
        .await?;
        Ok(removed)
    }

    /// Remove every identity in order, handing each result to
    /// `on_removed`. Failures follow `policy` as in
    /// [`ProvisionService::provision_each`].
    pub async fn remove_each(
        &self,
        emails: &[Email],
        policy: FailurePolicy,
        mut on_removed: impl FnMut(RemovedTenant) -> TenantryResult<()>,
    ) -> TenantryResult<Vec<TenantryError>> {
        require_identities(emails)?;
        let mut failures = Vec::new();
        for email in emails {
            match self.remove_one(email).await {
                Ok(tenant) => on_removed(tenant)?,
                Err(err) => failures.push(continue_or_abort(policy, email, err)?),
            }
        }
        Ok(failures)
    }

    /// Remove a single tenant's user, database and role.
    ///
    /// Fails if any of the three does not exist.
    pub async fn remove_one(&self, email: &Email) -> TenantryResult<RemovedTenant> {
        let tenant = Identifier::for_email(email).map_err(|e| e.for_tenant(email.as_str()))?;

        for statement in &template::removal_statements(&tenant) {
            self.control_plane
                .execute(statement)
                .await
                .map_err(|e| e.for_tenant(email.as_str()))?;
        }

        info!(tenant = %tenant, email = %email, "Removed tenant");

        Ok(RemovedTenant {
            email: email.clone(),
            tenant_id: tenant,
            removed_at: Utc::now(),
        })
    }
}

fn continue_or_abort(
    policy: FailurePolicy,
    email: &Email,
    err: TenantryError,
) -> TenantryResult<TenantryError> {
    match policy {
        FailurePolicy::Abort => Err(err),
        FailurePolicy::Continue => {
            warn!(email = %email, error = %err, "Tenant failed, continuing with the batch");
            Ok(err)
        }
    }
}

fn require_identities(emails: &[Email]) -> TenantryResult<()> {
    if emails.is_empty() {
        return Err(TenantryError::Validation {
            message: "at least one email is required".into(),
        });
    }
    Ok(())
}
