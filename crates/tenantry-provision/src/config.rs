//! Provisioning configuration.

use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::identity::Identifier;

pub const ENV_SHARED_DATABASE: &str = "NEO4J_SHARED_DATABASE";
pub const DEFAULT_SHARED_DATABASE: &str = "neo4j";

/// Configuration for the provisioning service.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Database every tenant may read and write, but not delete from.
    pub shared_database: Identifier,
}

impl ProvisionConfig {
    pub fn new(shared_database: Identifier) -> Self {
        Self { shared_database }
    }

    pub fn from_env() -> TenantryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the shared database name through `lookup`, defaulting to
    /// [`DEFAULT_SHARED_DATABASE`] when unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TenantryResult<Self> {
        let name = lookup(ENV_SHARED_DATABASE)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SHARED_DATABASE.to_owned());

        let shared_database = Identifier::new(name).map_err(|e| {
            TenantryError::Config(format!("{ENV_SHARED_DATABASE} is invalid: {e}"))
        })?;
        Ok(Self { shared_database })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_neo4j() {
        let config = ProvisionConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.shared_database.as_str(), "neo4j");

        let blank = ProvisionConfig::from_lookup(|_| Some("  ".into())).unwrap();
        assert_eq!(blank.shared_database.as_str(), "neo4j");
    }

    #[test]
    fn rejects_unsafe_shared_database() {
        let err = ProvisionConfig::from_lookup(|_| Some("neo4j; DROP".into())).unwrap_err();
        assert!(matches!(err, TenantryError::Config(_)));
    }
}
