//! In-memory control plane.
//!
//! Models the account-management subset of Neo4j closely enough to run
//! the provisioning service end to end without a server: `IF NOT EXISTS`
//! creation is a no-op for existing objects, `CREATE OR REPLACE USER`
//! starts the user over without roles, `DROP` of a missing object is
//! rejected, and dropping a role strips it from every user.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::Mutex;
use tenantry_core::control_plane::ControlPlane;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::statement::Statement;
use tracing::debug;

const NOT_FOUND: &str = "Neo.ClientError.General.InvalidArguments";
const DATABASE_NOT_FOUND: &str = "Neo.ClientError.Database.DatabaseNotFound";
const FORBIDDEN: &str = "Neo.ClientError.General.ForbiddenOnReadOnlyDatabase";

/// A user as seen by the in-memory control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUser {
    pub password: String,
    pub roles: BTreeSet<String>,
}

/// Everything the in-memory control plane knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryState {
    pub databases: BTreeSet<String>,
    pub users: BTreeMap<String, MemoryUser>,
    /// Role name to the privilege statements granted or denied to it.
    pub roles: BTreeMap<String, BTreeSet<String>>,
}

impl Default for MemoryState {
    /// A fresh DBMS: the `system` and `neo4j` databases and nothing else.
    fn default() -> Self {
        Self {
            databases: ["system", "neo4j"].into_iter().map(String::from).collect(),
            users: BTreeMap::new(),
            roles: BTreeMap::new(),
        }
    }
}

#[derive(Default)]
pub struct MemoryControlPlane {
    state: Mutex<MemoryState>,
    journal: Mutex<Vec<String>>,
    reject_prefix: Mutex<Option<String>>,
}

impl MemoryControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: MemoryState) -> Self {
        Self {
            state: Mutex::new(state),
            ..Self::default()
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> MemoryState {
        self.state.lock().clone()
    }

    /// Cypher text of every statement received so far, in order,
    /// including rejected ones.
    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().clone()
    }

    /// Reject every subsequent statement whose Cypher text starts with
    /// `prefix`, as a server would on a permission error.
    pub fn reject_statements_starting_with(&self, prefix: impl Into<String>) {
        *self.reject_prefix.lock() = Some(prefix.into());
    }

    fn apply(&self, statement: &Statement) -> TenantryResult<()> {
        let cypher = statement.cypher();
        self.journal.lock().push(cypher.clone());

        let reject = |code: &str, message: String| TenantryError::Rejected {
            statement: cypher.clone(),
            code: code.to_owned(),
            message,
        };

        if let Some(prefix) = self.reject_prefix.lock().as_deref() {
            if cypher.starts_with(prefix) {
                return Err(reject(
                    "Neo.ClientError.Security.Forbidden",
                    "Permission denied.".into(),
                ));
            }
        }

        let mut state = self.state.lock();
        match statement {
            Statement::CreateDatabase { name } => {
                state.databases.insert(name.to_string());
            }
            Statement::CreateUser { name, password } => {
                state.users.insert(
                    name.to_string(),
                    MemoryUser {
                        password: password.expose().to_owned(),
                        roles: BTreeSet::new(),
                    },
                );
            }
            Statement::CreateRole { name } => {
                state.roles.entry(name.to_string()).or_default();
            }
            Statement::GrantRole { role, user } => {
                if !state.roles.contains_key(role.as_str()) {
                    return Err(reject(NOT_FOUND, format!("Role '{role}' does not exist.")));
                }
                let user = state.users.get_mut(user.as_str()).ok_or_else(|| {
                    reject(NOT_FOUND, format!("User '{user}' does not exist."))
                })?;
                user.roles.insert(role.to_string());
            }
            Statement::DenyAccessAllDatabases { role }
            | Statement::GrantAccess { role, .. }
            | Statement::GrantAllPrivileges { role, .. }
            | Statement::GrantMatch { role, .. }
            | Statement::GrantCreate { role, .. }
            | Statement::GrantSetProperty { role, .. }
            | Statement::DenyDelete { role, .. }
            | Statement::DenyDbms { role, .. } => {
                let privileges = state.roles.get_mut(role.as_str()).ok_or_else(|| {
                    reject(NOT_FOUND, format!("Role '{role}' does not exist."))
                })?;
                privileges.insert(cypher.clone());
            }
            Statement::DropUser { name } => {
                if state.users.remove(name.as_str()).is_none() {
                    return Err(reject(NOT_FOUND, format!("User '{name}' does not exist.")));
                }
            }
            Statement::DropDatabase { name } => {
                if name.as_str() == "system" {
                    return Err(reject(FORBIDDEN, "The system database cannot be dropped.".into()));
                }
                if !state.databases.remove(name.as_str()) {
                    return Err(reject(
                        DATABASE_NOT_FOUND,
                        format!("Database '{name}' does not exist."),
                    ));
                }
            }
            Statement::DropRole { name } => {
                if state.roles.remove(name.as_str()).is_none() {
                    return Err(reject(NOT_FOUND, format!("Role '{name}' does not exist.")));
                }
                for user in state.users.values_mut() {
                    user.roles.remove(name.as_str());
                }
            }
        }
        Ok(())
    }
}

impl ControlPlane for MemoryControlPlane {
    async fn execute(&self, statement: &Statement) -> TenantryResult<()> {
        debug!(statement = %statement, "Executing statement in memory");
        self.apply(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenantry_core::models::credential::Credential;
    use tenantry_core::models::identity::Identifier;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn replacing_a_user_resets_password_and_roles() {
        let plane = MemoryControlPlane::new();
        plane.apply(&Statement::CreateRole { name: id("ops") }).unwrap();
        for password in ["first-pass", "first-pass", "second-pass"] {
            plane
                .apply(&Statement::CreateUser {
                    name: id("alice"),
                    password: Credential::new(password),
                })
                .unwrap();
            plane
                .apply(&Statement::GrantRole {
                    role: id("ops"),
                    user: id("alice"),
                })
                .unwrap();
        }
        plane
            .apply(&Statement::CreateUser {
                name: id("alice"),
                password: Credential::new("third-pass"),
            })
            .unwrap();

        let alice = &plane.snapshot().users["alice"];
        assert_eq!(alice.password, "third-pass");
        assert!(alice.roles.is_empty());
    }

    #[test]
    fn drop_of_missing_objects_is_rejected() {
        let plane = MemoryControlPlane::new();
        for statement in [
            Statement::DropUser { name: id("ghost") },
            Statement::DropDatabase { name: id("ghost") },
            Statement::DropRole { name: id("ghost") },
            Statement::DropDatabase { name: id("system") },
        ] {
            assert!(
                matches!(plane.apply(&statement), Err(TenantryError::Rejected { .. })),
                "{statement}"
            );
        }
        assert_eq!(plane.snapshot(), MemoryState::default());
    }

    #[test]
    fn dropping_a_role_removes_it_from_users() {
        let plane = MemoryControlPlane::new();
        plane.apply(&Statement::CreateRole { name: id("ops") }).unwrap();
        plane
            .apply(&Statement::CreateUser {
                name: id("bob"),
                password: Credential::new("calm-heron"),
            })
            .unwrap();
        plane
            .apply(&Statement::GrantRole {
                role: id("ops"),
                user: id("bob"),
            })
            .unwrap();

        plane.apply(&Statement::DropRole { name: id("ops") }).unwrap();
        assert!(plane.snapshot().users["bob"].roles.is_empty());
    }

    #[test]
    fn injected_rejection_is_journaled() {
        let plane = MemoryControlPlane::new();
        plane.reject_statements_starting_with("CREATE ROLE");

        let err = plane
            .apply(&Statement::CreateRole { name: id("ops") })
            .unwrap_err();
        assert!(matches!(err, TenantryError::Rejected { .. }));
        assert_eq!(plane.journal(), vec!["CREATE ROLE ops IF NOT EXISTS"]);
        assert!(plane.snapshot().roles.is_empty());
    }
}
