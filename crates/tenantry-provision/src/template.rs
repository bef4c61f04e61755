//! The fixed statement sequences that provision and remove a tenant.
//!
//! Every tenant gets a database, a user and a role, all named by the
//! tenant identifier. The role denies access to every database before
//! granting the shared one and the tenant's own, so databases added later
//! stay invisible to tenants.

use tenantry_core::models::credential::Credential;
use tenantry_core::models::identity::Identifier;
use tenantry_core::statement::{DbmsListing, Statement};

/// Statements that provision `tenant`, in execution order.
pub fn provisioning_statements(
    tenant: &Identifier,
    credential: &Credential,
    shared: &Identifier,
) -> Vec<Statement> {
    let role = || tenant.clone();
    let shared_graph = || shared.clone();

    let mut statements = vec![
        Statement::CreateDatabase { name: tenant.clone() },
        // Replacing an existing user resets its password and drops its
        // role binding; GRANT ROLE below restores the binding.
        Statement::CreateUser {
            name: tenant.clone(),
            password: credential.clone(),
        },
        Statement::CreateRole { name: role() },
        Statement::GrantRole {
            role: role(),
            user: tenant.clone(),
        },
        Statement::DenyAccessAllDatabases { role: role() },
        Statement::GrantAccess {
            database: shared.clone(),
            role: role(),
        },
        Statement::GrantAccess {
            database: tenant.clone(),
            role: role(),
        },
        Statement::GrantAllPrivileges {
            database: tenant.clone(),
            role: role(),
        },
        Statement::GrantMatch {
            graph: shared_graph(),
            role: role(),
        },
        Statement::GrantCreate {
            graph: shared_graph(),
            role: role(),
        },
        Statement::GrantSetProperty {
            graph: shared_graph(),
            role: role(),
        },
        Statement::DenyDelete {
            graph: shared_graph(),
            role: role(),
        },
    ];
    statements.extend(
        DbmsListing::ALL
            .into_iter()
            .map(|listing| Statement::DenyDbms { listing, role: role() }),
    );
    statements
}

/// Statements that remove `tenant`, in execution order.
///
/// None of them are guarded with `IF EXISTS`: removing an account that
/// does not exist is an error.
pub fn removal_statements(tenant: &Identifier) -> Vec<Statement> {
    vec![
        Statement::DropUser { name: tenant.clone() },
        Statement::DropDatabase { name: tenant.clone() },
        Statement::DropRole { name: tenant.clone() },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(statements: &[Statement]) -> Vec<String> {
        statements.iter().map(Statement::cypher).collect()
    }

    #[test]
    fn provisioning_sequence_is_fixed() {
        let tenant = Identifier::new("acmeatexampledotcom").unwrap();
        let shared = Identifier::new("neo4j").unwrap();
        let statements = provisioning_statements(&tenant, &Credential::new("odd-yak"), &shared);

        let t = tenant.as_str();
        assert_eq!(
            render(&statements),
            vec![
                format!("CREATE DATABASE {t} IF NOT EXISTS"),
                format!("CREATE OR REPLACE USER {t} SET PASSWORD $password CHANGE NOT REQUIRED"),
                format!("CREATE ROLE {t} IF NOT EXISTS"),
                format!("GRANT ROLE {t} TO {t}"),
                format!("DENY ACCESS ON DATABASE * TO {t}"),
                format!("GRANT ACCESS ON DATABASE neo4j TO {t}"),
                format!("GRANT ACCESS ON DATABASE {t} TO {t}"),
                format!("GRANT ALL PRIVILEGES ON DATABASE {t} TO {t}"),
                format!("GRANT MATCH {{*}} ON GRAPH neo4j TO {t}"),
                format!("GRANT CREATE ON GRAPH neo4j TO {t}"),
                format!("GRANT SET PROPERTY {{*}} ON GRAPH neo4j TO {t}"),
                format!("DENY DELETE ON GRAPH neo4j TO {t}"),
                format!("DENY SHOW USER ON DBMS TO {t}"),
                format!("DENY SHOW ROLE ON DBMS TO {t}"),
                format!("DENY SHOW PRIVILEGE ON DBMS TO {t}"),
            ]
        );
    }

    #[test]
    fn password_is_set_exactly_once() {
        let tenant = Identifier::new("aatxdotcom").unwrap();
        let shared = Identifier::new("neo4j").unwrap();
        let statements = provisioning_statements(&tenant, &Credential::new("odd-yak"), &shared);

        let with_password: Vec<_> = statements
            .iter()
            .filter(|s| !s.parameters().is_empty())
            .collect();
        assert_eq!(with_password.len(), 1);
        assert!(matches!(with_password[0], Statement::CreateUser { .. }));
        assert!(!render(&statements).iter().any(|s| s.starts_with("ALTER USER")));
    }

    #[test]
    fn blanket_deny_precedes_every_access_grant() {
        let tenant = Identifier::new("tenant").unwrap();
        let shared = Identifier::new("shared").unwrap();
        let statements = provisioning_statements(&tenant, &Credential::new("x-y"), &shared);

        let deny = statements
            .iter()
            .position(|s| matches!(s, Statement::DenyAccessAllDatabases { .. }))
            .unwrap();
        for (i, s) in statements.iter().enumerate() {
            if matches!(s, Statement::GrantAccess { .. }) {
                assert!(i > deny, "{s} precedes the blanket deny");
            }
        }
    }

    #[test]
    fn shared_graph_never_gets_delete() {
        let tenant = Identifier::new("tenant").unwrap();
        let shared = Identifier::new("shared").unwrap();
        let rendered = render(&provisioning_statements(
            &tenant,
            &Credential::new("x-y"),
            &shared,
        ));

        assert!(rendered.iter().any(|s| s == "DENY DELETE ON GRAPH shared TO tenant"));
        assert!(!rendered.iter().any(|s| s.starts_with("GRANT") && s.contains("DELETE")));
        assert!(
            !rendered
                .iter()
                .any(|s| s.starts_with("GRANT ALL") && s.contains("shared"))
        );
    }

    #[test]
    fn removal_drops_user_then_database_then_role() {
        let tenant = Identifier::new("tenant").unwrap();
        assert_eq!(
            render(&removal_statements(&tenant)),
            vec!["DROP USER tenant", "DROP DATABASE tenant", "DROP ROLE tenant"]
        );
    }
}
