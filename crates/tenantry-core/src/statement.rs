//! Administrative statements understood by the control plane.
//!
//! Object names only ever come from validated [`Identifier`]s. The
//! credential is never part of the statement text; it travels as the
//! `$password` parameter.

use std::fmt;

use serde_json::{Map, Value};

use crate::models::credential::Credential;
use crate::models::identity::Identifier;

/// Name of the parameter carrying a principal's password.
pub const PASSWORD_PARAM: &str = "password";

/// DBMS-level listing privileges that tenants are denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbmsListing {
    Users,
    Roles,
    Privileges,
}

impl DbmsListing {
    pub const ALL: [DbmsListing; 3] = [Self::Users, Self::Roles, Self::Privileges];

    fn keyword(self) -> &'static str {
        match self {
            Self::Users => "SHOW USER",
            Self::Roles => "SHOW ROLE",
            Self::Privileges => "SHOW PRIVILEGE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateDatabase { name: Identifier },
    CreateUser { name: Identifier, password: Credential },
    CreateRole { name: Identifier },
    GrantRole { role: Identifier, user: Identifier },
    DenyAccessAllDatabases { role: Identifier },
    GrantAccess { database: Identifier, role: Identifier },
    GrantAllPrivileges { database: Identifier, role: Identifier },
    GrantMatch { graph: Identifier, role: Identifier },
    GrantCreate { graph: Identifier, role: Identifier },
    GrantSetProperty { graph: Identifier, role: Identifier },
    DenyDelete { graph: Identifier, role: Identifier },
    DenyDbms { listing: DbmsListing, role: Identifier },
    DropUser { name: Identifier },
    DropDatabase { name: Identifier },
    DropRole { name: Identifier },
}

impl Statement {
    /// Render the Cypher text of this statement.
    pub fn cypher(&self) -> String {
        match self {
            Self::CreateDatabase { name } => format!("CREATE DATABASE {name} IF NOT EXISTS"),
            Self::CreateUser { name, .. } => format!(
                "CREATE OR REPLACE USER {name} SET PASSWORD ${PASSWORD_PARAM} CHANGE NOT REQUIRED"
            ),
            Self::CreateRole { name } => format!("CREATE ROLE {name} IF NOT EXISTS"),
            Self::GrantRole { role, user } => format!("GRANT ROLE {role} TO {user}"),
            Self::DenyAccessAllDatabases { role } => {
                format!("DENY ACCESS ON DATABASE * TO {role}")
            }
            Self::GrantAccess { database, role } => {
                format!("GRANT ACCESS ON DATABASE {database} TO {role}")
            }
            Self::GrantAllPrivileges { database, role } => {
                format!("GRANT ALL PRIVILEGES ON DATABASE {database} TO {role}")
            }
            Self::GrantMatch { graph, role } => format!("GRANT MATCH {{*}} ON GRAPH {graph} TO {role}"),
            Self::GrantCreate { graph, role } => format!("GRANT CREATE ON GRAPH {graph} TO {role}"),
            Self::GrantSetProperty { graph, role } => {
                format!("GRANT SET PROPERTY {{*}} ON GRAPH {graph} TO {role}")
            }
            Self::DenyDelete { graph, role } => format!("DENY DELETE ON GRAPH {graph} TO {role}"),
            Self::DenyDbms { listing, role } => {
                format!("DENY {} ON DBMS TO {role}", listing.keyword())
            }
            Self::DropUser { name } => format!("DROP USER {name}"),
            Self::DropDatabase { name } => format!("DROP DATABASE {name}"),
            Self::DropRole { name } => format!("DROP ROLE {name}"),
        }
    }

    /// Parameters bound alongside [`Statement::cypher`].
    pub fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        if let Self::CreateUser { password, .. } = self {
            params.insert(
                PASSWORD_PARAM.to_owned(),
                Value::String(password.expose().to_owned()),
            );
        }
        params
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cypher())
    }
}
