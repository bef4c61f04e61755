//! Rendering of provisioning results.

use clap::ValueEnum;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::account::{ProvisionedTenant, RemovedTenant};
use tenantry_core::models::identity::Email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks
    Text,
    /// One JSON object per line
    Json,
}

/// Header lines announcing a batch, e.g. `Adding users: a@x.com` followed
/// by a blank line and `Successfully provisioned users:`.
pub fn batch_header(verb: &str, outcome: &str, emails: &[Email]) -> String {
    let list: Vec<&str> = emails.iter().map(Email::as_str).collect();
    format!("{verb} users: {}\n\nSuccessfully {outcome} users:", list.join(", "))
}

pub fn provisioned(format: OutputFormat, tenant: &ProvisionedTenant) -> TenantryResult<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Email: {}\n  Username: {}\n  Database: {}\n  Password: {}",
            tenant.email,
            tenant.principal_name,
            tenant.database,
            tenant.credential.expose()
        )),
        OutputFormat::Json => to_json_line(tenant),
    }
}

pub fn removed(format: OutputFormat, tenant: &RemovedTenant) -> TenantryResult<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Email: {} (Database: {})",
            tenant.email, tenant.tenant_id
        )),
        OutputFormat::Json => to_json_line(tenant),
    }
}

fn to_json_line<T: serde::Serialize>(value: &T) -> TenantryResult<String> {
    serde_json::to_string(value).map_err(|e| TenantryError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tenantry_core::models::credential::Credential;
    use tenantry_core::models::identity::Identifier;

    fn sample() -> ProvisionedTenant {
        let email = Email::parse("jane@example.com").unwrap();
        let id = Identifier::for_email(&email).unwrap();
        ProvisionedTenant {
            email,
            tenant_id: id.clone(),
            principal_name: id.clone(),
            database: id,
            credential: Credential::new("bright-sparrow"),
            provisioned_at: Utc::now(),
        }
    }

    #[test]
    fn text_output_shows_credential_once() {
        let text = provisioned(OutputFormat::Text, &sample()).unwrap();
        assert_eq!(
            text,
            "Email: jane@example.com\n  \
             Username: janeatexampledotcom\n  \
             Database: janeatexampledotcom\n  \
             Password: bright-sparrow"
        );
    }

    #[test]
    fn json_output_is_one_line() {
        let line = provisioned(OutputFormat::Json, &sample()).unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["email"], "jane@example.com");
        assert_eq!(value["tenant_id"], "janeatexampledotcom");
        assert_eq!(value["credential"], "bright-sparrow");
    }

    #[test]
    fn removal_text_names_database() {
        let tenant = RemovedTenant {
            email: Email::parse("jane@example.com").unwrap(),
            tenant_id: Identifier::new("janeatexampledotcom").unwrap(),
            removed_at: Utc::now(),
        };
        assert_eq!(
            removed(OutputFormat::Text, &tenant).unwrap(),
            "Email: jane@example.com (Database: janeatexampledotcom)"
        );
    }

    #[test]
    fn header_lists_emails() {
        let emails = vec![
            Email::parse("a@x.com").unwrap(),
            Email::parse("b@y.org").unwrap(),
        ];
        assert_eq!(
            batch_header("Adding", "provisioned", &emails),
            "Adding users: a@x.com, b@y.org\n\nSuccessfully provisioned users:"
        );
        assert_eq!(
            batch_header("Removing", "removed", &emails[..1]),
            "Removing users: a@x.com\n\nSuccessfully removed users:"
        );
    }
}
