//! Error types for the tenantry system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenantryError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("invalid identifier `{value}`: {reason}")]
    InvalidIdentifier { value: String, reason: String },

    #[error("statement rejected by control plane ({code}): {message} [{statement}]")]
    Rejected {
        statement: String,
        code: String,
        message: String,
    },

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("control plane unreachable: {0}")]
    Connection(String),

    #[error("tenant {email}: {source}")]
    Tenant {
        email: String,
        #[source]
        source: Box<TenantryError>,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl TenantryError {
    /// Attach the offending identity to an error raised while processing it.
    pub fn for_tenant(self, email: impl Into<String>) -> Self {
        TenantryError::Tenant {
            email: email.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any per-tenant context.
    pub fn root(&self) -> &TenantryError {
        match self {
            TenantryError::Tenant { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type TenantryResult<T> = Result<T, TenantryError>;
