//! Database-specific error types and conversions.

use tenantry_core::error::TenantryError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Config(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{code}: {message}")]
    Rejected {
        statement: String,
        code: String,
        message: String,
    },

    #[error("malformed control-plane response: {0}")]
    Decode(String),
}

impl From<DbError> for TenantryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Config(msg) => TenantryError::Config(msg),
            DbError::Unauthorized(msg) => TenantryError::Authentication(msg),
            DbError::Rejected {
                statement,
                code,
                message,
            } => TenantryError::Rejected {
                statement,
                code,
                message,
            },
            DbError::Decode(msg) => TenantryError::Internal(msg),
            other @ (DbError::Http(_) | DbError::Status { .. }) => {
                TenantryError::Connection(other.to_string())
            }
        }
    }
}
