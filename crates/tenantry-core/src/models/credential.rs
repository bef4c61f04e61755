//! Generated principal credential.

use std::fmt;

use serde::{Serialize, Serializer};

/// A freshly generated password for a tenant principal.
///
/// `Debug` is redacted so the value cannot leak through logs or error
/// output. It is shown once, through [`Credential::expose`] or when a
/// provisioning result is serialized for the operator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl Serialize for Credential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
