//! Identity and identifier models.
//!
//! An [`Email`] is the only input a tenant is known by. Every object the
//! provisioner creates (database, user, role) is named by the
//! [`Identifier`] derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TenantryError, TenantryResult};

/// Shortest object name accepted by the control plane.
pub const MIN_IDENTIFIER_LEN: usize = 3;
/// Longest object name accepted by the control plane.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse an email address.
    ///
    /// Requires exactly one `@`, a non-empty local part and a dotted
    /// domain with non-empty labels. Whitespace and control characters
    /// are rejected anywhere.
    pub fn parse(value: impl Into<String>) -> TenantryResult<Self> {
        let value = value.into();
        let invalid = |reason: &str| TenantryError::Validation {
            message: format!("`{value}` is not a valid email address: {reason}"),
        };

        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("contains whitespace"));
        }

        let mut parts = value.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected exactly one `@`"));
        };

        if local.is_empty() {
            return Err(invalid("empty local part"));
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(invalid("domain must be dotted with non-empty labels"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = TenantryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = TenantryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip an email down to `[A-Za-z0-9@.]`, spell out `@` and `.` as
/// `AT` and `DOT`, and lowercase the result.
///
/// `john.doe@example.com` becomes `johndotdoeatexampledotcom`.
///
/// The mapping is deterministic but not injective: addresses that differ
/// only in case, or only in stripped characters, map to the same value.
pub fn sanitize_email(email: &str) -> String {
    let mut out = String::with_capacity(email.len() + 8);
    for c in email.chars() {
        match c {
            '@' => out.push_str("at"),
            '.' => out.push_str("dot"),
            c if c.is_ascii_alphanumeric() => out.push(c.to_ascii_lowercase()),
            _ => {}
        }
    }
    out
}

/// An object name that is safe to interpolate into an administrative
/// statement.
///
/// Construction goes through an allow-list: an ASCII lowercase letter,
/// followed by ASCII lowercase letters or digits, between
/// [`MIN_IDENTIFIER_LEN`] and [`MAX_IDENTIFIER_LEN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> TenantryResult<Self> {
        let value = value.into();
        let reject = |reason: String| TenantryError::InvalidIdentifier {
            value: value.clone(),
            reason,
        };

        let len = value.chars().count();
        if !(MIN_IDENTIFIER_LEN..=MAX_IDENTIFIER_LEN).contains(&len) {
            return Err(reject(format!(
                "length {len} is outside {MIN_IDENTIFIER_LEN}..={MAX_IDENTIFIER_LEN}"
            )));
        }
        if !value.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(reject("must start with a lowercase ASCII letter".into()));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        {
            return Err(reject(format!("character `{bad}` is not allowed")));
        }

        Ok(Self(value))
    }

    /// Derive the tenant identifier for an email.
    pub fn for_email(email: &Email) -> TenantryResult<Self> {
        Self::new(sanitize_email(email.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(email: &str) -> String {
        Identifier::for_email(&Email::parse(email).unwrap())
            .unwrap()
            .as_str()
            .to_owned()
    }

    #[test]
    fn derives_documented_example() {
        assert_eq!(derive("john.doe@example.com"), "johndotdoeatexampledotcom");
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = derive("Alice.Smith+news@Mail.Example.org");
        for _ in 0..10 {
            assert_eq!(derive("Alice.Smith+news@Mail.Example.org"), first);
        }
    }

    #[test]
    fn derivation_uses_only_safe_characters() {
        for email in [
            "a.b@c.de",
            "O'Neil@example.com",
            "user_name-1@sub.example.co.uk",
            "x!#$%&*=?^`{|}~y@example.net",
        ] {
            let id = sanitize_email(email);
            assert!(!id.contains('@'), "{id}");
            assert!(!id.contains('.'), "{id}");
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "{id}"
            );
        }
    }

    #[test]
    fn derivation_is_not_injective() {
        // Case is folded.
        assert_eq!(derive("John.Doe@x.com"), derive("john.doe@x.com"));
        // Characters outside the safe set are dropped.
        assert_eq!(derive("a+b@xy.com"), derive("ab@xy.com"));
        // The spelled-out separators collide with literal words.
        assert_eq!(derive("a.b@xy.com"), derive("adotb@xy.com"));
        // Distinct addresses that survive sanitization stay distinct.
        assert_ne!(derive("ab@xy.com"), derive("ba@xy.com"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "a@b@example.com",
            "user@localhost",
            "user@example..com",
            "user@.example.com",
            "us er@example.com",
        ] {
            assert!(Email::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn email_deserialization_validates() {
        let ok: Email = serde_json::from_str("\"a@example.com\"").unwrap();
        assert_eq!(ok.as_str(), "a@example.com");
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
    }

    #[test]
    fn identifier_allow_list() {
        assert!(Identifier::new("neo4j").is_ok());
        assert!(Identifier::new("tenant42").is_ok());

        for bad in ["ab", "4tenant", "Tenant", "ten-ant", "ten ant", "x`y", "a;DROP"] {
            assert!(
                matches!(
                    Identifier::new(bad),
                    Err(TenantryError::InvalidIdentifier { .. })
                ),
                "accepted {bad:?}"
            );
        }
        assert!(Identifier::new("a".repeat(MAX_IDENTIFIER_LEN)).is_ok());
        assert!(Identifier::new("a".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
    }

    #[test]
    fn emails_whose_identifier_fails_validation_are_rejected() {
        // Leading digit survives sanitization but is not a legal name.
        let email = Email::parse("1st@example.com").unwrap();
        assert!(Identifier::for_email(&email).is_err());

        let long = Email::parse(format!("{}@example.com", "a".repeat(60))).unwrap();
        assert!(Identifier::for_email(&long).is_err());
    }
}
