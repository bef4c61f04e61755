//! Tenantry Identity: synthetic email addresses for testing the
//! provisioner.
//!
//! Addresses are built from reserved example domains only, so they can
//! never belong to a real mailbox.

pub mod error;
pub mod generator;
mod names;
pub mod writer;

pub use error::IdentityError;
pub use generator::{NameParts, UniqueEmailGenerator, generate_emails, generate_emails_with};
pub use writer::{CSV_HEADER, save_emails, write_emails};
