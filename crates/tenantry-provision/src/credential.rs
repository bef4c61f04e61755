//! Human-readable credential generation.

use rand::seq::IndexedRandom;
use tenantry_core::models::credential::Credential;

use crate::words::{ADJECTIVES, NOUNS};

/// Source of fresh principal credentials.
pub trait CredentialGenerator: Send + Sync {
    fn generate(&self) -> Credential;
}

/// Generates `adjective-noun` passwords such as `bright-sparrow`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordPairGenerator;

impl CredentialGenerator for WordPairGenerator {
    fn generate(&self) -> Credential {
        let mut rng = rand::rng();
        let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("plain");
        let noun = NOUNS.choose(&mut rng).copied().unwrap_or("word");
        Credential::new(format!("{adjective}-{noun}"))
    }
}
