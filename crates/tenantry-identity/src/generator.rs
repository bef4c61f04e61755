//! Unique mock email generation.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::IdentityError;
use crate::names::{DOMAINS, FIRST_NAMES, LAST_NAMES};

/// Consecutive collisions tolerated before giving up on a new address.
pub const MAX_CONSECUTIVE_COLLISIONS: usize = 1000;

/// Word lists candidates are assembled from.
#[derive(Debug, Clone, Copy)]
pub struct NameParts {
    pub first_names: &'static [&'static str],
    pub last_names: &'static [&'static str],
    pub domains: &'static [&'static str],
}

impl Default for NameParts {
    fn default() -> Self {
        Self {
            first_names: FIRST_NAMES,
            last_names: LAST_NAMES,
            domains: DOMAINS,
        }
    }
}

/// Produces addresses it has not produced before.
///
/// Every candidate is remembered; a repeat is discarded and another
/// candidate drawn, up to [`MAX_CONSECUTIVE_COLLISIONS`] times in a row.
pub struct UniqueEmailGenerator<R: Rng> {
    rng: R,
    parts: NameParts,
    seen: HashSet<String>,
}

impl UniqueEmailGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for UniqueEmailGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> UniqueEmailGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_parts(rng, NameParts::default())
    }

    pub fn with_parts(rng: R, parts: NameParts) -> Self {
        Self {
            rng,
            parts,
            seen: HashSet::new(),
        }
    }

    /// Next address never returned by this generator.
    pub fn next_unique(&mut self) -> Result<String, IdentityError> {
        for _ in 0..MAX_CONSECUTIVE_COLLISIONS {
            let candidate = self.candidate();
            if self.seen.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(IdentityError::Exhausted {
            attempts: MAX_CONSECUTIVE_COLLISIONS,
            produced: self.seen.len(),
        })
    }

    fn candidate(&mut self) -> String {
        let first = self.parts.first_names.choose(&mut self.rng).copied().unwrap_or("user");
        let last = self.parts.last_names.choose(&mut self.rng).copied().unwrap_or("name");
        let domain = self
            .parts
            .domains
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("example.com");

        match self.rng.random_range(0..4) {
            0 => format!("{first}.{last}@{domain}"),
            1 => format!("{first}{last}@{domain}"),
            2 => {
                let initial = first.chars().next().unwrap_or('x');
                format!("{initial}{last}@{domain}")
            }
            _ => {
                let suffix: u16 = self.rng.random_range(1..100);
                format!("{first}{suffix}@{domain}")
            }
        }
    }
}

/// Generate `count` distinct mock addresses in unspecified order.
pub fn generate_emails(count: usize) -> Result<Vec<String>, IdentityError> {
    generate_emails_with(count, UniqueEmailGenerator::new())
}

/// Fill a set of `count` addresses from `generator`.
pub fn generate_emails_with<R: Rng>(
    count: usize,
    mut generator: UniqueEmailGenerator<R>,
) -> Result<Vec<String>, IdentityError> {
    if count == 0 {
        return Err(IdentityError::InvalidCount(count));
    }

    let mut emails = HashSet::with_capacity(count);
    while emails.len() < count {
        emails.insert(generator.next_unique()?);
    }
    debug!(count, "Generated unique emails");

    Ok(emails.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn candidates_have_one_at_and_a_dotted_domain() {
        let mut generator = UniqueEmailGenerator::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let email = generator.next_unique().unwrap();
            let (local, domain) = email.split_once('@').unwrap();
            assert!(!local.is_empty());
            assert!(!domain.contains('@'));
            assert!(DOMAINS.contains(&domain), "{email}");
        }
    }

    #[test]
    fn never_repeats_itself() {
        let mut generator = UniqueEmailGenerator::with_rng(StdRng::seed_from_u64(11));
        let mut seen = HashSet::new();
        for _ in 0..500 {
            assert!(seen.insert(generator.next_unique().unwrap()));
        }
    }

    #[test]
    fn small_space_is_exhausted() {
        let parts = NameParts {
            first_names: &["al"],
            last_names: &["bo"],
            domains: &["example.com"],
        };
        // Four shapes of one name: at most 102 distinct addresses.
        let generator = UniqueEmailGenerator::with_parts(StdRng::seed_from_u64(3), parts);
        let err = generate_emails_with(200, generator).unwrap_err();
        assert!(matches!(err, IdentityError::Exhausted { .. }), "{err}");
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(matches!(
            generate_emails(0),
            Err(IdentityError::InvalidCount(0))
        ));
    }
}
