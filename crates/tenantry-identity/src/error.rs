//! Identity generation error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("count must be a positive integer, got {0}")]
    InvalidCount(usize),

    #[error("count {0} is more addresses than this platform can hold")]
    CountTooLarge(u64),

    #[error("no new unique address after {attempts} attempts ({produced} produced so far)")]
    Exhausted { attempts: usize, produced: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
