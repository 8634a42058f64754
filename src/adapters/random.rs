//! Implements RandomSource with OS entropy.

use crate::domain::DomainError;
use crate::ports::RandomSource;

#[derive(Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_u64(&self) -> Result<u64, DomainError> {
        getrandom::u64().map_err(|e| DomainError::Io(format!("OS entropy unavailable: {}", e)))
    }
}
