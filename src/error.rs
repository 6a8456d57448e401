//! Sponge Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type of the sponge crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Capacity or round count rejected at construction. Capacity must lie
    /// in `1..=12` and the round count in `1..=24`.
    #[error("sponge parameters out of range: capacity must be in 1..=12 and rounds in 1..=24, got capacity {0} and rounds {1}")]
    BadParameters(u32, u32),

    /// An absorbed block must cover the rate exactly.
    #[error("absorbed input must be {0} lanes long, but is {1} lanes long instead")]
    BadRate(usize, usize),
}
