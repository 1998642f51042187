//! Cliff gate: no claim succeeds before the unlock timestamp.
//!
//! The current time always comes from [`Substrate::block_time`](vest_core::traits::Substrate::block_time),
//! never from the caller.

use vest_core::error::VestingError;

/// Unlock predicate over a fixed cliff timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliffGate {
    cliff: u64,
}

impl CliffGate {
    pub fn new(cliff: u64) -> Self {
        Self { cliff }
    }

    /// The configured unlock timestamp (seconds since epoch).
    pub fn cliff(&self) -> u64 {
        self.cliff
    }

    /// Whether `now` is at or past the cliff.
    pub fn is_passed(&self, now: u64) -> bool {
        now >= self.cliff
    }

    /// Fail with [`VestingError::CliffNotReached`] unless the cliff has passed.
    pub fn check(&self, now: u64) -> Result<(), VestingError> {
        if self.is_passed(now) {
            Ok(())
        } else {
            Err(VestingError::CliffNotReached { cliff: self.cliff, now })
        }
    }
}
