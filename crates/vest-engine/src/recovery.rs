//! Owner recovery of undistributed value.
//!
//! Recovery unlocks at `cliff + grace`. Only the pool owner may invoke it.
//! Signature pools enable it by default; mapping and Merkle pools are fully
//! committed to their recipient set unless a policy is attached explicitly.

use vest_core::error::{ConstructionError, VestingError};
use vest_core::types::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPolicy {
    owner: Address,
    grace: u64,
    unlocks_at: u64,
}

impl RecoveryPolicy {
    /// Build a policy for `owner` unlocking `grace` seconds after `cliff`.
    pub fn new(owner: Address, cliff: u64, grace: u64) -> Result<Self, ConstructionError> {
        if owner.is_zero() {
            return Err(ConstructionError::ZeroAddress("owner"));
        }
        let unlocks_at = cliff
            .checked_add(grace)
            .ok_or(ConstructionError::GracePeriodOverflow { cliff, grace })?;
        Ok(Self { owner, grace, unlocks_at })
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn grace(&self) -> u64 {
        self.grace
    }

    /// First timestamp at which recovery is allowed.
    pub fn unlocks_at(&self) -> u64 {
        self.unlocks_at
    }

    /// Check `caller` may recover at `now`.
    ///
    /// Caller identity is checked before time, so a non-owner always sees
    /// [`VestingError::Unauthorized`].
    pub fn check(&self, caller: &Address, now: u64) -> Result<(), VestingError> {
        if caller != &self.owner {
            return Err(VestingError::Unauthorized);
        }
        if now < self.unlocks_at {
            return Err(VestingError::RecoveryTooEarly { unlocks_at: self.unlocks_at, now });
        }
        Ok(())
    }
}
