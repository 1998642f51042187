//! Trait interfaces for vesting pools.
//!
//! - [`Authorizer`] — decides who may claim how much (vest-engine implements
//!   signature, mapping and Merkle variants)
//! - [`Substrate`] — the execution environment: block time and outward value
//!   transfer (vest-engine provides an in-memory implementation)

use crate::error::{TransferError, VestingError};
use crate::types::{Address, Strategy};

/// Pluggable eligibility predicate.
///
/// An authorizer is pure: it never records claims or moves value. The claim
/// engine owns all bookkeeping, so the same state machine serves every
/// strategy.
pub trait Authorizer: Send + Sync {
    /// Strategy-specific authorization data submitted with a claim.
    type Claim;

    /// Which strategy this authorizer implements.
    fn strategy(&self) -> Strategy;

    /// Establish the amount `caller` is entitled to claim.
    ///
    /// Returns the authorized amount, or the strategy's specific rejection
    /// (`InvalidSignature`, `NotEligible`, `InvalidProof`).
    fn authorize(&self, caller: &Address, claim: &Self::Claim) -> Result<u64, VestingError>;
}

/// The execution substrate a pool runs on.
///
/// Supplies a time source the caller cannot influence and moves value out
/// of the pool. A transfer may run code controlled by the recipient, which
/// may in turn call back into the pool.
pub trait Substrate: Send + Sync {
    /// Current block time in seconds since the Unix epoch. Monotonic.
    fn block_time(&self) -> u64;

    /// Send `amount` to `to`.
    fn transfer(&self, to: &Address, amount: u64) -> Result<(), TransferError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ------------------------------------------------------------------
    // Mocks
    // ------------------------------------------------------------------

    struct FixedClock {
        now: u64,
        sent: Mutex<Vec<(Address, u64)>>,
    }

    impl Substrate for FixedClock {
        fn block_time(&self) -> u64 {
            self.now
        }

        fn transfer(&self, to: &Address, amount: u64) -> Result<(), TransferError> {
            if to.is_zero() {
                return Err(TransferError::Rejected(*to));
            }
            self.sent.lock().unwrap().push((*to, amount));
            Ok(())
        }
    }

    struct AllowList(Vec<(Address, u64)>);

    impl Authorizer for AllowList {
        type Claim = ();

        fn strategy(&self) -> Strategy {
            Strategy::Mapping
        }

        fn authorize(&self, caller: &Address, _claim: &()) -> Result<u64, VestingError> {
            self.0
                .iter()
                .find(|(a, _)| a == caller)
                .map(|(_, amount)| *amount)
                .ok_or(VestingError::NotEligible)
        }
    }

    #[test]
    fn authorizer_returns_entitlement_or_rejects() {
        let auth = AllowList(vec![(Address([1; 32]), 50)]);
        assert_eq!(auth.authorize(&Address([1; 32]), &()).unwrap(), 50);
        assert_eq!(
            auth.authorize(&Address([2; 32]), &()).unwrap_err(),
            VestingError::NotEligible
        );
        assert_eq!(auth.strategy(), Strategy::Mapping);
    }

    #[test]
    fn substrate_is_object_safe() {
        let clock = FixedClock { now: 7, sent: Mutex::new(Vec::new()) };
        let dyn_sub: &dyn Substrate = &clock;
        assert_eq!(dyn_sub.block_time(), 7);
        dyn_sub.transfer(&Address([3; 32]), 9).unwrap();
        assert_eq!(
            dyn_sub.transfer(&Address::ZERO, 1).unwrap_err(),
            TransferError::Rejected(Address::ZERO)
        );
        assert_eq!(clock.sent.lock().unwrap().as_slice(), &[(Address([3; 32]), 9)]);
    }
}
