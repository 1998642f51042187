//! Mapping strategy: a fixed recipient → amount table.
//!
//! The table is validated and frozen at construction. Construction rejects
//! mismatched list lengths, empty lists, zero addresses, zero amounts and
//! duplicate recipients, so every entry in a live table is claimable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vest_core::error::{ConstructionError, VestingError};
use vest_core::traits::Authorizer;
use vest_core::types::{Address, Strategy};

/// Claim data for the mapping strategy.
///
/// `amount: None` claims the full entitlement. `Some(x)` must equal it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MappingClaim {
    #[serde(default)]
    pub amount: Option<u64>,
}

impl MappingClaim {
    /// Claim whatever the table entitles the caller to.
    pub fn entitled() -> Self {
        Self { amount: None }
    }

    pub fn exact(amount: u64) -> Self {
        Self { amount: Some(amount) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingAuthorizer {
    entitlements: BTreeMap<Address, u64>,
}

impl MappingAuthorizer {
    /// Build the table from parallel recipient and amount lists.
    pub fn new(recipients: &[Address], amounts: &[u64]) -> Result<Self, ConstructionError> {
        if recipients.len() != amounts.len() {
            return Err(ConstructionError::LengthMismatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
            });
        }
        if recipients.is_empty() {
            return Err(ConstructionError::EmptyRecipients);
        }

        let mut entitlements = BTreeMap::new();
        for (index, (recipient, amount)) in recipients.iter().zip(amounts).enumerate() {
            if recipient.is_zero() {
                return Err(ConstructionError::ZeroAddress("recipient"));
            }
            if *amount == 0 {
                return Err(ConstructionError::ZeroAmount { index });
            }
            if entitlements.insert(*recipient, *amount).is_some() {
                return Err(ConstructionError::DuplicateRecipient(*recipient));
            }
        }
        Ok(Self { entitlements })
    }

    /// Entitled amount for `recipient`, or 0 when absent.
    pub fn entitlement(&self, recipient: &Address) -> u64 {
        self.entitlements.get(recipient).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entitlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entitlements.is_empty()
    }

    /// Sum of all entitlements. `None` on overflow.
    pub fn total_entitled(&self) -> Option<u64> {
        self.entitlements
            .values()
            .try_fold(0u64, |acc, v| acc.checked_add(*v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &u64)> {
        self.entitlements.iter()
    }
}

impl Authorizer for MappingAuthorizer {
    type Claim = MappingClaim;

    fn strategy(&self) -> Strategy {
        Strategy::Mapping
    }

    fn authorize(&self, caller: &Address, claim: &MappingClaim) -> Result<u64, VestingError> {
        let entitled = self.entitlement(caller);
        if entitled == 0 {
            return Err(VestingError::NotEligible);
        }
        match claim.amount {
            Some(requested) if requested != entitled => Err(VestingError::NotEligible),
            _ => Ok(entitled),
        }
    }
}
