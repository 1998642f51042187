//! Pool balance and claim record.
//!
//! The ledger is the only place the pool balance changes. It never goes
//! negative, never wraps, and a recipient enters the claim record at most
//! once. The ledger is not thread-safe; [`ClaimEngine`](crate::ClaimEngine)
//! keeps it behind a mutex.

use std::collections::BTreeSet;

use vest_core::error::VestingError;
use vest_core::types::Address;

/// Result of [`Ledger::record_claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimRecordOutcome {
    /// The recipient was already in the record; nothing changed.
    AlreadyClaimed,
    /// The recipient was inserted.
    NewlyRecorded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    initial_funding: u64,
    balance: u64,
    /// Sum of everything that has left the pool (claims and recovery).
    total_released: u64,
    claimed: BTreeSet<Address>,
}

impl Ledger {
    /// Create a ledger holding `funding`.
    pub fn new(funding: u64) -> Self {
        Self {
            initial_funding: funding,
            balance: funding,
            total_released: 0,
            claimed: BTreeSet::new(),
        }
    }

    /// Rebuild a ledger from persisted parts.
    ///
    /// Rejects state where released value plus balance does not add up to
    /// the initial funding.
    pub fn from_parts(
        initial_funding: u64,
        balance: u64,
        claimed: BTreeSet<Address>,
    ) -> Result<Self, VestingError> {
        let total_released = initial_funding.checked_sub(balance).ok_or_else(|| {
            VestingError::Snapshot(format!(
                "balance {balance} exceeds initial funding {initial_funding}"
            ))
        })?;
        Ok(Self {
            initial_funding,
            balance,
            total_released,
            claimed,
        })
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn initial_funding(&self) -> u64 {
        self.initial_funding
    }

    pub fn total_released(&self) -> u64 {
        self.total_released
    }

    pub fn is_claimed(&self, recipient: &Address) -> bool {
        self.claimed.contains(recipient)
    }

    pub fn claimed(&self) -> &BTreeSet<Address> {
        &self.claimed
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }

    /// Insert `recipient` into the claim record.
    ///
    /// A second call for the same recipient reports
    /// [`ClaimRecordOutcome::AlreadyClaimed`] and changes nothing.
    pub fn record_claim(&mut self, recipient: &Address) -> ClaimRecordOutcome {
        if self.claimed.insert(*recipient) {
            ClaimRecordOutcome::NewlyRecorded
        } else {
            ClaimRecordOutcome::AlreadyClaimed
        }
    }

    /// Remove `amount` from the pool.
    ///
    /// Fails with [`VestingError::InsufficientBalance`] and leaves the balance
    /// untouched if the pool cannot cover it.
    pub fn debit(&mut self, amount: u64) -> Result<(), VestingError> {
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(VestingError::InsufficientBalance {
                available: self.balance,
                requested: amount,
            })?;
        let released = self
            .total_released
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        self.balance = remaining;
        self.total_released = released;
        Ok(())
    }

    /// Undo a committed claim after its transfer failed.
    pub(crate) fn revert_claim(&mut self, recipient: &Address, amount: u64) -> Result<(), VestingError> {
        self.credit(amount)?;
        self.claimed.remove(recipient);
        Ok(())
    }

    /// Return `amount` to the pool. Only used to reverse a debit.
    pub(crate) fn credit(&mut self, amount: u64) -> Result<(), VestingError> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        let released = self
            .total_released
            .checked_sub(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        self.balance = balance;
        self.total_released = released;
        Ok(())
    }
}
