//! In-memory execution substrate.
//!
//! Holds a controllable block clock and recipient balances. Used by the CLI
//! for dry runs and by tests to drive time and to simulate recipients that
//! reject transfers or call back into the pool.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use vest_core::error::TransferError;
use vest_core::traits::Substrate;
use vest_core::types::Address;

/// Callback run after a transfer has been credited.
///
/// Stands in for recipient-controlled code; it may call back into the pool.
pub type TransferHook = Arc<dyn Fn(&Address, u64) + Send + Sync>;

#[derive(Default)]
pub struct MemorySubstrate {
    clock: RwLock<u64>,
    balances: RwLock<HashMap<Address, u64>>,
    rejecting: RwLock<HashSet<Address>>,
    hook: RwLock<Option<TransferHook>>,
}

impl MemorySubstrate {
    pub fn new(now: u64) -> Self {
        Self {
            clock: RwLock::new(now),
            ..Default::default()
        }
    }

    /// Move the clock forward by `secs`, saturating at `u64::MAX`.
    pub fn advance_time(&self, secs: u64) {
        let mut clock = self.clock.write();
        *clock = clock.saturating_add(secs);
    }

    /// Move the clock to `timestamp`. The clock never moves backwards, so an
    /// earlier timestamp is ignored and `false` is returned.
    pub fn set_time(&self, timestamp: u64) -> bool {
        let mut clock = self.clock.write();
        if timestamp < *clock {
            return false;
        }
        *clock = timestamp;
        true
    }

    /// Value received by `who` so far.
    pub fn balance_of(&self, who: &Address) -> u64 {
        self.balances.read().get(who).copied().unwrap_or(0)
    }

    /// Make every transfer to `who` fail with [`TransferError::Rejected`].
    pub fn reject_transfers_to(&self, who: Address) {
        self.rejecting.write().insert(who);
    }

    pub fn accept_transfers_to(&self, who: &Address) {
        self.rejecting.write().remove(who);
    }

    pub fn set_transfer_hook(&self, hook: TransferHook) {
        *self.hook.write() = Some(hook);
    }

    pub fn clear_transfer_hook(&self) {
        *self.hook.write() = None;
    }
}

impl Substrate for MemorySubstrate {
    fn block_time(&self) -> u64 {
        *self.clock.read()
    }

    fn transfer(&self, to: &Address, amount: u64) -> Result<(), TransferError> {
        if self.rejecting.read().contains(to) {
            return Err(TransferError::Rejected(*to));
        }
        {
            let mut balances = self.balances.write();
            let entry = balances.entry(*to).or_insert(0);
            *entry = entry.checked_add(amount).ok_or(TransferError::BalanceOverflow)?;
        }
        // Run the hook with no locks held; it may re-enter the pool.
        let hook = self.hook.read().clone();
        if let Some(hook) = hook {
            hook(to, amount);
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemorySubstrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySubstrate")
            .field("clock", &*self.clock.read())
            .field("accounts", &self.balances.read().len())
            .field("rejecting", &self.rejecting.read().len())
            .field("hook", &self.hook.read().is_some())
            .finish()
    }
}
