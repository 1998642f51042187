//! The claim state machine shared by every strategy.
//!
//! ```text
//! claim:   cliff gate → authorize → anti-replay → debit → record → transfer
//! recover: policy (owner, cliff + grace) → drain balance → transfer
//! ```
//!
//! All checks and ledger writes happen under the ledger lock. The lock is
//! released before value leaves the pool, so a recipient that re-enters
//! during the transfer sees the claim already recorded. If the transfer
//! fails the ledger change is reversed and the operation reports
//! [`VestingError::TransferFailed`], leaving no partial effect.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use vest_core::constants::DEFAULT_RECOVERY_GRACE_SECS;
use vest_core::error::{ConstructionError, VestingError};
use vest_core::traits::{Authorizer, Substrate};
use vest_core::types::{Address, ClaimStatus, Hash256, Strategy};

use crate::authorizer::{MappingAuthorizer, MerkleAuthorizer, SignatureAuthorizer};
use crate::cliff::CliffGate;
use crate::ledger::{ClaimRecordOutcome, Ledger};
use crate::recovery::RecoveryPolicy;
use crate::snapshot::{PersistentAuthorizer, PoolSnapshot};

pub type SignatureVesting = ClaimEngine<SignatureAuthorizer>;
pub type MappingVesting = ClaimEngine<MappingAuthorizer>;
pub type MerkleVesting = ClaimEngine<MerkleAuthorizer>;

/// Parameters common to every pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolParams {
    pub owner: Address,
    /// Unlock timestamp, seconds since epoch.
    pub cliff: u64,
    pub funding: u64,
}

impl PoolParams {
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.owner.is_zero() {
            return Err(ConstructionError::ZeroAddress("owner"));
        }
        if self.funding == 0 {
            return Err(ConstructionError::ZeroFunding);
        }
        Ok(())
    }
}

/// Outcome of a successful claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub recipient: Address,
    pub amount: u64,
    /// Pool balance after the claim.
    pub remaining: u64,
}

/// Outcome of a successful recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryReceipt {
    pub owner: Address,
    pub amount: u64,
}

pub struct ClaimEngine<A: Authorizer> {
    owner: Address,
    gate: CliffGate,
    authorizer: A,
    recovery: Option<RecoveryPolicy>,
    ledger: Mutex<Ledger>,
    substrate: Arc<dyn Substrate>,
}

impl<A: Authorizer> ClaimEngine<A> {
    /// Create a funded pool with recovery disabled.
    pub fn new(
        params: PoolParams,
        authorizer: A,
        substrate: Arc<dyn Substrate>,
    ) -> Result<Self, ConstructionError> {
        params.validate()?;
        info!(
            strategy = %authorizer.strategy(),
            owner = %params.owner,
            cliff = params.cliff,
            funding = params.funding,
            "vesting pool created"
        );
        Ok(Self {
            owner: params.owner,
            gate: CliffGate::new(params.cliff),
            authorizer,
            recovery: None,
            ledger: Mutex::new(Ledger::new(params.funding)),
            substrate,
        })
    }

    /// Attach an owner recovery policy unlocking `grace` seconds after the cliff.
    pub fn with_recovery(mut self, grace: u64) -> Result<Self, ConstructionError> {
        self.recovery = Some(RecoveryPolicy::new(self.owner, self.gate.cliff(), grace)?);
        Ok(self)
    }

    pub fn without_recovery(mut self) -> Self {
        self.recovery = None;
        self
    }

    /// Claim on behalf of `caller`.
    ///
    /// The recipient is always the caller. On any error the balance and claim
    /// record are unchanged.
    pub fn claim(&self, caller: &Address, claim: &A::Claim) -> Result<ClaimReceipt, VestingError> {
        let (amount, remaining) = self.commit_claim(caller, claim).map_err(|e| {
            debug!(%caller, strategy = %self.strategy(), "claim rejected: {e}");
            e
        })?;

        if let Err(e) = self.substrate.transfer(caller, amount) {
            warn!(%caller, amount, "claim transfer failed, rolling back: {e}");
            self.ledger.lock().revert_claim(caller, amount)?;
            return Err(VestingError::TransferFailed(e));
        }

        info!(%caller, amount, remaining, strategy = %self.strategy(), "claimed");
        Ok(ClaimReceipt { recipient: *caller, amount, remaining })
    }

    /// Checks and ledger writes for a claim, all under one lock.
    fn commit_claim(&self, caller: &Address, claim: &A::Claim) -> Result<(u64, u64), VestingError> {
        let mut ledger = self.ledger.lock();
        self.gate.check(self.substrate.block_time())?;
        let amount = self.authorizer.authorize(caller, claim)?;
        if amount == 0 {
            return Err(VestingError::NotEligible);
        }
        if ledger.is_claimed(caller) {
            return Err(VestingError::AlreadyClaimed);
        }
        ledger.debit(amount)?;
        let outcome = ledger.record_claim(caller);
        debug_assert_eq!(outcome, ClaimRecordOutcome::NewlyRecorded);
        Ok((amount, ledger.balance()))
    }

    /// Withdraw the whole remaining balance to the owner.
    pub fn recover(&self, caller: &Address) -> Result<RecoveryReceipt, VestingError> {
        let amount = {
            let mut ledger = self.ledger.lock();
            let policy = self.recovery.as_ref().ok_or(VestingError::RecoveryDisabled)?;
            policy.check(caller, self.substrate.block_time())?;
            let amount = ledger.balance();
            if amount == 0 {
                return Err(VestingError::NothingToRecover);
            }
            ledger.debit(amount)?;
            amount
        };

        if let Err(e) = self.substrate.transfer(&self.owner, amount) {
            warn!(owner = %self.owner, amount, "recovery transfer failed, rolling back: {e}");
            self.ledger.lock().credit(amount)?;
            return Err(VestingError::TransferFailed(e));
        }

        info!(owner = %self.owner, amount, "recovered undistributed balance");
        Ok(RecoveryReceipt { owner: self.owner, amount })
    }

    pub fn strategy(&self) -> Strategy {
        self.authorizer.strategy()
    }

    pub fn cliff(&self) -> u64 {
        self.gate.cliff()
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_passed(self.substrate.block_time())
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn balance(&self) -> u64 {
        self.ledger.lock().balance()
    }

    pub fn initial_funding(&self) -> u64 {
        self.ledger.lock().initial_funding()
    }

    pub fn total_released(&self) -> u64 {
        self.ledger.lock().total_released()
    }

    pub fn is_claimed(&self, recipient: &Address) -> bool {
        self.ledger.lock().is_claimed(recipient)
    }

    pub fn claim_status(&self, recipient: &Address) -> ClaimStatus {
        if self.is_claimed(recipient) {
            ClaimStatus::Claimed
        } else {
            ClaimStatus::Unclaimed
        }
    }

    pub fn claimed_count(&self) -> usize {
        self.ledger.lock().claimed_count()
    }

    pub fn recovery_policy(&self) -> Option<&RecoveryPolicy> {
        self.recovery.as_ref()
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }
}

impl<A: PersistentAuthorizer> ClaimEngine<A> {
    /// Rebuild a pool from persisted state. The authorizer comes from the
    /// snapshot and must be of this engine's strategy.
    pub fn restore(snapshot: PoolSnapshot, substrate: Arc<dyn Substrate>) -> Result<Self, VestingError> {
        if snapshot.owner.is_zero() {
            return Err(ConstructionError::ZeroAddress("owner").into());
        }
        let authorizer = A::from_state(&snapshot.authorizer)?;
        let recovery = snapshot
            .recovery_grace
            .map(|grace| RecoveryPolicy::new(snapshot.owner, snapshot.cliff, grace))
            .transpose()?;
        let ledger = Ledger::from_parts(
            snapshot.initial_funding,
            snapshot.balance,
            snapshot.claimed.into_iter().collect(),
        )?;
        info!(
            strategy = %authorizer.strategy(),
            owner = %snapshot.owner,
            balance = ledger.balance(),
            "vesting pool restored"
        );
        Ok(Self {
            owner: snapshot.owner,
            gate: CliffGate::new(snapshot.cliff),
            authorizer,
            recovery,
            ledger: Mutex::new(ledger),
            substrate,
        })
    }

    /// Like [`ClaimEngine::restore`], but also requires the saved authorizer
    /// to equal `expected`, e.g. one rebuilt from deployment config.
    pub fn restore_with(
        snapshot: PoolSnapshot,
        expected: &A,
        substrate: Arc<dyn Substrate>,
    ) -> Result<Self, VestingError> {
        if expected.to_state() != snapshot.authorizer {
            return Err(VestingError::Snapshot(format!(
                "{} authorizer does not match snapshot",
                expected.strategy()
            )));
        }
        Self::restore(snapshot, substrate)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        let ledger = self.ledger.lock();
        PoolSnapshot {
            cliff: self.gate.cliff(),
            owner: self.owner,
            initial_funding: ledger.initial_funding(),
            balance: ledger.balance(),
            claimed: ledger.claimed().iter().copied().collect(),
            recovery_grace: self.recovery.map(|r| r.grace()),
            authorizer: self.authorizer.to_state(),
        }
    }
}

impl ClaimEngine<SignatureAuthorizer> {
    /// Signature pool with owner recovery after the default one-year grace.
    pub fn signature(
        params: PoolParams,
        signer: Address,
        substrate: Arc<dyn Substrate>,
    ) -> Result<Self, ConstructionError> {
        Self::new(params, SignatureAuthorizer::new(signer)?, substrate)?
            .with_recovery(DEFAULT_RECOVERY_GRACE_SECS)
    }

    pub fn signer(&self) -> &Address {
        self.authorizer.signer()
    }
}

impl ClaimEngine<MappingAuthorizer> {
    pub fn mapping(
        params: PoolParams,
        recipients: &[Address],
        amounts: &[u64],
        substrate: Arc<dyn Substrate>,
    ) -> Result<Self, ConstructionError> {
        Self::new(params, MappingAuthorizer::new(recipients, amounts)?, substrate)
    }

    /// Amount `recipient` is entitled to, whether or not it has been claimed.
    pub fn entitlement(&self, recipient: &Address) -> u64 {
        self.authorizer.entitlement(recipient)
    }
}

impl ClaimEngine<MerkleAuthorizer> {
    pub fn merkle(
        params: PoolParams,
        root: Hash256,
        substrate: Arc<dyn Substrate>,
    ) -> Result<Self, ConstructionError> {
        Self::new(params, MerkleAuthorizer::new(root)?, substrate)
    }

    pub fn merkle_root(&self) -> &Hash256 {
        self.authorizer.root()
    }
}

impl<A: Authorizer + std::fmt::Debug> std::fmt::Debug for ClaimEngine<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimEngine")
            .field("owner", &self.owner)
            .field("gate", &self.gate)
            .field("authorizer", &self.authorizer)
            .field("recovery", &self.recovery)
            .field("ledger", &*self.ledger.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorizer::{MappingClaim, MerkleClaim, SignedClaim};
    use crate::snapshot::AuthorizerState;
    use crate::substrate::MemorySubstrate;
    use vest_core::crypto::{sign_claim, KeyPair};
    use vest_core::merkle::MerkleTree;

    const CLIFF: u64 = 10_000;

    fn owner() -> Address {
        Address([0x0E; 32])
    }

    fn alice() -> Address {
        Address([0xA1; 32])
    }

    fn bob() -> Address {
        Address([0xB0; 32])
    }

    fn params(funding: u64) -> PoolParams {
        PoolParams { owner: owner(), cliff: CLIFF, funding }
    }

    fn signer() -> KeyPair {
        KeyPair::from_secret_bytes([0x51; 32])
    }

    fn signature_pool(funding: u64) -> (Arc<MemorySubstrate>, SignatureVesting) {
        let sub = Arc::new(MemorySubstrate::new(0));
        let pool = SignatureVesting::signature(params(funding), signer().address(), sub.clone()).unwrap();
        (sub, pool)
    }

    fn signed(recipient: &Address, amount: u64) -> SignedClaim {
        SignedClaim { amount, signature: sign_claim(&signer(), recipient, amount) }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    #[test]
    fn zero_owner_rejected() {
        let sub = Arc::new(MemorySubstrate::new(0));
        let p = PoolParams { owner: Address::ZERO, cliff: 0, funding: 1 };
        assert_eq!(
            SignatureVesting::signature(p, signer().address(), sub).unwrap_err(),
            ConstructionError::ZeroAddress("owner")
        );
    }

    #[test]
    fn zero_funding_rejected() {
        let sub = Arc::new(MemorySubstrate::new(0));
        assert_eq!(
            MerkleVesting::merkle(params(0), Hash256([1; 32]), sub).unwrap_err(),
            ConstructionError::ZeroFunding
        );
    }

    #[test]
    fn signature_pool_defaults_to_recovery() {
        let (_, pool) = signature_pool(10);
        let policy = pool.recovery_policy().unwrap();
        assert_eq!(policy.unlocks_at(), CLIFF + DEFAULT_RECOVERY_GRACE_SECS);
        assert_eq!(pool.signer(), &signer().address());
        assert_eq!(pool.strategy(), Strategy::Signature);
    }

    #[test]
    fn signature_pool_grace_overflow_rejected() {
        let sub = Arc::new(MemorySubstrate::new(0));
        let p = PoolParams { owner: owner(), cliff: u64::MAX, funding: 1 };
        assert!(matches!(
            SignatureVesting::signature(p, signer().address(), sub),
            Err(ConstructionError::GracePeriodOverflow { .. })
        ));
    }

    // ------------------------------------------------------------------
    // Claims
    // ------------------------------------------------------------------

    #[test]
    fn claim_before_cliff_rejected() {
        let (sub, pool) = signature_pool(1_000);
        sub.set_time(CLIFF - 1);
        assert_eq!(
            pool.claim(&alice(), &signed(&alice(), 1)).unwrap_err(),
            VestingError::CliffNotReached { cliff: CLIFF, now: CLIFF - 1 }
        );
        assert_eq!(pool.balance(), 1_000);
        assert!(!pool.is_unlocked());
    }

    #[test]
    fn claim_then_replay_rejected() {
        let (sub, pool) = signature_pool(1_000);
        sub.set_time(CLIFF);
        let receipt = pool.claim(&alice(), &signed(&alice(), 1)).unwrap();
        assert_eq!(receipt, ClaimReceipt { recipient: alice(), amount: 1, remaining: 999 });
        assert_eq!(sub.balance_of(&alice()), 1);
        assert_eq!(pool.claim_status(&alice()), ClaimStatus::Claimed);
        assert_eq!(pool.claim_status(&bob()), ClaimStatus::Unclaimed);

        assert_eq!(
            pool.claim(&alice(), &signed(&alice(), 1)).unwrap_err(),
            VestingError::AlreadyClaimed
        );
        assert_eq!(pool.balance(), 999);
        assert_eq!(pool.total_released(), 1);
    }

    #[test]
    fn invalid_authorization_leaves_state_unchanged() {
        let (sub, pool) = signature_pool(1_000);
        sub.set_time(CLIFF);
        let before = pool.snapshot();
        assert_eq!(
            pool.claim(&bob(), &signed(&alice(), 5)).unwrap_err(),
            VestingError::InvalidSignature
        );
        assert_eq!(pool.snapshot(), before);
        assert_eq!(sub.balance_of(&bob()), 0);
    }

    #[test]
    fn claim_beyond_balance_rejected() {
        let (sub, pool) = signature_pool(10);
        sub.set_time(CLIFF);
        assert_eq!(
            pool.claim(&alice(), &signed(&alice(), 11)).unwrap_err(),
            VestingError::InsufficientBalance { available: 10, requested: 11 }
        );
        assert!(!pool.is_claimed(&alice()));
    }

    #[test]
    fn zero_amount_claim_not_eligible() {
        let (sub, pool) = signature_pool(10);
        sub.set_time(CLIFF);
        assert_eq!(
            pool.claim(&alice(), &signed(&alice(), 0)).unwrap_err(),
            VestingError::NotEligible
        );
        assert!(!pool.is_claimed(&alice()));
    }

    #[test]
    fn failed_transfer_rolls_back_claim() {
        let (sub, pool) = signature_pool(100);
        sub.set_time(CLIFF);
        sub.reject_transfers_to(alice());
        assert!(matches!(
            pool.claim(&alice(), &signed(&alice(), 40)),
            Err(VestingError::TransferFailed(_))
        ));
        assert_eq!(pool.balance(), 100);
        assert!(!pool.is_claimed(&alice()));

        sub.accept_transfers_to(&alice());
        assert_eq!(pool.claim(&alice(), &signed(&alice(), 40)).unwrap().remaining, 60);
    }

    #[test]
    fn mapping_pool_claims_entitlement() {
        let sub = Arc::new(MemorySubstrate::new(CLIFF));
        let pool = MappingVesting::mapping(params(100), &[alice(), bob()], &[30, 90], sub.clone()).unwrap();
        assert_eq!(pool.entitlement(&bob()), 90);
        assert!(pool.recovery_policy().is_none());

        pool.claim(&alice(), &MappingClaim::entitled()).unwrap();
        // Underfunded table: bob's entitlement exceeds what is left.
        assert_eq!(
            pool.claim(&bob(), &MappingClaim::entitled()).unwrap_err(),
            VestingError::InsufficientBalance { available: 70, requested: 90 }
        );
        assert_eq!(
            pool.claim(&owner(), &MappingClaim::entitled()).unwrap_err(),
            VestingError::NotEligible
        );
        assert_eq!(sub.balance_of(&alice()), 30);
    }

    #[test]
    fn merkle_pool_claims_with_proof() {
        let tree = MerkleTree::from_entries(&[(alice(), 10), (bob(), 20)]);
        let sub = Arc::new(MemorySubstrate::new(CLIFF));
        let pool = MerkleVesting::merkle(params(30), tree.root(), sub.clone()).unwrap();
        assert_eq!(pool.merkle_root(), &tree.root());

        let bad = MerkleClaim { amount: 20, proof: tree.proof(0).unwrap() };
        assert_eq!(pool.claim(&bob(), &bad).unwrap_err(), VestingError::InvalidProof);

        let good = MerkleClaim { amount: 20, proof: tree.proof_for(&bob(), 20).unwrap() };
        assert_eq!(pool.claim(&bob(), &good).unwrap().remaining, 10);
        assert_eq!(pool.claim(&bob(), &good).unwrap_err(), VestingError::AlreadyClaimed);
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    #[test]
    fn recovery_checks_owner_then_time() {
        let (sub, pool) = signature_pool(50);
        sub.set_time(CLIFF);
        assert_eq!(pool.recover(&alice()).unwrap_err(), VestingError::Unauthorized);
        assert!(matches!(
            pool.recover(&owner()),
            Err(VestingError::RecoveryTooEarly { .. })
        ));
        assert_eq!(pool.balance(), 50);
    }

    #[test]
    fn recovery_drains_pool_once() {
        let (sub, pool) = signature_pool(50);
        sub.set_time(CLIFF + DEFAULT_RECOVERY_GRACE_SECS);
        assert_eq!(pool.recover(&owner()).unwrap(), RecoveryReceipt { owner: owner(), amount: 50 });
        assert_eq!(pool.balance(), 0);
        assert_eq!(sub.balance_of(&owner()), 50);
        assert_eq!(pool.recover(&owner()).unwrap_err(), VestingError::NothingToRecover);
        assert_eq!(
            pool.claim(&alice(), &signed(&alice(), 1)).unwrap_err(),
            VestingError::InsufficientBalance { available: 0, requested: 1 }
        );
    }

    #[test]
    fn recovery_disabled_on_mapping_pool() {
        let sub = Arc::new(MemorySubstrate::new(u64::MAX));
        let pool = MappingVesting::mapping(params(5), &[alice()], &[5], sub).unwrap();
        assert_eq!(pool.recover(&owner()).unwrap_err(), VestingError::RecoveryDisabled);
    }

    #[test]
    fn recovery_can_be_enabled_on_merkle_pool() {
        let tree = MerkleTree::from_entries(&[(alice(), 10)]);
        let sub = Arc::new(MemorySubstrate::new(CLIFF + 5));
        let pool = MerkleVesting::merkle(params(10), tree.root(), sub.clone())
            .unwrap()
            .with_recovery(5)
            .unwrap();
        assert_eq!(pool.recover(&owner()).unwrap().amount, 10);
    }

    #[test]
    fn failed_recovery_transfer_restores_balance() {
        let (sub, pool) = signature_pool(50);
        sub.set_time(u64::MAX);
        sub.reject_transfers_to(owner());
        assert!(matches!(pool.recover(&owner()), Err(VestingError::TransferFailed(_))));
        assert_eq!(pool.balance(), 50);
        assert_eq!(pool.total_released(), 0);
    }

    // ------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------

    #[test]
    fn snapshot_restore_preserves_state() {
        let (sub, pool) = signature_pool(100);
        sub.set_time(CLIFF);
        pool.claim(&alice(), &signed(&alice(), 25)).unwrap();

        let bytes = pool.snapshot().encode().unwrap();
        let restored = SignatureVesting::restore(PoolSnapshot::decode(&bytes).unwrap(), sub.clone()).unwrap();

        assert_eq!(restored.balance(), 75);
        assert_eq!(restored.initial_funding(), 100);
        assert!(restored.is_claimed(&alice()));
        assert_eq!(restored.signer(), &signer().address());
        assert_eq!(restored.recovery_policy(), pool.recovery_policy());
        assert_eq!(
            restored.claim(&alice(), &signed(&alice(), 25)).unwrap_err(),
            VestingError::AlreadyClaimed
        );
    }

    #[test]
    fn restored_pool_keeps_trusted_signer() {
        let (sub, pool) = signature_pool(1_000);
        sub.set_time(CLIFF);
        let rogue = KeyPair::from_secret_bytes([0x66; 32]);

        let restored = SignatureVesting::restore(pool.snapshot(), sub.clone()).unwrap();
        let forged = SignedClaim { amount: 1_000, signature: sign_claim(&rogue, &bob(), 1_000) };
        assert_eq!(restored.claim(&bob(), &forged).unwrap_err(), VestingError::InvalidSignature);
        assert_eq!(restored.balance(), 1_000);
        assert_eq!(sub.balance_of(&bob()), 0);
    }

    #[test]
    fn restore_with_foreign_signer_rejected() {
        let (sub, pool) = signature_pool(1_000);
        let rogue = SignatureAuthorizer::new(KeyPair::from_secret_bytes([0x66; 32]).address()).unwrap();
        assert!(matches!(
            SignatureVesting::restore_with(pool.snapshot(), &rogue, sub.clone()),
            Err(VestingError::Snapshot(_))
        ));

        let trusted = SignatureAuthorizer::new(signer().address()).unwrap();
        let restored = SignatureVesting::restore_with(pool.snapshot(), &trusted, sub).unwrap();
        assert_eq!(restored.signer(), &signer().address());
    }

    #[test]
    fn restore_as_other_strategy_rejected() {
        let (sub, pool) = signature_pool(1_000);
        assert_eq!(
            MerkleVesting::restore(pool.snapshot(), sub.clone()).unwrap_err(),
            VestingError::Snapshot("snapshot holds a signature pool, not merkle".into())
        );
        assert!(matches!(
            MappingVesting::restore(pool.snapshot(), sub),
            Err(VestingError::Snapshot(_))
        ));
    }

    #[test]
    fn mapping_snapshot_keeps_table() {
        let sub = Arc::new(MemorySubstrate::new(CLIFF));
        let pool = MappingVesting::mapping(params(100), &[alice(), bob()], &[30, 70], sub.clone()).unwrap();
        pool.claim(&alice(), &MappingClaim::entitled()).unwrap();

        let restored = MappingVesting::restore(pool.snapshot(), sub).unwrap();
        assert_eq!(restored.entitlement(&bob()), 70);
        assert_eq!(restored.entitlement(&owner()), 0);
        assert_eq!(restored.claim(&bob(), &MappingClaim::entitled()).unwrap().remaining, 0);
    }

    #[test]
    fn restore_rejects_inconsistent_balance() {
        let sub = Arc::new(MemorySubstrate::new(0));
        let snap = PoolSnapshot {
            cliff: 0,
            owner: owner(),
            initial_funding: 10,
            balance: 11,
            claimed: vec![],
            recovery_grace: None,
            authorizer: AuthorizerState::Merkle { root: Hash256([1; 32]) },
        };
        assert!(matches!(
            MerkleVesting::restore(snap, sub),
            Err(VestingError::Snapshot(_))
        ));
    }
}
