//! Merkle strategy: a root committing to the recipient → amount set.
//!
//! Only the root is held. The caller supplies their amount and the sibling
//! path; the leaf is rebuilt from the caller's own identity, so a proof for
//! someone else's entry is useless.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vest_core::error::{ConstructionError, VestingError};
use vest_core::merkle::{leaf_hash, verify_proof};
use vest_core::traits::Authorizer;
use vest_core::types::{Address, Hash256, Strategy};

/// Claim data for the Merkle strategy.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MerkleClaim {
    pub amount: u64,
    /// Sibling hashes, leaf level first.
    pub proof: Vec<Hash256>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleAuthorizer {
    root: Hash256,
}

impl MerkleAuthorizer {
    pub fn new(root: Hash256) -> Result<Self, ConstructionError> {
        if root.is_zero() {
            return Err(ConstructionError::ZeroMerkleRoot);
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Hash256 {
        &self.root
    }
}

impl Authorizer for MerkleAuthorizer {
    type Claim = MerkleClaim;

    fn strategy(&self) -> Strategy {
        Strategy::Merkle
    }

    fn authorize(&self, caller: &Address, claim: &MerkleClaim) -> Result<u64, VestingError> {
        let leaf = leaf_hash(caller, claim.amount);
        if !verify_proof(&claim.proof, &self.root, &leaf) {
            debug!(%caller, amount = claim.amount, depth = claim.proof.len(), "merkle proof rejected");
            return Err(VestingError::InvalidProof);
        }
        Ok(claim.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vest_core::merkle::MerkleTree;

    fn addr(b: u8) -> Address {
        Address([b; 32])
    }

    fn tree() -> MerkleTree {
        MerkleTree::from_entries(&[(addr(1), 10), (addr(2), 20), (addr(3), 30)])
    }

    #[test]
    fn zero_root_rejected() {
        assert_eq!(
            MerkleAuthorizer::new(Hash256::ZERO).unwrap_err(),
            ConstructionError::ZeroMerkleRoot
        );
    }

    #[test]
    fn valid_proof_authorizes_amount() {
        let t = tree();
        let auth = MerkleAuthorizer::new(t.root()).unwrap();
        let claim = MerkleClaim { amount: 20, proof: t.proof(1).unwrap() };
        assert_eq!(auth.authorize(&addr(2), &claim).unwrap(), 20);
        assert_eq!(auth.strategy(), Strategy::Merkle);
    }

    #[test]
    fn proof_for_other_caller_rejected() {
        let t = tree();
        let auth = MerkleAuthorizer::new(t.root()).unwrap();
        let claim = MerkleClaim { amount: 20, proof: t.proof(1).unwrap() };
        assert_eq!(auth.authorize(&addr(1), &claim).unwrap_err(), VestingError::InvalidProof);
    }

    #[test]
    fn inflated_amount_rejected() {
        let t = tree();
        let auth = MerkleAuthorizer::new(t.root()).unwrap();
        let claim = MerkleClaim { amount: 21, proof: t.proof(1).unwrap() };
        assert_eq!(auth.authorize(&addr(2), &claim).unwrap_err(), VestingError::InvalidProof);
    }

    #[test]
    fn empty_proof_rejected_for_multi_leaf_tree() {
        let t = tree();
        let auth = MerkleAuthorizer::new(t.root()).unwrap();
        let claim = MerkleClaim { amount: 10, proof: vec![] };
        assert_eq!(auth.authorize(&addr(1), &claim).unwrap_err(), VestingError::InvalidProof);
    }

    #[test]
    fn claim_json_uses_hex_hashes() {
        let t = tree();
        let claim = MerkleClaim { amount: 10, proof: t.proof(0).unwrap() };
        let json = serde_json::to_string(&claim).unwrap();
        assert!(json.contains(&t.proof(0).unwrap()[0].to_string()));
        let back: MerkleClaim = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claim);
    }
}
