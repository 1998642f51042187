//! Pair-sorted SHA-256 Merkle tree committing to a recipient → amount set.
//!
//! - Leaf: `SHA-256(recipient || amount_le)`, the same bytes a claim signature
//!   commits to ([`crate::crypto::claim_message_hash`]).
//! - Internal node: `SHA-256(min(a, b) || max(a, b))`. Ordering the pair by
//!   value rather than by position means a proof is just the list of sibling
//!   hashes; no left/right flags travel with it.
//!
//! Leaves keep their input order. An odd node at the end of a layer is
//! promoted unchanged to the next layer, so it contributes no proof step at
//! that level. Empty trees produce [`Hash256::ZERO`].
//!
//! Tree construction and [`verify_proof`] must agree bit for bit; both go
//! through [`node_hash`].

use sha2::{Digest, Sha256};

use crate::constants::MAX_PROOF_DEPTH;
use crate::crypto::claim_message_hash;
use crate::types::{Address, Hash256};

/// Leaf hash for a `(recipient, amount)` entitlement.
pub fn leaf_hash(recipient: &Address, amount: u64) -> Hash256 {
    claim_message_hash(recipient, amount)
}

/// Combine two child hashes, ordering them by value first.
pub fn node_hash(a: &Hash256, b: &Hash256) -> Hash256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update(lo.as_bytes());
    hasher.update(hi.as_bytes());
    Hash256(hasher.finalize().into())
}

/// Compute the next layer of the tree from the current one.
///
/// Pairs adjacent hashes with [`node_hash`]. A trailing odd element is
/// carried up as-is.
fn next_layer(layer: &[Hash256]) -> Vec<Hash256> {
    layer
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => node_hash(left, right),
            [single] => *single,
            _ => unreachable!("chunks(2) yields one or two elements"),
        })
        .collect()
}

/// Compute the root over already-hashed leaves without keeping the layers.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }
    let mut current = leaves.to_vec();
    while current.len() > 1 {
        current = next_layer(&current);
    }
    current[0]
}

/// Fold a leaf through its proof, returning the implied root.
pub fn process_proof(leaf: &Hash256, proof: &[Hash256]) -> Hash256 {
    proof.iter().fold(*leaf, |acc, sibling| node_hash(&acc, sibling))
}

/// Check that `leaf` is committed to by `root` via `proof`.
///
/// Proofs longer than [`MAX_PROOF_DEPTH`] are rejected without hashing.
pub fn verify_proof(proof: &[Hash256], root: &Hash256, leaf: &Hash256) -> bool {
    if proof.len() > MAX_PROOF_DEPTH {
        return false;
    }
    process_proof(leaf, proof) == *root
}

/// Full Merkle tree supporting root computation and proof generation.
///
/// This is the off-chain half: whoever provisions a Merkle pool builds the
/// tree, publishes the root, and hands each recipient their proof.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// Entitlements in leaf order.
    entries: Vec<(Address, u64)>,
    /// `layers[0]` = leaf hashes, `layers[last]` = `[root]`.
    layers: Vec<Vec<Hash256>>,
}

impl MerkleTree {
    /// Build a tree from `(recipient, amount)` entitlements, in order.
    pub fn from_entries(entries: &[(Address, u64)]) -> Self {
        if entries.is_empty() {
            return Self {
                entries: Vec::new(),
                layers: Vec::new(),
            };
        }

        let leaf_layer: Vec<Hash256> = entries.iter().map(|(r, a)| leaf_hash(r, *a)).collect();
        let mut layers = vec![leaf_layer];
        loop {
            let prev = &layers[layers.len() - 1];
            if prev.len() <= 1 {
                break;
            }
            let next = next_layer(prev);
            layers.push(next);
        }

        Self {
            entries: entries.to_vec(),
            layers,
        }
    }

    /// The Merkle root. Returns [`Hash256::ZERO`] for an empty tree.
    pub fn root(&self) -> Hash256 {
        self.layers
            .last()
            .and_then(|l| l.first())
            .copied()
            .unwrap_or(Hash256::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Address, u64)] {
        &self.entries
    }

    /// Sibling hashes from the leaf at `index` up to the root.
    ///
    /// Returns `None` if the index is out of bounds or the tree is empty.
    pub fn proof(&self, index: usize) -> Option<Vec<Hash256>> {
        if index >= self.entries.len() {
            return None;
        }

        let mut path = Vec::new();
        let mut pos = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = pos ^ 1;
            // Promoted odd node: no sibling at this level.
            if sibling < layer.len() {
                path.push(layer[sibling]);
            }
            pos /= 2;
        }
        Some(path)
    }

    /// Proof for the first leaf matching `(recipient, amount)`.
    pub fn proof_for(&self, recipient: &Address, amount: u64) -> Option<Vec<Hash256>> {
        let index = self
            .entries
            .iter()
            .position(|(r, a)| r == recipient && *a == amount)?;
        self.proof(index)
    }
}
