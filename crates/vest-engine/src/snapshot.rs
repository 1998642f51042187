//! Persisted pool state.
//!
//! A [`PoolSnapshot`] carries everything a pool mutates or fixes at
//! construction, including the authorizer configuration. A restored pool
//! rebuilds its authorizer from the snapshot, so the trusted signer, the
//! mapping table and the Merkle root cannot change across a restart.

use std::path::Path;

use vest_core::error::VestingError;
use vest_core::traits::Authorizer;
use vest_core::types::{Address, Hash256, Strategy};

use crate::authorizer::{MappingAuthorizer, MerkleAuthorizer, SignatureAuthorizer};

/// Authorizer configuration fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub enum AuthorizerState {
    Signature { signer: Address },
    /// Entitlements in ascending recipient order.
    Mapping { entitlements: Vec<(Address, u64)> },
    Merkle { root: Hash256 },
}

impl AuthorizerState {
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Signature { .. } => Strategy::Signature,
            Self::Mapping { .. } => Strategy::Mapping,
            Self::Merkle { .. } => Strategy::Merkle,
        }
    }

    fn mismatch(&self, expected: Strategy) -> VestingError {
        VestingError::Snapshot(format!(
            "snapshot holds a {} pool, not {expected}",
            self.strategy()
        ))
    }
}

/// An authorizer that can be saved to and rebuilt from a snapshot.
pub trait PersistentAuthorizer: Authorizer + Sized {
    fn to_state(&self) -> AuthorizerState;

    /// Rebuild from saved state. A state of another strategy is a
    /// [`VestingError::Snapshot`] error.
    fn from_state(state: &AuthorizerState) -> Result<Self, VestingError>;
}

impl PersistentAuthorizer for SignatureAuthorizer {
    fn to_state(&self) -> AuthorizerState {
        AuthorizerState::Signature { signer: *self.signer() }
    }

    fn from_state(state: &AuthorizerState) -> Result<Self, VestingError> {
        match state {
            AuthorizerState::Signature { signer } => Ok(Self::new(*signer)?),
            other => Err(other.mismatch(Strategy::Signature)),
        }
    }
}

impl PersistentAuthorizer for MappingAuthorizer {
    fn to_state(&self) -> AuthorizerState {
        AuthorizerState::Mapping {
            entitlements: self.iter().map(|(who, amount)| (*who, *amount)).collect(),
        }
    }

    fn from_state(state: &AuthorizerState) -> Result<Self, VestingError> {
        match state {
            AuthorizerState::Mapping { entitlements } => {
                let (recipients, amounts): (Vec<Address>, Vec<u64>) =
                    entitlements.iter().copied().unzip();
                Ok(Self::new(&recipients, &amounts)?)
            }
            other => Err(other.mismatch(Strategy::Mapping)),
        }
    }
}

impl PersistentAuthorizer for MerkleAuthorizer {
    fn to_state(&self) -> AuthorizerState {
        AuthorizerState::Merkle { root: *self.root() }
    }

    fn from_state(state: &AuthorizerState) -> Result<Self, VestingError> {
        match state {
            AuthorizerState::Merkle { root } => Ok(Self::new(*root)?),
            other => Err(other.mismatch(Strategy::Merkle)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub struct PoolSnapshot {
    pub cliff: u64,
    pub owner: Address,
    pub initial_funding: u64,
    pub balance: u64,
    /// Claimed recipients in ascending order.
    pub claimed: Vec<Address>,
    /// `None` when recovery is disabled.
    pub recovery_grace: Option<u64>,
    pub authorizer: AuthorizerState,
}

impl PoolSnapshot {
    /// Encode with the bincode standard config.
    pub fn encode(&self) -> Result<Vec<u8>, VestingError> {
        bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| VestingError::Snapshot(e.to_string()))
    }

    /// Decode bytes produced by [`PoolSnapshot::encode`]. Trailing bytes are
    /// rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, VestingError> {
        let (snapshot, read): (Self, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())
                .map_err(|e| VestingError::Snapshot(e.to_string()))?;
        if read != bytes.len() {
            return Err(VestingError::Snapshot(format!(
                "{} trailing bytes after snapshot",
                bytes.len() - read
            )));
        }
        Ok(snapshot)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), VestingError> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)
            .map_err(|e| VestingError::Snapshot(format!("write {}: {e}", path.display())))
    }

    pub fn read_from(path: &Path) -> Result<Self, VestingError> {
        let bytes = std::fs::read(path)
            .map_err(|e| VestingError::Snapshot(format!("read {}: {e}", path.display())))?;
        Self::decode(&bytes)
    }
}
