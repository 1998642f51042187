//! # vest-engine — Cliff-gated claim engine for vesting pools.
//!
//! A pool holds a funded balance and releases it to eligible recipients once
//! the cliff timestamp has passed. One [`ClaimEngine`] state machine serves
//! all three authorization strategies:
//!
//! - **Signature**: an off-chain signer authorizes `(recipient, amount)` pairs.
//! - **Mapping**: a fixed recipient → amount table set at construction.
//! - **Merkle**: a root committing to the recipient → amount set.
//!
//! Every claim runs gate → authorize → anti-replay → debit → record → transfer,
//! with all state committed before value leaves the pool.

pub mod authorizer;
pub mod cliff;
pub mod config;
pub mod engine;
pub mod ledger;
pub mod recovery;
pub mod snapshot;
pub mod substrate;

pub use authorizer::{
    MappingAuthorizer, MappingClaim, MerkleAuthorizer, MerkleClaim, SignatureAuthorizer,
    SignedClaim,
};
pub use cliff::CliffGate;
pub use config::{DeploymentConfig, StrategyConfig, VestingInstance};
pub use engine::{
    ClaimEngine, ClaimReceipt, MappingVesting, MerkleVesting, PoolParams, RecoveryReceipt,
    SignatureVesting,
};
pub use ledger::{ClaimRecordOutcome, Ledger};
pub use recovery::RecoveryPolicy;
pub use snapshot::{AuthorizerState, PersistentAuthorizer, PoolSnapshot};
pub use substrate::MemorySubstrate;
