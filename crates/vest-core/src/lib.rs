//! # vest-core
//! Foundation types and traits for cliff-locked vesting pools.
//!
//! - [`types`] — `Hash256`, `Address`, `Strategy`, `ClaimStatus`
//! - [`crypto`] — Ed25519 keys and claim authorization signatures
//! - [`merkle`] — pair-sorted SHA-256 Merkle tree and proofs
//! - [`traits`] — the `Authorizer` and `Substrate` seams
//! - [`error`] — error taxonomy shared by every crate

pub mod constants;
pub mod crypto;
pub mod error;
pub mod merkle;
pub mod traits;
pub mod types;
