//! Error types for vesting pools.
//!
//! Every rejected operation surfaces exactly one [`VestingError`] variant so
//! that tooling and tests can assert on the cause. No operation leaves a
//! partial effect behind when it returns an error.

use thiserror::Error;

use crate::types::Address;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key bytes")] InvalidPublicKey,
    #[error("invalid signature bytes")] InvalidSignature,
    #[error("signature verification failed")] VerificationFailed,
    #[error("invalid hex: {0}")] InvalidHex(String),
    #[error("invalid length: expected {expected}, got {got}")] InvalidLength { expected: usize, got: usize },
}

/// Rejections raised while validating construction parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("recipient/amount length mismatch: {recipients} recipients, {amounts} amounts")]
    LengthMismatch { recipients: usize, amounts: usize },
    #[error("empty recipient list")] EmptyRecipients,
    #[error("zero amount for recipient at index {index}")] ZeroAmount { index: usize },
    #[error("zero address for {0}")] ZeroAddress(&'static str),
    #[error("duplicate recipient: {0}")] DuplicateRecipient(Address),
    #[error("pool funded with zero value")] ZeroFunding,
    #[error("zero merkle root")] ZeroMerkleRoot,
    #[error("cliff {cliff} plus grace period {grace} overflows")] GracePeriodOverflow { cliff: u64, grace: u64 },
}

/// Failure reported by the execution substrate when moving value out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("recipient {0} rejected the transfer")] Rejected(Address),
    #[error("recipient balance overflow")] BalanceOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestingError {
    #[error("cliff not reached: unlocks at {cliff}, now {now}")]
    CliffNotReached { cliff: u64, now: u64 },
    #[error("invalid signature")]
    InvalidSignature,
    #[error("not eligible")]
    NotEligible,
    #[error("invalid proof")]
    InvalidProof,
    #[error("already claimed")]
    AlreadyClaimed,
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: u64, requested: u64 },
    #[error("unauthorized")]
    Unauthorized,
    #[error("recovery too early: unlocks at {unlocks_at}, now {now}")]
    RecoveryTooEarly { unlocks_at: u64, now: u64 },
    #[error("invalid construction: {0}")]
    ConstructionInvalid(#[from] ConstructionError),
    #[error("recovery is not enabled for this pool")]
    RecoveryDisabled,
    #[error("nothing to recover")]
    NothingToRecover,
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
    #[error("snapshot: {0}")]
    Snapshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_cliff_not_reached() {
        let e = VestingError::CliffNotReached { cliff: 100, now: 42 };
        assert_eq!(e.to_string(), "cliff not reached: unlocks at 100, now 42");
    }

    #[test]
    fn display_insufficient_balance() {
        let e = VestingError::InsufficientBalance { available: 1, requested: 2 };
        assert_eq!(e.to_string(), "insufficient balance: available 1, requested 2");
    }

    #[test]
    fn from_construction_error() {
        let e: VestingError = ConstructionError::ZeroFunding.into();
        assert_eq!(e, VestingError::ConstructionInvalid(ConstructionError::ZeroFunding));
        assert_eq!(e.to_string(), "invalid construction: pool funded with zero value");
    }

    #[test]
    fn from_transfer_error() {
        let e: VestingError = TransferError::Rejected(Address::ZERO).into();
        assert!(matches!(e, VestingError::TransferFailed(TransferError::Rejected(_))));
    }

    #[test]
    fn length_mismatch_names_both_counts() {
        let e = ConstructionError::LengthMismatch { recipients: 3, amounts: 2 };
        let s = e.to_string();
        assert!(s.contains("3 recipients"));
        assert!(s.contains("2 amounts"));
    }
}
