//! Shared fixtures for integration tests.

use std::sync::Arc;

use vest_core::constants::SECONDS_PER_YEAR;
use vest_core::crypto::{sign_claim, KeyPair};
use vest_core::types::Address;
use vest_engine::{MemorySubstrate, PoolParams, SignatureVesting, SignedClaim};

/// Deployment time used by scenario tests.
pub const GENESIS: u64 = 1_700_000_000;

/// Cliff two years after [`GENESIS`].
pub const CLIFF: u64 = GENESIS + 2 * SECONDS_PER_YEAR;

/// Identity from a seed byte.
pub fn addr(seed: u8) -> Address {
    Address([seed; 32])
}

pub fn owner() -> Address {
    addr(0x0E)
}

/// Deterministic trusted signer.
pub fn signer() -> KeyPair {
    KeyPair::from_secret_bytes([0x51; 32])
}

/// A claim for `recipient` signed by [`signer`].
pub fn signed(recipient: &Address, amount: u64) -> SignedClaim {
    SignedClaim { amount, signature: sign_claim(&signer(), recipient, amount) }
}

pub fn params(funding: u64) -> PoolParams {
    PoolParams { owner: owner(), cliff: CLIFF, funding }
}

/// Signature pool deployed at [`GENESIS`] with cliff [`CLIFF`].
pub fn signature_pool(funding: u64) -> (Arc<MemorySubstrate>, SignatureVesting) {
    let substrate = Arc::new(MemorySubstrate::new(GENESIS));
    let pool = SignatureVesting::signature(params(funding), signer().address(), substrate.clone())
        .expect("valid signature pool");
    (substrate, pool)
}
