//! Protocol constants. All amounts are in the pool's smallest unit.

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// A 365-day year, the unit deployments use for cliff and grace lengths.
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Grace period after the cliff before the owner may recover residual value.
///
/// Only the default; every pool carries its own grace period.
///
/// # Examples
///
/// ```
/// use vest_core::constants::{DEFAULT_RECOVERY_GRACE_SECS, SECONDS_PER_YEAR};
/// assert_eq!(DEFAULT_RECOVERY_GRACE_SECS, SECONDS_PER_YEAR);
/// ```
pub const DEFAULT_RECOVERY_GRACE_SECS: u64 = SECONDS_PER_YEAR;

/// Prefix mixed into the claim message before it is signed.
///
/// Keeps a claim signature from ever being a valid signature over some other
/// 32-byte payload the signer might produce.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Vesting Signed Message:\n32";

/// Byte length of the claim message preimage: recipient (32) || amount (8).
pub const CLAIM_MESSAGE_SIZE: usize = 32 + 8;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Longest Merkle proof accepted. A tree this deep would hold 2^64 leaves.
pub const MAX_PROOF_DEPTH: usize = 64;
