//! Adversarial and end-to-end test suite for vesting pools.
//!
//! Integration tests live under `tests/` and attack the claim engine the way
//! a hostile recipient would: early claims, replays, forged authorization,
//! and re-entry from inside the value transfer.

pub mod helpers;
