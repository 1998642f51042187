//! The three [`Authorizer`](vest_core::traits::Authorizer) strategies.
//!
//! | Strategy  | Claim data        | Rejection          |
//! |-----------|-------------------|--------------------|
//! | Signature | [`SignedClaim`]   | `InvalidSignature` |
//! | Mapping   | [`MappingClaim`]  | `NotEligible`      |
//! | Merkle    | [`MerkleClaim`]   | `InvalidProof`     |

pub mod mapping;
pub mod merkle;
pub mod signature;

pub use mapping::{MappingAuthorizer, MappingClaim};
pub use merkle::{MerkleAuthorizer, MerkleClaim};
pub use signature::{SignatureAuthorizer, SignedClaim};
