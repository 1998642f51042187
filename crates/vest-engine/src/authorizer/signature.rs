//! Signature strategy: a trusted signer authorizes `(recipient, amount)`.
//!
//! There is no recipient list; any pair the signer has signed is eligible,
//! so recipients can be added after deployment. The recipient in the signed
//! message is always the caller, which stops a front-runner from replaying a
//! captured signature for themselves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vest_core::crypto::{recover_claim_signer, ClaimSignature};
use vest_core::error::{ConstructionError, VestingError};
use vest_core::traits::Authorizer;
use vest_core::types::{Address, Strategy};

/// Claim data for the signature strategy.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SignedClaim {
    pub amount: u64,
    pub signature: ClaimSignature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureAuthorizer {
    signer: Address,
}

impl SignatureAuthorizer {
    pub fn new(signer: Address) -> Result<Self, ConstructionError> {
        if signer.is_zero() {
            return Err(ConstructionError::ZeroAddress("signer"));
        }
        Ok(Self { signer })
    }

    /// The trusted signer identity fixed at construction.
    pub fn signer(&self) -> &Address {
        &self.signer
    }
}

impl Authorizer for SignatureAuthorizer {
    type Claim = SignedClaim;

    fn strategy(&self) -> Strategy {
        Strategy::Signature
    }

    fn authorize(&self, caller: &Address, claim: &SignedClaim) -> Result<u64, VestingError> {
        let recovered = recover_claim_signer(&claim.signature, caller, claim.amount).map_err(|e| {
            debug!(%caller, "claim signature rejected: {e}");
            VestingError::InvalidSignature
        })?;
        if recovered != self.signer {
            debug!(%caller, %recovered, "claim signed by untrusted key");
            return Err(VestingError::InvalidSignature);
        }
        Ok(claim.amount)
    }
}
