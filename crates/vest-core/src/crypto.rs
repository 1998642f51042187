//! Ed25519 claim authorization.
//!
//! # Signing scheme
//!
//! A trusted signer authorizes a `(recipient, amount)` pair off-chain:
//!
//! 1. `message = SHA-256(recipient || amount_le)` ([`claim_message_hash`])
//! 2. `digest  = SHA-256(SIGNED_MESSAGE_PREFIX || message)` ([`signing_digest`])
//! 3. `signature = Ed25519(signer_secret, digest)`
//!
//! The recipient is part of the message, so a captured signature is useless
//! to anyone other than the recipient it was issued for. Ed25519 has no key
//! recovery; the [`ClaimSignature`] therefore carries the signer's public key
//! and [`recover_claim_signer`] returns the identity of that key only after
//! the signature verifies under it.

use ed25519_dalek::Signer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::constants::{CLAIM_MESSAGE_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE, SIGNED_MESSAGE_PREFIX};
use crate::error::CryptoError;
use crate::types::{Address, Hash256};

/// Ed25519 keypair held by a trusted signer or a participant.
///
/// The secret key is zeroized on drop by the underlying library.
pub struct KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl KeyPair {
    /// Generate a random keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Create a keypair from 32-byte secret key material.
    pub fn from_secret_bytes(bytes: [u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(&bytes),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    /// Identity of this keypair's public key.
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Get the raw secret key bytes (32 bytes). Handle with care.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Sign a message, returning the raw 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_secret_bytes(self.secret_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Ed25519 public key for verifying claim signatures.
#[derive(Clone)]
pub struct PublicKey {
    verifying_key: ed25519_dalek::VerifyingKey,
}

impl PublicKey {
    /// Create a public key from raw bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let vk = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key: vk })
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// The participant identity derived from this key.
    pub fn address(&self) -> Address {
        address_of(&self.to_bytes())
    }

    /// Verify an Ed25519 signature on a message.
    ///
    /// Uses strict verification: weak keys and non-canonical signatures fail.
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> Result<(), CryptoError> {
        let sig = ed25519_dalek::Signature::from_bytes(signature);
        self.verifying_key
            .verify_strict(message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

/// Identity of a raw Ed25519 public key: `BLAKE3(pubkey)`.
pub fn address_of(pubkey_bytes: &[u8; 32]) -> Address {
    Address(blake3::hash(pubkey_bytes).into())
}

/// Hash of the claim message `recipient || amount_le`.
///
/// Shared byte layout with Merkle leaves (see [`crate::merkle::leaf_hash`]).
pub fn claim_message_hash(recipient: &Address, amount: u64) -> Hash256 {
    let mut data = Vec::with_capacity(CLAIM_MESSAGE_SIZE);
    data.extend_from_slice(recipient.as_bytes());
    data.extend_from_slice(&amount.to_le_bytes());
    Hash256(Sha256::digest(&data).into())
}

/// Apply the signed-message convention to a claim message hash.
pub fn signing_digest(message: &Hash256) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(message.as_bytes());
    Hash256(hasher.finalize().into())
}

/// Authorization data for a signature-strategy claim.
///
/// Raw byte vectors so malformed submissions can be represented and rejected
/// rather than failing at the transport boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimSignature {
    /// Ed25519 public key of the signer (32 bytes).
    pub public_key: Vec<u8>,
    /// Ed25519 signature over the signing digest (64 bytes).
    pub signature: Vec<u8>,
}

impl ClaimSignature {
    /// Wire form: `public_key || signature` (96 bytes when well formed).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PUBLIC_KEY_SIZE + SIGNATURE_SIZE);
        out.extend_from_slice(&self.public_key);
        out.extend_from_slice(&self.signature);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let expected = PUBLIC_KEY_SIZE + SIGNATURE_SIZE;
        if bytes.len() != expected {
            return Err(CryptoError::InvalidLength { expected, got: bytes.len() });
        }
        let (pk, sig) = bytes.split_at(PUBLIC_KEY_SIZE);
        Ok(Self {
            public_key: pk.to_vec(),
            signature: sig.to_vec(),
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for ClaimSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ClaimSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Issue a claim signature authorizing `recipient` to claim `amount`.
pub fn sign_claim(signer: &KeyPair, recipient: &Address, amount: u64) -> ClaimSignature {
    let digest = signing_digest(&claim_message_hash(recipient, amount));
    ClaimSignature {
        public_key: signer.public_key().to_bytes().to_vec(),
        signature: signer.sign(digest.as_bytes()).to_vec(),
    }
}

/// Recover the identity that authorized `(recipient, amount)`.
///
/// Checks that:
/// 1. The signature carries a 32-byte decodable public key and 64 signature bytes
/// 2. The signature verifies over the signing digest of `(recipient, amount)`
///
/// Returns the signer's [`Address`]; callers compare it to the trusted signer.
pub fn recover_claim_signer(
    signature: &ClaimSignature,
    recipient: &Address,
    amount: u64,
) -> Result<Address, CryptoError> {
    let pk_bytes: [u8; 32] = signature
        .public_key
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidPublicKey)?;
    let pk = PublicKey::from_bytes(&pk_bytes)?;

    let sig_bytes: [u8; 64] = signature
        .signature
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidSignature)?;

    let digest = signing_digest(&claim_message_hash(recipient, amount));
    pk.verify(digest.as_bytes(), &sig_bytes)?;
    Ok(pk.address())
}
