//! Deployment configuration.
//!
//! A [`DeploymentConfig`] describes one pool: owner, funding, cliff and the
//! authorization strategy. It is read from TOML or JSON with the `config`
//! crate, and any field can be overridden from the environment with the
//! `VEST__` prefix (for example `VEST__FUNDING=5000`).
//!
//! ```toml
//! owner = "0x0e0e…"
//! funding = 1000
//! cliff_delay_secs = 63072000
//!
//! [strategy]
//! kind = "signature"
//! signer = "0x5151…"
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vest_core::constants::DEFAULT_RECOVERY_GRACE_SECS;
use vest_core::error::ConstructionError;
use vest_core::traits::{Authorizer, Substrate};
use vest_core::types::{Address, Hash256, Strategy};

use crate::authorizer::SignatureAuthorizer;
use crate::engine::{ClaimEngine, MappingVesting, MerkleVesting, PoolParams, SignatureVesting};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "VEST";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),
    #[error("exactly one of `cliff` and `cliff_delay_secs` must be set")]
    AmbiguousCliff,
    #[error("cliff delay {delay} from {now} overflows")]
    CliffOverflow { now: u64, delay: u64 },
    #[error(transparent)]
    Invalid(#[from] ConstructionError),
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        Self::Load(e.to_string())
    }
}

/// Strategy-specific construction parameters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StrategyConfig {
    Signature { signer: Address },
    Mapping { recipients: Vec<Address>, amounts: Vec<u64> },
    Merkle { root: Hash256 },
}

impl StrategyConfig {
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Signature { .. } => Strategy::Signature,
            Self::Mapping { .. } => Strategy::Mapping,
            Self::Merkle { .. } => Strategy::Merkle,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub owner: Address,
    pub funding: u64,
    /// Absolute unlock timestamp.
    #[serde(default)]
    pub cliff: Option<u64>,
    /// Unlock delay relative to the deployment block time.
    #[serde(default)]
    pub cliff_delay_secs: Option<u64>,
    /// Recovery grace after the cliff. Signature pools fall back to one year;
    /// other strategies only get recovery when this is set.
    #[serde(default)]
    pub recovery_grace_secs: Option<u64>,
    pub strategy: StrategyConfig,
}

impl DeploymentConfig {
    /// Load from a TOML or JSON file (format chosen by extension), then apply
    /// `VEST__*` environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(env_source())
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    /// Parse from an in-memory TOML string without environment overrides.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    /// Resolve the absolute cliff given the deployment time.
    pub fn resolve_cliff(&self, now: u64) -> Result<u64, ConfigError> {
        match (self.cliff, self.cliff_delay_secs) {
            (Some(cliff), None) => Ok(cliff),
            (None, Some(delay)) => now
                .checked_add(delay)
                .ok_or(ConfigError::CliffOverflow { now, delay }),
            _ => Err(ConfigError::AmbiguousCliff),
        }
    }

    /// Grace period the deployed pool will use, if any.
    pub fn recovery_grace(&self) -> Option<u64> {
        match (&self.strategy, self.recovery_grace_secs) {
            (_, Some(grace)) => Some(grace),
            (StrategyConfig::Signature { .. }, None) => Some(DEFAULT_RECOVERY_GRACE_SECS),
            _ => None,
        }
    }

    /// Validate and construct the pool at the substrate's current block time.
    pub fn deploy(&self, substrate: Arc<dyn Substrate>) -> Result<VestingInstance, ConfigError> {
        let params = PoolParams {
            owner: self.owner,
            cliff: self.resolve_cliff(substrate.block_time())?,
            funding: self.funding,
        };
        let grace = self.recovery_grace();

        let instance = match &self.strategy {
            StrategyConfig::Signature { signer } => {
                let pool = SignatureVesting::new(params, SignatureAuthorizer::new(*signer)?, substrate)?;
                VestingInstance::Signature(with_grace(pool, grace)?)
            }
            StrategyConfig::Mapping { recipients, amounts } => {
                let pool = MappingVesting::mapping(params, recipients, amounts, substrate)?;
                VestingInstance::Mapping(with_grace(pool, grace)?)
            }
            StrategyConfig::Merkle { root } => {
                let pool = MerkleVesting::merkle(params, *root, substrate)?;
                VestingInstance::Merkle(with_grace(pool, grace)?)
            }
        };
        Ok(instance)
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn with_grace<A: Authorizer>(
    pool: ClaimEngine<A>,
    grace: Option<u64>,
) -> Result<ClaimEngine<A>, ConstructionError> {
    match grace {
        Some(grace) => pool.with_recovery(grace),
        None => Ok(pool.without_recovery()),
    }
}

/// A deployed pool of any strategy.
#[derive(Debug)]
pub enum VestingInstance {
    Signature(SignatureVesting),
    Mapping(MappingVesting),
    Merkle(MerkleVesting),
}

impl VestingInstance {
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Signature(p) => p.strategy(),
            Self::Mapping(p) => p.strategy(),
            Self::Merkle(p) => p.strategy(),
        }
    }

    pub fn cliff(&self) -> u64 {
        match self {
            Self::Signature(p) => p.cliff(),
            Self::Mapping(p) => p.cliff(),
            Self::Merkle(p) => p.cliff(),
        }
    }

    pub fn owner(&self) -> Address {
        match self {
            Self::Signature(p) => *p.owner(),
            Self::Mapping(p) => *p.owner(),
            Self::Merkle(p) => *p.owner(),
        }
    }

    pub fn balance(&self) -> u64 {
        match self {
            Self::Signature(p) => p.balance(),
            Self::Mapping(p) => p.balance(),
            Self::Merkle(p) => p.balance(),
        }
    }

    pub fn is_claimed(&self, recipient: &Address) -> bool {
        match self {
            Self::Signature(p) => p.is_claimed(recipient),
            Self::Mapping(p) => p.is_claimed(recipient),
            Self::Merkle(p) => p.is_claimed(recipient),
        }
    }

    /// When owner recovery unlocks, or `None` if disabled.
    pub fn recovery_unlocks_at(&self) -> Option<u64> {
        let policy = match self {
            Self::Signature(p) => p.recovery_policy(),
            Self::Mapping(p) => p.recovery_policy(),
            Self::Merkle(p) => p.recovery_policy(),
        };
        policy.map(|r| r.unlocks_at())
    }
}
