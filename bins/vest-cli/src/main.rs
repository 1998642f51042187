//! vest-cli — Off-chain tooling for vesting pools.
//!
//! Generates signer keys, issues and checks claim signatures, builds Merkle
//! trees with per-recipient proofs, and validates deployment configs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use vest_core::crypto::{recover_claim_signer, sign_claim, ClaimSignature, KeyPair};
use vest_core::merkle::{verify_proof, MerkleTree};
use vest_core::types::{Address, Hash256};
use vest_engine::{DeploymentConfig, MemorySubstrate, VestingInstance};

/// Vesting pool command-line tooling.
#[derive(Parser)]
#[command(name = "vest-cli")]
#[command(version, about = "Cliff-locked value distribution tooling.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a signer keypair.
    Keygen(KeygenArgs),
    /// Issue a claim signature for a recipient and amount.
    Sign(SignArgs),
    /// Check a claim signature against a trusted signer.
    Verify(VerifyArgs),
    /// Build a Merkle tree from a JSON entitlement list.
    Tree(TreeArgs),
    /// Validate a deployment config and print a summary.
    Inspect(InspectArgs),
}

#[derive(Args)]
struct KeygenArgs {
    /// Hex-encoded 32-byte secret. Random if omitted.
    #[arg(short, long)]
    seed: Option<String>,
}

#[derive(Args)]
struct SignArgs {
    /// Hex-encoded 32-byte signer secret.
    #[arg(short, long)]
    secret: String,

    /// Recipient address (hex).
    #[arg(short, long)]
    recipient: Address,

    /// Amount in smallest units.
    #[arg(short, long)]
    amount: u64,
}

#[derive(Args)]
struct VerifyArgs {
    /// Trusted signer address (hex).
    #[arg(long)]
    signer: Address,

    /// Recipient address (hex).
    #[arg(short, long)]
    recipient: Address,

    /// Amount in smallest units.
    #[arg(short, long)]
    amount: u64,

    /// Hex-encoded claim signature (public key followed by signature).
    #[arg(long)]
    signature: String,
}

#[derive(Args)]
struct TreeArgs {
    /// JSON file holding `[{"recipient": "...", "amount": N}, ...]`.
    #[arg(short, long)]
    input: PathBuf,

    /// Write the tree JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InspectArgs {
    /// Deployment config (TOML or JSON).
    #[arg(short, long)]
    config: PathBuf,

    /// Deployment time in seconds since epoch. Defaults to now.
    #[arg(long)]
    now: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct Entitlement {
    recipient: Address,
    amount: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct ProvenClaim {
    recipient: Address,
    amount: u64,
    proof: Vec<Hash256>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct TreeOutput {
    root: Hash256,
    claims: Vec<ProvenClaim>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen(args) => keygen(args),
        Commands::Sign(args) => sign(args),
        Commands::Verify(args) => verify(args),
        Commands::Tree(args) => tree(args),
        Commands::Inspect(args) => inspect(args),
    }
}

fn keygen(args: KeygenArgs) -> Result<()> {
    let keypair = match args.seed {
        Some(seed) => parse_secret(&seed)?,
        None => KeyPair::generate(),
    };

    println!("Secret:     {}", hex::encode(keypair.secret_bytes()));
    println!("Public key: {}", keypair.public_key());
    println!("Address:    {}", keypair.address());
    Ok(())
}

fn sign(args: SignArgs) -> Result<()> {
    let keypair = parse_secret(&args.secret)?;
    let signature = sign_claim(&keypair, &args.recipient, args.amount);

    tracing::debug!(signer = %keypair.address(), recipient = %args.recipient, amount = args.amount, "signed claim");
    println!("{}", signature.to_hex());
    Ok(())
}

fn verify(args: VerifyArgs) -> Result<()> {
    let signature = ClaimSignature::from_hex(&args.signature).context("Malformed claim signature")?;
    let recovered = recover_claim_signer(&signature, &args.recipient, args.amount)
        .context("Signature does not verify for this recipient and amount")?;

    if recovered != args.signer {
        bail!("Signed by {recovered}, not the trusted signer {}", args.signer);
    }
    println!("OK: {} may claim {} (signed by {})", args.recipient, args.amount, recovered);
    Ok(())
}

fn tree(args: TreeArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let entries: Vec<Entitlement> =
        serde_json::from_str(&raw).context("Entitlement list must be a JSON array of {recipient, amount}")?;

    let output = build_tree(&entries)?;
    let json = serde_json::to_string_pretty(&output)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Root: {}", output.root);
            println!("Wrote {} proofs to {}", output.claims.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let config = DeploymentConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let now = match args.now {
        Some(now) => now,
        None => u64::try_from(Utc::now().timestamp()).context("System clock before epoch")?,
    };

    let instance = config
        .deploy(Arc::new(MemorySubstrate::new(now)))
        .context("Deployment config is invalid")?;

    for line in summary(&config, &instance) {
        println!("{line}");
    }
    Ok(())
}

/// Build the tree and a proof for every entry, checking each proof.
fn build_tree(entries: &[Entitlement]) -> Result<TreeOutput> {
    if entries.is_empty() {
        bail!("Entitlement list is empty");
    }

    let pairs: Vec<(Address, u64)> = entries.iter().map(|e| (e.recipient, e.amount)).collect();
    let tree = MerkleTree::from_entries(&pairs);
    let root = tree.root();

    let mut claims = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let proof = tree
            .proof(index)
            .with_context(|| format!("No proof for entry {index}"))?;
        let leaf = vest_core::merkle::leaf_hash(&entry.recipient, entry.amount);
        if !verify_proof(&proof, &root, &leaf) {
            bail!("Proof for entry {index} does not verify");
        }
        claims.push(ProvenClaim { recipient: entry.recipient, amount: entry.amount, proof });
    }
    Ok(TreeOutput { root, claims })
}

fn summary(config: &DeploymentConfig, instance: &VestingInstance) -> Vec<String> {
    let mut lines = vec![
        format!("Strategy: {}", instance.strategy()),
        format!("Owner:    {}", instance.owner()),
        format!("Funding:  {}", instance.balance()),
        format!("Cliff:    {} ({})", instance.cliff(), render_time(instance.cliff())),
    ];
    match instance.recovery_unlocks_at() {
        Some(at) => lines.push(format!("Recovery: after {} ({})", at, render_time(at))),
        None => lines.push("Recovery: disabled".to_string()),
    }
    if let VestingInstance::Mapping(pool) = instance {
        let total = pool.authorizer().total_entitled();
        lines.push(format!("Recipients: {}", pool.authorizer().len()));
        match total {
            Some(total) if total > config.funding => {
                lines.push(format!("WARNING: entitlements total {total}, exceeding funding {}", config.funding));
            }
            Some(total) => lines.push(format!("Entitled:   {total}")),
            None => lines.push("WARNING: entitlement total overflows u64".to_string()),
        }
    }
    if let VestingInstance::Merkle(pool) = instance {
        lines.push(format!("Root:     {}", pool.merkle_root()));
    }
    if let VestingInstance::Signature(pool) = instance {
        lines.push(format!("Signer:   {}", pool.signer()));
    }
    lines
}

/// Render a timestamp as a UTC date, or as raw seconds past the calendar range.
fn render_time(secs: u64) -> String {
    let time: Option<DateTime<Utc>> =
        i64::try_from(secs).ok().and_then(|s| DateTime::from_timestamp(s, 0));
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{secs}s since epoch"),
    }
}

/// Parse a 32-byte hex secret into a keypair.
fn parse_secret(input: &str) -> Result<KeyPair> {
    let trimmed = input.trim();
    let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed)).context("Invalid hex secret")?;
    if bytes.len() != 32 {
        bail!("Secret must be exactly 32 bytes (64 hex characters)");
    }
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&bytes);
    Ok(KeyPair::from_secret_bytes(secret))
}
