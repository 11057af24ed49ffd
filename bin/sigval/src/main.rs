//! Dual-signature validator CLI (sigval)
//!
//! Offline tooling around the dual-signature validator: decode a 130-byte
//! signature blob, recover its signers, produce one from two private keys,
//! or run a full enable + validate cycle against an in-memory store.
//!
//! ## Usage
//!
//! ```bash
//! # Inspect a blob
//! sigval split --signature 0x...
//!
//! # Recover both signers against a digest
//! sigval recover --digest 0x... --signature 0x...
//!
//! # Produce a blob: attestor signature first, user signature second
//! sigval sign --attestor-key 0x... --user-key 0x... --digest 0x...
//!
//! # Enable a record and validate a signature against it
//! sigval validate --config sigval.yaml --enable-data 0x... --signature 0x... --op-hash 0x...
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{keccak256, Address, B256};
use clap::{Args, Parser, Subcommand};
use dualsig_core::{
    recover_both, DualSignature, EnablePayload, SignatureParts, ValidationOutcome,
};
use dualsig_operations::{
    config::load_config, init_tracing, init_tracing_from_config, LogFormat, ObservabilityConfig,
    ValidatorConfig,
};
use dualsig_validator::{
    DualSigValidator, Environment, MemoryProofStore, UserOperation, ValidatorEvent,
};
use k256::ecdsa::{signature::hazmat::PrehashSigner, RecoveryId, Signature, SigningKey, VerifyingKey};

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "sigval")]
#[command(about = "Dual-signature validator tooling")]
#[command(version)]
struct Cli {
    /// Log level; overrides `observability.log_level` for `validate` [default: warn]
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a 130-byte blob into its attestor and user triples
    Split(SplitArgs),
    /// Recover both signers of a blob against a digest
    Recover(RecoverArgs),
    /// Sign a digest with the attestor and user keys and print the blob
    Sign(SignArgs),
    /// Enable a proof record and validate a signature blob against it
    Validate(ValidateArgs),
}

#[derive(Args)]
struct SplitArgs {
    /// Signature blob (0x... or hex), exactly 130 bytes
    #[arg(long)]
    signature: String,
}

#[derive(Args)]
struct RecoverArgs {
    /// 32-byte digest both signatures were made over
    #[arg(long)]
    digest: String,

    /// Signature blob (0x... or hex), exactly 130 bytes
    #[arg(long)]
    signature: String,
}

#[derive(Args)]
struct SignArgs {
    /// Attestor private key (0x... or hex)
    #[arg(long)]
    attestor_key: String,

    /// User private key (0x... or hex)
    #[arg(long)]
    user_key: String,

    /// 32-byte digest to sign, normally the record's proof hash
    #[arg(long)]
    digest: String,
}

#[derive(Args)]
struct ValidateArgs {
    /// Path to the YAML config file
    #[arg(long)]
    config: String,

    /// Enable payload: proof id followed by the encoded record
    #[arg(long)]
    enable_data: String,

    /// Signature blob (0x... or hex), exactly 130 bytes
    #[arg(long)]
    signature: String,

    /// User operation hash, reported in events only
    #[arg(long)]
    op_hash: String,

    /// Block timestamp to validate at (defaults to the system clock)
    #[arg(long)]
    now: Option<u64>,

    /// Deploying caller; overrides `validator.authority` from the config
    #[arg(long)]
    authority: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let level = cli.log_level;
    let result = match cli.command {
        Commands::Split(args) => with_tracing(level.as_deref(), || run_split(args)),
        Commands::Recover(args) => with_tracing(level.as_deref(), || run_recover(args)),
        Commands::Sign(args) => with_tracing(level.as_deref(), || run_sign(args)),
        Commands::Validate(args) => run_validate(args, level),
    };

    if let Err(err) = result {
        eprintln!("sigval failed: {err}");
        std::process::exit(1);
    }
}

fn with_tracing(level: Option<&str>, run: impl FnOnce() -> CliResult<()>) -> CliResult<()> {
    init_tracing(level.unwrap_or(DEFAULT_LOG_LEVEL), LogFormat::Pretty)?;
    run()
}

fn run_split(args: SplitArgs) -> CliResult<()> {
    let blob = parse_hex_bytes(&args.signature)?;
    let signatures = DualSignature::split(&blob)?;

    print_triple("attestor", &signatures.attestor);
    print_triple("user", &signatures.user);
    Ok(())
}

fn run_recover(args: RecoverArgs) -> CliResult<()> {
    let digest = parse_b256(&args.digest)?;
    let blob = parse_hex_bytes(&args.signature)?;
    let signatures = DualSignature::split(&blob)?;
    let signers = recover_both(digest, &signatures)?;

    println!("attestor: {}", signers.attestor);
    println!("user:     {}", signers.user);
    Ok(())
}

fn run_sign(args: SignArgs) -> CliResult<()> {
    let attestor_key = parse_signing_key(&args.attestor_key)?;
    let user_key = parse_signing_key(&args.user_key)?;
    let digest = parse_b256(&args.digest)?;

    let blob = DualSignature::from_parts(
        sign_hash(&attestor_key, digest)?,
        sign_hash(&user_key, digest)?,
    );

    println!("attestor:  {}", wallet_address(&attestor_key));
    println!("user:      {}", wallet_address(&user_key));
    println!("signature: 0x{}", hex::encode(blob.to_bytes()));
    Ok(())
}

fn run_validate(args: ValidateArgs, log_level: Option<String>) -> CliResult<()> {
    let config = load_config(&args.config)?;
    init_tracing_from_config(&with_log_level(&config.observability, log_level))?;

    let authority = resolve_authority(args.authority.as_deref(), &config.validator)?;
    let enable_data = parse_hex_bytes(&args.enable_data)?;
    let signature = parse_hex_bytes(&args.signature)?;
    let op_hash = parse_b256(&args.op_hash)?;
    let now = match args.now {
        Some(now) => now,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    };

    let mut env = CliEnv::new(authority, now);
    let mut validator =
        DualSigValidator::deploy(MemoryProofStore::new(), config.validator.to_params(), &env);

    let proof_id = EnablePayload::decode(&enable_data)?.proof_id;
    validator.enable(&enable_data, &mut env)?;

    let op = UserOperation::with_signature(signature);
    let outcome = validator.validate_user_op(&op, op_hash, proof_id, &mut env)?;

    for event in &env.events {
        println!("event: {event:?}");
    }
    print_outcome(&outcome);
    Ok(())
}

/// `--log-level` replaces the configured level when given.
fn with_log_level(
    observability: &ObservabilityConfig,
    log_level: Option<String>,
) -> ObservabilityConfig {
    match log_level {
        Some(log_level) => ObservabilityConfig {
            log_level,
            ..observability.clone()
        },
        None => observability.clone(),
    }
}

/// `--authority` wins over `validator.authority`; one of them is required.
fn resolve_authority(arg: Option<&str>, config: &ValidatorConfig) -> Result<Address, String> {
    match arg {
        Some(input) => parse_address(input),
        None => config.authority.ok_or_else(|| {
            "no authority: set validator.authority or pass --authority".to_string()
        }),
    }
}

/// Host environment for a single CLI run.
struct CliEnv {
    sender: Address,
    now: u64,
    events: Vec<ValidatorEvent>,
}

impl CliEnv {
    fn new(sender: Address, now: u64) -> Self {
        Self {
            sender,
            now,
            events: Vec::new(),
        }
    }
}

impl Environment for CliEnv {
    fn sender(&self) -> Address {
        self.sender
    }

    fn block_timestamp(&self) -> u64 {
        self.now
    }

    fn emit_event(&mut self, event: ValidatorEvent) {
        tracing::debug!(event = event.name(), "validator event");
        self.events.push(event);
    }
}

fn print_triple(role: &str, parts: &SignatureParts) {
    println!("{role}.v: {}", parts.v);
    println!("{role}.r: {}", parts.r);
    println!("{role}.s: {}", parts.s);
}

fn print_outcome(outcome: &ValidationOutcome) {
    println!("sig_failure:     {}", outcome.sig_failure);
    println!("valid_after:     {}", outcome.valid_after);
    println!("valid_until:     {}", outcome.valid_until);
    println!("validation_data: {:#066x}", outcome.pack());
}

fn strip_hex_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

fn parse_hex_bytes(input: &str) -> Result<Vec<u8>, String> {
    hex::decode(strip_hex_prefix(input)).map_err(|e| format!("invalid hex '{input}': {e}"))
}

fn parse_b256(input: &str) -> Result<B256, String> {
    let bytes: [u8; 32] = parse_hex_bytes(input)?
        .try_into()
        .map_err(|_| format!("'{input}' must be 32 bytes"))?;
    Ok(B256::from(bytes))
}

fn parse_address(input: &str) -> Result<Address, String> {
    let bytes: [u8; 20] = parse_hex_bytes(input)?
        .try_into()
        .map_err(|_| format!("'{input}' must be 20 bytes"))?;
    Ok(Address::from(bytes))
}

fn parse_signing_key(input: &str) -> Result<SigningKey, String> {
    let decoded = hex::decode(strip_hex_prefix(input))
        .map_err(|e| format!("invalid private key hex: {e}"))?;
    let bytes: [u8; 32] = decoded
        .try_into()
        .map_err(|_| "private key must be 32 bytes".to_string())?;
    SigningKey::from_bytes((&bytes).into()).map_err(|e| format!("invalid private key: {e}"))
}

fn wallet_address(signing_key: &SigningKey) -> Address {
    let verifying_key = VerifyingKey::from(signing_key);
    let public_key = verifying_key.to_encoded_point(false);
    let hash = keccak256(public_key.as_bytes().get(1..).unwrap_or_default());
    Address::from_slice(hash.as_slice().get(12..).unwrap_or_default())
}

/// Sign a digest and encode it as `(v, r, s)` with v in {27, 28}.
fn sign_hash(signing_key: &SigningKey, hash: B256) -> Result<SignatureParts, String> {
    let (sig, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(hash.as_ref())
        .map_err(|e| format!("signing failed: {e}"))?;
    Ok(SignatureParts {
        r: B256::from_slice(&sig.r().to_bytes()),
        s: B256::from_slice(&sig.s().to_bytes()),
        v: 27 + recovery_id.to_byte(),
    })
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use dualsig_core::{DualSignerPolicy, ProofRecord};

    const ATTESTOR_KEY: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
    const USER_KEY: &str = "2222222222222222222222222222222222222222222222222222222222222222";

    #[test]
    fn parse_signing_key_accepts_prefixed_and_unprefixed_hex() {
        let with_prefix = parse_signing_key(ATTESTOR_KEY).unwrap();
        let without_prefix = parse_signing_key(&ATTESTOR_KEY[2..]).unwrap();
        assert_eq!(
            wallet_address(&with_prefix),
            wallet_address(&without_prefix)
        );
    }

    #[test]
    fn parse_signing_key_rejects_wrong_length() {
        let err = parse_signing_key("0x1234").unwrap_err();
        assert!(err.contains("private key must be 32 bytes"));
    }

    #[test]
    fn parse_b256_requires_32_bytes() {
        assert_eq!(
            parse_b256(&format!("0X{}", "ab".repeat(32))).unwrap(),
            B256::repeat_byte(0xab)
        );
        assert!(parse_b256("0xabcd").unwrap_err().contains("must be 32 bytes"));
        assert!(parse_b256("0xzz").unwrap_err().contains("invalid hex"));
    }

    #[test]
    fn parse_address_requires_20_bytes() {
        assert_eq!(
            parse_address(&"11".repeat(20)).unwrap(),
            Address::repeat_byte(0x11)
        );
        assert!(parse_address(&"11".repeat(32)).is_err());
    }

    #[test]
    fn log_level_flag_overrides_config() {
        let configured = ObservabilityConfig {
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        };

        let overridden = with_log_level(&configured, Some("debug".to_string()));
        assert_eq!(overridden.log_level, "debug");
        assert_eq!(overridden.log_format, "json");

        assert_eq!(with_log_level(&configured, None).log_level, "info");
    }

    #[test]
    fn authority_flag_takes_precedence_over_config() {
        let config = ValidatorConfig {
            authority: Some(Address::repeat_byte(0x11)),
            ..Default::default()
        };

        assert_eq!(
            resolve_authority(None, &config).unwrap(),
            Address::repeat_byte(0x11)
        );
        assert_eq!(
            resolve_authority(Some(&"22".repeat(20)), &config).unwrap(),
            Address::repeat_byte(0x22)
        );
    }

    #[test]
    fn missing_authority_is_an_error() {
        let err = resolve_authority(None, &ValidatorConfig::default()).unwrap_err();
        assert!(err.contains("no authority"));
    }

    #[test]
    fn signed_blob_recovers_attestor_then_user() {
        let attestor = parse_signing_key(ATTESTOR_KEY).unwrap();
        let user = parse_signing_key(USER_KEY).unwrap();
        let digest = keccak256(b"proof");

        let blob = DualSignature::from_parts(
            sign_hash(&attestor, digest).unwrap(),
            sign_hash(&user, digest).unwrap(),
        );
        let signers = recover_both(digest, &blob).unwrap();

        assert_eq!(signers.attestor, wallet_address(&attestor));
        assert_eq!(signers.user, wallet_address(&user));
    }

    #[test]
    fn cli_env_drives_full_validation() {
        let attestor = parse_signing_key(ATTESTOR_KEY).unwrap();
        let user = parse_signing_key(USER_KEY).unwrap();
        let record = ProofRecord {
            model_id: 1,
            version_id: 2,
            user_address: wallet_address(&user),
            proof_hash: keccak256(b"proof"),
        };
        let enable_data = EnablePayload {
            proof_id: U256::from(7),
            record,
        }
        .encode();
        let blob = DualSignature::from_parts(
            sign_hash(&attestor, record.proof_hash).unwrap(),
            sign_hash(&user, record.proof_hash).unwrap(),
        );

        let mut env = CliEnv::new(wallet_address(&attestor), 1_000);
        let mut validator = DualSigValidator::deploy(
            MemoryProofStore::new(),
            Default::default(),
            &env,
        );
        validator.enable(&enable_data, &mut env).unwrap();

        let op = UserOperation::with_signature(blob.to_bytes().to_vec());
        let outcome = validator
            .validate_user_op(&op, B256::ZERO, U256::from(7), &mut env)
            .unwrap();

        assert_eq!(outcome.valid_after, 1_000);
        assert_eq!(outcome.valid_until, 1_008);
        assert!(DualSignerPolicy::new(wallet_address(&attestor)).is_authorized(
            &record,
            &recover_both(record.proof_hash, &blob).unwrap()
        ));
        assert_eq!(env.events.len(), 5);
    }
}
