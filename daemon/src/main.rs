//! bloomd — operator entry point for the BLOOM peg core.

use anyhow::Context;
use bloom_attestation::{is_envelope_stale, verify_envelope, AttestationEnvelope, AttestationSnapshot, AttestationWriter};
use bloom_core::{init_logging, CoreConfig, LogFormat};
use bloom_peg::{bloom_to_sats, max_redeemable_bloom, CollateralRatio, PegInfo};
use bloom_types::{BloomAmount, ProofHash, SatAmount, Timestamp};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bloomd", about = "BLOOM peg operator tool")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BLOOM_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BLOOM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BLOOM_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the fixed peg parameters as JSON.
    PegInfo,

    /// Quote a redemption or the reserve-backed capacity.
    Quote {
        /// BLOOM to convert to sats at the peg.
        #[arg(long)]
        bloom: Option<u128>,

        /// Locked sats to convert to the maximum backed BLOOM.
        #[arg(long)]
        locked_sats: Option<u128>,
    },

    /// Sign an attestation envelope for the given reserve and supply.
    Attest {
        /// Locked reserve in sats. Defaults to `bootstrap_locked_sats`.
        #[arg(long)]
        locked_sats: Option<u128>,

        /// Outstanding BLOOM supply.
        #[arg(long)]
        supply: u128,

        /// 64 hex digit operator seed.
        #[arg(long, env = "BLOOM_OPERATOR_SEED", hide_env_values = true)]
        seed: String,

        /// Write the envelope here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Verify an attestation envelope's signature and freshness.
    Verify {
        #[arg(long)]
        file: PathBuf,

        /// Staleness threshold. Defaults to `attestation_max_age_ms`.
        #[arg(long)]
        max_age_ms: Option<u64>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<CoreConfig> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CoreConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let format: LogFormat = config.log_format()?;
    init_logging(format, &config.log_level)?;

    match cli.command {
        Command::PegInfo => {
            println!("{}", serde_json::to_string_pretty(&PegInfo::current())?);
        }
        Command::Quote { bloom, locked_sats } => {
            if bloom.is_none() && locked_sats.is_none() {
                anyhow::bail!("pass --bloom and/or --locked-sats");
            }
            if let Some(bloom) = bloom {
                let sats = bloom_to_sats(BloomAmount::new(bloom))?;
                println!("{} = {}", BloomAmount::new(bloom), sats);
            }
            if let Some(locked) = locked_sats {
                let max = max_redeemable_bloom(SatAmount::new(locked));
                println!("{} backs at most {}", SatAmount::new(locked), max);
            }
        }
        Command::Attest {
            locked_sats,
            supply,
            seed,
            out,
        } => {
            let keypair = bloom_crypto::keypair_from_hex_seed(&seed)?;
            let locked = SatAmount::new(
                locked_sats.unwrap_or(u128::from(config.bootstrap_locked_sats)),
            );
            let supply = BloomAmount::new(supply);
            let ratio = CollateralRatio::of(locked, supply)?;
            if !ratio.is_fully_reserved() {
                tracing::warn!(%ratio, "attesting an under-reserved state");
            }
            let snapshot = AttestationSnapshot::new(
                Timestamp::now(),
                locked,
                supply,
                ProofHash::ZERO,
                ProofHash::ZERO,
                0,
            )?;
            let envelope = AttestationWriter::new(keypair).write_envelope(&config.signer, &snapshot);
            let json = envelope.to_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), %ratio, "envelope written");
                }
                None => println!("{json}"),
            }
        }
        Command::Verify { file, max_age_ms } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let envelope = AttestationEnvelope::from_json(&json)?;
            let max_age = max_age_ms.unwrap_or(config.attestation_max_age_ms);
            if !verify_envelope(&envelope) {
                anyhow::bail!("signature does not verify");
            }
            if is_envelope_stale(&envelope, max_age, Timestamp::now()) {
                anyhow::bail!(
                    "envelope is stale: signed at {}, limit {}ms",
                    envelope.timestamp(),
                    max_age
                );
            }
            println!(
                "ok: {} sats attested by {} ({})",
                envelope.payload.sats_total, envelope.payload.signer, envelope.public_key
            );
        }
    }
    Ok(())
}
