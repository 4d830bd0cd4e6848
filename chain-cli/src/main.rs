//! Command line driver for the proof-of-work ledger

mod transport;

use anyhow::{Context, Result};
use chain_consensus::ProofOfWork;
use chain_ledger::{ChainSnapshot, Ledger, LedgerConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "chain-cli")]
#[command(about = "Single-writer proof-of-work ledger")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, short, env = "CHAIN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the configured difficulty
    #[arg(long, global = true)]
    difficulty: Option<usize>,

    /// Override the configured proof search bound
    #[arg(long, global = true)]
    max_attempts: Option<u64>,

    /// Chain snapshot file
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve newline-delimited JSON requests from stdin
    Run,
    /// Validate a chain snapshot
    Verify,
    /// Print the effective configuration
    Config,
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // stdout carries responses
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve_config(cli: &Cli) -> Result<LedgerConfig> {
    let mut config =
        LedgerConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(max_attempts) = cli.max_attempts {
        config = config.with_max_attempts(max_attempts);
    }
    if let Some(snapshot) = &cli.snapshot {
        config = config.with_snapshot_path(snapshot);
    }

    config.validate()?;
    Ok(config)
}

/// Restore from the snapshot when one exists, otherwise start at genesis
fn open_ledger(config: &LedgerConfig) -> Result<Ledger> {
    match &config.snapshot_path {
        Some(path) if path.exists() => {
            let snapshot = ChainSnapshot::load_from_file(path)
                .with_context(|| format!("failed to read snapshot {}", path.display()))?;
            let engine = ProofOfWork::new(config.pow_config())?;
            Ok(Ledger::from_snapshot(engine, snapshot)?)
        }
        _ => Ok(Ledger::from_config(config)?),
    }
}

async fn run(config: LedgerConfig) -> Result<()> {
    let ledger = Arc::new(open_ledger(&config)?);
    let snapshot_path = config.snapshot_path.as_deref();

    info!(
        "Serving requests on stdin ({} blocks, difficulty {})",
        ledger.chain_len(),
        ledger.difficulty()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = transport::handle_line(&ledger, &line, snapshot_path).await;
        stdout.write_all(response.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

fn verify(config: &LedgerConfig) -> Result<()> {
    let path: &Path = config
        .snapshot_path
        .as_deref()
        .context("verify needs --snapshot or snapshot_path in the configuration")?;

    let snapshot = ChainSnapshot::load_from_file(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let engine = ProofOfWork::new(config.pow_config())?;
    let ledger = Ledger::from_snapshot(engine, snapshot)?;
    let tip = ledger.last_block();

    println!(
        "Snapshot OK: {} blocks, tip #{} {}, difficulty {}",
        ledger.chain_len(),
        tip.index,
        tip.hash().map(|h| h.as_str()).unwrap_or("-"),
        ledger.difficulty()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Run => run(config).await,
        Command::Verify => verify(&config),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_core::Transaction;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "chain-cli",
            "run",
            "--difficulty",
            "3",
            "--snapshot",
            "/tmp/chain.json",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Run));
        assert_eq!(cli.difficulty, Some(3));
        assert_eq!(cli.snapshot, Some(PathBuf::from("/tmp/chain.json")));
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_open_ledger_restores_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain.json");
        let config = LedgerConfig::default().with_snapshot_path(&path);

        let ledger = open_ledger(&config).unwrap();
        assert_eq!(ledger.chain_len(), 1);

        ledger.submit_transaction(Transaction::new().with_field("content", "hi"));
        ledger.mine().unwrap();
        ledger.snapshot().save_to_file(&path).unwrap();

        let reopened = open_ledger(&config).unwrap();
        assert_eq!(reopened.get_chain(), ledger.get_chain());
        assert!(verify(&config).is_ok());
    }

    #[test]
    fn test_verify_requires_snapshot() {
        assert!(verify(&LedgerConfig::default()).is_err());
    }
}
