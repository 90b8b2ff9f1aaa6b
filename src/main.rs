//! Safe Transaction Hashes
//!
//! Recomputes the hashes a Safe multisig signer is asked to approve, so they
//! can be compared against what the hardware wallet displays.

use alloy_primitives::Address;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use safe_tx_hashes::{
    api::{self, SafeApiClient},
    compute_message_hashes, hash_raw_transaction,
    hashes::strip_trailing_newline,
    networks::Network,
    render,
    transaction::{parse_address, TransactionError},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "safe-hashes",
    about = "Independently compute Safe multisig transaction hashes",
    version,
    long_about = r#"Compute the EIP-712 domain hash, message hash and safe transaction hash
of a Safe multisig transaction.

Transaction data is fetched from the Safe Transaction Service (or read from a
local JSON file) and every hash is recomputed locally. Compare the output with
what your signer displays before approving."#
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Target {
    /// Network the Safe is deployed on
    #[arg(short, long, value_enum, required_unless_present = "chain_id")]
    network: Option<Network>,

    /// Chain id, for chains without a named network entry
    #[arg(long, conflicts_with = "network")]
    chain_id: Option<u64>,

    /// Safe multisig address
    #[arg(short, long, value_parser = parse_safe_address)]
    address: Address,
}

impl Target {
    fn chain_id(&self) -> anyhow::Result<u64> {
        match (self.network, self.chain_id) {
            (Some(network), _) => Ok(network.chain_id()),
            (None, Some(chain_id)) => Ok(chain_id),
            (None, None) => anyhow::bail!("Either --network or --chain-id is required"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute hashes of a pending multisig transaction
    #[command(
        about = "Compute domain, message and safe transaction hashes",
        long_about = r#"Compute the hashes of one Safe multisig transaction.

Without --input the transaction is fetched from the Safe Transaction Service of
the selected network. Exactly one transaction must exist for the nonce; zero or
several candidates abort before hashing.

With --input the transaction is read from a JSON file holding either a single
transaction object or a service response page."#
    )]
    Transaction {
        #[command(flatten)]
        target: Target,

        /// Safe nonce of the transaction
        #[arg(long, required_unless_present = "input")]
        nonce: Option<u64>,

        /// Read the transaction from a JSON file instead of the service
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Override the transaction service base URL
        #[arg(long, env = "SAFE_TX_SERVICE_URL", value_name = "URL")]
        api_url: Option<String>,

        /// Print structured JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compute hashes of an off-chain message
    #[command(
        about = "Compute the hashes of a Safe off-chain message",
        long_about = r#"Compute the hashes of a Safe off-chain (EIP-191) message.

A single trailing newline (`\n` or `\r\n`), as added by most editors, is
removed before hashing so the result matches the text shown in the Safe UI.
Pass --raw to hash the file bytes exactly."#
    )]
    Message {
        #[command(flatten)]
        target: Target,

        /// File containing the raw message
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Hash the file content exactly, keeping a trailing newline
        #[arg(long)]
        raw: bool,

        /// Print structured JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List supported networks
    Networks,
}

fn parse_safe_address(s: &str) -> Result<Address, TransactionError> {
    parse_address("address", Some(s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Transaction {
            target,
            nonce,
            input,
            api_url,
            json,
        } => {
            transaction_hashes(&target, nonce, input, api_url, json).await?;
        }
        Commands::Message {
            target,
            file,
            raw,
            json,
        } => {
            message_hashes(&target, file, raw, json)?;
        }
        Commands::Networks => {
            list_networks();
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

async fn transaction_hashes(
    target: &Target,
    nonce: Option<u64>,
    input: Option<PathBuf>,
    api_url: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let chain_id = target.chain_id()?;

    let raw = match (input, nonce) {
        (Some(path), nonce) => {
            log::info!("Reading transaction data from {}", path.display());
            let data = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            api::parse_input(&data, nonce).context("Could not resolve a single transaction")?
        }
        (None, Some(nonce)) => {
            let client = match api_url {
                Some(url) => SafeApiClient::new(url),
                None => SafeApiClient::for_chain_id(chain_id),
            }
            .context("Network lookup failed")?;

            client
                .fetch_transaction(target.address, nonce)
                .await
                .context("Could not resolve a single transaction from the transaction service")?
        }
        (None, None) => anyhow::bail!("Either --nonce or --input is required"),
    };

    let result = hash_raw_transaction(chain_id, target.address, &raw)
        .context("Transaction data failed validation")?;

    if json {
        println!("{}", render::to_json(&result)?);
    } else {
        println!("{}", render::to_text(&result));
    }

    Ok(())
}

fn message_hashes(target: &Target, file: PathBuf, raw: bool, json: bool) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read message file: {}", file.display()))?;
    let message = if raw {
        contents.as_str()
    } else {
        strip_trailing_newline(&contents)
    };

    let result = compute_message_hashes(target.chain_id()?, target.address, message);

    if json {
        println!("{}", render::message_to_json(&result)?);
    } else {
        println!("{}", render::message_to_text(&result));
    }

    Ok(())
}

fn list_networks() {
    println!("Supported Networks");
    println!("==================");
    for network in Network::ALL {
        println!("  {:<15} {:>12}  {}", network.name(), network.chain_id(), network.api_url());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transaction_command() {
        let cli = Cli::try_parse_from([
            "safe-hashes",
            "transaction",
            "--network",
            "sepolia",
            "--address",
            "0x1234567890123456789012345678901234567890",
            "--nonce",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Transaction { target, nonce, .. } => {
                assert_eq!(target.chain_id().unwrap(), 11155111);
                assert_eq!(nonce, Some(3));
            }
            _ => panic!("expected transaction command"),
        }
    }

    #[test]
    fn test_custom_chain_id() {
        let cli = Cli::try_parse_from([
            "safe-hashes",
            "message",
            "--chain-id",
            "31337",
            "--address",
            "0x1234567890123456789012345678901234567890",
            "--file",
            "msg.txt",
        ])
        .unwrap();

        match cli.command {
            Commands::Message { target, raw, .. } => {
                assert_eq!(target.chain_id().unwrap(), 31337);
                assert!(!raw);
            }
            _ => panic!("expected message command"),
        }
    }

    #[test]
    fn test_message_raw_flag() {
        let cli = Cli::try_parse_from([
            "safe-hashes",
            "message",
            "--network",
            "ethereum",
            "--address",
            "0x1234567890123456789012345678901234567890",
            "--file",
            "msg.txt",
            "--raw",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Message { raw: true, .. }));
    }

    #[test]
    fn test_rejects_malformed_address() {
        let result = Cli::try_parse_from([
            "safe-hashes",
            "transaction",
            "--network",
            "ethereum",
            "--address",
            "0x1234",
            "--nonce",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_requires_network_or_chain_id() {
        let result = Cli::try_parse_from([
            "safe-hashes",
            "transaction",
            "--address",
            "0x1234567890123456789012345678901234567890",
            "--nonce",
            "0",
        ]);
        assert!(result.is_err());
    }
}
