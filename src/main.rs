//! Omnisig CLI Application
//!
//! A command-line interface over the wallet core: signing path resolution,
//! deposit previews, multisig address derivation, and account inspection.

use clap::{Parser, Subcommand};
use omnisig::cli;
use omnisig::crypto::DEFAULT_SS58_PREFIX;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "omnisig")]
#[command(version = "0.1.0")]
#[command(about = "Multisig and proxy wallet analysis toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve actionable signing paths for an account
    Paths {
        /// Account tree JSON file
        #[arg(short, long)]
        account: PathBuf,

        /// In-flight transaction JSON file
        #[arg(short, long)]
        transaction: Option<PathBuf>,

        /// Locally held signer addresses (comma-separated)
        #[arg(short, long)]
        signers: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview the deposit impact of submitting an extrinsic
    Deposit {
        /// Chain snapshot JSON file
        #[arg(short = 'n', long)]
        snapshot: PathBuf,

        /// Submitting signer address
        #[arg(short, long)]
        signer: String,

        /// Hex-encoded call bytes
        #[arg(short, long)]
        extrinsic: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive the deterministic multisig address for a signatory set
    Derive {
        /// Member addresses (comma-separated)
        #[arg(short, long)]
        members: String,

        /// Approval threshold
        #[arg(short, long)]
        threshold: u16,

        /// SS58 network prefix for display
        #[arg(short, long, default_value_t = DEFAULT_SS58_PREFIX)]
        prefix: u16,
    },

    /// Show and verify an account's delegation structure
    Inspect {
        /// Account tree JSON file
        #[arg(short, long)]
        account: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Deposit previews query the chain adapter, run them on a runtime
    if let Commands::Deposit {
        ref snapshot,
        ref signer,
        ref extrinsic,
        json,
    } = cli.command
    {
        let rt = tokio::runtime::Runtime::new()?;
        return rt.block_on(cli::cmd_deposit(snapshot, signer, extrinsic, json));
    }

    match cli.command {
        Commands::Deposit { .. } => unreachable!(),

        Commands::Paths {
            account,
            transaction,
            signers,
            json,
        } => {
            cli::cmd_paths(&account, transaction.as_deref(), &signers, json)?;
        }

        Commands::Derive {
            members,
            threshold,
            prefix,
        } => {
            cli::cmd_derive(&members, threshold, prefix)?;
        }

        Commands::Inspect { account } => {
            cli::cmd_inspect(&account)?;
        }
    }

    Ok(())
}
