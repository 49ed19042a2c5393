//! Token Issuance CLI Application
//!
//! A command-line driver for the ledger/manager pairing: construction,
//! transfers, minting, time-locked registration, and claims.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_issuance::cli::commands::{self, AppState, CliResult};

#[derive(Parser)]
#[command(name = "issuance")]
#[command(version = "0.1.0")]
#[command(about = "A pausable token ledger with time-locked issuance", long_about = None)]
struct Cli {
    /// Data directory for persisted state
    #[arg(short, long, default_value = ".issuance_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger/manager pairing
    Init {
        /// Owner address; derived from random bytes when omitted
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Show ledger and manager status
    Status,

    /// Show the balance of an account
    Balance {
        /// Account address
        #[arg(short, long)]
        address: String,
    },

    /// Transfer base units between accounts
    Transfer {
        /// Sender address
        #[arg(short, long)]
        from: String,

        /// Recipient address
        #[arg(short, long)]
        to: String,

        /// Amount in base units (10^-18 of a token)
        #[arg(short, long)]
        amount: u128,
    },

    /// Mint new base units (minter-only)
    Mint {
        /// Recipient address
        #[arg(short, long)]
        to: String,

        /// Amount in base units
        #[arg(short, long)]
        amount: u128,

        /// Caller address; defaults to the owner
        #[arg(short, long)]
        caller: Option<String>,
    },

    /// Register a time-locked allocation (minter-only)
    Register {
        /// Beneficiary address
        #[arg(short, long)]
        beneficiary: String,

        /// Amount in base units
        #[arg(short, long)]
        amount: u128,

        /// Unlock time as an RFC 3339 timestamp
        #[arg(long)]
        at: Option<String>,

        /// Unlock after this many seconds from now
        #[arg(long = "in")]
        in_secs: Option<i64>,

        /// Caller address; defaults to the owner
        #[arg(short, long)]
        caller: Option<String>,
    },

    /// Check whether a beneficiary can claim
    Eligible {
        /// Beneficiary address
        #[arg(short, long)]
        beneficiary: String,
    },

    /// Claim a released allocation as the beneficiary
    Claim {
        /// Beneficiary address
        #[arg(short, long)]
        beneficiary: String,
    },

    /// Pause the ledger or the manager (minter-only)
    Pause {
        #[command(subcommand)]
        target: PauseTarget,
    },

    /// Unpause the ledger or the manager (minter-only)
    Unpause {
        #[command(subcommand)]
        target: PauseTarget,
    },
}

#[derive(Subcommand)]
enum PauseTarget {
    /// The token ledger
    Token {
        /// Caller address; defaults to the owner
        #[arg(short, long)]
        caller: Option<String>,
    },

    /// The issuance manager
    Manager {
        /// Caller address; defaults to the owner
        #[arg(short, long)]
        caller: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Init { owner } => commands::cmd_init(&cli.data_dir, owner),

        Commands::Status => {
            let state = AppState::load(&cli.data_dir)?;
            commands::cmd_status(&state)
        }

        Commands::Balance { address } => {
            let state = AppState::load(&cli.data_dir)?;
            commands::cmd_balance(&state, &address)
        }

        Commands::Transfer { from, to, amount } => {
            let mut state = AppState::load(&cli.data_dir)?;
            commands::cmd_transfer(&mut state, &from, &to, amount)
        }

        Commands::Mint { to, amount, caller } => {
            let mut state = AppState::load(&cli.data_dir)?;
            commands::cmd_mint(&mut state, &to, amount, caller)
        }

        Commands::Register {
            beneficiary,
            amount,
            at,
            in_secs,
            caller,
        } => {
            let mut state = AppState::load(&cli.data_dir)?;
            let release_at = commands::resolve_release_at(at, in_secs)?;
            commands::cmd_register(&mut state, &beneficiary, amount, release_at, caller)
        }

        Commands::Eligible { beneficiary } => {
            let state = AppState::load(&cli.data_dir)?;
            commands::cmd_eligible(&state, &beneficiary)
        }

        Commands::Claim { beneficiary } => {
            let mut state = AppState::load(&cli.data_dir)?;
            commands::cmd_claim(&mut state, &beneficiary)
        }

        Commands::Pause { target } => {
            let mut state = AppState::load(&cli.data_dir)?;
            match target {
                PauseTarget::Token { caller } => commands::cmd_pause_token(&mut state, caller),
                PauseTarget::Manager { caller } => commands::cmd_pause_manager(&mut state, caller),
            }
        }

        Commands::Unpause { target } => {
            let mut state = AppState::load(&cli.data_dir)?;
            match target {
                PauseTarget::Token { caller } => commands::cmd_unpause_token(&mut state, caller),
                PauseTarget::Manager { caller } => {
                    commands::cmd_unpause_manager(&mut state, caller)
                }
            }
        }
    }
}
